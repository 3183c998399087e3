use crate::config::{self, AppConfig, WindowSize};
use crate::core::shelf::Shelf;
use crate::models::session::Session;
use camino::Utf8PathBuf;
use parking_lot::Mutex;
use std::sync::Arc;

/// Shared handles for an embedding shell. `Arc<Mutex<Option<_>>>` lets the
/// active shelf be swapped whole when the user re-points either directory.
pub struct ShelfRegistry {
    pub active: Arc<Mutex<Option<Shelf>>>,
    pub config: Arc<Mutex<AppConfig>>,
    pub session: Arc<Mutex<Session>>,
}

impl ShelfRegistry {
    /// Loads the persisted configuration and opens a shelf when both roots
    /// are already configured.
    pub fn new() -> Self {
        let config = config::load_config();
        let session = Session::from_config(&config);
        let active = open_from(&config);
        Self {
            active: Arc::new(Mutex::new(active)),
            config: Arc::new(Mutex::new(config)),
            session: Arc::new(Mutex::new(session)),
        }
    }

    pub fn set_repository(&self, path: Utf8PathBuf) {
        let mut config = self.config.lock();
        config.repository = Some(path);
        config::save_config(&config);
        *self.active.lock() = open_from(&config);
    }

    pub fn set_game_dir(&self, path: Utf8PathBuf) {
        let mut config = self.config.lock();
        config.game_dir = Some(path);
        config::save_config(&config);
        *self.active.lock() = open_from(&config);
    }

    pub fn set_language(&self, language: String) {
        let mut config = self.config.lock();
        config.language = language;
        config::save_config(&config);
    }

    pub fn set_window_size(&self, size: WindowSize) {
        let mut config = self.config.lock();
        config.window_size = size.sanitized();
        config::save_config(&config);
    }

    /// Writes the session's persisted subset back into the configuration and
    /// stores it. Called after every mutating action and on shutdown.
    pub fn persist_session(&self) {
        let session = self.session.lock();
        let mut config = self.config.lock();
        session.write_back(&mut config);
        config::save_config(&config);
    }
}

impl Default for ShelfRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn open_from(config: &AppConfig) -> Option<Shelf> {
    match (&config.repository, &config.game_dir) {
        (Some(repo), Some(game)) => Some(Shelf::open(repo.clone(), game.clone())),
        _ => None,
    }
}
