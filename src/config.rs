use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use tracing::warn;

const APP_NAME: &str = "pakshelf";
const CONFIG_NAME: &str = "config";

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowSize {
    pub width: u32,
    pub height: u32,
}

impl Default for WindowSize {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 850,
        }
    }
}

impl WindowSize {
    /// Implausibly small stored sizes are replaced by the default rather
    /// than restoring an unusable window.
    pub fn sanitized(self) -> Self {
        if self.width > 100 && self.height > 100 {
            self
        } else {
            Self::default()
        }
    }
}

/// The persisted application record: loaded once at startup, stored after
/// every mutating action.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct AppConfig {
    pub repository: Option<Utf8PathBuf>,
    pub game_dir: Option<Utf8PathBuf>,
    pub language: String,
    pub folder_states: BTreeMap<String, bool>,
    pub known_packages: BTreeSet<String>,
    pub window_size: WindowSize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            repository: None,
            game_dir: None,
            language: "en".to_string(),
            folder_states: BTreeMap::new(),
            known_packages: BTreeSet::new(),
            window_size: WindowSize::default(),
        }
    }
}

/// Missing or malformed configuration silently falls back to defaults;
/// startup never fails on config problems.
pub fn load_config() -> AppConfig {
    let mut config: AppConfig = confy::load(APP_NAME, CONFIG_NAME).unwrap_or_default();
    config.window_size = config.window_size.sanitized();
    config
}

pub fn save_config(config: &AppConfig) {
    if let Err(err) = confy::store(APP_NAME, CONFIG_NAME, config) {
        warn!("failed to store configuration: {err}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_usable() {
        let config = AppConfig::default();
        assert!(config.repository.is_none());
        assert_eq!(config.language, "en");
        assert_eq!(config.window_size, WindowSize::default());
    }

    #[test]
    fn tiny_window_sizes_reset_to_default() {
        let stored = WindowSize {
            width: 80,
            height: 600,
        };
        assert_eq!(stored.sanitized(), WindowSize::default());

        let kept = WindowSize {
            width: 1024,
            height: 768,
        };
        assert_eq!(kept.sanitized(), kept);
    }
}
