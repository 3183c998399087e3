use directories::ProjectDirs;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Installs the process-wide subscriber: env-filtered console output plus a
/// daily-rolling file log under the platform data directory. Returns the
/// guard keeping the file writer flushing; the host holds it for the process
/// lifetime. `None` when a subscriber was already installed.
pub fn init() -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let appender = tracing_appender::rolling::daily(log_dir(), "pakshelf.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .with(fmt::layer().with_ansi(false).with_writer(writer))
        .try_init()
        .ok()
        .map(|_| guard)
}

fn log_dir() -> PathBuf {
    ProjectDirs::from("com", "pakshelf", "pakshelf")
        .map(|dirs| dirs.data_dir().join("logs"))
        .or_else(|| {
            std::env::current_exe()
                .ok()
                .and_then(|exe| exe.parent().map(|dir| dir.join("logs")))
        })
        .unwrap_or_else(|| PathBuf::from("logs"))
}
