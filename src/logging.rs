use std::env;
use std::fs::{File, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const LOG_ENV: &str = "MINIGAME_LEVELS_LOG";
const LOG_FILE_NAME: &str = "minigame-levels.log";

/// Routes tracing output to a log file so the full-screen terminal stays clean.
///
/// Filter comes from `RUST_LOG` (default `info`). If no log file can be
/// opened, events are dropped.
pub fn init_tracing()
{
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    match open_log_file() {
        Some((path, file)) => {
            let installed = tracing_subscriber::registry()
                .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
                .with(env_filter)
                .try_init();
            if installed.is_ok() {
                tracing::info!(path = %path.display(), "logging initialized");
            }
        }
        None => {
            let _ = tracing_subscriber::registry().with(env_filter).try_init();
        }
    }
}

fn log_path() -> PathBuf
{
    env::var_os(LOG_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| env::temp_dir().join(LOG_FILE_NAME))
}

fn open_log_file() -> Option<(PathBuf, File)>
{
    let path = log_path();
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .ok()
        .map(|file| (path, file))
}
