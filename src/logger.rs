use anyhow::{Context, Result};
use chrono::Utc;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::constants::{APP_NAME, LOG_FILE_NAME};

/// Shared logger that can be used across the application
///
/// Every entry is kept in memory for the log panel. When file logging is
/// enabled, a `fern` dispatcher is installed behind the `log` facade and the
/// same entries (plus every `log::info!` from the library) go to disk.
#[derive(Clone)]
pub struct Logger {
    logs: Arc<Mutex<Vec<String>>>,
    log_file: Option<PathBuf>,
}

impl Logger {
    pub fn new() -> Self {
        Self {
            logs: Arc::new(Mutex::new(Vec::new())),
            log_file: None,
        }
    }

    /// Create a logger honouring the `logging.enabled` setting
    pub fn from_config(enabled: bool) -> Result<Self> {
        let mut logger = Self::new();
        if enabled {
            let path = Self::get_log_file_path()?;
            Self::install_file_dispatch(&path)?;
            logger.log_file = Some(path);
        }
        Ok(logger)
    }

    fn install_file_dispatch(path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create log directory: {}", parent.display()))?;
        }

        let file = fern::log_file(path).with_context(|| format!("Failed to open log file: {}", path.display()))?;

        let dispatch = fern::Dispatch::new()
            .format(|out, message, record| {
                out.finish(format_args!(
                    "{} {:<5} [{}] {}",
                    Utc::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                    record.level(),
                    record.target(),
                    message
                ))
            })
            .level(log::LevelFilter::Info)
            .level_for("sea_orm", log::LevelFilter::Warn)
            .level_for("sqlx", log::LevelFilter::Warn)
            .chain(file);

        // A global logger can only be set once per process
        if dispatch.apply().is_err() {
            log::debug!("Global logger already installed, reusing it");
        }
        Ok(())
    }

    /// Path of the log file inside the local data directory
    pub fn get_log_file_path() -> Result<PathBuf> {
        let base = dirs::data_local_dir().unwrap_or_else(std::env::temp_dir);
        Ok(base.join(APP_NAME).join(LOG_FILE_NAME))
    }

    pub fn is_enabled(&self) -> bool {
        self.log_file.is_some()
    }

    pub fn log_file(&self) -> Option<&PathBuf> {
        self.log_file.as_ref()
    }

    /// Add a log entry
    pub fn log(&self, message: String) {
        let timestamp = Utc::now().format("%H:%M:%S%.3f").to_string();
        let formatted_message = format!("[{}] {}", timestamp, message);

        log::info!(target: APP_NAME, "{}", message);

        if let Ok(mut logs) = self.logs.lock() {
            logs.push(formatted_message);
        }
    }

    /// Get all logs sorted by date (newest first)
    pub fn get_logs(&self) -> Vec<String> {
        if let Ok(logs) = self.logs.lock() {
            let mut sorted_logs = logs.clone();
            sorted_logs.reverse();
            sorted_logs
        } else {
            Vec::new()
        }
    }

    /// Clear all logs
    pub fn clear(&self) {
        if let Ok(mut logs) = self.logs.lock() {
            logs.clear();
        }
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}
