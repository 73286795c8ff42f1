mod config;
pub mod database;
mod progress;

pub use config::{Config, QuizConfig, StorageConfig};
pub use database::{Database, ResultRecord};
pub use progress::{KvProgressStore, MemoryProgressStore, ProgressStore};

use std::path::PathBuf;

use crate::error::StorageError;

/// Returns `~/.config/quizroom[-dev]/` based on QUIZROOM_ENV.
///
/// Set QUIZROOM_ENV=dev to use development data directory.
/// QUIZROOM_DATA_DIR, when set, replaces the whole path.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, StorageError> {
    let dir = match std::env::var_os("QUIZROOM_DATA_DIR") {
        Some(dir) => PathBuf::from(dir),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("QUIZROOM_ENV").unwrap_or_else(|_| "production".to_string());

            if env == "dev" {
                base_dir.join("quizroom-dev")
            } else {
                base_dir.join("quizroom")
            }
        }
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| StorageError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
