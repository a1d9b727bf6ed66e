mod file_store;
mod memory_store;

pub use file_store::{FileHighScoreStore, HighScoreRecord};
pub use memory_store::{MemoryHighScoreStore, NullHighScoreStore};

use crate::config::ConfigError;

#[derive(Debug)]
pub enum PersistenceError {
    Storage(ConfigError),
    Unavailable(String),
}

impl std::fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PersistenceError::Storage(e) => write!(f, "High score storage error: {}", e),
            PersistenceError::Unavailable(e) => write!(f, "High score storage unavailable: {}", e),
        }
    }
}

impl std::error::Error for PersistenceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PersistenceError::Storage(e) => Some(e),
            PersistenceError::Unavailable(_) => None,
        }
    }
}

impl From<ConfigError> for PersistenceError {
    fn from(e: ConfigError) -> Self {
        PersistenceError::Storage(e)
    }
}

/// Port through which the engine keeps the high score across sessions.
/// Failures are reported to the caller but never stop a game.
pub trait HighScoreStore {
    /// `Ok(None)` when nothing has been saved yet.
    fn load_high_score(&self) -> Result<Option<u32>, PersistenceError>;
    fn save_high_score(&self, value: u32) -> Result<(), PersistenceError>;
}

impl<S: HighScoreStore + ?Sized> HighScoreStore for Box<S> {
    fn load_high_score(&self) -> Result<Option<u32>, PersistenceError> {
        (**self).load_high_score()
    }

    fn save_high_score(&self, value: u32) -> Result<(), PersistenceError> {
        (**self).save_high_score(value)
    }
}
