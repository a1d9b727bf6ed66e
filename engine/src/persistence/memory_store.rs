use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use super::{HighScoreStore, PersistenceError};

/// In-process store. Clones share the same value, which lets a host (or a
/// test) keep a handle while the engine owns another.
#[derive(Clone, Default)]
pub struct MemoryHighScoreStore {
    value: Arc<Mutex<Option<u32>>>,
    saves: Arc<Mutex<Vec<u32>>>,
    loads: Arc<AtomicUsize>,
}

impl MemoryHighScoreStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(value: u32) -> Self {
        let store = Self::new();
        *store.value.lock().unwrap_or_else(|e| e.into_inner()) = Some(value);
        store
    }

    pub fn value(&self) -> Option<u32> {
        *self.value.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Every value passed to `save_high_score`, oldest first.
    pub fn saves(&self) -> Vec<u32> {
        self.saves.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Number of `load_high_score` calls so far.
    pub fn loads(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }
}

impl HighScoreStore for MemoryHighScoreStore {
    fn load_high_score(&self) -> Result<Option<u32>, PersistenceError> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        Ok(self.value())
    }

    fn save_high_score(&self, value: u32) -> Result<(), PersistenceError> {
        *self.value.lock().unwrap_or_else(|e| e.into_inner()) = Some(value);
        self.saves.lock().unwrap_or_else(|e| e.into_inner()).push(value);
        Ok(())
    }
}

/// Host without persistence: nothing is loaded, saves are discarded.
#[derive(Clone, Copy, Default)]
pub struct NullHighScoreStore;

impl HighScoreStore for NullHighScoreStore {
    fn load_high_score(&self) -> Result<Option<u32>, PersistenceError> {
        Ok(None)
    }

    fn save_high_score(&self, _value: u32) -> Result<(), PersistenceError> {
        Ok(())
    }
}
