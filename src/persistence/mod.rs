//! High score storage
//!
//! One integer survives across sessions under a fixed key. The browser build
//! keeps it in LocalStorage; native builds and tests use [`MemoryStore`].
//! Errors are typed here and swallowed by [`crate::HighScore`].

use thiserror::Error;

/// LocalStorage key for the high score
pub const HIGH_SCORE_KEY: &str = "alienHighScore";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("storage is not available")]
    Unavailable,
    #[error("storage access failed: {0}")]
    Access(String),
    #[error("stored high score {raw:?} is not a non-negative integer")]
    Parse { raw: String },
}

/// Where the high score lives between sessions
pub trait HighScoreStore {
    /// `Ok(None)` when nothing has been stored yet
    fn load_high_score(&self) -> Result<Option<u32>, StoreError>;
    fn save_high_score(&mut self, score: u32) -> Result<(), StoreError>;
}

/// Parse a persisted value. Accepts the bare number the game writes.
pub fn parse_high_score(raw: &str) -> Result<u32, StoreError> {
    serde_json::from_str::<u32>(raw.trim()).map_err(|_| StoreError::Parse {
        raw: raw.to_string(),
    })
}

/// In-process store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    raw: Option<String>,
    /// Number of successful saves
    pub saves: u32,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed with a raw persisted value, as if written by an earlier run
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            raw: Some(raw.into()),
            saves: 0,
        }
    }

    pub fn raw(&self) -> Option<&str> {
        self.raw.as_deref()
    }
}

impl HighScoreStore for MemoryStore {
    fn load_high_score(&self) -> Result<Option<u32>, StoreError> {
        self.raw.as_deref().map(parse_high_score).transpose()
    }

    fn save_high_score(&mut self, score: u32) -> Result<(), StoreError> {
        let raw = serde_json::to_string(&score).map_err(|e| StoreError::Access(e.to_string()))?;
        self.raw = Some(raw);
        self.saves += 1;
        Ok(())
    }
}

/// `window.localStorage` store (WASM only)
#[cfg(target_arch = "wasm32")]
pub struct LocalStore {
    key: &'static str,
}

#[cfg(target_arch = "wasm32")]
impl LocalStore {
    pub fn new() -> Self {
        Self {
            key: HIGH_SCORE_KEY,
        }
    }

    fn storage() -> Result<web_sys::Storage, StoreError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or(StoreError::Unavailable)
    }
}

#[cfg(target_arch = "wasm32")]
impl Default for LocalStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(target_arch = "wasm32")]
impl HighScoreStore for LocalStore {
    fn load_high_score(&self) -> Result<Option<u32>, StoreError> {
        let raw = Self::storage()?
            .get_item(self.key)
            .map_err(|e| StoreError::Access(format!("{:?}", e)))?;
        raw.as_deref().map(parse_high_score).transpose()
    }

    fn save_high_score(&mut self, score: u32) -> Result<(), StoreError> {
        Self::storage()?
            .set_item(self.key, &score.to_string())
            .map_err(|e| StoreError::Access(format!("{:?}", e)))
    }
}
