//! Game settings and preferences
//!
//! Persisted separately from the high score in LocalStorage.

use serde::{Deserialize, Serialize};

use crate::consts::{HINT_HIT_LIMIT, ROUND_SECONDS};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Session length in seconds
    pub round_seconds: u32,

    // === Hints ===
    /// Highlight the solution alien for new players
    pub hints: bool,
    /// Correct hits after which the highlight switches off
    pub hint_hit_limit: u32,

    // === Practice ===
    /// Fixed RNG seed for reproducible runs (random when unset)
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            round_seconds: ROUND_SECONDS,
            hints: true,
            hint_hit_limit: HINT_HIT_LIMIT,
            seed: None,
        }
    }
}

impl Settings {
    /// Parse from JSON, falling back to defaults on malformed input
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str::<Settings>(json) {
            Ok(settings) => settings.sanitized(),
            Err(e) => {
                log::warn!("Ignoring malformed settings: {}", e);
                Self::default()
            }
        }
    }

    /// Clamp values the session can't run with
    pub fn sanitized(mut self) -> Self {
        self.round_seconds = self.round_seconds.max(1);
        self
    }

    /// Effective hint limit (0 disables the highlight entirely)
    pub fn hint_limit(&self) -> u32 {
        if self.hints { self.hint_hit_limit } else { 0 }
    }

    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "alien_bonds_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                log::info!("Loaded settings from LocalStorage");
                return Self::from_json(&json);
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Native: optional JSON in `ALIEN_BONDS_SETTINGS`
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        match std::env::var("ALIEN_BONDS_SETTINGS") {
            Ok(json) => Self::from_json(&json),
            Err(_) => Self::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.round_seconds, 60);
        assert_eq!(settings.hint_limit(), 5);
        assert_eq!(settings.seed, None);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = Settings::from_json(r#"{"seed": 7}"#);
        assert_eq!(settings.seed, Some(7));
        assert_eq!(settings.round_seconds, 60);
        assert!(settings.hints);
    }

    #[test]
    fn test_malformed_json_falls_back() {
        assert_eq!(Settings::from_json("{not json"), Settings::default());
        assert_eq!(Settings::from_json(r#"{"round_seconds": -1}"#), Settings::default());
    }

    #[test]
    fn test_stored_json_reloads() {
        let settings = Settings {
            round_seconds: 45,
            hints: false,
            hint_hit_limit: 3,
            seed: Some(99),
        };
        let json = serde_json::to_string(&settings).unwrap();
        assert_eq!(Settings::from_json(&json), settings);
    }

    #[test]
    fn test_sanitize_and_hint_toggle() {
        let settings = Settings::from_json(r#"{"round_seconds": 0, "hints": false}"#);
        assert_eq!(settings.round_seconds, 1);
        assert_eq!(settings.hint_limit(), 0);
    }
}
