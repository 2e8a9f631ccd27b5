//! Browser sessionStorage backend (cleared when the browser session ends)

use super::{HighScoreStore, parse_score};

/// High score kept in `window.sessionStorage`
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionStorageHighScore;

impl SessionStorageHighScore {
    /// sessionStorage key
    const STORAGE_KEY: &'static str = "cosmicImpactHighScore";

    pub fn new() -> Self {
        Self
    }

    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()
            .and_then(|w| w.session_storage().ok())
            .flatten()
    }
}

impl HighScoreStore for SessionStorageHighScore {
    fn get(&self) -> Option<u64> {
        let raw = Self::storage()?.get_item(Self::STORAGE_KEY).ok()??;
        let score = parse_score(&raw);
        match score {
            Some(score) => log::info!("Loaded high score {}", score),
            None => log::warn!("Ignoring unreadable stored high score {:?}", raw),
        }
        score
    }

    fn set(&mut self, score: u64) {
        let Some(storage) = Self::storage() else {
            log::warn!("sessionStorage unavailable, high score not saved");
            return;
        };
        match storage.set_item(Self::STORAGE_KEY, &score.to_string()) {
            Ok(()) => log::info!("High score {} saved", score),
            Err(err) => log::warn!("Failed to save high score: {:?}", err),
        }
    }
}
