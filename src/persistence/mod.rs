//! High score persistence
//!
//! The session reads the stored value once at startup and writes it back
//! whenever a run ends above it. Writes are best effort: failures are logged
//! and the in-memory high score carries on regardless.

#[cfg(target_arch = "wasm32")]
mod session_storage;

#[cfg(target_arch = "wasm32")]
pub use session_storage::SessionStorageHighScore;

/// Storage for the single best score
pub trait HighScoreStore {
    /// Stored high score, if any
    fn get(&self) -> Option<u64>;
    /// Store a new high score (fire-and-forget)
    fn set(&mut self, score: u64);
}

/// Decode a stored score; anything unparsable counts as absent
pub fn parse_score(raw: &str) -> Option<u64> {
    raw.trim().parse().ok()
}

/// In-process store (native builds and tests)
#[derive(Debug, Clone, Default)]
pub struct MemoryHighScore {
    value: Option<u64>,
    writes: u32,
}

impl MemoryHighScore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with `score`
    pub fn with_score(score: u64) -> Self {
        Self {
            value: Some(score),
            writes: 0,
        }
    }

    /// Number of `set` calls received
    pub fn writes(&self) -> u32 {
        self.writes
    }
}

impl HighScoreStore for MemoryHighScore {
    fn get(&self) -> Option<u64> {
        self.value
    }

    fn set(&mut self, score: u64) {
        self.value = Some(score);
        self.writes += 1;
    }
}

impl<S: HighScoreStore + ?Sized> HighScoreStore for Box<S> {
    fn get(&self) -> Option<u64> {
        (**self).get()
    }

    fn set(&mut self, score: u64) {
        (**self).set(score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_score() {
        assert_eq!(parse_score("1250"), Some(1250));
        assert_eq!(parse_score(" 40\n"), Some(40));
        assert_eq!(parse_score(""), None);
        assert_eq!(parse_score("-5"), None);
        assert_eq!(parse_score("lots"), None);
    }

    #[test]
    fn test_memory_store() {
        let mut store = MemoryHighScore::new();
        assert_eq!(store.get(), None);
        store.set(300);
        assert_eq!(store.get(), Some(300));
        assert_eq!(store.writes(), 1);

        let boxed: Box<dyn HighScoreStore> = Box::new(MemoryHighScore::with_score(80));
        assert_eq!(boxed.get(), Some(80));
    }
}
