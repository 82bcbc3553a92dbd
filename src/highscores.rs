//! High score leaderboard
//!
//! Persisted to LocalStorage, tracks the top 10 runs.

use serde::{Deserialize, Serialize};

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A single finished run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub score: u64,
    /// Unix timestamp (ms) when achieved
    pub timestamp: f64,
}

/// High score leaderboard, sorted descending by score
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "dot_blitz_highscores";

    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a score would make the board
    pub fn qualifies(&self, score: u64) -> bool {
        if score == 0 {
            return false;
        }
        self.entries.len() < MAX_HIGH_SCORES
            || self.entries.last().is_some_and(|e| score > e.score)
    }

    /// Record a finished run. Returns the 1-indexed rank achieved, or `None`
    /// if the score didn't qualify.
    pub fn add_score(&mut self, score: u64, timestamp: f64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }

        let pos = self
            .entries
            .iter()
            .position(|e| score > e.score)
            .unwrap_or(self.entries.len());
        self.entries.insert(pos, HighScoreEntry { score, timestamp });
        self.entries.truncate(MAX_HIGH_SCORES);

        Some(pos + 1)
    }

    /// The best recorded score, if any
    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }

    /// Load high scores from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage
            && let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY)
            && let Ok(scores) = serde_json::from_str::<HighScores>(&json)
        {
            log::info!("Loaded {} high scores", scores.entries.len());
            return scores;
        }

        log::info!("No high scores found, starting fresh");
        Self::new()
    }

    /// Save high scores to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage
            && let Ok(json) = serde_json::to_string(self)
        {
            let _ = storage.set_item(Self::STORAGE_KEY, &json);
            log::info!("High scores saved ({} entries)", self.entries.len());
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::new()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_score_never_qualifies() {
        let board = HighScores::new();
        assert!(!board.qualifies(0));
        assert!(board.qualifies(100));
    }

    #[test]
    fn test_add_score_sorts_and_ranks() {
        let mut board = HighScores::new();
        assert_eq!(board.add_score(500, 0.0), Some(1));
        assert_eq!(board.add_score(900, 1.0), Some(1));
        assert_eq!(board.add_score(700, 2.0), Some(2));
        assert_eq!(board.top_score(), Some(900));
        let scores: Vec<u64> = board.entries.iter().map(|e| e.score).collect();
        assert_eq!(scores, vec![900, 700, 500]);
    }

    #[test]
    fn test_board_is_capped() {
        let mut board = HighScores::new();
        for i in 1..=15u64 {
            board.add_score(i * 100, i as f64);
        }
        assert_eq!(board.entries.len(), MAX_HIGH_SCORES);
        assert_eq!(board.top_score(), Some(1500));
        // Scores below the cut no longer qualify
        assert!(!board.qualifies(100));
    }
}
