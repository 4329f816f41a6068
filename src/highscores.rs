//! High score leaderboards
//!
//! One top-5 list per (mode, operation), persisted to LocalStorage as a
//! single JSON record that is rewritten in full on every change.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{GameError, from_json_object};
use crate::platform::KeyValueStore;
use crate::problem::Operation;
use crate::session::GameMode;

/// Maximum number of high scores kept per list
pub const MAX_HIGH_SCORES: usize = 5;

/// Scores for one mode, keyed by operation
pub type ScoreBoard = BTreeMap<Operation, Vec<u32>>;

/// High score leaderboards for both modes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScores {
    #[serde(default)]
    pub classic: ScoreBoard,
    #[serde(default)]
    pub challenge: ScoreBoard,
}

impl HighScores {
    /// LocalStorage key
    pub const STORAGE_KEY: &'static str = "math_quest_highscores";

    /// Create empty leaderboards
    pub fn new() -> Self {
        Self::default()
    }

    fn board(&self, mode: GameMode) -> &ScoreBoard {
        match mode {
            GameMode::Classic => &self.classic,
            GameMode::Challenge => &self.challenge,
        }
    }

    fn board_mut(&mut self, mode: GameMode) -> &mut ScoreBoard {
        match mode {
            GameMode::Classic => &mut self.classic,
            GameMode::Challenge => &mut self.challenge,
        }
    }

    /// Scores for a (mode, operation) pair, best first
    pub fn scores(&self, mode: GameMode, op: Operation) -> &[u32] {
        self.board(mode).get(&op).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Best score for a (mode, operation) pair
    pub fn best(&self, mode: GameMode, op: Operation) -> Option<u32> {
        self.scores(mode, op).first().copied()
    }

    /// Check if a score qualifies for the leaderboard
    pub fn qualifies(&self, mode: GameMode, op: Operation, score: u32) -> bool {
        if score == 0 {
            return false;
        }
        let scores = self.scores(mode, op);
        if scores.len() < MAX_HIGH_SCORES {
            return true;
        }
        // Check if score beats the lowest entry
        scores.last().map(|&lowest| score > lowest).unwrap_or(true)
    }

    /// Add a score to the leaderboard (if it qualifies).
    /// Returns the rank achieved (1-indexed) or None if it didn't qualify.
    pub fn record(&mut self, mode: GameMode, op: Operation, score: u32) -> Option<usize> {
        if !self.qualifies(mode, op, score) {
            return None;
        }

        let scores = self.board_mut(mode).entry(op).or_default();

        // Insert after equal scores so older entries keep their rank
        let pos = scores
            .iter()
            .position(|&s| score > s)
            .unwrap_or(scores.len());
        scores.insert(pos, score);
        scores.truncate(MAX_HIGH_SCORES);

        Some(pos + 1)
    }

    /// Check if every leaderboard is empty
    pub fn is_empty(&self) -> bool {
        self.classic.values().chain(self.challenge.values()).all(Vec::is_empty)
    }

    /// Sort, drop zero entries and cap every list (hand-edited storage may be off)
    fn normalize(&mut self) {
        for scores in self
            .classic
            .values_mut()
            .chain(self.challenge.values_mut())
        {
            scores.retain(|&s| s > 0);
            scores.sort_unstable_by(|a, b| b.cmp(a));
            scores.truncate(MAX_HIGH_SCORES);
        }
    }

    /// Parse a stored table (must be a JSON object keyed by mode)
    pub fn from_json(json: &str) -> Result<Self, GameError> {
        let mut scores: HighScores = from_json_object(json)?;
        scores.normalize();
        Ok(scores)
    }

    /// Load high scores; missing or corrupt data gives empty leaderboards
    pub fn load(store: &impl KeyValueStore) -> Self {
        let Some(json) = store.get(Self::STORAGE_KEY) else {
            log::info!("No high scores found, starting fresh");
            return Self::new();
        };

        match Self::from_json(&json) {
            Ok(scores) => {
                log::info!("Loaded high scores");
                scores
            }
            Err(e) => {
                log::warn!("Ignoring corrupt high scores: {}", e);
                Self::new()
            }
        }
    }

    /// Save the whole table; failures are logged and otherwise ignored
    pub fn save(&self, store: &mut impl KeyValueStore) {
        let result = serde_json::to_string(self)
            .map_err(GameError::from)
            .and_then(|json| store.set(Self::STORAGE_KEY, &json));
        match result {
            Ok(()) => log::info!("High scores saved"),
            Err(e) => log::warn!("Failed to save high scores: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::MemoryStore;

    #[test]
    fn test_zero_never_qualifies() {
        let mut hs = HighScores::new();
        assert!(!hs.qualifies(GameMode::Classic, Operation::Add, 0));
        assert_eq!(hs.record(GameMode::Classic, Operation::Add, 0), None);
        assert!(hs.is_empty());
    }

    #[test]
    fn test_record_keeps_top_five_descending() {
        let mut hs = HighScores::new();
        for score in [30, 10, 50, 20, 40] {
            assert!(hs.record(GameMode::Classic, Operation::Add, score).is_some());
        }
        assert_eq!(hs.scores(GameMode::Classic, Operation::Add), &[50, 40, 30, 20, 10]);

        // Doesn't beat the lowest
        assert_eq!(hs.record(GameMode::Classic, Operation::Add, 10), None);
        assert_eq!(hs.record(GameMode::Classic, Operation::Add, 5), None);

        // Beats the lowest
        assert_eq!(hs.record(GameMode::Classic, Operation::Add, 35), Some(3));
        assert_eq!(hs.scores(GameMode::Classic, Operation::Add), &[50, 40, 35, 30, 20]);
        assert_eq!(hs.best(GameMode::Classic, Operation::Add), Some(50));
    }

    #[test]
    fn test_lists_are_independent() {
        let mut hs = HighScores::new();
        hs.record(GameMode::Classic, Operation::Add, 10);
        hs.record(GameMode::Challenge, Operation::Add, 20);
        hs.record(GameMode::Classic, Operation::Random, 30);
        assert_eq!(hs.scores(GameMode::Classic, Operation::Add), &[10]);
        assert_eq!(hs.scores(GameMode::Challenge, Operation::Add), &[20]);
        assert_eq!(hs.scores(GameMode::Classic, Operation::Random), &[30]);
        assert!(hs.scores(GameMode::Challenge, Operation::Factor).is_empty());
    }

    #[test]
    fn test_json_format() {
        let mut hs = HighScores::new();
        hs.record(GameMode::Classic, Operation::Multiply, 40);
        let json = serde_json::to_string(&hs).unwrap();
        assert_eq!(json, r#"{"classic":{"multiply":[40]},"challenge":{}}"#);
    }

    #[test]
    fn test_partial_table_defaults_missing_mode() {
        let hs = HighScores::from_json(r#"{"challenge":{"divide":[10,70,20]}}"#).unwrap();
        assert!(hs.classic.is_empty());
        assert_eq!(hs.scores(GameMode::Challenge, Operation::Divide), &[70, 20, 10]);
    }

    #[test]
    fn test_load_normalizes_lists() {
        let hs =
            HighScores::from_json(r#"{"classic":{"add":[1,9,0,3,7,5,8]},"challenge":{}}"#).unwrap();
        assert_eq!(hs.scores(GameMode::Classic, Operation::Add), &[9, 8, 7, 5, 3]);
    }

    #[test]
    fn test_load_corrupt_or_missing_is_empty() {
        let mut store = MemoryStore::new();
        assert!(HighScores::load(&store).is_empty());

        store.set(HighScores::STORAGE_KEY, "{not json").unwrap();
        assert!(HighScores::load(&store).is_empty());

        store.set(HighScores::STORAGE_KEY, r#"{"classic":[1,2,3]}"#).unwrap();
        assert!(HighScores::load(&store).is_empty());

        // Positional arrays are not a table
        store.set(HighScores::STORAGE_KEY, r#"[{"add":[50]}]"#).unwrap();
        assert!(HighScores::load(&store).is_empty());
        assert!(matches!(
            HighScores::from_json(r#"[{"add":[50]}]"#),
            Err(GameError::NotAnObject)
        ));
    }

    #[test]
    fn test_save_then_load() {
        let mut store = MemoryStore::new();
        let mut hs = HighScores::new();
        hs.record(GameMode::Challenge, Operation::Factor, 120);
        hs.save(&mut store);

        let loaded = HighScores::load(&store);
        assert_eq!(loaded, hs);
    }
}
