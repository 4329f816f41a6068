//! Data-driven game balance
//!
//! Defaults come from `crate::consts`. A JSON override only needs the
//! fields it changes and must be an object.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{GameError, from_json_object};
use crate::platform::KeyValueStore;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Lives at game start and after each level-up
    pub starting_lives: u32,
    /// Correct answers needed to reach the next level
    pub points_to_level_up: u32,
    /// Score per correct answer is this times the level
    pub points_per_level: u32,
    /// Pause after a correct answer before the next problem (ms)
    pub correct_delay_ms: u32,
    /// Pause after a wrong answer, long enough to read the explanation (ms)
    pub incorrect_delay_ms: u32,
    /// Pause after the countdown runs out (ms)
    pub timeout_delay_ms: u32,
    /// Challenge countdown at level 0
    pub timer_base_secs: u32,
    /// Challenge countdown never drops below this
    pub timer_min_secs: u32,
    /// Countdown loses one second every this many levels
    pub timer_level_divisor: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            starting_lives: STARTING_LIVES,
            points_to_level_up: POINTS_TO_LEVEL_UP,
            points_per_level: POINTS_PER_LEVEL,
            correct_delay_ms: CORRECT_DELAY_MS,
            incorrect_delay_ms: INCORRECT_DELAY_MS,
            timeout_delay_ms: TIMEOUT_DELAY_MS,
            timer_base_secs: TIMER_BASE_SECS,
            timer_min_secs: TIMER_MIN_SECS,
            timer_level_divisor: TIMER_LEVEL_DIVISOR,
        }
    }
}

impl Tuning {
    /// Storage key for a balance override
    pub const STORAGE_KEY: &'static str = "math_quest_tuning";

    /// Parse a (possibly partial) override
    pub fn from_json(json: &str) -> Result<Self, GameError> {
        from_json_object(json)
    }

    /// Load the stored override, falling back to defaults
    pub fn load(store: &impl KeyValueStore) -> Self {
        let Some(json) = store.get(Self::STORAGE_KEY) else {
            return Self::default();
        };
        match Self::from_json(&json) {
            Ok(tuning) => {
                log::info!("Loaded tuning override");
                tuning
            }
            Err(e) => {
                log::warn!("Ignoring bad tuning override: {}", e);
                Self::default()
            }
        }
    }

    /// Challenge countdown for a level: max(min, base - level / divisor)
    pub fn timer_secs(&self, level: u32) -> u32 {
        let drop = level / self.timer_level_divisor.max(1);
        self.timer_base_secs
            .saturating_sub(drop)
            .max(self.timer_min_secs)
    }

    /// Score awarded for a correct answer at `level`
    pub fn points_for(&self, level: u32) -> u32 {
        self.points_per_level.saturating_mul(level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::MemoryStore;

    #[test]
    fn test_timer_curve() {
        let t = Tuning::default();
        assert_eq!(t.timer_secs(1), 12);
        assert_eq!(t.timer_secs(2), 11);
        assert_eq!(t.timer_secs(5), 10);
        assert_eq!(t.timer_secs(14), 5);
        assert_eq!(t.timer_secs(20), 5);
        assert_eq!(t.timer_secs(u32::MAX), 5);
    }

    #[test]
    fn test_points_scale_with_level() {
        let t = Tuning::default();
        assert_eq!(t.points_for(1), 10);
        assert_eq!(t.points_for(4), 40);
    }

    #[test]
    fn test_partial_override() {
        let t = Tuning::from_json(r#"{"starting_lives": 5, "timer_min_secs": 3}"#).unwrap();
        assert_eq!(t.starting_lives, 5);
        assert_eq!(t.timer_min_secs, 3);
        assert_eq!(t.points_to_level_up, POINTS_TO_LEVEL_UP);
    }

    #[test]
    fn test_bad_override_is_error() {
        assert!(matches!(Tuning::from_json("[]"), Err(GameError::NotAnObject)));
        assert!(matches!(Tuning::from_json("[3, 5]"), Err(GameError::NotAnObject)));
        assert!(matches!(
            Tuning::from_json(r#"{"starting_lives": "three"}"#),
            Err(GameError::Serialization(_))
        ));
    }

    #[test]
    fn test_load_from_store() {
        let mut store = MemoryStore::new();
        assert_eq!(Tuning::load(&store), Tuning::default());

        store
            .set(Tuning::STORAGE_KEY, r#"{"points_to_level_up": 3}"#)
            .unwrap();
        assert_eq!(Tuning::load(&store).points_to_level_up, 3);

        store.set(Tuning::STORAGE_KEY, "[]").unwrap();
        assert_eq!(Tuning::load(&store), Tuning::default());
    }
}
