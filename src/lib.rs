//! Math Quest - arithmetic practice for kids
//!
//! Core modules:
//! - `problem`: Level-scaled problem generation and answer checking
//! - `session`: Game state machine (menu, play, game over, high scores)
//! - `highscores`: Per-mode, per-operation leaderboards
//! - `platform`: Browser/native platform abstraction (storage, logging)
//! - `tuning`: Data-driven game balance
//! - `settings`: Player preferences

pub mod error;
pub mod highscores;
pub mod platform;
pub mod problem;
pub mod session;
pub mod settings;
pub mod tuning;

#[cfg(target_arch = "wasm32")]
pub mod audio;

pub use error::GameError;
pub use highscores::HighScores;
pub use problem::{Operation, Problem, ProblemKind};
pub use session::{Controller, Effect, GameMode, Screen};
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Lives at the start of a game and after every level-up
    pub const STARTING_LIVES: u32 = 3;
    /// Correct answers per level
    pub const POINTS_TO_LEVEL_UP: u32 = 5;
    /// Score for a correct answer is this times the level
    pub const POINTS_PER_LEVEL: u32 = 10;

    /// Delays before the next problem (ms)
    pub const CORRECT_DELAY_MS: u32 = 1200;
    pub const INCORRECT_DELAY_MS: u32 = 3500;
    pub const TIMEOUT_DELAY_MS: u32 = 1500;

    /// Challenge countdown: max(5, 12 - level / 2) seconds
    pub const TIMER_BASE_SECS: u32 = 12;
    pub const TIMER_MIN_SECS: u32 = 5;
    pub const TIMER_LEVEL_DIVISOR: u32 = 2;
}
