//! Session state
//!
//! Everything the UI reads lives here. Only the controller mutates it.

use serde::{Deserialize, Serialize};

use super::effect::Ticket;
use crate::problem::{Operation, Problem};
use crate::tuning::Tuning;

/// Which screen is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Screen {
    /// Operation picker (initial screen)
    Menu,
    /// Operation picker for timed play
    ChallengeMenu,
    /// A problem is on screen (or the next one is on its way)
    Playing,
    /// Out of lives
    GameOver,
    /// Leaderboards
    HighScores,
}

/// Untimed or timed play
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    #[default]
    Classic,
    Challenge,
}

impl GameMode {
    pub const ALL: [GameMode; 2] = [GameMode::Classic, GameMode::Challenge];

    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::Classic => "classic",
            GameMode::Challenge => "challenge",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            GameMode::Classic => "Classic",
            GameMode::Challenge => "Challenge",
        }
    }
}

/// Per-problem countdown (challenge mode only)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Countdown {
    pub remaining_secs: u32,
    pub duration_secs: u32,
    /// Ticks carrying any other ticket are stale
    pub ticket: Ticket,
}

impl Countdown {
    /// Fraction of time left (1.0 = full), for the timer bar
    pub fn fraction_left(&self) -> f32 {
        if self.duration_secs == 0 {
            return 0.0;
        }
        self.remaining_secs as f32 / self.duration_secs as f32
    }
}

/// How the last problem went
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    Correct,
    Incorrect,
    TimeUp,
}

/// Message shown under the problem after it was judged
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feedback {
    pub verdict: Verdict,
    pub message: String,
}

/// Complete session state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub screen: Screen,
    pub mode: GameMode,
    /// Difficulty tier (starts at 1)
    pub level: u32,
    pub lives: u32,
    pub score: u32,
    /// Correct answers since the last level-up
    pub score_in_level: u32,
    pub operation: Operation,
    pub problem: Option<Problem>,
    pub countdown: Option<Countdown>,
    pub feedback: Option<Feedback>,
    /// Set at game over when the final score made the leaderboard
    pub new_high_score: bool,
}

impl Session {
    /// Fresh session on the menu
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            screen: Screen::Menu,
            mode: GameMode::Classic,
            level: 1,
            lives: tuning.starting_lives,
            score: 0,
            score_in_level: 0,
            operation: Operation::Add,
            problem: None,
            countdown: None,
            feedback: None,
            new_high_score: false,
        }
    }

    /// Reset for a new game; always level 1 with full lives and no score
    pub fn reset(&mut self, mode: GameMode, operation: Operation, tuning: &Tuning) {
        *self = Self {
            screen: Screen::Playing,
            mode,
            operation,
            ..Self::new(tuning)
        };
    }

    pub fn is_playing(&self) -> bool {
        self.screen == Screen::Playing
    }

    pub fn is_timed(&self) -> bool {
        self.mode == GameMode::Challenge
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_starts_fresh() {
        let tuning = Tuning::default();
        let mut session = Session::new(&tuning);
        session.level = 7;
        session.lives = 1;
        session.score = 420;
        session.score_in_level = 3;
        session.new_high_score = true;

        session.reset(GameMode::Challenge, Operation::Divide, &tuning);
        assert_eq!(session.screen, Screen::Playing);
        assert_eq!(session.mode, GameMode::Challenge);
        assert_eq!(session.operation, Operation::Divide);
        assert_eq!(session.level, 1);
        assert_eq!(session.lives, 3);
        assert_eq!(session.score, 0);
        assert_eq!(session.score_in_level, 0);
        assert!(!session.new_high_score);
        assert!(session.problem.is_none());
    }

    #[test]
    fn test_countdown_fraction() {
        let c = Countdown {
            remaining_secs: 5,
            duration_secs: 10,
            ticket: Ticket::new(1),
        };
        assert!((c.fraction_left() - 0.5).abs() < f32::EPSILON);
    }
}
