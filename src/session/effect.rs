//! Effects the controller asks the host to carry out
//!
//! The controller never touches timers or audio itself. It queues effects;
//! the host drains them after each command and calls back with the ticket
//! it was given.

use serde::{Deserialize, Serialize};

use super::state::Feedback;
use crate::problem::Problem;

/// Identity of one scheduled callback
///
/// Tickets are issued in increasing order and never reused, so a callback
/// that arrives after the session moved on carries a ticket the controller
/// no longer expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Ticket(u64);

impl Ticket {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn id(&self) -> u64 {
        self.0
    }
}

/// Sound cues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cue {
    Correct,
    Incorrect,
    TimeUp,
    LevelUp,
    GameOver,
    HighScore,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// A new problem is on screen; clear the answer fields and focus input
    ProblemReady(Problem),
    /// Show feedback for the answer just judged
    Feedback(Feedback),
    /// Call `advance(ticket)` after `delay_ms`
    ScheduleAdvance { ticket: Ticket, delay_ms: u32 },
    /// Replace any running countdown with a one-second interval calling `tick(ticket)`
    StartCountdown { ticket: Ticket, secs: u32 },
    /// Countdown display update
    CountdownTick { remaining_secs: u32 },
    /// Clear the countdown interval
    StopCountdown,
    LevelUp { level: u32 },
    /// Fire-and-forget sound
    PlayCue(Cue),
    GameOver {
        score: u32,
        level: u32,
        new_high_score: bool,
    },
}
