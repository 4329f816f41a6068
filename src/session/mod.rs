//! Game session state machine
//!
//! Deterministic given its RNG: the host feeds commands, countdown ticks and
//! advance callbacks, and drains `Effect`s to drive timers and audio.

pub mod controller;
pub mod effect;
pub mod state;

pub use controller::Controller;
pub use effect::{Cue, Effect, Ticket};
pub use state::{Countdown, Feedback, GameMode, Screen, Session, Verdict};
