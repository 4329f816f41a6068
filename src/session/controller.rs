//! Game session controller
//!
//! Owns the session state machine. Every method is a synchronous reaction to
//! one event: a player command, a countdown tick, or a scheduled advance to
//! the next problem. Timers and sounds are requested through `Effect`s.

use rand::Rng;

use super::effect::{Cue, Effect, Ticket};
use super::state::{Countdown, Feedback, GameMode, Screen, Session, Verdict};
use crate::highscores::HighScores;
use crate::platform::KeyValueStore;
use crate::problem::{
    Operation, Submission, check_answer, correct_message, explain, generate, time_up,
    try_again_message,
};
use crate::tuning::Tuning;

pub struct Controller<S: KeyValueStore, R: Rng> {
    session: Session,
    tuning: Tuning,
    high_scores: HighScores,
    store: S,
    rng: R,
    effects: Vec<Effect>,
    /// Last ticket handed out
    last_ticket: u64,
    /// Ticket of the scheduled advance, while the judged problem is still showing
    pending_advance: Option<Ticket>,
    answer_input: String,
    factor_inputs: (String, String),
}

impl<S: KeyValueStore, R: Rng> Controller<S, R> {
    /// Create a controller on the menu, loading high scores from `store`
    pub fn new(store: S, rng: R) -> Self {
        Self::with_tuning(store, rng, Tuning::default())
    }

    pub fn with_tuning(store: S, rng: R, tuning: Tuning) -> Self {
        let high_scores = HighScores::load(&store);
        Self {
            session: Session::new(&tuning),
            tuning,
            high_scores,
            store,
            rng,
            effects: Vec::new(),
            last_ticket: 0,
            pending_advance: None,
            answer_input: String::new(),
            factor_inputs: (String::new(), String::new()),
        }
    }

    // === Read-only state ===

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn high_scores(&self) -> &HighScores {
        &self.high_scores
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn answer_input(&self) -> &str {
        &self.answer_input
    }

    pub fn factor_inputs(&self) -> (&str, &str) {
        (&self.factor_inputs.0, &self.factor_inputs.1)
    }

    /// True between judging an answer and showing the next problem
    pub fn is_awaiting_next(&self) -> bool {
        self.pending_advance.is_some()
    }

    /// Take all effects queued since the last call
    pub fn drain_effects(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.effects)
    }

    // === Commands ===

    /// Start a classic (untimed) game
    pub fn select_operation_and_start(&mut self, op: Operation) {
        self.start_game(GameMode::Classic, op);
    }

    /// Start a challenge (timed) game
    pub fn start_challenge(&mut self, op: Operation) {
        self.start_game(GameMode::Challenge, op);
    }

    pub fn show_challenge_menu(&mut self) {
        if self.session.screen != Screen::Menu {
            log::debug!("Ignoring challenge menu request from {:?}", self.session.screen);
            return;
        }
        self.session.screen = Screen::ChallengeMenu;
    }

    pub fn view_high_scores(&mut self) {
        if self.session.screen != Screen::Menu {
            log::debug!("Ignoring high scores request from {:?}", self.session.screen);
            return;
        }
        self.session.screen = Screen::HighScores;
    }

    /// Restart with the same mode and operation
    pub fn play_again(&mut self) {
        if self.session.screen != Screen::GameOver {
            log::debug!("Ignoring play again from {:?}", self.session.screen);
            return;
        }
        self.start_game(self.session.mode, self.session.operation);
    }

    /// Back to the menu from anywhere, abandoning the current game
    pub fn go_to_menu(&mut self) {
        self.cancel_countdown();
        self.pending_advance = None;
        self.session.screen = Screen::Menu;
        self.session.problem = None;
        self.session.feedback = None;
        self.clear_inputs();
    }

    pub fn set_answer_input(&mut self, text: &str) {
        self.answer_input = text.to_string();
    }

    pub fn set_factor_inputs(&mut self, first: &str, second: &str) {
        self.factor_inputs = (first.to_string(), second.to_string());
    }

    /// Judge the bound input against the current problem.
    ///
    /// Empty input is ignored without feedback or penalty.
    pub fn submit_answer(&mut self) {
        if !self.session.is_playing() || self.pending_advance.is_some() {
            log::debug!("Ignoring submit: no problem awaiting an answer");
            return;
        }

        let (correct, explanation) = {
            let Some(problem) = self.session.problem.as_ref() else {
                return;
            };
            let submission = if problem.is_factor() {
                Submission::Pair(&self.factor_inputs.0, &self.factor_inputs.1)
            } else {
                Submission::Single(&self.answer_input)
            };
            if submission.is_empty() {
                return;
            }
            (check_answer(problem, &submission), explain(problem))
        };

        self.cancel_countdown();

        if correct {
            self.on_correct();
        } else {
            let message = format!("{} {}", try_again_message(&mut self.rng), explanation);
            self.on_miss(Verdict::Incorrect, message, self.tuning.incorrect_delay_ms);
        }
    }

    /// Host callback: the delay after a judged problem has elapsed
    pub fn advance(&mut self, ticket: Ticket) {
        if self.pending_advance != Some(ticket) || !self.session.is_playing() {
            log::debug!("Dropping stale advance (ticket {})", ticket.id());
            return;
        }
        self.pending_advance = None;
        self.next_problem();
    }

    /// Host callback: one second of the challenge countdown has passed
    pub fn tick(&mut self, ticket: Ticket) {
        let Some(countdown) = self.session.countdown.as_mut() else {
            log::debug!("Dropping tick with no countdown running");
            return;
        };
        if countdown.ticket != ticket {
            log::debug!("Dropping stale tick (ticket {})", ticket.id());
            return;
        }

        countdown.remaining_secs = countdown.remaining_secs.saturating_sub(1);
        let remaining_secs = countdown.remaining_secs;
        self.effects.push(Effect::CountdownTick { remaining_secs });

        if remaining_secs == 0 {
            self.on_timeout();
        }
    }

    // === Transitions ===

    fn start_game(&mut self, mode: GameMode, op: Operation) {
        if !matches!(
            self.session.screen,
            Screen::Menu | Screen::ChallengeMenu | Screen::GameOver
        ) {
            log::debug!("Ignoring start from {:?}", self.session.screen);
            return;
        }

        self.cancel_countdown();
        self.pending_advance = None;
        self.session.reset(mode, op, &self.tuning);
        log::info!("Starting {} game: {}", mode.as_str(), op.as_str());

        self.next_problem();
    }

    fn next_problem(&mut self) {
        let kind = self.session.operation.resolve(&mut self.rng);
        let problem = generate(self.session.level, kind, &mut self.rng);

        self.clear_inputs();
        self.session.feedback = None;
        self.session.problem = Some(problem.clone());
        self.effects.push(Effect::ProblemReady(problem));

        if self.session.is_timed() {
            self.start_countdown();
        }
    }

    fn on_correct(&mut self) {
        let points = self.tuning.points_for(self.session.level);
        self.session.score = self.session.score.saturating_add(points);
        self.session.score_in_level += 1;

        let message = correct_message(&mut self.rng).to_string();
        self.set_feedback(Verdict::Correct, message);

        if self.session.score_in_level >= self.tuning.points_to_level_up {
            self.session.level += 1;
            self.session.score_in_level = 0;
            self.session.lives = self.tuning.starting_lives;
            log::info!("Level up! Now level {}", self.session.level);
            self.effects.push(Effect::PlayCue(Cue::LevelUp));
            self.effects.push(Effect::LevelUp {
                level: self.session.level,
            });
        } else {
            self.effects.push(Effect::PlayCue(Cue::Correct));
        }

        self.schedule_advance(self.tuning.correct_delay_ms);
    }

    fn on_timeout(&mut self) {
        self.session.countdown = None;
        self.effects.push(Effect::StopCountdown);

        let Some(problem) = self.session.problem.as_ref() else {
            return;
        };
        let message = time_up(problem);
        self.on_miss(Verdict::TimeUp, message, self.tuning.timeout_delay_ms);
    }

    /// Wrong answer or timeout: lose a life, explain, maybe end the game
    fn on_miss(&mut self, verdict: Verdict, message: String, delay_ms: u32) {
        self.session.lives = self.session.lives.saturating_sub(1);
        self.set_feedback(verdict, message);

        if self.session.lives == 0 {
            self.end_game();
            return;
        }

        let cue = match verdict {
            Verdict::TimeUp => Cue::TimeUp,
            _ => Cue::Incorrect,
        };
        self.effects.push(Effect::PlayCue(cue));
        self.schedule_advance(delay_ms);
    }

    fn end_game(&mut self) {
        self.cancel_countdown();
        self.pending_advance = None;
        self.session.screen = Screen::GameOver;

        let score = self.session.score;
        let new_high_score = self
            .high_scores
            .record(self.session.mode, self.session.operation, score)
            .is_some();
        if new_high_score {
            self.high_scores.save(&mut self.store);
        }
        self.session.new_high_score = new_high_score;

        log::info!(
            "Game over: score {} at level {}{}",
            score,
            self.session.level,
            if new_high_score { " (new high score)" } else { "" }
        );

        self.effects.push(Effect::PlayCue(if new_high_score {
            Cue::HighScore
        } else {
            Cue::GameOver
        }));
        self.effects.push(Effect::GameOver {
            score,
            level: self.session.level,
            new_high_score,
        });
    }

    // === Helpers ===

    fn issue_ticket(&mut self) -> Ticket {
        self.last_ticket += 1;
        Ticket::new(self.last_ticket)
    }

    fn schedule_advance(&mut self, delay_ms: u32) {
        let ticket = self.issue_ticket();
        self.pending_advance = Some(ticket);
        self.effects.push(Effect::ScheduleAdvance { ticket, delay_ms });
    }

    /// Start a fresh countdown for the current level, replacing any running one
    fn start_countdown(&mut self) {
        self.cancel_countdown();
        let secs = self.tuning.timer_secs(self.session.level);
        let ticket = self.issue_ticket();
        self.session.countdown = Some(Countdown {
            remaining_secs: secs,
            duration_secs: secs,
            ticket,
        });
        self.effects.push(Effect::StartCountdown { ticket, secs });
    }

    fn cancel_countdown(&mut self) {
        if self.session.countdown.take().is_some() {
            self.effects.push(Effect::StopCountdown);
        }
    }

    fn set_feedback(&mut self, verdict: Verdict, message: String) {
        let feedback = Feedback { verdict, message };
        self.session.feedback = Some(feedback.clone());
        self.effects.push(Effect::Feedback(feedback));
    }

    fn clear_inputs(&mut self) {
        self.answer_input.clear();
        self.factor_inputs.0.clear();
        self.factor_inputs.1.clear();
    }
}
