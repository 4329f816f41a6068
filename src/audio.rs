//! Audio cues using Web Audio API
//!
//! Procedurally generated tones - no external files needed.

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use crate::session::Cue;
use crate::settings::Settings;

/// Audio manager for the game
pub struct AudioManager {
    ctx: Option<AudioContext>,
    volume: f32,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        // May fail outside a secure context
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self { ctx, volume: 0.8 }
    }

    /// Resume audio context (required after user gesture)
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }

    /// Pick up volume/mute from settings
    pub fn apply_settings(&mut self, settings: &Settings) {
        self.volume = settings.effective_volume();
    }

    /// Play a cue; never blocks, failures are ignored
    pub fn play(&self, cue: Cue) {
        let vol = self.volume;
        if vol <= 0.0 {
            return;
        }

        let Some(ctx) = &self.ctx else { return };

        // Browsers suspend the context until a user gesture
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        match cue {
            Cue::Correct => self.play_correct(ctx, vol),
            Cue::Incorrect => self.play_incorrect(ctx, vol),
            Cue::TimeUp => self.play_time_up(ctx, vol),
            Cue::LevelUp => self.play_level_up(ctx, vol),
            Cue::GameOver => self.play_game_over(ctx, vol),
            Cue::HighScore => self.play_high_score(ctx, vol),
        }
    }

    // === Sound generators ===

    /// Create an oscillator with gain envelope
    fn create_osc(
        &self,
        ctx: &AudioContext,
        freq: f32,
        osc_type: OscillatorType,
    ) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(osc_type);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }

    /// Play a sequence of notes, `step` seconds apart
    fn play_notes(
        &self,
        ctx: &AudioContext,
        vol: f32,
        freqs: &[f32],
        step: f64,
        len: f64,
        osc_type: OscillatorType,
    ) {
        for (i, freq) in freqs.iter().enumerate() {
            let Some((osc, gain)) = self.create_osc(ctx, *freq, osc_type) else {
                continue;
            };
            let t = ctx.current_time() + i as f64 * step;
            gain.gain().set_value_at_time(vol, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + len)
                .ok();
            osc.start_with_when(t).ok();
            osc.stop_with_when(t + len + 0.05).ok();
        }
    }

    /// Correct - bright two-note chime
    fn play_correct(&self, ctx: &AudioContext, vol: f32) {
        self.play_notes(ctx, vol * 0.3, &[660.0, 880.0], 0.08, 0.2, OscillatorType::Sine);
    }

    /// Incorrect - soft low buzz
    fn play_incorrect(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 220.0, OscillatorType::Triangle) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.3, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.35)
            .ok();
        osc.frequency().set_value_at_time(220.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(140.0, t + 0.3)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.4).ok();
    }

    /// Time's up - quick double beep
    fn play_time_up(&self, ctx: &AudioContext, vol: f32) {
        self.play_notes(ctx, vol * 0.25, &[440.0, 440.0], 0.15, 0.1, OscillatorType::Square);
    }

    /// Level up - rising fanfare
    fn play_level_up(&self, ctx: &AudioContext, vol: f32) {
        self.play_notes(
            ctx,
            vol * 0.3,
            &[400.0, 500.0, 600.0, 800.0],
            0.1,
            0.4,
            OscillatorType::Triangle,
        );
    }

    /// Game over - sad descending
    fn play_game_over(&self, ctx: &AudioContext, vol: f32) {
        self.play_notes(
            ctx,
            vol * 0.3,
            &[400.0, 350.0, 300.0, 200.0],
            0.2,
            0.3,
            OscillatorType::Sine,
        );
    }

    /// High score - celebratory
    fn play_high_score(&self, ctx: &AudioContext, vol: f32) {
        self.play_notes(
            ctx,
            vol * 0.25,
            &[500.0, 600.0, 700.0, 800.0, 1000.0],
            0.08,
            0.25,
            OscillatorType::Triangle,
        );
    }
}
