//! Sound effects
//!
//! The simulation never plays sound itself: it records [`GameEvent`]s and the
//! frame loop hands them to [`AudioManager::handle_events`]. On the web the
//! hit sound is a short procedural blip through the Web Audio API; native
//! builds only log. Playback problems are swallowed here and never reach the
//! simulation.

#[cfg(target_arch = "wasm32")]
use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use crate::settings::Settings;
use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Ball destroys a brick
    BrickHit,
}

impl SoundEffect {
    /// Sound to play for a simulation event, if any
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::BrickDestroyed { .. } => Some(SoundEffect::BrickHit),
            _ => None,
        }
    }
}

/// Audio manager for the game
pub struct AudioManager {
    #[cfg(target_arch = "wasm32")]
    ctx: Option<AudioContext>,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        Self {
            #[cfg(target_arch = "wasm32")]
            ctx: create_context(),
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        let mut audio = Self::new();
        audio.set_master_volume(settings.master_volume);
        audio.set_sfx_volume(settings.sfx_volume);
        audio.set_muted(settings.muted);
        audio
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Get effective volume
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Play whatever sounds a batch of events calls for
    pub fn handle_events(&self, events: &[GameEvent]) {
        for effect in events.iter().filter_map(SoundEffect::for_event) {
            self.play(effect);
        }
    }

    /// Play a sound effect. Best effort: failures are ignored.
    pub fn play(&self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        self.play_backend(effect, vol);
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn play_backend(&self, effect: SoundEffect, vol: f32) {
        log::debug!("Sound {:?} at volume {:.2}", effect, vol);
    }

    #[cfg(target_arch = "wasm32")]
    fn play_backend(&self, effect: SoundEffect, vol: f32) {
        let Some(ctx) = &self.ctx else { return };

        // Resume context if suspended (browsers require user gesture)
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        match effect {
            SoundEffect::BrickHit => play_brick_hit(ctx, vol),
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn create_context() -> Option<AudioContext> {
    // May fail outside a secure context
    let ctx = AudioContext::new().ok();
    if ctx.is_none() {
        log::warn!("Failed to create AudioContext - audio disabled");
    }
    ctx
}

/// Create an oscillator with gain envelope
#[cfg(target_arch = "wasm32")]
fn create_osc(
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

/// Brick hit - bright tick with a short downward sweep
#[cfg(target_arch = "wasm32")]
fn play_brick_hit(ctx: &AudioContext, vol: f32) {
    let Some((osc, gain)) = create_osc(ctx, 880.0, OscillatorType::Square) else {
        return;
    };
    let t = ctx.current_time();

    gain.gain().set_value_at_time(vol * 0.25, t).ok();
    gain.gain()
        .exponential_ramp_to_value_at_time(0.01, t + 0.08)
        .ok();
    osc.frequency().set_value_at_time(880.0, t).ok();
    osc.frequency()
        .exponential_ramp_to_value_at_time(440.0, t + 0.08)
        .ok();

    osc.start().ok();
    osc.stop_with_when(t + 0.1).ok();
}
