//! Game settings
//!
//! Optional JSON file on native, defaults on the web. Every field has a
//! default so partial files are fine.

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::Field;

/// Smallest field that still fits the brick wall with its side margins
pub const MIN_FIELD_WIDTH: f32 = BRICK_OFFSET_LEFT * 2.0
    + BRICK_COLUMNS as f32 * (BRICK_WIDTH + BRICK_PADDING)
    - BRICK_PADDING;

/// Brick wall plus room for the ball to travel down to the paddle
pub const MIN_FIELD_HEIGHT: f32 = 300.0;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Play field size in pixels
    pub field_width: f32,
    pub field_height: f32,

    /// Fixed RNG seed; a fresh one is picked per run when unset
    pub seed: Option<u64>,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,
            seed: None,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }
}

impl Settings {
    /// Environment variable naming a settings file (native only)
    pub const ENV_VAR: &'static str = "BALL_PADDLE_SETTINGS";

    /// Parse settings from JSON, then clamp out-of-range values
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let settings: Settings =
            serde_json::from_str(json).context("settings are not valid JSON")?;
        Ok(settings.sanitized())
    }

    /// Clamp volumes to [0, 1] and the field to a playable size
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        self.field_width = finite_or(self.field_width, defaults.field_width).max(MIN_FIELD_WIDTH);
        self.field_height =
            finite_or(self.field_height, defaults.field_height).max(MIN_FIELD_HEIGHT);
        self.master_volume = finite_or(self.master_volume, defaults.master_volume).clamp(0.0, 1.0);
        self.sfx_volume = finite_or(self.sfx_volume, defaults.sfx_volume).clamp(0.0, 1.0);
        self
    }

    pub fn field(&self) -> Field {
        Field::new(self.field_width, self.field_height)
    }

    /// Read settings from a JSON file
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_path(path: &std::path::Path) -> anyhow::Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read settings file {}", path.display()))?;
        Self::from_json(&json).with_context(|| format!("in {}", path.display()))
    }

    /// Load settings from the file named by [`Settings::ENV_VAR`], falling back
    /// to defaults when unset or unreadable
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let Some(path) = std::env::var_os(Self::ENV_VAR) else {
            log::info!("Using default settings");
            return Self::default();
        };

        match Self::load_from_path(std::path::Path::new(&path)) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.to_string_lossy());
                settings
            }
            Err(e) => {
                log::warn!("Ignoring settings: {e:#}");
                Self::default()
            }
        }
    }

    /// Web builds have nowhere to read settings from
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        log::info!("Using default settings");
        Self::default()
    }
}

fn finite_or(value: f32, fallback: f32) -> f32 {
    if value.is_finite() { value } else { fallback }
}
