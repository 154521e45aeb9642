//! Ball Paddle - A brick breaker for a 2D canvas
//!
//! Core modules:
//! - `sim`: Deterministic simulation (state machine, physics, brick grid)
//! - `difficulty`: Difficulty preset catalog
//! - `settings`: Runtime configuration
//! - `frame`: Fixed-timestep frame pacing
//! - `ui`: Button layout, hit-testing and keyboard mapping
//! - `audio`: Sound playback for simulation events
//! - `renderer`: Canvas 2D drawing (web only)

pub mod audio;
pub mod difficulty;
pub mod frame;
#[cfg(target_arch = "wasm32")]
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod ui;

pub use difficulty::{Difficulty, DifficultyPreset};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (one tick per 60 Hz display frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Default play field (canvas) dimensions
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    /// Paddle geometry. Width comes from the difficulty preset.
    pub const PADDLE_HEIGHT: f32 = 20.0;
    /// Gap between the paddle's bottom edge and the field bottom
    pub const PADDLE_BOTTOM_MARGIN: f32 = 10.0;
    /// Pixels per tick while a direction is held
    pub const PADDLE_SPEED: f32 = 7.0;

    pub const BALL_RADIUS: f32 = 10.0;
    /// Ball spawn height above the field bottom
    pub const BALL_START_OFFSET: f32 = 40.0;

    /// Brick wall layout
    pub const BRICK_COLUMNS: usize = 9;
    pub const BRICK_ROWS: usize = 5;
    pub const BRICK_WIDTH: f32 = 75.0;
    pub const BRICK_HEIGHT: f32 = 20.0;
    pub const BRICK_PADDING: f32 = 7.0;
    pub const BRICK_OFFSET_TOP: f32 = 30.0;
    pub const BRICK_OFFSET_LEFT: f32 = 30.0;

    /// Paddle bounce angle at the paddle's very edge (60 degrees)
    pub const MAX_BOUNCE_ANGLE: f32 = std::f32::consts::FRAC_PI_3;
    /// Launch angle is drawn from [-45, 45] degrees around vertical
    pub const MAX_LAUNCH_ANGLE: f32 = std::f32::consts::FRAC_PI_4;
}
