//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed step per tick
//! - Seeded RNG only
//! - Stable brick scan order (column-major)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod bricks;
pub mod collision;
pub mod phase;
pub mod state;
pub mod tick;

pub use autopilot::autopilot_direction;
pub use bricks::{Brick, BrickGrid, brick_position};
pub use collision::{Rect, hit_position, paddle_bounce};
pub use phase::{GamePhase, Transition, transition};
pub use state::{
    Ball, Command, Field, Game, GameEvent, Paddle, PaddleDirection, Session, random_launch_angle,
};
pub use tick::{StepOutcome, TickInput, step, tick};
