//! Demo mode - the computer plays
//!
//! Chases the ball with a slowly drifting offset so the bounce angle varies
//! and the ball doesn't settle into a vertical loop.

use super::state::{Game, PaddleDirection};
use crate::consts::PADDLE_SPEED;

/// Direction the paddle should hold this tick
pub fn autopilot_direction(game: &Game) -> PaddleDirection {
    let Some(session) = game.session() else {
        return PaddleDirection::None;
    };

    let time_factor = game.time_ticks() as f32 * 0.01;
    let offset = time_factor.sin() * session.paddle.width * 0.3;
    let target = session.ball.pos.x + offset;
    let center = session.paddle.center_x();

    if target > center + PADDLE_SPEED / 2.0 {
        PaddleDirection::Right
    } else if target < center - PADDLE_SPEED / 2.0 {
        PaddleDirection::Left
    } else {
        PaddleDirection::None
    }
}
