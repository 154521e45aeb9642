//! Collision detection and response
//!
//! Screen coordinates: origin at the top-left, y grows downward.
//! The ball is treated as its bounding box when testing against bricks.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::MAX_BOUNCE_ANGLE;

/// Axis-aligned rectangle, anchored at its top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Square box around a circle
    pub fn around_circle(center: Vec2, radius: f32) -> Self {
        Self::new(center.x - radius, center.y - radius, radius * 2.0, radius * 2.0)
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    /// Strict overlap: touching edges do not count
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.right() > other.left()
            && self.left() < other.right()
            && self.bottom() > other.top()
            && self.top() < other.bottom()
    }

    /// Strict containment of a point
    pub fn contains(&self, point: Vec2) -> bool {
        point.x > self.left()
            && point.x < self.right()
            && point.y > self.top()
            && point.y < self.bottom()
    }
}

/// Which walls the ball crossed this tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WallHits {
    pub side: bool,
    pub top: bool,
}

impl WallHits {
    pub fn any(&self) -> bool {
        self.side || self.top
    }
}

/// Check the ball against the left, right and top edges.
///
/// The bottom edge is open: crossing it is a miss, not a bounce.
pub fn wall_hits(pos: Vec2, radius: f32, field_width: f32) -> WallHits {
    WallHits {
        side: pos.x + radius > field_width || pos.x - radius < 0.0,
        top: pos.y - radius < 0.0,
    }
}

/// Reflect velocity off the walls that were hit, without energy loss
pub fn reflect_off_walls(vel: Vec2, hits: WallHits) -> Vec2 {
    let mut vel = vel;
    if hits.side {
        vel.x = -vel.x;
    }
    if hits.top {
        vel.y = -vel.y;
    }
    vel
}

/// Whether the ball has reached the paddle: its bottom edge is past the
/// paddle's top edge and its center is strictly inside the paddle's span.
pub fn touches_paddle(pos: Vec2, radius: f32, paddle: &Rect) -> bool {
    pos.y + radius > paddle.top() && pos.x > paddle.left() && pos.x < paddle.right()
}

/// Normalized offset of `x` from the paddle center, in [-1, 1]
pub fn hit_position(x: f32, paddle: &Rect) -> f32 {
    let half = paddle.width / 2.0;
    if half <= 0.0 {
        return 0.0;
    }
    ((x - paddle.center_x()) / half).clamp(-1.0, 1.0)
}

/// New velocity after a paddle hit.
///
/// Keeps the speed magnitude, tilts by up to [`MAX_BOUNCE_ANGLE`] depending on
/// where the paddle was hit, and always sends the ball upward.
pub fn paddle_bounce(vel: Vec2, hit_pos: f32) -> Vec2 {
    let speed = vel.length();
    let angle = hit_pos * MAX_BOUNCE_ANGLE;
    Vec2::new(speed * angle.sin(), -(speed * angle.cos()).abs())
}
