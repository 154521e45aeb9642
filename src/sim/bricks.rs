//! Brick wall
//!
//! Bricks are stored column-major so that iteration order matches the
//! collision scan order: column ascending, then row ascending.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::consts::*;

/// A single brick cell
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Brick {
    pub column: usize,
    pub row: usize,
    /// Top-left corner
    pub x: f32,
    pub y: f32,
    pub alive: bool,
}

impl Brick {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, BRICK_WIDTH, BRICK_HEIGHT)
    }
}

/// Top-left corner of the brick at (column, row)
pub fn brick_position(column: usize, row: usize) -> Vec2 {
    Vec2::new(
        column as f32 * (BRICK_WIDTH + BRICK_PADDING) + BRICK_OFFSET_LEFT,
        row as f32 * (BRICK_HEIGHT + BRICK_PADDING) + BRICK_OFFSET_TOP,
    )
}

/// Fixed-size grid of bricks indexed by (column, row)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrickGrid {
    columns: usize,
    rows: usize,
    bricks: Vec<Brick>,
}

impl Default for BrickGrid {
    fn default() -> Self {
        Self::new(BRICK_COLUMNS, BRICK_ROWS)
    }
}

impl BrickGrid {
    /// Lay out a full grid with every brick alive
    pub fn new(columns: usize, rows: usize) -> Self {
        let mut bricks = Vec::with_capacity(columns * rows);
        for column in 0..columns {
            for row in 0..rows {
                let pos = brick_position(column, row);
                bricks.push(Brick {
                    column,
                    row,
                    x: pos.x,
                    y: pos.y,
                    alive: true,
                });
            }
        }
        Self {
            columns,
            rows,
            bricks,
        }
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Total number of cells (the winning score)
    pub fn len(&self) -> usize {
        self.bricks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bricks.is_empty()
    }

    pub fn alive_count(&self) -> usize {
        self.bricks.iter().filter(|b| b.alive).count()
    }

    fn index(&self, column: usize, row: usize) -> Option<usize> {
        (column < self.columns && row < self.rows).then_some(column * self.rows + row)
    }

    pub fn get(&self, column: usize, row: usize) -> Option<&Brick> {
        self.index(column, row).map(|i| &self.bricks[i])
    }

    pub fn get_mut(&mut self, column: usize, row: usize) -> Option<&mut Brick> {
        self.index(column, row).map(move |i| &mut self.bricks[i])
    }

    /// Bricks in scan order
    pub fn iter(&self) -> impl Iterator<Item = &Brick> {
        self.bricks.iter()
    }

    /// Bring every brick back
    pub fn reset(&mut self) {
        for brick in &mut self.bricks {
            brick.alive = true;
        }
    }

    /// First alive brick (in scan order) whose box overlaps `area`
    pub fn first_overlapping_mut(&mut self, area: &Rect) -> Option<&mut Brick> {
        self.bricks
            .iter_mut()
            .find(|b| b.alive && b.rect().overlaps(area))
    }
}
