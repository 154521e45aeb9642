//! Difficulty presets
//!
//! Static catalog looked up by name when a game starts.

use serde::{Deserialize, Serialize};

/// Selectable difficulty levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

/// Numbers a difficulty level plays with
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DifficultyPreset {
    pub name: &'static str,
    /// Paddle width in pixels
    pub paddle_width: f32,
    /// Ball speed magnitude in pixels per tick
    pub ball_speed: f32,
    pub lives: u32,
}

const EASY: DifficultyPreset = DifficultyPreset {
    name: "easy",
    paddle_width: 120.0,
    ball_speed: 5.0,
    lives: 5,
};

const MEDIUM: DifficultyPreset = DifficultyPreset {
    name: "medium",
    paddle_width: 100.0,
    ball_speed: 6.0,
    lives: 3,
};

const HARD: DifficultyPreset = DifficultyPreset {
    name: "hard",
    paddle_width: 60.0,
    ball_speed: 8.0,
    lives: 1,
};

impl Difficulty {
    /// Menu order
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        self.preset().name
    }

    /// Button label
    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    pub fn preset(&self) -> &'static DifficultyPreset {
        match self {
            Difficulty::Easy => &EASY,
            Difficulty::Medium => &MEDIUM,
            Difficulty::Hard => &HARD,
        }
    }
}
