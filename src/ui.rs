//! Menu buttons, hit-testing and keyboard mapping
//!
//! Pure layout logic shared by the canvas front end. Everything here turns raw
//! input into [`Command`]s; nothing touches the game directly.

use glam::Vec2;

use crate::difficulty::Difficulty;
use crate::sim::{Command, GamePhase, PaddleDirection, Rect, Session};

pub const BUTTON_WIDTH: f32 = 200.0;
pub const BUTTON_HEIGHT: f32 = 44.0;
pub const BUTTON_GAP: f32 = 14.0;

/// Title shown on the menu screen
pub const GAME_TITLE: &str = "Ball Paddle Game";

/// A clickable button
#[derive(Debug, Clone, PartialEq)]
pub struct Button {
    pub label: &'static str,
    pub rect: Rect,
    pub command: Command,
}

/// Stack buttons vertically around the canvas center
fn stack(width: f32, height: f32, items: &[(&'static str, Command)]) -> Vec<Button> {
    let start_y = height / 2.0 - (BUTTON_HEIGHT * 2.0 + BUTTON_GAP) / 2.0;
    let x = width / 2.0 - BUTTON_WIDTH / 2.0;

    items
        .iter()
        .enumerate()
        .map(|(i, &(label, command))| Button {
            label,
            rect: Rect::new(
                x,
                start_y + i as f32 * (BUTTON_HEIGHT + BUTTON_GAP),
                BUTTON_WIDTH,
                BUTTON_HEIGHT,
            ),
            command,
        })
        .collect()
}

/// One button per difficulty
pub fn menu_buttons(width: f32, height: f32) -> Vec<Button> {
    let items: Vec<_> = Difficulty::ALL
        .iter()
        .map(|&d| (d.label(), Command::SelectDifficulty(d)))
        .collect();
    stack(width, height, &items)
}

/// Restart / Menu, shown over a paused or finished game
pub fn overlay_buttons(width: f32, height: f32) -> Vec<Button> {
    stack(
        width,
        height,
        &[("Restart", Command::Restart), ("Menu", Command::ReturnToMenu)],
    )
}

/// Buttons visible in `phase`
pub fn buttons_for(phase: GamePhase, width: f32, height: f32) -> Vec<Button> {
    if phase.shows_overlay() {
        overlay_buttons(width, height)
    } else if phase == GamePhase::Menu {
        menu_buttons(width, height)
    } else {
        Vec::new()
    }
}

/// Command for the first button containing `point`
pub fn hit_test(buttons: &[Button], point: Vec2) -> Option<Command> {
    buttons
        .iter()
        .find(|b| b.rect.contains(point))
        .map(|b| b.command)
}

/// Translate a click at canvas coordinates into a command
pub fn click(phase: GamePhase, width: f32, height: f32, point: Vec2) -> Option<Command> {
    hit_test(&buttons_for(phase, width, height), point)
}

/// Heading drawn over the game for overlay modes
pub fn overlay_title(phase: GamePhase) -> Option<&'static str> {
    match phase {
        GamePhase::Paused => Some("Paused - Press Space to Resume"),
        GamePhase::Win => Some("You Win!"),
        GamePhase::GameOver => Some("Game Over!"),
        GamePhase::Menu | GamePhase::Playing => None,
    }
}

/// HUD lines: score (top left) and lives (top right)
pub fn hud_text(session: &Session) -> (String, String) {
    (
        format!("Score: {}", session.score),
        format!("Lives: {}", session.lives),
    )
}

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    Space,
    Escape,
}

impl Key {
    /// Map a DOM `KeyboardEvent` key / code pair
    pub fn from_dom(key: &str, code: &str) -> Option<Self> {
        match key {
            "ArrowLeft" => Some(Key::Left),
            "ArrowRight" => Some(Key::Right),
            "Escape" => Some(Key::Escape),
            " " => Some(Key::Space),
            _ if code == "Space" => Some(Key::Space),
            _ => None,
        }
    }
}

/// Held arrow keys. Right wins when both are down.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyState {
    left: bool,
    right: bool,
}

impl KeyState {
    pub fn direction(&self) -> PaddleDirection {
        if self.right {
            PaddleDirection::Right
        } else if self.left {
            PaddleDirection::Left
        } else {
            PaddleDirection::None
        }
    }

    pub fn key_down(&mut self, key: Key) -> Command {
        match key {
            Key::Left => {
                self.left = true;
                Command::SetPaddleDirection(self.direction())
            }
            Key::Right => {
                self.right = true;
                Command::SetPaddleDirection(self.direction())
            }
            // Illegal in the current mode means the game ignores it
            Key::Escape => Command::Pause,
            Key::Space => Command::Resume,
        }
    }

    pub fn key_up(&mut self, key: Key) -> Option<Command> {
        match key {
            Key::Left => self.left = false,
            Key::Right => self.right = false,
            Key::Space | Key::Escape => return None,
        }
        Some(Command::SetPaddleDirection(self.direction()))
    }
}
