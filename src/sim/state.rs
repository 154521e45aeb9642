//! Game state and core simulation types
//!
//! [`Game`] owns everything the simulation mutates. Renderers and audio only
//! ever see it through shared references.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::bricks::BrickGrid;
use super::collision::Rect;
use super::phase::{GamePhase, Transition, transition};
use crate::consts::*;
use crate::difficulty::Difficulty;

/// Play field size in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub width: f32,
    pub height: f32,
}

impl Default for Field {
    fn default() -> Self {
        Self {
            width: FIELD_WIDTH,
            height: FIELD_HEIGHT,
        }
    }
}

impl Field {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// y of the paddle's top edge
    pub fn paddle_top(&self) -> f32 {
        self.height - PADDLE_HEIGHT - PADDLE_BOTTOM_MARGIN
    }

    /// Where the ball appears at session start and after a miss
    pub fn ball_spawn(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height - BALL_START_OFFSET)
    }
}

/// Held paddle input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PaddleDirection {
    #[default]
    None,
    Left,
    Right,
}

impl PaddleDirection {
    pub fn sign(&self) -> f32 {
        match self {
            PaddleDirection::None => 0.0,
            PaddleDirection::Left => -1.0,
            PaddleDirection::Right => 1.0,
        }
    }
}

/// The ball
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    /// Pixels per tick
    pub vel: Vec2,
    pub radius: f32,
}

impl Ball {
    pub fn new(pos: Vec2, vel: Vec2) -> Self {
        Self {
            pos,
            vel,
            radius: BALL_RADIUS,
        }
    }

    pub fn speed(&self) -> f32 {
        self.vel.length()
    }

    /// Bounding box used for brick overlap
    pub fn bounds(&self) -> Rect {
        Rect::around_circle(self.pos, self.radius)
    }
}

/// The player's paddle. Height and speed are constants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    /// Left edge
    pub x: f32,
    pub width: f32,
}

impl Paddle {
    /// A paddle centered horizontally in the field
    pub fn centered(field: &Field, width: f32) -> Self {
        Self {
            x: (field.width - width) / 2.0,
            width,
        }
    }

    pub fn recenter(&mut self, field: &Field) {
        self.x = (field.width - self.width) / 2.0;
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    pub fn rect(&self, field: &Field) -> Rect {
        Rect::new(self.x, field.paddle_top(), self.width, PADDLE_HEIGHT)
    }

    /// Move one tick's worth in `direction`, staying inside the field
    pub fn step(&mut self, direction: PaddleDirection, field: &Field) {
        let max_x = (field.width - self.width).max(0.0);
        self.x = (self.x + direction.sign() * PADDLE_SPEED).clamp(0.0, max_x);
    }
}

/// Everything that belongs to one game in progress
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub difficulty: Difficulty,
    pub paddle: Paddle,
    pub ball: Ball,
    pub bricks: BrickGrid,
    /// Bricks destroyed
    pub score: u32,
    pub lives: u32,
}

impl Session {
    /// Fresh session for `difficulty`, launching the ball at `launch_angle`
    /// radians from vertical (positive leans right).
    pub fn new(difficulty: Difficulty, field: &Field, launch_angle: f32) -> Self {
        let preset = difficulty.preset();
        let speed = preset.ball_speed;
        let vel = Vec2::new(speed * launch_angle.sin(), -speed * launch_angle.cos());

        Self {
            difficulty,
            paddle: Paddle::centered(field, preset.paddle_width),
            ball: Ball::new(field.ball_spawn(), vel),
            bricks: BrickGrid::default(),
            score: 0,
            lives: preset.lives,
        }
    }

    /// Score needed to win
    pub fn max_score(&self) -> u32 {
        self.bricks.len() as u32
    }

    pub fn is_cleared(&self) -> bool {
        self.score >= self.max_score()
    }
}

/// Uniform launch angle in [-45, 45] degrees
pub fn random_launch_angle<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    rng.random_range(-MAX_LAUNCH_ANGLE..=MAX_LAUNCH_ANGLE)
}

/// Commands delivered by the input layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    SelectDifficulty(Difficulty),
    Pause,
    Resume,
    Restart,
    ReturnToMenu,
    SetPaddleDirection(PaddleDirection),
}

/// Notifications emitted by the simulation for audio and UI.
///
/// Drained with [`Game::drain_events`]; consumers never feed back into the
/// simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    SessionStarted { difficulty: Difficulty },
    /// Triggers the hit sound
    BrickDestroyed { column: usize, row: usize },
    LifeLost { lives: u32 },
    GameOver { score: u32 },
    Win { score: u32 },
}

/// Complete game: current mode, the session (if any) and the RNG
#[derive(Debug, Clone)]
pub struct Game {
    pub(crate) field: Field,
    pub(crate) phase: GamePhase,
    pub(crate) session: Option<Session>,
    /// Last selected difficulty, reused by restart
    pub(crate) difficulty: Option<Difficulty>,
    pub(crate) direction: PaddleDirection,
    pub(crate) rng: Pcg32,
    pub(crate) seed: u64,
    pub(crate) time_ticks: u64,
    pub(crate) events: Vec<GameEvent>,
}

impl Game {
    /// Create a game at the menu with the given RNG seed
    pub fn new(field: Field, seed: u64) -> Self {
        Self {
            field,
            phase: GamePhase::Menu,
            session: None,
            difficulty: None,
            direction: PaddleDirection::None,
            rng: Pcg32::seed_from_u64(seed),
            seed,
            time_ticks: 0,
            events: Vec::new(),
        }
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Session being played or shown under an overlay
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn difficulty(&self) -> Option<Difficulty> {
        self.difficulty
    }

    pub fn paddle_direction(&self) -> PaddleDirection {
        self.direction
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Simulation ticks advanced while playing
    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }

    /// Take the events produced since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn select_difficulty(&mut self, difficulty: Difficulty) -> bool {
        self.apply(Command::SelectDifficulty(difficulty))
    }

    /// Select by catalog name. Unknown names are ignored.
    pub fn select_difficulty_by_name(&mut self, name: &str) -> bool {
        match Difficulty::from_str(name) {
            Some(d) => self.select_difficulty(d),
            None => {
                log::debug!("Ignoring unknown difficulty {name:?}");
                false
            }
        }
    }

    pub fn pause(&mut self) -> bool {
        self.apply(Command::Pause)
    }

    pub fn resume(&mut self) -> bool {
        self.apply(Command::Resume)
    }

    pub fn restart(&mut self) -> bool {
        self.apply(Command::Restart)
    }

    pub fn return_to_menu(&mut self) -> bool {
        self.apply(Command::ReturnToMenu)
    }

    pub fn set_paddle_direction(&mut self, direction: PaddleDirection) {
        self.apply(Command::SetPaddleDirection(direction));
    }

    /// Apply one command. Returns false when it was not legal in the current
    /// mode and nothing changed.
    pub fn apply(&mut self, command: Command) -> bool {
        match command {
            Command::SetPaddleDirection(direction) => {
                self.direction = direction;
                true
            }
            Command::SelectDifficulty(difficulty) => {
                if !self.advance(Transition::Start) {
                    return false;
                }
                self.difficulty = Some(difficulty);
                self.start_session(difficulty);
                true
            }
            Command::Restart => {
                let Some(difficulty) = self.difficulty else {
                    log::debug!("Ignoring restart: no difficulty selected yet");
                    return false;
                };
                if !self.advance(Transition::Restart) {
                    return false;
                }
                self.start_session(difficulty);
                true
            }
            Command::ReturnToMenu => self.advance(Transition::ToMenu),
            Command::Pause => self.advance(Transition::Pause),
            Command::Resume => self.advance(Transition::Resume),
        }
    }

    /// Move to the next mode if `trigger` is legal now
    pub(crate) fn advance(&mut self, trigger: Transition) -> bool {
        match transition(self.phase, trigger) {
            Some(next) => {
                log::info!("Mode {:?} -> {:?} ({:?})", self.phase, next, trigger);
                self.phase = next;
                if !next.has_session() {
                    self.session = None;
                }
                true
            }
            None => {
                log::debug!("Ignoring {:?} in {:?}", trigger, self.phase);
                false
            }
        }
    }

    fn start_session(&mut self, difficulty: Difficulty) {
        let angle = random_launch_angle(&mut self.rng);
        log::info!(
            "Starting {} game (launch angle {:.1} deg)",
            difficulty.as_str(),
            angle.to_degrees()
        );
        self.session = Some(Session::new(difficulty, &self.field, angle));
        self.events.push(GameEvent::SessionStarted { difficulty });
    }
}
