//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically.

use super::collision::{hit_position, paddle_bounce, reflect_off_walls, touches_paddle, wall_hits};
use super::phase::{GamePhase, Transition};
use super::state::{Command, Field, Game, GameEvent, PaddleDirection, Session};

/// Commands collected by the input layer since the previous tick.
/// Drained in order before the simulation advances.
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub commands: Vec<Command>,
}

impl TickInput {
    pub fn push(&mut self, command: Command) {
        self.commands.push(command);
    }
}

/// What a physics step ended with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Continue,
    /// The last life was lost; nothing after the miss check ran
    LivesExhausted,
    /// The last brick was destroyed
    BricksCleared,
}

/// Advance the game by one tick
pub fn tick(game: &mut Game, input: &TickInput) {
    for &command in &input.commands {
        game.apply(command);
    }

    // Ball and paddle are frozen outside Playing
    if game.phase != GamePhase::Playing {
        return;
    }
    let Some(session) = game.session.as_mut() else {
        return;
    };

    game.time_ticks += 1;

    let outcome = step(session, &game.field, game.direction, &mut game.events);
    let score = session.score;

    match outcome {
        StepOutcome::Continue => {}
        StepOutcome::LivesExhausted => {
            if game.advance(Transition::LivesExhausted) {
                log::info!("Game over with {} bricks destroyed", score);
                game.events.push(GameEvent::GameOver { score });
            }
        }
        StepOutcome::BricksCleared => {
            if game.advance(Transition::BricksCleared) {
                log::info!("All {} bricks destroyed", score);
                game.events.push(GameEvent::Win { score });
            }
        }
    }
}

/// One physics step over a session.
///
/// Order matters: paddle, ball, walls, paddle bounce, miss, then bricks.
pub fn step(
    session: &mut Session,
    field: &Field,
    direction: PaddleDirection,
    events: &mut Vec<GameEvent>,
) -> StepOutcome {
    session.paddle.step(direction, field);

    let ball = &mut session.ball;
    ball.pos += ball.vel;

    let hits = wall_hits(ball.pos, ball.radius, field.width);
    if hits.any() {
        ball.vel = reflect_off_walls(ball.vel, hits);
    }

    let paddle = session.paddle.rect(field);
    if touches_paddle(ball.pos, ball.radius, &paddle) {
        let hit = hit_position(ball.pos.x, &paddle);
        ball.vel = paddle_bounce(ball.vel, hit);
        // Sit on top of the paddle so the ball can't tunnel through it
        ball.pos.y = paddle.top() - ball.radius;
    }

    if ball.pos.y - ball.radius > field.height {
        session.lives = session.lives.saturating_sub(1);
        events.push(GameEvent::LifeLost {
            lives: session.lives,
        });
        if session.lives == 0 {
            return StepOutcome::LivesExhausted;
        }
        log::debug!("Ball lost, {} lives left", session.lives);
        ball.pos = field.ball_spawn();
        session.paddle.recenter(field);
    }

    // At most one brick per tick
    let bounds = session.ball.bounds();
    if let Some(brick) = session.bricks.first_overlapping_mut(&bounds) {
        brick.alive = false;
        let (column, row) = (brick.column, brick.row);
        session.score += 1;
        session.ball.vel.y = -session.ball.vel.y;
        log::debug!("Brick ({column}, {row}) destroyed, score {}", session.score);
        events.push(GameEvent::BrickDestroyed { column, row });

        if session.is_cleared() {
            return StepOutcome::BricksCleared;
        }
    }

    StepOutcome::Continue
}

#[cfg(test)]
mod tests {
    use glam::Vec2;
    use proptest::prelude::*;

    use super::*;
    use crate::difficulty::Difficulty;

    const EPS: f32 = 1e-4;

    fn playing(difficulty: Difficulty) -> Game {
        let mut game = Game::new(Field::default(), 12345);
        assert!(game.select_difficulty(difficulty));
        game.drain_events();
        game
    }

    fn session_mut(game: &mut Game) -> &mut Session {
        game.session.as_mut().unwrap()
    }

    fn place_ball(game: &mut Game, pos: Vec2, vel: Vec2) {
        let s = session_mut(game);
        s.ball.pos = pos;
        s.ball.vel = vel;
    }

    #[test]
    fn test_tick_in_menu_does_nothing() {
        let mut game = Game::new(Field::default(), 1);
        tick(&mut game, &TickInput::default());
        assert_eq!(game.phase(), GamePhase::Menu);
        assert_eq!(game.time_ticks(), 0);
    }

    #[test]
    fn test_commands_drain_in_order() {
        let mut game = Game::new(Field::default(), 1);
        let mut input = TickInput::default();
        input.push(Command::SelectDifficulty(Difficulty::Hard));
        input.push(Command::Pause);
        tick(&mut game, &input);
        assert_eq!(game.phase(), GamePhase::Paused);
        assert_eq!(game.time_ticks(), 0);
    }

    #[test]
    fn test_tick_moves_ball() {
        let mut game = playing(Difficulty::Medium);
        let before = game.session().unwrap().ball;
        tick(&mut game, &TickInput::default());
        let after = game.session().unwrap().ball;
        assert_eq!(after.pos, before.pos + before.vel);
        assert_eq!(game.time_ticks(), 1);
    }

    #[test]
    fn test_paused_freezes_simulation() {
        let mut game = playing(Difficulty::Medium);
        tick(&mut game, &TickInput::default());
        game.pause();
        game.set_paddle_direction(PaddleDirection::Left);
        let frozen = game.session().cloned();

        for _ in 0..100 {
            tick(&mut game, &TickInput::default());
        }
        assert_eq!(game.session().cloned(), frozen);
        assert_eq!(game.time_ticks(), 1);

        game.resume();
        tick(&mut game, &TickInput::default());
        assert_ne!(game.session().cloned(), frozen);
    }

    #[test]
    fn test_paddle_follows_direction() {
        let mut game = playing(Difficulty::Medium);
        game.set_paddle_direction(PaddleDirection::Right);
        tick(&mut game, &TickInput::default());
        assert_eq!(game.session().unwrap().paddle.x, 357.0);

        for _ in 0..200 {
            tick(&mut game, &TickInput::default());
        }
        let s = game.session().unwrap();
        assert!(s.paddle.x <= 700.0);
    }

    #[test]
    fn test_side_wall_reflects() {
        let mut game = playing(Difficulty::Medium);
        place_ball(&mut game, Vec2::new(785.0, 300.0), Vec2::new(6.0, -2.0));
        tick(&mut game, &TickInput::default());
        let ball = game.session().unwrap().ball;
        assert_eq!(ball.vel, Vec2::new(-6.0, -2.0));
    }

    #[test]
    fn test_top_wall_reflects() {
        let mut game = playing(Difficulty::Medium);
        // Left of the brick wall so no brick interferes
        place_ball(&mut game, Vec2::new(15.0, 12.0), Vec2::new(0.0, -5.0));
        tick(&mut game, &TickInput::default());
        assert_eq!(game.session().unwrap().ball.vel, Vec2::new(0.0, 5.0));
    }

    #[test]
    fn test_paddle_bounce_preserves_speed() {
        let mut game = playing(Difficulty::Medium);
        place_ball(&mut game, Vec2::new(390.0, 555.0), Vec2::new(2.0, 6.0));
        let speed = Vec2::new(2.0, 6.0).length();
        tick(&mut game, &TickInput::default());

        let ball = game.session().unwrap().ball;
        assert!((ball.speed() - speed).abs() < EPS);
        assert!(ball.vel.y < 0.0);
        assert_eq!(ball.pos.y, 560.0);
    }

    #[test]
    fn test_wall_and_paddle_same_tick() {
        let mut game = playing(Difficulty::Medium);
        session_mut(&mut game).paddle.x = 0.0;
        place_ball(&mut game, Vec2::new(5.0, 556.0), Vec2::new(-3.0, 5.0));
        let speed = Vec2::new(-3.0, 5.0).length();
        tick(&mut game, &TickInput::default());

        // Wall flips vx first, then the left-edge paddle hit sends it back left
        let ball = game.session().unwrap().ball;
        assert!(ball.vel.x < 0.0);
        assert!(ball.vel.y < 0.0);
        assert!((ball.speed() - speed).abs() < EPS);
        assert_eq!(ball.pos, Vec2::new(2.0, 560.0));
    }

    #[test]
    fn test_center_hit_bounces_vertically() {
        let mut game = playing(Difficulty::Medium);
        place_ball(&mut game, Vec2::new(400.0, 556.0), Vec2::new(0.0, 5.0));
        tick(&mut game, &TickInput::default());

        let ball = game.session().unwrap().ball;
        assert!(ball.vel.x.abs() < EPS);
        assert!((ball.vel.y + 5.0).abs() < EPS);
    }

    #[test]
    fn test_miss_respawns_ball() {
        let mut game = playing(Difficulty::Medium);
        session_mut(&mut game).paddle.x = 0.0;
        session_mut(&mut game).score = 4;
        place_ball(&mut game, Vec2::new(700.0, 606.0), Vec2::new(1.0, 5.0));
        tick(&mut game, &TickInput::default());

        assert_eq!(game.phase(), GamePhase::Playing);
        let s = game.session().unwrap();
        assert_eq!(s.lives, 2);
        assert_eq!(s.score, 4);
        assert_eq!(s.ball.pos, Vec2::new(400.0, 560.0));
        assert_eq!(s.ball.vel, Vec2::new(1.0, 5.0));
        assert_eq!(s.paddle.x, 350.0);
        assert_eq!(game.drain_events(), vec![GameEvent::LifeLost { lives: 2 }]);
    }

    #[test]
    fn test_last_life_ends_game_and_freezes() {
        let mut game = playing(Difficulty::Hard);
        place_ball(&mut game, Vec2::new(20.0, 606.0), Vec2::new(0.0, 5.0));
        tick(&mut game, &TickInput::default());

        assert_eq!(game.phase(), GamePhase::GameOver);
        assert_eq!(game.session().unwrap().lives, 0);
        assert_eq!(
            game.drain_events(),
            vec![
                GameEvent::LifeLost { lives: 0 },
                GameEvent::GameOver { score: 0 }
            ]
        );

        let frozen = game.session().cloned();
        game.set_paddle_direction(PaddleDirection::Left);
        for _ in 0..10 {
            tick(&mut game, &TickInput::default());
        }
        assert_eq!(game.session().cloned(), frozen);
    }

    #[test]
    fn test_last_brick_wins() {
        let mut game = playing(Difficulty::Medium);
        {
            let s = session_mut(&mut game);
            for column in 0..s.bricks.columns() {
                for row in 0..s.bricks.rows() {
                    if (column, row) != (0, 0) {
                        s.bricks.get_mut(column, row).unwrap().alive = false;
                    }
                }
            }
            s.score = s.max_score() - 1;
        }
        place_ball(&mut game, Vec2::new(60.0, 62.0), Vec2::new(0.0, -3.0));
        tick(&mut game, &TickInput::default());

        assert_eq!(game.phase(), GamePhase::Win);
        let s = game.session().unwrap();
        assert_eq!(s.score, 45);
        assert_eq!(s.bricks.alive_count(), 0);
        assert_eq!(
            game.drain_events(),
            vec![
                GameEvent::BrickDestroyed { column: 0, row: 0 },
                GameEvent::Win { score: 45 }
            ]
        );

        let frozen = game.session().cloned();
        game.set_paddle_direction(PaddleDirection::Right);
        for _ in 0..10 {
            tick(&mut game, &TickInput::default());
        }
        assert_eq!(game.phase(), GamePhase::Win);
        assert_eq!(game.session().cloned(), frozen);
    }

    #[test]
    fn test_one_brick_per_tick() {
        let mut game = playing(Difficulty::Medium);
        // Ball box straddles bricks (0,0) and (1,0)
        place_ball(&mut game, Vec2::new(108.5, 40.0), Vec2::new(0.0, -1.0));
        tick(&mut game, &TickInput::default());

        let s = game.session().unwrap();
        assert_eq!(s.score, 1);
        assert!(!s.bricks.get(0, 0).unwrap().alive);
        assert!(s.bricks.get(1, 0).unwrap().alive);
        assert_eq!(s.ball.vel, Vec2::new(0.0, 1.0));
    }

    #[test]
    fn test_restart_twice_reproduces_fresh_session() {
        let mut game = playing(Difficulty::Medium);
        // Restart is not legal while playing
        assert!(!game.restart());
        assert!(!game.restart());
        let s = game.session().unwrap();
        assert_eq!((s.score, s.lives), (0, 3));

        game.set_paddle_direction(PaddleDirection::Left);
        for _ in 0..400 {
            tick(&mut game, &TickInput::default());
        }
        if game.phase() == GamePhase::Playing {
            game.pause();
        }

        for _ in 0..2 {
            assert!(game.restart());
            let s = game.session().unwrap();
            assert_eq!(s.score, 0);
            assert_eq!(s.lives, 3);
            assert_eq!(s.bricks.alive_count(), s.bricks.len());
            assert_eq!(game.phase(), GamePhase::Playing);
            game.pause();
        }
    }

    #[test]
    fn test_determinism() {
        let mut game1 = Game::new(Field::default(), 99999);
        let mut game2 = Game::new(Field::default(), 99999);

        let mut start = TickInput::default();
        start.push(Command::SelectDifficulty(Difficulty::Easy));
        let mut left = TickInput::default();
        left.push(Command::SetPaddleDirection(PaddleDirection::Left));

        for input in [&start, &left] {
            tick(&mut game1, input);
            tick(&mut game2, input);
        }
        for _ in 0..500 {
            tick(&mut game1, &TickInput::default());
            tick(&mut game2, &TickInput::default());
        }

        assert_eq!(game1.phase(), game2.phase());
        assert_eq!(game1.session(), game2.session());
        assert_eq!(game1.drain_events(), game2.drain_events());
    }

    fn direction_from(n: u8) -> PaddleDirection {
        match n {
            0 => PaddleDirection::Left,
            1 => PaddleDirection::Right,
            _ => PaddleDirection::None,
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_score_and_lives_stay_in_bounds(
            seed in any::<u64>(),
            level in 0usize..3,
            moves in proptest::collection::vec(0u8..3, 1..40),
        ) {
            let difficulty = Difficulty::ALL[level];
            let start_lives = difficulty.preset().lives;
            let mut game = Game::new(Field::default(), seed);
            game.select_difficulty(difficulty);

            for m in moves {
                game.set_paddle_direction(direction_from(m));
                for _ in 0..50 {
                    tick(&mut game, &TickInput::default());
                    let s = game.session().unwrap();
                    prop_assert!(s.lives <= start_lives);
                    prop_assert!(s.score <= s.max_score());
                    prop_assert_eq!(s.score as usize, s.bricks.len() - s.bricks.alive_count());
                    match game.phase() {
                        GamePhase::Playing => {
                            prop_assert!(s.lives > 0);
                        }
                        GamePhase::GameOver => {
                            prop_assert_eq!(s.lives, 0);
                        }
                        GamePhase::Win => {
                            prop_assert_eq!(s.score, s.max_score());
                        }
                        other => {
                            prop_assert!(false, "unexpected phase {:?}", other);
                        }
                    }
                }
            }
        }
    }
}
