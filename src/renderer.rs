//! Canvas 2D rendering
//!
//! Reads the game through a shared reference and draws one frame. Never
//! mutates simulation state.

use std::f64::consts::TAU;

use web_sys::CanvasRenderingContext2d;

use crate::consts::{BRICK_HEIGHT, BRICK_WIDTH};
use crate::sim::{Game, GamePhase, Session};
use crate::ui::{self, Button};

const BACKGROUND: &str = "#000";
const PADDLE_COLOR: &str = "#0f0";
const BALL_COLOR: &str = "#fff";
const BRICK_COLOR: &str = "#0095DD";
const TEXT_COLOR: &str = "#fff";
const DIM_COLOR: &str = "rgba(0, 0, 0, 0.5)";

pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
    width: f64,
    height: f64,
}

impl CanvasRenderer {
    pub fn new(ctx: CanvasRenderingContext2d, width: f32, height: f32) -> Self {
        Self {
            ctx,
            width: width as f64,
            height: height as f64,
        }
    }

    pub fn render(&self, game: &Game) {
        self.ctx.set_fill_style_str(BACKGROUND);
        self.ctx.fill_rect(0.0, 0.0, self.width, self.height);

        let phase = game.phase();
        if phase == GamePhase::Menu {
            self.draw_menu();
            return;
        }

        if let Some(session) = game.session() {
            self.draw_session(game, session);
        }

        if phase.shows_overlay() {
            self.draw_overlay(phase);
        }
    }

    fn draw_menu(&self) {
        self.ctx.set_fill_style_str(TEXT_COLOR);
        self.ctx.set_font("48px Arial");
        self.ctx.set_text_align("center");
        self.ctx
            .fill_text(ui::GAME_TITLE, self.width / 2.0, self.height / 2.0 - 100.0)
            .ok();
        self.ctx.set_text_align("left");

        for button in ui::menu_buttons(self.width as f32, self.height as f32) {
            self.draw_button(&button);
        }
    }

    fn draw_session(&self, game: &Game, session: &Session) {
        let paddle = session.paddle.rect(game.field());
        self.ctx.set_fill_style_str(PADDLE_COLOR);
        self.ctx.fill_rect(
            paddle.x as f64,
            paddle.y as f64,
            paddle.width as f64,
            paddle.height as f64,
        );

        let ball = &session.ball;
        self.ctx.begin_path();
        self.ctx
            .arc(ball.pos.x as f64, ball.pos.y as f64, ball.radius as f64, 0.0, TAU)
            .ok();
        self.ctx.set_fill_style_str(BALL_COLOR);
        self.ctx.fill();
        self.ctx.close_path();

        self.ctx.set_fill_style_str(BRICK_COLOR);
        for brick in session.bricks.iter().filter(|b| b.alive) {
            self.ctx.fill_rect(
                brick.x as f64,
                brick.y as f64,
                BRICK_WIDTH as f64,
                BRICK_HEIGHT as f64,
            );
        }

        let (score, lives) = ui::hud_text(session);
        self.ctx.set_fill_style_str(TEXT_COLOR);
        self.ctx.set_font("16px Arial");
        self.ctx.fill_text(&score, 8.0, 20.0).ok();
        self.ctx.fill_text(&lives, self.width - 65.0, 20.0).ok();
    }

    fn draw_overlay(&self, phase: GamePhase) {
        self.ctx.set_fill_style_str(DIM_COLOR);
        self.ctx.fill_rect(0.0, 0.0, self.width, self.height);

        let title = ui::overlay_title(phase).unwrap_or_default();

        self.ctx.set_fill_style_str(TEXT_COLOR);
        self.ctx.set_font("24px Arial");
        self.ctx.set_text_align("center");
        self.ctx
            .fill_text(title, self.width / 2.0, self.height / 2.0 - 100.0)
            .ok();
        self.ctx.set_text_align("left");

        for button in ui::buttons_for(phase, self.width as f32, self.height as f32) {
            self.draw_button(&button);
        }
    }

    fn draw_button(&self, button: &Button) {
        let r = &button.rect;
        let (x, y, w, h) = (r.x as f64, r.y as f64, r.width as f64, r.height as f64);

        self.ctx.set_fill_style_str(BRICK_COLOR);
        self.ctx.fill_rect(x, y, w, h);
        self.ctx.set_stroke_style_str(TEXT_COLOR);
        self.ctx.stroke_rect(x, y, w, h);

        self.ctx.set_fill_style_str("#000");
        self.ctx.set_font("16px Arial");
        self.ctx.set_text_align("center");
        self.ctx
            .fill_text(button.label, x + w / 2.0, y + h / 2.0 + 6.0)
            .ok();
        self.ctx.set_text_align("left");
    }
}
