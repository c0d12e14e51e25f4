//! Immediate-mode drawing of the current screen.
//!
//! [`render_system`] runs last each frame. It reads whichever session
//! resource is live and draws it with Raylib; nothing here mutates game
//! state. The menu backdrop is loaded lazily on the first menu frame.

use bevy_ecs::prelude::*;
use raylib::prelude::*;

use crate::components::menu::Menu;
use crate::resources::assetstore::{FontStore, MAIN_FONT, MENU_BACKGROUND, TextureStore};
use crate::resources::debugmode::DebugMode;
use crate::resources::gameconfig::GameConfig;
use crate::resources::gamestate::{GameState, GameStates};
use crate::resources::highscores::HighScores;
use crate::resources::pong::{BALL_RADIUS, PongSession, Side};
use crate::resources::reaction::{REACTION_SCORE_KEY, ReactionPhase, ReactionSession};
use crate::resources::screensize::ScreenSize;
use crate::resources::snake::{GRID_SIZE, SNAKE_SCORE_KEY, SnakeSession};
use crate::resources::worldtime::WorldTime;

const TEXT_SPACING: f32 = 1.0;
const TITLE_SIZE: f32 = 48.0;
const HUD_SIZE: f32 = 24.0;
/// Side of one snake cell in pixels.
pub const CELL_SIZE: f32 = 25.0;
/// Extra downward shift of the snake board, leaving room for the HUD.
pub const BOARD_TOP_MARGIN: f32 = 30.0;

/// Text drawing with the main font, or Raylib's built-in one if absent.
struct Text<'a> {
    font: Option<&'a Font>,
}

impl Text<'_> {
    fn measure(&self, text: &str, size: f32) -> Vector2 {
        match self.font {
            Some(font) => raylib::core::text::measure_text_ex(font, text, size, TEXT_SPACING),
            None => Vector2::new(raylib::core::text::measure_text(text, size as i32) as f32, size),
        }
    }

    fn draw(&self, d: &mut RaylibDrawHandle, text: &str, position: Vector2, size: f32, color: Color) {
        match self.font {
            Some(font) => d.draw_text_ex(font, text, position, size, TEXT_SPACING, color),
            None => d.draw_text(text, position.x as i32, position.y as i32, size as i32, color),
        }
    }

    fn draw_centered(
        &self,
        d: &mut RaylibDrawHandle,
        text: &str,
        center_x: f32,
        y: f32,
        size: f32,
        color: Color,
    ) {
        let width = self.measure(text, size).x;
        self.draw(d, text, Vector2::new(center_x - width * 0.5, y), size, color);
    }
}

/// Top-left corner of the snake board, centered and pushed down by
/// [`BOARD_TOP_MARGIN`].
pub fn snake_board_origin(screen: &ScreenSize) -> Vector2 {
    let side = GRID_SIZE as f32 * CELL_SIZE;
    Vector2::new(
        (screen.width() - side) * 0.5,
        (screen.height() - side) * 0.5 + BOARD_TOP_MARGIN,
    )
}

/// Fill color of the reaction target. The target stays green on the result.
pub fn phase_color(phase: ReactionPhase) -> Color {
    match phase {
        ReactionPhase::Waiting => Color::new(100, 100, 100, 255),
        ReactionPhase::Red => Color::RED,
        ReactionPhase::Green | ReactionPhase::Result => Color::GREEN,
        ReactionPhase::TooEarly => Color::new(150, 0, 0, 255),
    }
}

/// Score line shown under a game, with the stored record for `key`.
pub fn score_hud(score: u32, scores: &HighScores, key: &str) -> String {
    format!("Score: {}   Record: {}", score, scores.get(key))
}

/// Draw the frame for the current state.
#[allow(clippy::too_many_arguments)]
pub fn render_system(
    mut rl: NonSendMut<RaylibHandle>,
    th: NonSend<RaylibThread>,
    fonts: NonSend<FontStore>,
    mut textures: NonSendMut<TextureStore>,
    state: Res<GameState>,
    config: Res<GameConfig>,
    screen: Res<ScreenSize>,
    scores: Res<HighScores>,
    time: Res<WorldTime>,
    debug: Option<Res<DebugMode>>,
    menus: Query<&Menu>,
    reaction: Option<Res<ReactionSession>>,
    snake: Option<Res<SnakeSession>>,
    pong: Option<Res<PongSession>>,
) {
    let state = state.get();

    // Loading needs the handle, so it happens before the draw scope opens.
    if state == GameStates::Menu
        && let Some(path) = config.menu_background.as_ref()
    {
        let path = path.to_string_lossy();
        textures.get_or_load(MENU_BACKGROUND, || {
            rl.load_texture(&th, &path).map_err(|e| e.to_string())
        });
    }

    let text = Text {
        font: fonts.get(MAIN_FONT),
    };
    let fps = rl.get_fps();
    let mut d = rl.begin_drawing(&th);

    match state {
        GameStates::Menu => draw_menu(
            &mut d,
            &text,
            &screen,
            &scores,
            textures.get(MENU_BACKGROUND),
            &menus,
        ),
        GameStates::Reaction => {
            if let Some(session) = reaction.as_deref() {
                draw_reaction(&mut d, &text, &screen, &scores, session);
            }
        }
        GameStates::Snake => {
            if let Some(session) = snake.as_deref() {
                draw_snake(&mut d, &text, &screen, &scores, session);
            }
        }
        GameStates::Pong => {
            if let Some(session) = pong.as_deref() {
                draw_pong(&mut d, &text, session);
            }
        }
        GameStates::None | GameStates::Setup | GameStates::Quitting => {
            d.clear_background(Color::BLACK);
        }
    }

    if debug.is_some() {
        let mut lines = vec![
            format!("FPS: {}", fps),
            format!("State: {:?}", state),
            format!("Frame: {}", time.frame_count),
        ];
        if let Some(session) = reaction.as_deref() {
            lines.push(format!(
                "Phase: {:?} {:.2}/{:.2}s",
                session.phase(),
                session.phase_elapsed(),
                session.wait_time()
            ));
        }
        if let Some(session) = snake.as_deref() {
            lines.push(format!(
                "Length: {} Dir: {:?}",
                session.body().len(),
                session.direction()
            ));
        }
        if let Some(session) = pong.as_deref() {
            let v = session.velocity();
            lines.push(format!("Ball v: ({:.0}, {:.0})", v.x, v.y));
        }
        for (i, line) in lines.iter().enumerate() {
            text.draw(
                &mut d,
                line,
                Vector2::new(10.0, screen.height() - 20.0 * (lines.len() - i) as f32),
                16.0,
                Color::YELLOW,
            );
        }
    }
}

fn draw_menu(
    d: &mut RaylibDrawHandle,
    text: &Text,
    screen: &ScreenSize,
    scores: &HighScores,
    background: Option<&Texture2D>,
    menus: &Query<&Menu>,
) {
    d.clear_background(Color::new(20, 20, 40, 255));
    if let Some(texture) = background {
        let source = Rectangle::new(0.0, 0.0, texture.width as f32, texture.height as f32);
        let dest = Rectangle::new(0.0, 0.0, screen.width(), screen.height());
        d.draw_texture_pro(texture, source, dest, Vector2::zero(), 0.0, Color::WHITE);
    }

    let center_x = screen.width() * 0.5;
    text.draw_centered(d, "MINI ARCADE", center_x, 80.0, TITLE_SIZE, Color::GOLD);

    for menu in menus.iter() {
        for (i, item) in menu.items.iter().enumerate() {
            let (label, color) = if i == menu.selected_index {
                (format!("> {} <", item.label), menu.selected_color)
            } else {
                (item.label.clone(), menu.normal_color)
            };
            text.draw_centered(d, &label, item.position.x, item.position.y, menu.font_size, color);
        }
    }

    let records = format!(
        "Record Reflex: {}   Record Snake: {}",
        scores.get(REACTION_SCORE_KEY),
        scores.get(SNAKE_SCORE_KEY)
    );
    text.draw_centered(
        d,
        &records,
        center_x,
        screen.height() - 60.0,
        20.0,
        Color::LIGHTGRAY,
    );
}

fn draw_reaction(
    d: &mut RaylibDrawHandle,
    text: &Text,
    screen: &ScreenSize,
    scores: &HighScores,
    session: &ReactionSession,
) {
    d.clear_background(Color::new(30, 30, 30, 255));
    let center_x = screen.width() * 0.5;

    text.draw_centered(d, session.instruction(), center_x, 40.0, HUD_SIZE, Color::WHITE);

    let target = session.target().rect(session.target_center());
    d.draw_rectangle_rec(target, phase_color(session.phase()));
    d.draw_rectangle_lines_ex(target, 3.0, Color::WHITE);

    let hud = score_hud(session.score(), scores, REACTION_SCORE_KEY);
    text.draw(d, &hud, Vector2::new(20.0, screen.height() - 80.0), HUD_SIZE, Color::WHITE);
    if let Some(seconds) = session.last_reaction() {
        let line = format!("Temps: {:.0} ms", seconds * 1000.0);
        text.draw(d, &line, Vector2::new(20.0, screen.height() - 45.0), HUD_SIZE, Color::LIME);
    }
}

fn draw_snake(
    d: &mut RaylibDrawHandle,
    text: &Text,
    screen: &ScreenSize,
    scores: &HighScores,
    session: &SnakeSession,
) {
    d.clear_background(Color::BLACK);
    let origin = snake_board_origin(screen);
    let side = GRID_SIZE as f32 * CELL_SIZE;
    let cell_rect = |x: i32, y: i32| {
        Rectangle::new(
            origin.x + x as f32 * CELL_SIZE,
            origin.y + y as f32 * CELL_SIZE,
            CELL_SIZE - 1.0,
            CELL_SIZE - 1.0,
        )
    };

    d.draw_rectangle_lines_ex(
        Rectangle::new(origin.x - 2.0, origin.y - 2.0, side + 4.0, side + 4.0),
        2.0,
        Color::DARKGRAY,
    );

    let apple = session.apple();
    d.draw_rectangle_rec(cell_rect(apple.x, apple.y), Color::RED);
    for (i, cell) in session.body().iter().enumerate() {
        let color = if i == 0 { Color::LIME } else { Color::DARKGREEN };
        d.draw_rectangle_rec(cell_rect(cell.x, cell.y), color);
    }

    let hud = score_hud(session.score(), scores, SNAKE_SCORE_KEY);
    text.draw(d, &hud, Vector2::new(20.0, 20.0), HUD_SIZE, Color::WHITE);

    if session.is_game_over() {
        text.draw_centered(
            d,
            "GAME OVER!\nEspace: Rejouer | Echap: Menu",
            screen.width() * 0.5,
            screen.height() * 0.5 - HUD_SIZE,
            30.0,
            Color::RED,
        );
    }
}

fn draw_pong(d: &mut RaylibDrawHandle, text: &Text, session: &PongSession) {
    d.clear_background(Color::BLACK);
    let court = session.court();
    let center_x = court.x * 0.5;

    let mut y = 0.0;
    while y < court.y {
        d.draw_rectangle_rec(Rectangle::new(center_x - 2.0, y, 4.0, 15.0), Color::GRAY);
        y += 30.0;
    }

    for side in [Side::Left, Side::Right] {
        let rect = session.paddle().rect(session.paddle_position(side));
        d.draw_rectangle_rec(rect, Color::WHITE);
    }
    d.draw_circle_v(session.ball(), BALL_RADIUS, Color::WHITE);

    text.draw_centered(d, &session.score_line(), center_x, 20.0, 40.0, Color::WHITE);

    if let Some(banner) = session.winner_banner() {
        text.draw_centered(d, &banner, center_x, court.y * 0.5 - 40.0, 36.0, Color::GOLD);
    }
}
