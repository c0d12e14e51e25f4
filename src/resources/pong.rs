//! Two-player pong session.
//!
//! Movement is integrated with the frame delta, so speeds are in pixels per
//! second. The first side to reach [`WINNING_SCORE`] freezes the court until
//! the session is restarted.

use bevy_ecs::prelude::Resource;
use raylib::prelude::Vector2;
use smallvec::SmallVec;

use crate::components::boxcollider::BoxCollider;

pub const PADDLE_WIDTH: f32 = 15.0;
pub const PADDLE_HEIGHT: f32 = 100.0;
/// Horizontal gap between a paddle and its side of the court.
pub const PADDLE_MARGIN: f32 = 30.0;
pub const PADDLE_SPEED: f32 = 400.0;
pub const BALL_RADIUS: f32 = 8.0;
pub const BALL_SPEED: f32 = 300.0;
/// Share of [`BALL_SPEED`] given to the vertical rebound at a paddle edge.
pub const DEFLECTION: f32 = 0.75;
/// Serves leave within +/- this many degrees of the horizontal.
pub const SERVE_ANGLE_DEG: f32 = 45.0;
pub const WINNING_SCORE: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn player_number(self) -> u8 {
        match self {
            Side::Left => 1,
            Side::Right => 2,
        }
    }
}

/// Held-key state for both paddles this frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PaddleInput {
    pub left_up: bool,
    pub left_down: bool,
    pub right_up: bool,
    pub right_down: bool,
}

/// Something notable that happened during an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PongEvent {
    WallBounce,
    PaddleHit(Side),
    Scored(Side),
    Won(Side),
}

pub type PongEvents = SmallVec<[PongEvent; 4]>;

/// State of one pong play-through.
#[derive(Resource, Debug, Clone)]
pub struct PongSession {
    court: Vector2,
    left_y: f32,
    right_y: f32,
    ball: Vector2,
    velocity: Vector2,
    left_score: u32,
    right_score: u32,
    winner: Option<Side>,
    paddle: BoxCollider,
    ball_box: BoxCollider,
}

impl PongSession {
    /// New match on a `width` x `height` court with the ball served.
    pub fn new(width: f32, height: f32, rng: &mut fastrand::Rng) -> Self {
        let paddle_y = height * 0.5 - PADDLE_HEIGHT * 0.5;
        let mut session = Self {
            court: Vector2::new(width, height),
            left_y: paddle_y,
            right_y: paddle_y,
            ball: Vector2::zero(),
            velocity: Vector2::zero(),
            left_score: 0,
            right_score: 0,
            winner: None,
            paddle: BoxCollider::new(PADDLE_WIDTH, PADDLE_HEIGHT),
            ball_box: BoxCollider::centered(BALL_RADIUS * 2.0, BALL_RADIUS * 2.0),
        };
        session.serve(rng);
        session
    }

    /// Put the ball back in the centre with a random direction.
    ///
    /// The angle and the horizontal direction are drawn independently.
    pub fn serve(&mut self, rng: &mut fastrand::Rng) {
        let angle = ((rng.f32() * 2.0 - 1.0) * SERVE_ANGLE_DEG).to_radians();
        let direction = if rng.bool() { 1.0 } else { -1.0 };
        self.serve_with(angle, direction);
    }

    /// Serve at `angle` radians towards `direction` (-1 left, +1 right).
    pub fn serve_with(&mut self, angle: f32, direction: f32) {
        self.ball = self.center();
        self.velocity = Vector2::new(
            direction.signum() * BALL_SPEED * angle.cos(),
            BALL_SPEED * angle.sin(),
        );
    }

    /// Reset both scores and serve a new match.
    pub fn restart(&mut self, rng: &mut fastrand::Rng) {
        self.left_score = 0;
        self.right_score = 0;
        self.winner = None;
        self.serve(rng);
    }

    /// Advance the match by `dt` seconds.
    ///
    /// Does nothing once a side has won.
    pub fn update(&mut self, dt: f32, input: PaddleInput, rng: &mut fastrand::Rng) -> PongEvents {
        let mut events = PongEvents::new();
        if self.winner.is_some() {
            return events;
        }

        self.left_y = self.move_paddle(self.left_y, input.left_up, input.left_down, dt);
        self.right_y = self.move_paddle(self.right_y, input.right_up, input.right_down, dt);

        self.ball += self.velocity * dt;

        if self.bounce_on_walls() {
            events.push(PongEvent::WallBounce);
        }
        if let Some(side) = self.bounce_on_paddles() {
            events.push(PongEvent::PaddleHit(side));
        }

        let scorer = if self.ball.x < 0.0 {
            Some(Side::Right)
        } else if self.ball.x > self.court.x {
            Some(Side::Left)
        } else {
            None
        };
        if let Some(side) = scorer {
            match side {
                Side::Left => self.left_score += 1,
                Side::Right => self.right_score += 1,
            }
            events.push(PongEvent::Scored(side));
            self.serve(rng);
            if self.score(side) >= WINNING_SCORE {
                self.winner = Some(side);
                events.push(PongEvent::Won(side));
            }
        }
        events
    }

    fn move_paddle(&self, y: f32, up: bool, down: bool, dt: f32) -> f32 {
        let mut y = y;
        if up {
            y -= PADDLE_SPEED * dt;
        }
        if down {
            y += PADDLE_SPEED * dt;
        }
        y.clamp(0.0, (self.court.y - PADDLE_HEIGHT).max(0.0))
    }

    /// Reflect off the top or bottom wall when moving into it.
    fn bounce_on_walls(&mut self) -> bool {
        if self.ball.y - BALL_RADIUS <= 0.0 && self.velocity.y < 0.0 {
            self.ball.y = BALL_RADIUS;
            self.velocity.y = -self.velocity.y;
            return true;
        }
        let bottom = self.court.y - BALL_RADIUS;
        if self.ball.y >= bottom && self.velocity.y > 0.0 {
            self.ball.y = bottom;
            self.velocity.y = -self.velocity.y;
            return true;
        }
        false
    }

    /// Reflect off a paddle the ball is travelling towards.
    fn bounce_on_paddles(&mut self) -> Option<Side> {
        let left = self.paddle_position(Side::Left);
        if self.velocity.x < 0.0 && self.ball_box.overlaps(self.ball, &self.paddle, left) {
            self.deflect(left.y);
            return Some(Side::Left);
        }
        let right = self.paddle_position(Side::Right);
        if self.velocity.x > 0.0 && self.ball_box.overlaps(self.ball, &self.paddle, right) {
            self.deflect(right.y);
            return Some(Side::Right);
        }
        None
    }

    fn deflect(&mut self, paddle_top: f32) {
        self.velocity.x = -self.velocity.x;
        let half = PADDLE_HEIGHT * 0.5;
        let offset = (paddle_top + half - self.ball.y) / half;
        self.velocity.y = -offset * BALL_SPEED * DEFLECTION;
    }

    /// Top-left corner of a paddle.
    pub fn paddle_position(&self, side: Side) -> Vector2 {
        match side {
            Side::Left => Vector2::new(PADDLE_MARGIN, self.left_y),
            Side::Right => Vector2::new(
                self.court.x - PADDLE_MARGIN - PADDLE_WIDTH,
                self.right_y,
            ),
        }
    }

    pub fn paddle(&self) -> &BoxCollider {
        &self.paddle
    }

    pub fn center(&self) -> Vector2 {
        self.court * 0.5
    }

    pub fn court(&self) -> Vector2 {
        self.court
    }

    pub fn ball(&self) -> Vector2 {
        self.ball
    }

    pub fn velocity(&self) -> Vector2 {
        self.velocity
    }

    /// Place the ball and set its velocity directly.
    pub fn set_ball(&mut self, position: Vector2, velocity: Vector2) {
        self.ball = position;
        self.velocity = velocity;
    }

    /// Move a paddle's top edge, clamped to the court.
    pub fn set_paddle(&mut self, side: Side, y: f32) {
        let y = y.clamp(0.0, (self.court.y - PADDLE_HEIGHT).max(0.0));
        match side {
            Side::Left => self.left_y = y,
            Side::Right => self.right_y = y,
        }
    }

    pub fn score(&self, side: Side) -> u32 {
        match side {
            Side::Left => self.left_score,
            Side::Right => self.right_score,
        }
    }

    pub fn winner(&self) -> Option<Side> {
        self.winner
    }

    /// Score line shown at the top of the court.
    pub fn score_line(&self) -> String {
        format!("{}  :  {}", self.left_score, self.right_score)
    }

    /// Victory banner, once a side has won.
    pub fn winner_banner(&self) -> Option<String> {
        self.winner.map(|side| {
            format!(
                "JOUEUR {} GAGNE!\nEspace: Rejouer | Echap: Menu",
                side.player_number()
            )
        })
    }
}
