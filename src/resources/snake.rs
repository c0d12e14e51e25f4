//! Snake session.
//!
//! The snake lives on a square grid and moves one cell per tick, on a fixed
//! interval that does not depend on the frame rate. Direction requests are
//! latched and applied at the next tick. Hitting a wall or the body ends the
//! session until it is restarted.

use bevy_ecs::prelude::Resource;
use log::debug;
use std::collections::VecDeque;

use crate::resources::highscores::HighScores;

/// High-score key of the snake game.
pub const SNAKE_SCORE_KEY: &str = "SnakeGame";
/// Cells per side of the square grid.
pub const GRID_SIZE: i32 = 20;
/// Seconds between two ticks.
pub const MOVE_INTERVAL: f32 = 0.15;
/// Body length at the start of a session.
pub const INITIAL_LENGTH: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Grid step, y grows downwards.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

/// A grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Neighbour one step in `direction`.
    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self::new(self.x + dx, self.y + dy)
    }

    pub fn in_bounds(self) -> bool {
        (0..GRID_SIZE).contains(&self.x) && (0..GRID_SIZE).contains(&self.y)
    }
}

/// Result of one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Moved without eating.
    Moved,
    /// Ate the apple and grew by one cell.
    Ate { new_record: bool },
    /// New head left the grid.
    HitWall,
    /// New head ran into the body.
    HitSelf,
    /// Ate the last free cell; nowhere left to put an apple.
    BoardFull,
}

impl TickOutcome {
    pub fn ends_session(self) -> bool {
        matches!(
            self,
            TickOutcome::HitWall | TickOutcome::HitSelf | TickOutcome::BoardFull
        )
    }
}

/// State of one snake play-through.
#[derive(Resource, Debug, Clone)]
pub struct SnakeSession {
    body: VecDeque<Cell>,
    apple: Cell,
    direction: Direction,
    next_direction: Direction,
    score: u32,
    game_over: bool,
    tick_timer: f32,
}

impl SnakeSession {
    /// Fresh session: three cells in the middle of the grid heading right.
    pub fn new(rng: &mut fastrand::Rng) -> Self {
        let mut session = Self {
            body: VecDeque::new(),
            apple: Cell::new(0, 0),
            direction: Direction::Right,
            next_direction: Direction::Right,
            score: 0,
            game_over: false,
            tick_timer: 0.0,
        };
        session.reset(rng);
        session
    }

    /// Session with an explicit layout: `body` head first, moving in
    /// `direction`, with the apple at `apple`.
    pub fn with_layout(body: Vec<Cell>, direction: Direction, apple: Cell) -> Self {
        Self {
            body: body.into(),
            apple,
            direction,
            next_direction: direction,
            score: 0,
            game_over: false,
            tick_timer: 0.0,
        }
    }

    /// Restart from the initial layout.
    pub fn reset(&mut self, rng: &mut fastrand::Rng) {
        let mid = GRID_SIZE / 2;
        self.body = (0..INITIAL_LENGTH as i32)
            .map(|i| Cell::new(mid - i, mid))
            .collect();
        self.direction = Direction::Right;
        self.next_direction = Direction::Right;
        self.score = 0;
        self.game_over = false;
        self.tick_timer = 0.0;
        self.spawn_apple(rng);
    }

    /// Latch a direction for the next tick.
    ///
    /// The reverse of the current direction is rejected, as is any request
    /// once the session is over. Returns whether the request was accepted.
    pub fn request_direction(&mut self, direction: Direction) -> bool {
        if self.game_over || direction == self.direction.opposite() {
            return false;
        }
        self.next_direction = direction;
        true
    }

    /// Accumulate `dt` and tick once when the interval has elapsed.
    pub fn advance(
        &mut self,
        dt: f32,
        rng: &mut fastrand::Rng,
        scores: &mut HighScores,
    ) -> Option<TickOutcome> {
        if self.game_over {
            return None;
        }
        self.tick_timer += dt;
        if self.tick_timer < MOVE_INTERVAL {
            return None;
        }
        self.tick_timer = 0.0;
        Some(self.tick(rng, scores))
    }

    /// Move one cell in the latched direction. Callers check `game_over`.
    fn tick(&mut self, rng: &mut fastrand::Rng, scores: &mut HighScores) -> TickOutcome {
        self.direction = self.next_direction;
        let head = self.head().step(self.direction);

        if !head.in_bounds() {
            self.game_over = true;
            return TickOutcome::HitWall;
        }
        if self.body.contains(&head) {
            self.game_over = true;
            return TickOutcome::HitSelf;
        }

        self.body.push_front(head);
        if head != self.apple {
            self.body.pop_back();
            return TickOutcome::Moved;
        }

        self.score += 1;
        let new_record = scores.update(SNAKE_SCORE_KEY, self.score);
        if !self.spawn_apple(rng) {
            self.game_over = true;
            return TickOutcome::BoardFull;
        }
        TickOutcome::Ate { new_record }
    }

    /// Place the apple on a uniformly random free cell.
    ///
    /// Returns `false` when the body covers the whole grid.
    fn spawn_apple(&mut self, rng: &mut fastrand::Rng) -> bool {
        if self.body.len() >= (GRID_SIZE * GRID_SIZE) as usize {
            return false;
        }
        loop {
            let candidate = Cell::new(rng.i32(0..GRID_SIZE), rng.i32(0..GRID_SIZE));
            if !self.occupies(candidate) {
                debug!("Apple spawned at ({}, {})", candidate.x, candidate.y);
                self.apple = candidate;
                return true;
            }
        }
    }

    pub fn occupies(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    pub fn head(&self) -> Cell {
        // the body is never empty: it starts at INITIAL_LENGTH and only grows
        self.body.front().copied().unwrap_or(Cell::new(0, 0))
    }

    pub fn body(&self) -> &VecDeque<Cell> {
        &self.body
    }

    pub fn apple(&self) -> Cell {
        self.apple
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn next_direction(&self) -> Direction {
        self.next_direction
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }
}
