//! Screen size resource.
//!
//! Stores the window dimensions in pixels. Session hooks read it to lay out
//! the reaction target and the pong court, and the renderer to center text.

use bevy_ecs::prelude::Resource;
use raylib::prelude::Vector2;

/// Current screen size in pixels.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenSize {
    /// Width in pixels.
    pub w: i32,
    /// Height in pixels.
    pub h: i32,
}

impl ScreenSize {
    pub fn width(&self) -> f32 {
        self.w as f32
    }

    pub fn height(&self) -> f32 {
        self.h as f32
    }

    /// Center of the screen.
    pub fn center(&self) -> Vector2 {
        Vector2::new(self.width() * 0.5, self.height() * 0.5)
    }
}
