//! Arcade systems.
//!
//! Submodules overview
//! - [`audio`] – audio thread and the bridge systems around it
//! - [`gamestate`] – pending state check and the `in_state` run condition
//! - [`input`] – read hardware input into [`crate::resources::input::InputState`]
//! - [`menu`] – menu input handling, selection and teardown
//! - [`pong`], [`reaction`], [`snake`] – per-frame drivers of each game
//! - [`render`] – draw the current screen and the debug overlay
//! - [`time`] – update frame delta

pub mod audio;
pub mod gamestate;
pub mod input;
pub mod menu;
pub mod pong;
pub mod reaction;
pub mod render;
pub mod snake;
pub mod time;
