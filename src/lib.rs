//! Mini Arcade library.
//!
//! Exposes the arcade's components, events, resources and systems so that
//! the binary and the integration tests build the same world.

pub mod components;
pub mod events;
pub mod game;
pub mod resources;
pub mod systems;
