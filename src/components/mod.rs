//! ECS components and plain data shapes shared by the games.
//!
//! Submodules overview:
//! - [`boxcollider`] – axis-aligned box used for hit tests and drawing
//! - [`menu`] – interactive menu component and its actions

pub mod boxcollider;
pub mod menu;
