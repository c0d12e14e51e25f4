//! Input action events.
//!
//! This module defines [`InputEvent`] which is triggered when an input action
//! is pressed or released. The [`InputAction`] enum lists all recognized
//! actions. The menu reacts to these events; the games read
//! [`InputState`](crate::resources::input::InputState) directly.

use bevy_ecs::prelude::*;

/// Enumeration of logical input actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputAction {
    /// Primary direction: up (default: W key).
    MainDirectionUp,
    /// Primary direction: down (default: S key).
    MainDirectionDown,
    /// Primary direction: left (default: A key).
    MainDirectionLeft,
    /// Primary direction: right (default: D key).
    MainDirectionRight,
    /// Secondary direction: up (default: Up arrow).
    SecondaryDirectionUp,
    /// Secondary direction: down (default: Down arrow).
    SecondaryDirectionDown,
    /// Secondary direction: left (default: Left arrow).
    SecondaryDirectionLeft,
    /// Secondary direction: right (default: Right arrow).
    SecondaryDirectionRight,
    /// Back/cancel action (default: Escape).
    Back,
    /// Primary action button (default: Space).
    Action1,
    /// Secondary action button (default: Enter).
    Action2,
    /// Debug overlay toggle (default: F11).
    ToggleDebug,
}

/// Event emitted when an input action is pressed or released.
#[derive(Event, Debug, Clone, Copy)]
pub struct InputEvent {
    /// The input action that triggered this event.
    pub action: InputAction,
    /// Whether the action was pressed (true) or released (false).
    pub pressed: bool,
}
