//! High-level arcade state resources.
//!
//! [`GameState`] holds the authoritative screen the arcade is on and
//! [`NextGameState`] any transition requested by systems or observers. See
//! `crate::events::gamestate::observe_gamestate_change_event` for how a
//! transition is applied and hooks are invoked.

use bevy_ecs::prelude::Resource;

/// Discrete screens the arcade can be in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GameStates {
    #[default]
    None,
    Setup,
    Menu,
    Reaction,
    Snake,
    Pong,
    Quitting,
}

impl GameStates {
    /// Name of the hook run when entering this state, if any.
    pub fn enter_hook(&self) -> Option<&'static str> {
        match self {
            GameStates::None => None,
            GameStates::Setup => Some("setup"),
            GameStates::Menu => Some("enter_menu"),
            GameStates::Reaction => Some("enter_reaction"),
            GameStates::Snake => Some("enter_snake"),
            GameStates::Pong => Some("enter_pong"),
            GameStates::Quitting => Some("quit_game"),
        }
    }

    /// Name of the hook run when leaving this state, if any.
    pub fn exit_hook(&self) -> Option<&'static str> {
        match self {
            GameStates::Menu => Some("exit_menu"),
            GameStates::Reaction => Some("exit_reaction"),
            GameStates::Snake => Some("exit_snake"),
            GameStates::Pong => Some("exit_pong"),
            GameStates::None | GameStates::Setup | GameStates::Quitting => None,
        }
    }
}

/// Representation of a requested next state.
///
/// Use [`NextGameState::set`] to mark a transition as pending; an observer
/// will later apply it and reset the value to [`NextGameStates::Unchanged`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum NextGameStates {
    #[default]
    Unchanged,
    Pending(GameStates),
}

/// Authoritative current game state.
#[derive(Resource, Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct GameState {
    current: GameStates,
}

impl GameState {
    /// Create a new state initialized to [`GameStates::None`].
    pub fn new() -> Self {
        Self::default()
    }
    /// Read-only access to the current state.
    pub fn get(&self) -> GameStates {
        self.current
    }
    /// Update the current state immediately.
    ///
    /// Prefer requesting transitions via [`NextGameState`] so that the
    /// enter/exit hooks run.
    pub fn set(&mut self, state: GameStates) {
        self.current = state;
    }
}

/// Intent to change to a new game state.
#[derive(Resource, Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct NextGameState {
    next: NextGameStates,
}

impl NextGameState {
    /// Create a new value initialized to [`NextGameStates::Unchanged`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the current transition request.
    pub fn get(&self) -> &NextGameStates {
        &self.next
    }

    /// Request a transition to `next` by marking it as pending.
    ///
    /// A later request in the same frame replaces an earlier one.
    pub fn set(&mut self, next: GameStates) {
        self.next = NextGameStates::Pending(next);
    }

    /// Reset to [`NextGameStates::Unchanged`].
    pub fn reset(&mut self) {
        self.next = NextGameStates::Unchanged;
    }
}
