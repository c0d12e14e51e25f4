//! Per-frame input resource.
//!
//! Captures the subset of keyboard and mouse state the arcade cares about and
//! exposes it to systems via the [`InputState`] resource. W/S drive the left
//! pong paddle, the arrow keys drive the right one; both sets steer the
//! snake and move the menu cursor.
use bevy_ecs::prelude::*;
use raylib::prelude::*;

use crate::events::input::InputAction;

#[derive(Debug, Clone, Copy)]
/// Boolean key state with an associated keyboard binding.
pub struct BoolState {
    /// Whether the key is currently held this frame.
    pub active: bool,
    /// Whether the key was just pressed this frame.
    pub just_pressed: bool,
    /// Whether the key was just released this frame.
    pub just_released: bool,

    /// The key bound to this action.
    pub key_binding: KeyboardKey,
}

impl Default for BoolState {
    fn default() -> Self {
        Self::bound(KeyboardKey::KEY_NULL)
    }
}

impl BoolState {
    /// Idle state bound to `key`.
    pub fn bound(key: KeyboardKey) -> Self {
        Self {
            active: false,
            just_pressed: false,
            just_released: false,
            key_binding: key,
        }
    }
}

/// Mouse position and left button edge for this frame.
#[derive(Debug, Clone, Copy)]
pub struct PointerState {
    /// Cursor position in screen pixels.
    pub position: Vector2,
    /// Whether the left button went down this frame.
    pub left_pressed: bool,
}

impl Default for PointerState {
    fn default() -> Self {
        Self {
            position: Vector2::zero(),
            left_pressed: false,
        }
    }
}

/// Resource capturing the per-frame input relevant to the games.
#[derive(Resource, Debug, Clone)]
pub struct InputState {
    pub maindirection_up: BoolState,
    pub maindirection_left: BoolState,
    pub maindirection_down: BoolState,
    pub maindirection_right: BoolState,
    // Arrow keys
    pub secondarydirection_up: BoolState,
    pub secondarydirection_down: BoolState,
    pub secondarydirection_left: BoolState,
    pub secondarydirection_right: BoolState,
    // Action keys
    pub action_back: BoolState,
    pub action_1: BoolState,
    pub action_2: BoolState,
    pub mode_debug: BoolState,
    pub pointer: PointerState,
}

impl Default for InputState {
    fn default() -> Self {
        Self {
            maindirection_up: BoolState::bound(KeyboardKey::KEY_W),
            maindirection_left: BoolState::bound(KeyboardKey::KEY_A),
            maindirection_down: BoolState::bound(KeyboardKey::KEY_S),
            maindirection_right: BoolState::bound(KeyboardKey::KEY_D),
            secondarydirection_up: BoolState::bound(KeyboardKey::KEY_UP),
            secondarydirection_down: BoolState::bound(KeyboardKey::KEY_DOWN),
            secondarydirection_left: BoolState::bound(KeyboardKey::KEY_LEFT),
            secondarydirection_right: BoolState::bound(KeyboardKey::KEY_RIGHT),
            action_back: BoolState::bound(KeyboardKey::KEY_ESCAPE),
            action_1: BoolState::bound(KeyboardKey::KEY_SPACE),
            action_2: BoolState::bound(KeyboardKey::KEY_ENTER),
            mode_debug: BoolState::bound(KeyboardKey::KEY_F11),
            pointer: PointerState::default(),
        }
    }
}

impl InputState {
    /// Every logical action, in polling order.
    pub const ACTIONS: [InputAction; 12] = [
        InputAction::MainDirectionUp,
        InputAction::MainDirectionDown,
        InputAction::MainDirectionLeft,
        InputAction::MainDirectionRight,
        InputAction::SecondaryDirectionUp,
        InputAction::SecondaryDirectionDown,
        InputAction::SecondaryDirectionLeft,
        InputAction::SecondaryDirectionRight,
        InputAction::Back,
        InputAction::Action1,
        InputAction::Action2,
        InputAction::ToggleDebug,
    ];

    /// State bound to a logical action.
    pub fn state(&self, action: InputAction) -> &BoolState {
        match action {
            InputAction::MainDirectionUp => &self.maindirection_up,
            InputAction::MainDirectionDown => &self.maindirection_down,
            InputAction::MainDirectionLeft => &self.maindirection_left,
            InputAction::MainDirectionRight => &self.maindirection_right,
            InputAction::SecondaryDirectionUp => &self.secondarydirection_up,
            InputAction::SecondaryDirectionDown => &self.secondarydirection_down,
            InputAction::SecondaryDirectionLeft => &self.secondarydirection_left,
            InputAction::SecondaryDirectionRight => &self.secondarydirection_right,
            InputAction::Back => &self.action_back,
            InputAction::Action1 => &self.action_1,
            InputAction::Action2 => &self.action_2,
            InputAction::ToggleDebug => &self.mode_debug,
        }
    }

    /// Mutable state bound to a logical action.
    pub fn state_mut(&mut self, action: InputAction) -> &mut BoolState {
        match action {
            InputAction::MainDirectionUp => &mut self.maindirection_up,
            InputAction::MainDirectionDown => &mut self.maindirection_down,
            InputAction::MainDirectionLeft => &mut self.maindirection_left,
            InputAction::MainDirectionRight => &mut self.maindirection_right,
            InputAction::SecondaryDirectionUp => &mut self.secondarydirection_up,
            InputAction::SecondaryDirectionDown => &mut self.secondarydirection_down,
            InputAction::SecondaryDirectionLeft => &mut self.secondarydirection_left,
            InputAction::SecondaryDirectionRight => &mut self.secondarydirection_right,
            InputAction::Back => &mut self.action_back,
            InputAction::Action1 => &mut self.action_1,
            InputAction::Action2 => &mut self.action_2,
            InputAction::ToggleDebug => &mut self.mode_debug,
        }
    }

    /// Whether `action` went down this frame.
    pub fn just_pressed(&self, action: InputAction) -> bool {
        self.state(action).just_pressed
    }

    /// Mark `action` as pressed this frame, as the hardware poll would.
    pub fn press(&mut self, action: InputAction) {
        let state = self.state_mut(action);
        state.active = true;
        state.just_pressed = true;
    }

    /// Drop all edge flags (pressed/released/clicked) while keeping held keys.
    pub fn clear_edges(&mut self) {
        for action in Self::ACTIONS {
            let state = self.state_mut(action);
            state.just_pressed = false;
            state.just_released = false;
        }
        self.pointer.left_pressed = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boolstate_default() {
        let bs = BoolState::default();
        assert!(!bs.active);
        assert!(!bs.just_pressed);
        assert!(!bs.just_released);
        assert_eq!(bs.key_binding, KeyboardKey::KEY_NULL);
    }

    #[test]
    fn test_inputstate_default_all_inactive() {
        let input = InputState::default();
        for action in InputState::ACTIONS {
            assert!(!input.state(action).active, "{action:?} active");
            assert!(!input.just_pressed(action));
        }
        assert!(!input.pointer.left_pressed);
    }

    #[test]
    fn test_inputstate_default_key_bindings() {
        let input = InputState::default();
        assert_eq!(input.maindirection_up.key_binding, KeyboardKey::KEY_W);
        assert_eq!(input.maindirection_down.key_binding, KeyboardKey::KEY_S);
        assert_eq!(input.secondarydirection_up.key_binding, KeyboardKey::KEY_UP);
        assert_eq!(
            input.secondarydirection_down.key_binding,
            KeyboardKey::KEY_DOWN
        );
        assert_eq!(input.action_back.key_binding, KeyboardKey::KEY_ESCAPE);
        assert_eq!(input.action_1.key_binding, KeyboardKey::KEY_SPACE);
        assert_eq!(input.action_2.key_binding, KeyboardKey::KEY_ENTER);
        assert_eq!(input.mode_debug.key_binding, KeyboardKey::KEY_F11);
    }

    #[test]
    fn test_state_mut_targets_matching_field() {
        let mut input = InputState::default();
        input.press(InputAction::SecondaryDirectionLeft);
        assert!(input.secondarydirection_left.just_pressed);
        assert!(input.secondarydirection_left.active);
        assert!(!input.maindirection_left.just_pressed);
    }

    #[test]
    fn test_clear_edges_keeps_held_keys() {
        let mut input = InputState::default();
        input.press(InputAction::Back);
        input.pointer.left_pressed = true;
        input.clear_edges();
        assert!(input.action_back.active);
        assert!(!input.action_back.just_pressed);
        assert!(!input.pointer.left_pressed);
    }
}
