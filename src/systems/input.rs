//! Input systems.
//!
//! [`update_input_state`] reads hardware input from Raylib once per frame,
//! writes it into [`InputState`] and triggers an [`InputEvent`] for every
//! press or release. F11 triggers [`SwitchDebugEvent`] instead.
use bevy_ecs::prelude::*;
use raylib::prelude::MouseButton;

use crate::events::input::{InputAction, InputEvent};
use crate::events::switchdebug::SwitchDebugEvent;
use crate::resources::input::{BoolState, InputState};

/// Poll Raylib for keyboard and mouse input and update the `InputState` resource.
pub fn update_input_state(
    mut input: ResMut<InputState>,
    rl: NonSend<raylib::RaylibHandle>,
    mut commands: Commands,
) {
    for action in InputState::ACTIONS {
        let key = input.state(action).key_binding;
        let event = apply_key_poll(
            input.state_mut(action),
            action,
            rl.is_key_down(key),
            rl.is_key_pressed(key),
            rl.is_key_released(key),
        );
        match event {
            Some(InputEvent {
                action: InputAction::ToggleDebug,
                pressed: true,
            }) => commands.trigger(SwitchDebugEvent {}),
            Some(InputEvent {
                action: InputAction::ToggleDebug,
                ..
            }) => {}
            Some(event) => commands.trigger(event),
            None => {}
        }
    }

    input.pointer.position = rl.get_mouse_position();
    input.pointer.left_pressed = rl.is_mouse_button_pressed(MouseButton::MOUSE_BUTTON_LEFT);
}

/// Store one key's poll result and return the edge event, if any.
///
/// A press wins over a release reported in the same frame.
pub fn apply_key_poll(
    state: &mut BoolState,
    action: InputAction,
    down: bool,
    pressed: bool,
    released: bool,
) -> Option<InputEvent> {
    state.active = down;
    state.just_pressed = pressed;
    state.just_released = released;
    if pressed {
        Some(InputEvent {
            action,
            pressed: true,
        })
    } else if released {
        Some(InputEvent {
            action,
            pressed: false,
        })
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use raylib::prelude::KeyboardKey;

    #[test]
    fn test_press_sets_flags_and_emits() {
        let mut state = BoolState::bound(KeyboardKey::KEY_SPACE);
        let event = apply_key_poll(&mut state, InputAction::Action1, true, true, false);
        assert!(state.active && state.just_pressed && !state.just_released);
        let event = event.unwrap();
        assert_eq!(event.action, InputAction::Action1);
        assert!(event.pressed);
    }

    #[test]
    fn test_held_key_emits_nothing() {
        let mut state = BoolState::bound(KeyboardKey::KEY_W);
        apply_key_poll(&mut state, InputAction::MainDirectionUp, true, true, false);
        let event = apply_key_poll(&mut state, InputAction::MainDirectionUp, true, false, false);
        assert!(event.is_none());
        assert!(state.active);
        assert!(!state.just_pressed);
    }

    #[test]
    fn test_release_emits_unpressed_event() {
        let mut state = BoolState::bound(KeyboardKey::KEY_ESCAPE);
        let event = apply_key_poll(&mut state, InputAction::Back, false, false, true).unwrap();
        assert!(!event.pressed);
        assert!(state.just_released);
    }
}
