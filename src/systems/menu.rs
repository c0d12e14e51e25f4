//! Menu systems.
//!
//! - [`menu_despawn`] – despawns menu entities when the menu screen is left
//! - [`menu_controller_observer`] – handles input to navigate and select items
//! - [`menu_selection_observer`] – performs actions when items are selected

use crate::components::menu::{Menu, MenuAction, MenuActions};
use crate::events::audio::{AudioCmd, FX_MENU_SELECT};
use crate::events::input::{InputAction, InputEvent};
use crate::events::menu::MenuSelectionEvent;
use crate::resources::gamestate::GameStates::Quitting;
use crate::resources::gamestate::NextGameState;
use bevy_ecs::prelude::*;
use log::{debug, info, warn};

/// Despawns every menu entity.
pub fn menu_despawn(mut commands: Commands, query: Query<Entity, With<Menu>>) {
    for entity in query.iter() {
        commands.entity(entity).despawn();
    }
}

/// Handles input events to navigate menus and confirm selections.
///
/// Up/Down (arrows or W/S) move the cursor with wrap-around, Space or Enter
/// confirm, Escape jumps to the cancel entry and confirms it. Triggers
/// [`MenuSelectionEvent`] when an item is selected.
pub fn menu_controller_observer(
    trigger: On<InputEvent>,
    mut query: Query<(Entity, &mut Menu)>,
    mut commands: Commands,
    mut audio_cmds: MessageWriter<AudioCmd>,
) {
    let event = trigger.event();
    if !event.pressed {
        return; // Only handle key press, not release
    }

    for (entity, mut menu) in query.iter_mut() {
        if !menu.active {
            continue;
        }

        let mut changed_selection = false;
        let mut confirm = false;
        match event.action {
            InputAction::SecondaryDirectionUp | InputAction::MainDirectionUp => {
                changed_selection = menu.select_previous();
            }
            InputAction::SecondaryDirectionDown | InputAction::MainDirectionDown => {
                changed_selection = menu.select_next();
            }
            InputAction::Action1 | InputAction::Action2 => confirm = true,
            InputAction::Back => confirm = menu.select_cancel(),
            _ => {}
        }

        if changed_selection {
            debug!("Menu cursor on {:?}", menu.selected_id());
            if let Some(sound_key) = &menu.selection_change_sound {
                audio_cmds.write(AudioCmd::play(sound_key));
            }
        }

        if confirm && let Some(selected_id) = menu.selected_id().map(str::to_string) {
            menu.active = false;
            audio_cmds.write(AudioCmd::play(FX_MENU_SELECT));
            commands.trigger(MenuSelectionEvent {
                menu: entity,
                item_id: selected_id,
            });
        }
    }
}

/// Executes the action associated with a selected menu item.
///
/// An id with no [`MenuAction`] is logged and the menu is re-activated so the
/// player can pick again.
pub fn menu_selection_observer(
    trigger: On<MenuSelectionEvent>,
    mut menus: Query<(&mut Menu, Option<&MenuActions>)>,
    mut next_game_state: ResMut<NextGameState>,
) {
    let event = trigger.event();
    let Ok((mut menu, actions)) = menus.get_mut(event.menu) else {
        warn!(
            "menu_selection_observer: menu entity {:?} is gone, item_id {:?}",
            event.menu, event.item_id
        );
        return;
    };
    match actions.and_then(|actions| actions.get(&event.item_id)) {
        Some(MenuAction::SetState(state)) => {
            info!("Menu selected '{}'", event.item_id);
            next_game_state.set(*state);
        }
        Some(MenuAction::QuitGame) => {
            info!("Menu selected quit");
            next_game_state.set(Quitting);
        }
        None => {
            warn!("Unknown menu entry '{}', staying in menu", event.item_id);
            menu.active = true;
        }
    }
}
