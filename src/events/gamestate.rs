//! Game state transition event and observer.
//!
//! Systems request a change of screen by updating [`NextGameState`].
//! `check_pending_state` then emits a [`GameStateChangedEvent`], whose
//! observer applies the transition to [`GameState`] and runs the exit hook of
//! the old state followed by the enter hook of the new one, both looked up in
//! [`SystemsStore`].
use crate::resources::gamestate::NextGameStates::{Pending, Unchanged};
use crate::resources::gamestate::{GameState, NextGameState};
use crate::resources::systemsstore::SystemsStore;
use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::{debug, info, warn};

/// Event used to indicate that a pending game state transition should be
/// applied.
#[derive(Event, Debug, Clone, Copy)]
pub struct GameStateChangedEvent {}

/// Observer that applies a pending game state transition.
///
/// If any required resource is missing, logs a diagnostic and returns.
pub fn observe_gamestate_change_event(
    _trigger: On<GameStateChangedEvent>,
    mut commands: Commands,
    mut next_game_state: Option<ResMut<NextGameState>>,
    mut game_state: Option<ResMut<GameState>>,
    systems_store: Option<Res<SystemsStore>>,
) {
    debug!("GameStateChangedEvent triggered");

    let (Some(next_game_state), Some(game_state), Some(systems_store)) = (
        next_game_state.as_deref_mut(),
        game_state.as_deref_mut(),
        systems_store,
    ) else {
        warn!(
            "Resources missing in observe_gamestate_change_event. next_state: {:?}, game_state: {:?}",
            next_game_state.is_some(),
            game_state.is_some()
        );
        return;
    };

    match next_game_state.get().clone() {
        Pending(new_state) => {
            let old_state = game_state.get();
            next_game_state.reset();
            if old_state == new_state {
                debug!("Already in {:?}, ignoring transition", new_state);
                return;
            }
            info!("Transitioning from {:?} to {:?}", old_state, new_state);
            game_state.set(new_state);
            run_hook(old_state.exit_hook(), &mut commands, &systems_store);
            run_hook(new_state.enter_hook(), &mut commands, &systems_store);
        }
        Unchanged => {
            debug!("No state change pending.");
        }
    }
}

fn run_hook(hook: Option<&str>, commands: &mut Commands, systems_store: &SystemsStore) {
    if let Some(name) = hook {
        debug!("Running state hook '{}'", name);
        systems_store.run(name, commands);
    }
}

