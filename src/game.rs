//! State hooks of the arcade.
//!
//! Each hook is a one-shot system registered in [`SystemsStore`] under the
//! name returned by [`GameStates::enter_hook`] / [`GameStates::exit_hook`].
//! Entering a game inserts a fresh session resource; leaving it removes the
//! resource, so an interrupted game never leaks into the next one.

use bevy_ecs::prelude::*;
use log::info;
use raylib::prelude::{Color, Vector2};

use crate::components::menu::{Menu, MenuAction, MenuActions};
use crate::events::audio::{AudioCmd, FX_MENU_MOVE};
use crate::events::gamestate::{GameStateChangedEvent, observe_gamestate_change_event};
use crate::events::switchdebug::switch_debug_observer;
use crate::resources::audio::init_audio_messages;
use crate::resources::gameconfig::GameConfig;
use crate::resources::gamestate::{GameState, GameStates, NextGameState};
use crate::resources::highscores::HighScores;
use crate::resources::input::InputState;
use crate::resources::pong::PongSession;
use crate::resources::reaction::ReactionSession;
use crate::resources::rng::ArcadeRng;
use crate::resources::screensize::ScreenSize;
use crate::resources::snake::SnakeSession;
use crate::resources::systemsstore::SystemsStore;
use crate::resources::worldtime::WorldTime;
use crate::systems::audio::update_bevy_audio_cmds;
use crate::systems::gamestate::{check_pending_state, in_state};
use crate::systems::menu::{menu_controller_observer, menu_despawn, menu_selection_observer};
use crate::systems::pong::pong_system;
use crate::systems::reaction::reaction_system;
use crate::systems::snake::snake_system;

/// Main menu entries as (id, label).
pub const MENU_ENTRIES: [(&str, &str); 4] = [
    ("reaction", "Reflex Game"),
    ("snake", "Snake Game"),
    ("pong", "Pong Game"),
    ("quit", "Quitter"),
];
/// Entry Escape selects.
pub const MENU_QUIT_ID: &str = "quit";

const MENU_TOP: f32 = 220.0;
const MENU_FONT_SIZE: f32 = 32.0;
const MENU_SPACING: f32 = 60.0;

/// Queue the configured sound effects and open the menu.
pub fn setup(
    config: Res<GameConfig>,
    mut next_state: ResMut<NextGameState>,
    mut audio_cmd_writer: MessageWriter<AudioCmd>,
) {
    // the audio thread replies with FxLoaded/FxLoadFailed later
    for (id, path) in &config.sounds {
        audio_cmd_writer.write(AudioCmd::LoadFx {
            id: id.clone(),
            path: path.to_string_lossy().into_owned(),
        });
    }
    next_state.set(GameStates::Menu);
    info!("Setup done, {} sound(s) queued", config.sounds.len());
}

/// The arcade's main menu with the cursor on the first game.
pub fn arcade_menu(screen: &ScreenSize) -> (Menu, MenuActions) {
    let menu = Menu::new(
        &MENU_ENTRIES,
        Vector2::new(screen.width() * 0.5, MENU_TOP),
        MENU_FONT_SIZE,
        MENU_SPACING,
    )
    .with_colors(Color::RAYWHITE, Color::GOLD)
    .with_cancel(MENU_QUIT_ID)
    .with_selection_sound(FX_MENU_MOVE);
    let actions = MenuActions::new()
        .with("reaction", MenuAction::SetState(GameStates::Reaction))
        .with("snake", MenuAction::SetState(GameStates::Snake))
        .with("pong", MenuAction::SetState(GameStates::Pong))
        .with(MENU_QUIT_ID, MenuAction::QuitGame);
    (menu, actions)
}

pub fn enter_menu(mut commands: Commands, screen: Res<ScreenSize>) {
    commands.spawn(arcade_menu(&screen));
}

pub fn enter_reaction(
    mut commands: Commands,
    screen: Res<ScreenSize>,
    mut rng: ResMut<ArcadeRng>,
) {
    commands.insert_resource(ReactionSession::new(
        screen.width(),
        screen.height(),
        &mut rng.0,
    ));
}

pub fn exit_reaction(mut commands: Commands) {
    commands.remove_resource::<ReactionSession>();
}

pub fn enter_snake(mut commands: Commands, mut rng: ResMut<ArcadeRng>) {
    commands.insert_resource(SnakeSession::new(&mut rng.0));
}

pub fn exit_snake(mut commands: Commands) {
    commands.remove_resource::<SnakeSession>();
}

pub fn enter_pong(mut commands: Commands, screen: Res<ScreenSize>, mut rng: ResMut<ArcadeRng>) {
    commands.insert_resource(PongSession::new(
        screen.width(),
        screen.height(),
        &mut rng.0,
    ));
}

pub fn exit_pong(mut commands: Commands) {
    commands.remove_resource::<PongSession>();
}

/// Release the sounds; the main loop stops once it sees `Quitting`.
pub fn quit_game(mut audio_cmd_writer: MessageWriter<AudioCmd>) {
    info!("Quitting");
    audio_cmd_writer.write(AudioCmd::UnloadAllFx);
}

/// Register every state hook and return the filled store.
pub fn register_state_hooks(world: &mut World) -> SystemsStore {
    let mut store = SystemsStore::new();
    store.insert("setup", world.register_system(setup));
    store.insert("enter_menu", world.register_system(enter_menu));
    store.insert("exit_menu", world.register_system(menu_despawn));
    store.insert("enter_reaction", world.register_system(enter_reaction));
    store.insert("exit_reaction", world.register_system(exit_reaction));
    store.insert("enter_snake", world.register_system(enter_snake));
    store.insert("exit_snake", world.register_system(exit_snake));
    store.insert("enter_pong", world.register_system(enter_pong));
    store.insert("exit_pong", world.register_system(exit_pong));
    store.insert("quit_game", world.register_system(quit_game));
    store
}

/// Insert the arcade's resources, observers and state hooks.
///
/// Platform handles (Raylib, font and texture stores, audio bridge) are
/// added by the caller.
pub fn init_world(world: &mut World, config: GameConfig, scores: HighScores, rng: ArcadeRng) {
    world.insert_resource(ScreenSize {
        w: config.window_width as i32,
        h: config.window_height as i32,
    });
    world.insert_resource(WorldTime::default());
    world.insert_resource(InputState::default());
    world.insert_resource(GameState::new());
    world.insert_resource(NextGameState::new());
    world.insert_resource(config);
    world.insert_resource(scores);
    world.insert_resource(rng);
    init_audio_messages(world);

    world.spawn(Observer::new(observe_gamestate_change_event));
    world.spawn(Observer::new(switch_debug_observer));
    world.spawn(Observer::new(menu_controller_observer));
    world.spawn(Observer::new(menu_selection_observer));

    let systems_store = register_state_hooks(world);
    world.insert_resource(systems_store);
    // observers must be registered before anything triggers
    world.flush();
}

/// Enter [`GameStates::Setup`] right away; the setup hook moves on to the menu.
pub fn start(world: &mut World) {
    world.resource_mut::<NextGameState>().set(GameStates::Setup);
    world.trigger(GameStateChangedEvent {});
}

/// State transitions, then the live game, then the audio command queue.
///
/// Input polling, the audio bridge and rendering need the platform and are
/// added around this by `main`.
pub fn gameplay_schedule() -> Schedule {
    let mut update = Schedule::default();
    update.add_systems(
        (
            check_pending_state,
            (
                reaction_system.run_if(in_state(GameStates::Reaction)),
                snake_system.run_if(in_state(GameStates::Snake)),
                pong_system.run_if(in_state(GameStates::Pong)),
            ),
            update_bevy_audio_cmds,
        )
            .chain(),
    );
    update
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_STATES: [GameStates; 7] = [
        GameStates::None,
        GameStates::Setup,
        GameStates::Menu,
        GameStates::Reaction,
        GameStates::Snake,
        GameStates::Pong,
        GameStates::Quitting,
    ];

    #[test]
    fn test_every_hook_name_is_registered() {
        let mut world = World::new();
        let store = register_state_hooks(&mut world);
        for state in ALL_STATES {
            for hook in [state.enter_hook(), state.exit_hook()].into_iter().flatten() {
                assert!(store.get(hook).is_some(), "missing hook {hook}");
            }
        }
    }

    #[test]
    fn test_menu_actions_cover_every_entry() {
        let (menu, actions) = arcade_menu(&ScreenSize { w: 800, h: 600 });
        for item in &menu.items {
            assert!(actions.get(&item.id).is_some(), "no action for {}", item.id);
        }
        assert_eq!(menu.items[0].position, Vector2::new(400.0, MENU_TOP));
        assert_eq!(menu.cancel_id.as_deref(), Some(MENU_QUIT_ID));
    }
}
