//! Arcade flow integration tests: menu navigation, state transitions and the
//! three games driven through the gameplay schedule.

use bevy_ecs::prelude::*;
use raylib::prelude::Vector2;

use miniarcade::components::menu::Menu;
use miniarcade::events::audio::{AudioCmd, FX_MENU_MOVE, FX_REACTION_GO, FX_SNAKE_EAT};
use miniarcade::events::input::{InputAction, InputEvent};
use miniarcade::events::menu::MenuSelectionEvent;
use miniarcade::game;
use miniarcade::resources::gameconfig::GameConfig;
use miniarcade::resources::gamestate::{GameState, GameStates, NextGameState, NextGameStates};
use miniarcade::resources::highscores::{HighScores, MemoryStorage};
use miniarcade::resources::input::InputState;
use miniarcade::resources::pong::{PongSession, Side};
use miniarcade::resources::reaction::{REACTION_SCORE_KEY, ReactionPhase, ReactionSession};
use miniarcade::resources::rng::ArcadeRng;
use miniarcade::resources::snake::{Cell, Direction, SNAKE_SCORE_KEY, SnakeSession};
use miniarcade::resources::worldtime::WorldTime;

const FRAME: f32 = 1.0 / 60.0;

/// World past setup, sitting in the menu.
fn arcade() -> (World, Schedule) {
    let mut world = World::new();
    game::init_world(
        &mut world,
        GameConfig::new(),
        HighScores::in_memory(),
        ArcadeRng::with_seed(7),
    );
    game::start(&mut world);
    let mut schedule = game::gameplay_schedule();
    schedule.run(&mut world);
    (world, schedule)
}

fn state(world: &World) -> GameStates {
    world.resource::<GameState>().get()
}

fn menu(world: &mut World) -> Option<Menu> {
    let mut q = world.query::<&Menu>();
    q.iter(world).next().cloned()
}

/// Key press as the input system reports it: an event for the menu plus the
/// edge flag for the games.
fn press(world: &mut World, action: InputAction) {
    world.resource_mut::<InputState>().press(action);
    world.trigger(InputEvent {
        action,
        pressed: true,
    });
}

fn click(world: &mut World, x: f32, y: f32) {
    let mut input = world.resource_mut::<InputState>();
    input.pointer.position = Vector2::new(x, y);
    input.pointer.left_pressed = true;
}

fn frame(world: &mut World, schedule: &mut Schedule, dt: f32) {
    {
        let mut time = world.resource_mut::<WorldTime>();
        time.delta = dt;
        time.real_delta = dt;
    }
    schedule.run(world);
    world.resource_mut::<InputState>().clear_edges();
}

fn played_sounds(world: &World) -> Vec<String> {
    world
        .resource::<Messages<AudioCmd>>()
        .iter_current_update_messages()
        .filter_map(|cmd| match cmd {
            AudioCmd::PlayFx { id } => Some(id.clone()),
            _ => None,
        })
        .collect()
}

/// Every command still buffered, including those from the last schedule run
/// (the schedule ends by advancing the queue).
fn queued_commands(world: &World) -> Vec<AudioCmd> {
    let msgs = world.resource::<Messages<AudioCmd>>();
    let mut cursor = msgs.get_cursor();
    cursor.read(msgs).cloned().collect()
}

/// From the menu, move the cursor `downs` times and confirm.
fn launch(world: &mut World, schedule: &mut Schedule, downs: usize) {
    for _ in 0..downs {
        press(world, InputAction::SecondaryDirectionDown);
    }
    press(world, InputAction::Action2);
    frame(world, schedule, FRAME);
}

#[test]
fn starts_in_menu_with_first_entry_selected() {
    let (mut world, _) = arcade();
    assert_eq!(state(&world), GameStates::Menu);
    let menu = menu(&mut world).expect("menu spawned");
    assert_eq!(menu.selected_id(), Some("reaction"));
    assert!(menu.active);
}

#[test]
fn menu_cursor_wraps_and_plays_sound() {
    let (mut world, _) = arcade();
    press(&mut world, InputAction::SecondaryDirectionUp);
    assert_eq!(menu(&mut world).unwrap().selected_id(), Some("quit"));
    assert!(played_sounds(&world).contains(&FX_MENU_MOVE.to_string()));

    press(&mut world, InputAction::MainDirectionDown);
    assert_eq!(menu(&mut world).unwrap().selected_id(), Some("reaction"));
}

#[test]
fn escape_in_menu_quits() {
    let (mut world, mut schedule) = arcade();
    press(&mut world, InputAction::Back);
    assert_eq!(
        world.resource::<NextGameState>().get(),
        &NextGameStates::Pending(GameStates::Quitting)
    );
    frame(&mut world, &mut schedule, FRAME);
    assert_eq!(state(&world), GameStates::Quitting);
    assert!(menu(&mut world).is_none());
    assert!(queued_commands(&world).contains(&AudioCmd::UnloadAllFx));
}

#[test]
fn unknown_menu_entry_keeps_menu_active() {
    let (mut world, mut schedule) = arcade();
    let entity = {
        let mut q = world.query_filtered::<Entity, With<Menu>>();
        q.single(&world).unwrap()
    };
    world.get_mut::<Menu>(entity).unwrap().active = false;
    world.trigger(MenuSelectionEvent {
        menu: entity,
        item_id: "tetris".to_string(),
    });
    frame(&mut world, &mut schedule, FRAME);
    assert_eq!(state(&world), GameStates::Menu);
    assert!(menu(&mut world).unwrap().active);
}

#[test]
fn snake_session_lives_only_inside_snake_state() {
    let (mut world, mut schedule) = arcade();
    launch(&mut world, &mut schedule, 1);
    assert_eq!(state(&world), GameStates::Snake);
    assert!(world.contains_resource::<SnakeSession>());
    assert!(menu(&mut world).is_none());

    press(&mut world, InputAction::Back);
    frame(&mut world, &mut schedule, FRAME);
    frame(&mut world, &mut schedule, FRAME);
    assert_eq!(state(&world), GameStates::Menu);
    assert!(!world.contains_resource::<SnakeSession>());
    assert_eq!(menu(&mut world).unwrap().selected_index, 0);
}

#[test]
fn snake_grows_and_records_through_schedule() {
    let (mut world, mut schedule) = arcade();
    launch(&mut world, &mut schedule, 1);
    world.insert_resource(SnakeSession::with_layout(
        vec![Cell::new(10, 10), Cell::new(9, 10), Cell::new(8, 10)],
        Direction::Right,
        Cell::new(11, 10),
    ));

    frame(&mut world, &mut schedule, 0.15);
    let session = world.resource::<SnakeSession>();
    assert_eq!(session.score(), 1);
    assert_eq!(session.body().len(), 4);
    assert_eq!(session.head(), Cell::new(11, 10));
    assert!(!session.occupies(session.apple()));
    assert_eq!(world.resource::<HighScores>().get(SNAKE_SCORE_KEY), 1);
}

#[test]
fn snake_wall_hit_then_space_restarts() {
    let (mut world, mut schedule) = arcade();
    launch(&mut world, &mut schedule, 1);
    world.insert_resource(SnakeSession::with_layout(
        vec![Cell::new(19, 5), Cell::new(18, 5), Cell::new(17, 5)],
        Direction::Right,
        Cell::new(0, 0),
    ));

    frame(&mut world, &mut schedule, 0.15);
    assert!(world.resource::<SnakeSession>().is_game_over());
    assert_eq!(world.resource::<SnakeSession>().head(), Cell::new(19, 5));

    press(&mut world, InputAction::Action1);
    frame(&mut world, &mut schedule, FRAME);
    let session = world.resource::<SnakeSession>();
    assert!(!session.is_game_over());
    assert_eq!(session.score(), 0);
    assert_eq!(session.head(), Cell::new(10, 10));
}

#[test]
fn snake_eating_plays_sound() {
    let (mut world, mut schedule) = arcade();
    launch(&mut world, &mut schedule, 1);
    world.insert_resource(SnakeSession::with_layout(
        vec![Cell::new(5, 5), Cell::new(5, 6), Cell::new(5, 7)],
        Direction::Up,
        Cell::new(5, 4),
    ));
    frame(&mut world, &mut schedule, 0.15);
    assert!(queued_commands(&world).contains(&AudioCmd::play(FX_SNAKE_EAT)));
}

#[test]
fn reaction_early_click_is_penalized() {
    let (mut world, mut schedule) = arcade();
    launch(&mut world, &mut schedule, 0);
    assert_eq!(state(&world), GameStates::Reaction);

    click(&mut world, 400.0, 300.0);
    frame(&mut world, &mut schedule, FRAME);
    assert_eq!(
        world.resource::<ReactionSession>().phase(),
        ReactionPhase::Red
    );

    click(&mut world, 400.0, 300.0);
    frame(&mut world, &mut schedule, FRAME);
    let session = world.resource::<ReactionSession>();
    assert_eq!(session.phase(), ReactionPhase::TooEarly);
    assert_eq!(session.score(), 0);
}

#[test]
fn reaction_turns_green_then_scores() {
    let (mut world, mut schedule) = arcade();
    launch(&mut world, &mut schedule, 0);
    click(&mut world, 400.0, 300.0);
    frame(&mut world, &mut schedule, FRAME);

    let wait = world.resource::<ReactionSession>().wait_time();
    frame(&mut world, &mut schedule, wait);
    assert_eq!(
        world.resource::<ReactionSession>().phase(),
        ReactionPhase::Green
    );

    click(&mut world, 450.0, 350.0);
    frame(&mut world, &mut schedule, FRAME);
    let session = world.resource::<ReactionSession>();
    assert_eq!(session.phase(), ReactionPhase::Result);
    assert_eq!(session.score(), 1);
    assert_eq!(session.last_reaction(), Some(FRAME));
    assert_eq!(world.resource::<HighScores>().get(REACTION_SCORE_KEY), 1);
}

#[test]
fn reaction_green_waits_full_delay_after_arming() {
    let (mut world, mut schedule) = arcade();
    launch(&mut world, &mut schedule, 0);
    click(&mut world, 400.0, 300.0);
    frame(&mut world, &mut schedule, FRAME);
    let wait = world.resource::<ReactionSession>().wait_time();

    // time since the arming click, summed the way the session does
    let mut since_click = 0.0_f32;
    loop {
        frame(&mut world, &mut schedule, FRAME);
        since_click += FRAME;
        if world.resource::<ReactionSession>().phase() == ReactionPhase::Green {
            break;
        }
        assert!(since_click < wait, "still red after {since_click}s of {wait}s");
    }
    assert!(since_click >= wait, "green after {since_click}s of {wait}s");
    assert!(queued_commands(&world).contains(&AudioCmd::play(FX_REACTION_GO)));
}

#[test]
fn reaction_stall_counts_toward_reaction_time() {
    let (mut world, mut schedule) = arcade();
    launch(&mut world, &mut schedule, 0);
    click(&mut world, 400.0, 300.0);
    frame(&mut world, &mut schedule, FRAME);
    let wait = world.resource::<ReactionSession>().wait_time();
    frame(&mut world, &mut schedule, wait);

    // a half-second hitch, longer than the game delta cap
    click(&mut world, 400.0, 300.0);
    {
        let mut time = world.resource_mut::<WorldTime>();
        time.delta = 0.1;
        time.real_delta = 0.5;
    }
    schedule.run(&mut world);
    assert_eq!(
        world.resource::<ReactionSession>().last_reaction(),
        Some(0.5)
    );
}

#[test]
fn stored_records_show_under_their_game_keys() {
    let mut world = World::new();
    game::init_world(
        &mut world,
        GameConfig::new(),
        HighScores::load(MemoryStorage::with_contents("ReflexGame:7\nSnakeGame:12\n")),
        ArcadeRng::with_seed(7),
    );
    let scores = world.resource::<HighScores>();
    assert_eq!(scores.get(REACTION_SCORE_KEY), 7);
    assert_eq!(scores.get(SNAKE_SCORE_KEY), 12);
}

#[test]
fn pong_first_to_five_then_restart() {
    let (mut world, mut schedule) = arcade();
    launch(&mut world, &mut schedule, 2);
    assert_eq!(state(&world), GameStates::Pong);

    for _ in 0..5 {
        world
            .resource_mut::<PongSession>()
            .set_ball(Vector2::new(1.0, 300.0), Vector2::new(-300.0, 0.0));
        frame(&mut world, &mut schedule, 0.1);
    }
    let session = world.resource::<PongSession>();
    assert_eq!(session.score(Side::Right), 5);
    assert_eq!(session.winner(), Some(Side::Right));
    assert!(session.winner_banner().unwrap().starts_with("JOUEUR 2 GAGNE!"));

    // frozen until Space
    let ball = session.ball();
    frame(&mut world, &mut schedule, 0.1);
    assert_eq!(world.resource::<PongSession>().ball(), ball);

    press(&mut world, InputAction::Action1);
    frame(&mut world, &mut schedule, FRAME);
    let session = world.resource::<PongSession>();
    assert_eq!(session.winner(), None);
    assert_eq!(session.score(Side::Left), 0);
    assert_eq!(session.score(Side::Right), 0);
}

#[test]
fn pong_paddles_follow_held_keys() {
    let (mut world, mut schedule) = arcade();
    launch(&mut world, &mut schedule, 2);
    let start = world.resource::<PongSession>().paddle_position(Side::Left).y;

    world.resource_mut::<InputState>().maindirection_up.active = true;
    frame(&mut world, &mut schedule, 0.1);
    let moved = world.resource::<PongSession>().paddle_position(Side::Left).y;
    assert!((start - moved - 40.0).abs() < 1e-3);
    assert_eq!(
        world.resource::<PongSession>().paddle_position(Side::Right).y,
        start
    );
}
