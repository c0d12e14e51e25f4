//! Mini Arcade entry point.
//!
//! A small collection of arcade games built on:
//! - **raylib** for windowing, graphics, input and audio
//! - **bevy_ecs** for resources, systems and observers
//!
//! # Main Loop
//!
//! 1. Load the config file and the high-score table
//! 2. Open the window and load the required font (fatal on failure)
//! 3. Start the audio thread, register observers and state hooks
//! 4. Run input, state transitions, the live game, audio and rendering
//!    once per frame until the window closes or "Quitter" is chosen
//! 5. Stop the audio thread on exit
//!
//! # Running
//!
//! ```sh
//! cargo run --release
//! cargo run --release -- --config ./my.ini
//! cargo run --release -- --reset-scores
//! ```

// Do not create console on Windows
#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]

use bevy_ecs::prelude::*;
use clap::Parser;
use log::{error, info, warn};
use miniarcade::game;
use miniarcade::resources::assetstore::{FontStore, MAIN_FONT, TextureStore};
use miniarcade::resources::audio::{setup_audio, shutdown_audio};
use miniarcade::resources::gameconfig::{DEFAULT_CONFIG_PATH, GameConfig};
use miniarcade::resources::gamestate::{GameState, GameStates};
use miniarcade::resources::highscores::{FileStorage, HighScores};
use miniarcade::resources::rng::ArcadeRng;
use miniarcade::systems::audio::{
    forward_audio_cmds, log_audio_messages, poll_audio_messages, update_bevy_audio_cmds,
    update_bevy_audio_messages,
};
use miniarcade::systems::gamestate::check_pending_state;
use miniarcade::systems::input::update_input_state;
use miniarcade::systems::pong::pong_system;
use miniarcade::systems::reaction::reaction_system;
use miniarcade::systems::snake::snake_system;
use miniarcade::systems::render::render_system;
use miniarcade::systems::time::update_world_time;
use std::path::PathBuf;

/// Mini Arcade: reaction test, snake and pong.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// INI file with window, asset, score and sound settings.
    #[arg(long, value_name = "PATH", default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Erase every high score and exit without opening a window.
    #[arg(long)]
    reset_scores: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = GameConfig::with_path(&cli.config);
    if let Err(e) = config.load_from_file() {
        // the file is optional
        warn!("{}, using defaults", e);
    }

    let mut scores = HighScores::load(FileStorage::new(&config.scores_path));

    // Early-exit: clear the score file (no window/audio needed)
    if cli.reset_scores {
        scores.reset_all();
        println!("Scores reset in {}", config.scores_path.display());
        return;
    }

    // --------------- Raylib window & assets ---------------
    let (mut rl, thread) = raylib::init()
        .size(config.window_width as i32, config.window_height as i32)
        .title(&config.title)
        .build();
    rl.set_target_fps(config.target_fps);
    // Escape belongs to the games
    rl.set_exit_key(None);

    let mut fonts = FontStore::new();
    let font_path = config.font_path.to_string_lossy().into_owned();
    if fonts
        .get_or_load(MAIN_FONT, || {
            rl.load_font(&thread, &font_path).map_err(|e| e.to_string())
        })
        .is_none()
    {
        error!("Cannot start without the font {}", font_path);
        std::process::exit(1);
    }

    // --------------- ECS world + resources ---------------
    let mut world = World::new();
    game::init_world(&mut world, config, scores, ArcadeRng::new());
    world.insert_non_send_resource(fonts);
    world.insert_non_send_resource(TextureStore::new());
    world.insert_non_send_resource(rl);
    world.insert_non_send_resource(thread);

    // Init audio; must go before setup, which queues the sound loads
    setup_audio(&mut world);

    game::start(&mut world);

    let mut update = game::gameplay_schedule();
    update.add_systems(update_input_state.before(check_pending_state));
    update.add_systems(
        // audio systems must be together
        (
            forward_audio_cmds,
            poll_audio_messages,
            update_bevy_audio_messages,
            log_audio_messages,
        )
            .chain()
            .after(reaction_system)
            .after(snake_system)
            .after(pong_system)
            .before(update_bevy_audio_cmds),
    );
    update.add_systems(render_system.after(update_bevy_audio_cmds));

    // --------------- Main loop ---------------
    info!("Entering main loop");
    while !world
        .non_send_resource::<raylib::RaylibHandle>()
        .window_should_close()
        && world.resource::<GameState>().get() != GameStates::Quitting
    {
        let dt = world
            .non_send_resource::<raylib::RaylibHandle>()
            .get_frame_time();
        update_world_time(&mut world, dt);

        update.run(&mut world);

        world.clear_trackers();
    }
    info!("Leaving main loop");
    shutdown_audio(&mut world);
}
