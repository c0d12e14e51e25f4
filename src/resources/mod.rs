//! ECS resources made available to systems.
//!
//! Overview
//! - `assetstore` – lazily loaded fonts and textures keyed by string IDs
//! - `audio` – bridge and channels for the background audio thread
//! - `debugmode` – presence toggles the debug overlay
//! - `gameconfig` – settings read from the INI file
//! - `gamestate` – authoritative and pending arcade state
//! - `highscores` – best score per game and its persistence
//! - `input` – per-frame keyboard and mouse state
//! - `pong`, `reaction`, `snake` – one play session of each game
//! - `rng` – seedable random source shared by the games
//! - `screensize` – window dimensions in pixels
//! - `systemsstore` – state hooks registered by name
//! - `worldtime` – frame delta and counters
pub mod assetstore;
pub mod audio;
pub mod debugmode;
pub mod gameconfig;
pub mod gamestate;
pub mod highscores;
pub mod input;
pub mod pong;
pub mod reaction;
pub mod rng;
pub mod screensize;
pub mod snake;
pub mod systemsstore;
pub mod worldtime;
