//! Arcade configuration resource.
//!
//! Settings are read from an optional INI file. Anything missing keeps its
//! default, so the arcade starts without a config file at all.
//!
//! # Configuration File Format
//!
//! ```ini
//! [window]
//! width = 800
//! height = 600
//! target_fps = 60
//! title = Mini Arcade
//!
//! [assets]
//! font = ./assets/font.ttf
//! menu_background = ./assets/menu.png
//!
//! [scores]
//! file = highscores.txt
//!
//! [audio]
//! menu_move = ./assets/sfx/blip.wav
//! snake_eat = ./assets/sfx/eat.wav
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::{info, warn};
use std::collections::BTreeMap;
use std::path::PathBuf;

const DEFAULT_WINDOW_WIDTH: u32 = 800;
const DEFAULT_WINDOW_HEIGHT: u32 = 600;
const DEFAULT_TARGET_FPS: u32 = 60;
const DEFAULT_TITLE: &str = "Mini Arcade";
const DEFAULT_FONT_PATH: &str = "./assets/font.ttf";
const DEFAULT_SCORES_PATH: &str = "highscores.txt";
pub const DEFAULT_CONFIG_PATH: &str = "./config.ini";

/// Arcade configuration resource.
#[derive(Resource, Debug, Clone)]
pub struct GameConfig {
    /// Window width in pixels.
    pub window_width: u32,
    /// Window height in pixels.
    pub window_height: u32,
    /// Target frames per second.
    pub target_fps: u32,
    pub title: String,
    /// Required UI font.
    pub font_path: PathBuf,
    /// Optional menu backdrop.
    pub menu_background: Option<PathBuf>,
    /// High-score file.
    pub scores_path: PathBuf,
    /// Sound effect id -> file.
    pub sounds: BTreeMap<String, PathBuf>,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl GameConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            window_width: DEFAULT_WINDOW_WIDTH,
            window_height: DEFAULT_WINDOW_HEIGHT,
            target_fps: DEFAULT_TARGET_FPS,
            title: DEFAULT_TITLE.to_string(),
            font_path: PathBuf::from(DEFAULT_FONT_PATH),
            menu_background: None,
            scores_path: PathBuf::from(DEFAULT_SCORES_PATH),
            sounds: BTreeMap::new(),
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current (default) values.
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;
        self.apply(&config);
        Ok(())
    }

    /// Same as [`GameConfig::load_from_file`] but from INI text.
    pub fn load_from_str(&mut self, text: &str) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .read(text.to_string())
            .map_err(|e| format!("Failed to parse config: {}", e))?;
        self.apply(&config);
        Ok(())
    }

    fn apply(&mut self, config: &Ini) {
        // [window] section
        if let Some(width) = read_u32(config, "window", "width") {
            self.window_width = width;
        }
        if let Some(height) = read_u32(config, "window", "height") {
            self.window_height = height;
        }
        if let Some(fps) = read_u32(config, "window", "target_fps") {
            self.target_fps = fps;
        }
        if let Some(title) = config.get("window", "title") {
            self.title = title;
        }

        // [assets] section
        if let Some(font) = config.get("assets", "font") {
            self.font_path = PathBuf::from(font);
        }
        if let Some(background) = config.get("assets", "menu_background") {
            self.menu_background = Some(PathBuf::from(background));
        }

        // [scores] section
        if let Some(file) = config.get("scores", "file") {
            self.scores_path = PathBuf::from(file);
        }

        // [audio] section: every key is a sound id
        if let Some(audio) = config.get_map_ref().get("audio") {
            for (id, path) in audio {
                if let Some(path) = path {
                    self.sounds.insert(id.clone(), PathBuf::from(path));
                }
            }
        }

        info!(
            "Loaded config: {}x{} window, fps={}, font={:?}, scores={:?}, {} sound(s)",
            self.window_width,
            self.window_height,
            self.target_fps,
            self.font_path,
            self.scores_path,
            self.sounds.len()
        );
    }

    /// Get the window size.
    pub fn window_size(&self) -> (u32, u32) {
        (self.window_width, self.window_height)
    }
}

/// Unsigned value of `section.key` if it parses and fits a `u32`.
fn read_u32(config: &Ini, section: &str, key: &str) -> Option<u32> {
    let value = config.getuint(section, key).ok().flatten()?;
    match u32::try_from(value) {
        Ok(v) => Some(v),
        Err(_) => {
            warn!("[{}] {} = {} is out of range, keeping default", section, key, value);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GameConfig::new();
        assert_eq!(config.window_size(), (800, 600));
        assert_eq!(config.target_fps, 60);
        assert_eq!(config.font_path, PathBuf::from("./assets/font.ttf"));
        assert_eq!(config.scores_path, PathBuf::from("highscores.txt"));
        assert!(config.menu_background.is_none());
        assert!(config.sounds.is_empty());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut config = GameConfig::new();
        config
            .load_from_str("[window]\nwidth = 1024\n\n[scores]\nfile = best.txt\n")
            .unwrap();
        assert_eq!(config.window_size(), (1024, 600));
        assert_eq!(config.scores_path, PathBuf::from("best.txt"));
        assert_eq!(config.title, "Mini Arcade");
    }

    #[test]
    fn test_oversized_values_keep_defaults() {
        let mut config = GameConfig::new();
        config
            .load_from_str("[window]\nwidth = 4294967296\nheight = 720\ntarget_fps = 99999999999\n")
            .unwrap();
        assert_eq!(config.window_size(), (800, 720));
        assert_eq!(config.target_fps, 60);
    }

    #[test]
    fn test_audio_section_lists_sounds() {
        let mut config = GameConfig::new();
        config
            .load_from_str("[audio]\nsnake_eat = sfx/eat.wav\npong_hit = sfx/hit.wav\n")
            .unwrap();
        assert_eq!(config.sounds.len(), 2);
        assert_eq!(
            config.sounds.get("snake_eat"),
            Some(&PathBuf::from("sfx/eat.wav"))
        );
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let mut config = GameConfig::with_path("/nonexistent/miniarcade/config.ini");
        assert!(config.load_from_file().is_err());
        assert_eq!(config.window_size(), (800, 600));
    }
}
