use bevy_ecs::message::Message;

/// Sound played when the menu cursor moves.
pub const FX_MENU_MOVE: &str = "menu_move";
/// Sound played when a menu entry is confirmed.
pub const FX_MENU_SELECT: &str = "menu_select";
/// Sound played when the reaction target turns green.
pub const FX_REACTION_GO: &str = "reaction_go";
pub const FX_SNAKE_EAT: &str = "snake_eat";
pub const FX_SNAKE_CRASH: &str = "snake_crash";
pub const FX_PONG_HIT: &str = "pong_hit";
pub const FX_PONG_POINT: &str = "pong_point";
pub const FX_PONG_WIN: &str = "pong_win";

/// Commands sent *to* the audio thread
#[derive(Message, Debug, Clone, PartialEq)]
pub enum AudioCmd {
    LoadFx { id: String, path: String },
    PlayFx { id: String },
    UnloadAllFx,
    Shutdown,
}

impl AudioCmd {
    /// Shorthand for [`AudioCmd::PlayFx`].
    pub fn play(id: &str) -> Self {
        AudioCmd::PlayFx { id: id.to_string() }
    }
}

/// Events sent *back* from the audio thread
#[derive(Message, Debug, Clone, PartialEq)]
pub enum AudioMessage {
    /// The audio device could not be opened; every later command is dropped.
    DeviceUnavailable { error: String },
    FxLoaded { id: String },
    FxLoadFailed { id: String, error: String },
    FxUnloadedAll,
}
