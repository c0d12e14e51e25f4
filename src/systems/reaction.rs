//! Per-frame driver of the reaction test.
use bevy_ecs::prelude::*;
use log::info;

use crate::events::audio::{AudioCmd, FX_REACTION_GO};
use crate::events::input::InputAction;
use crate::resources::gamestate::{GameStates, NextGameState};
use crate::resources::highscores::HighScores;
use crate::resources::input::InputState;
use crate::resources::reaction::{ClickOutcome, ReactionSession};
use crate::resources::rng::ArcadeRng;
use crate::resources::worldtime::WorldTime;

/// Escape returns to the menu. Otherwise the phase clock advances by the
/// real frame time, this frame's click is applied, and the red target may
/// turn green.
pub fn reaction_system(
    input: Res<InputState>,
    time: Res<WorldTime>,
    session: Option<ResMut<ReactionSession>>,
    mut rng: ResMut<ArcadeRng>,
    mut scores: ResMut<HighScores>,
    mut next_state: ResMut<NextGameState>,
    mut audio_cmds: MessageWriter<AudioCmd>,
) {
    let Some(mut session) = session else {
        return;
    };
    if input.just_pressed(InputAction::Back) {
        next_state.set(GameStates::Menu);
        return;
    }

    // wall time, not the clamped game delta; a stall still counts
    session.advance(time.real_delta);

    if input.pointer.left_pressed {
        let outcome = session.click(input.pointer.position, &mut rng.0, &mut scores);
        match outcome {
            ClickOutcome::Reacted {
                seconds,
                new_record,
            } => info!(
                "Reaction in {:.0} ms (score {}, record: {})",
                seconds * 1000.0,
                session.score(),
                new_record
            ),
            ClickOutcome::TooEarly => info!("Clicked too early, score {}", session.score()),
            ClickOutcome::Ignored | ClickOutcome::Armed | ClickOutcome::NextRound => {}
        }
    }

    if session.check_go() {
        audio_cmds.write(AudioCmd::play(FX_REACTION_GO));
    }
}
