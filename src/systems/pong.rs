//! Per-frame driver of two-player pong.
use bevy_ecs::prelude::*;
use log::info;

use crate::events::audio::{AudioCmd, FX_PONG_HIT, FX_PONG_POINT, FX_PONG_WIN};
use crate::events::input::InputAction;
use crate::resources::gamestate::{GameStates, NextGameState};
use crate::resources::input::InputState;
use crate::resources::pong::{PaddleInput, PongEvent, PongSession};
use crate::resources::rng::ArcadeRng;
use crate::resources::worldtime::WorldTime;

/// Held keys for both paddles: W/S on the left, arrows on the right.
pub fn paddle_input(input: &InputState) -> PaddleInput {
    PaddleInput {
        left_up: input.maindirection_up.active,
        left_down: input.maindirection_down.active,
        right_up: input.secondarydirection_up.active,
        right_down: input.secondarydirection_down.active,
    }
}

pub fn pong_system(
    input: Res<InputState>,
    time: Res<WorldTime>,
    session: Option<ResMut<PongSession>>,
    mut rng: ResMut<ArcadeRng>,
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

    if session.winner().is_some() {
        if input.just_pressed(InputAction::Action1) {
            session.restart(&mut rng.0);
        }
        return;
    }

    for event in session.update(time.delta, paddle_input(&input), &mut rng.0) {
        match event {
            PongEvent::PaddleHit(_) => {
                audio_cmds.write(AudioCmd::play(FX_PONG_HIT));
            }
            PongEvent::Scored(side) => {
                info!("Point for player {}: {}", side.player_number(), session.score_line());
                audio_cmds.write(AudioCmd::play(FX_PONG_POINT));
            }
            PongEvent::Won(side) => {
                info!("Player {} wins", side.player_number());
                audio_cmds.write(AudioCmd::play(FX_PONG_WIN));
            }
            PongEvent::WallBounce => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paddle_input_uses_held_keys() {
        let mut input = InputState::default();
        input.maindirection_down.active = true;
        input.secondarydirection_up.active = true;
        let paddles = paddle_input(&input);
        assert_eq!(
            paddles,
            PaddleInput {
                left_up: false,
                left_down: true,
                right_up: true,
                right_down: false,
            }
        );
    }
}
