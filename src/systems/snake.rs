//! Per-frame driver of the snake game.
use bevy_ecs::prelude::*;
use log::info;

use crate::events::audio::{AudioCmd, FX_SNAKE_CRASH, FX_SNAKE_EAT};
use crate::events::input::InputAction;
use crate::resources::gamestate::{GameStates, NextGameState};
use crate::resources::highscores::HighScores;
use crate::resources::input::InputState;
use crate::resources::rng::ArcadeRng;
use crate::resources::snake::{Direction, SnakeSession, TickOutcome};
use crate::resources::worldtime::WorldTime;

const STEERING: [(InputAction, Direction); 8] = [
    (InputAction::SecondaryDirectionUp, Direction::Up),
    (InputAction::SecondaryDirectionDown, Direction::Down),
    (InputAction::SecondaryDirectionLeft, Direction::Left),
    (InputAction::SecondaryDirectionRight, Direction::Right),
    (InputAction::MainDirectionUp, Direction::Up),
    (InputAction::MainDirectionDown, Direction::Down),
    (InputAction::MainDirectionLeft, Direction::Left),
    (InputAction::MainDirectionRight, Direction::Right),
];

/// First direction key pressed this frame, arrows before WASD.
pub fn steering_request(input: &InputState) -> Option<Direction> {
    STEERING
        .iter()
        .find(|(action, _)| input.just_pressed(*action))
        .map(|(_, direction)| *direction)
}

/// Escape returns to the menu, Space restarts after a game over, and one
/// direction request per frame is forwarded before the tick clock advances.
pub fn snake_system(
    input: Res<InputState>,
    time: Res<WorldTime>,
    session: Option<ResMut<SnakeSession>>,
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

    if session.is_game_over() {
        if input.just_pressed(InputAction::Action1) {
            session.reset(&mut rng.0);
        }
        return;
    }

    if let Some(direction) = steering_request(&input) {
        session.request_direction(direction);
    }

    match session.advance(time.delta, &mut rng.0, &mut scores) {
        Some(TickOutcome::Ate { .. }) => {
            audio_cmds.write(AudioCmd::play(FX_SNAKE_EAT));
        }
        Some(outcome @ (TickOutcome::HitWall | TickOutcome::HitSelf)) => {
            info!("Snake over ({:?}), score {}", outcome, session.score());
            audio_cmds.write(AudioCmd::play(FX_SNAKE_CRASH));
        }
        Some(TickOutcome::BoardFull) => {
            info!("Snake filled the board, score {}", session.score());
            audio_cmds.write(AudioCmd::play(FX_SNAKE_EAT));
        }
        Some(TickOutcome::Moved) | None => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_keys_no_request() {
        assert_eq!(steering_request(&InputState::default()), None);
    }

    #[test]
    fn test_wasd_steers() {
        let mut input = InputState::default();
        input.press(InputAction::MainDirectionLeft);
        assert_eq!(steering_request(&input), Some(Direction::Left));
    }

    #[test]
    fn test_arrow_wins_over_letter_in_same_frame() {
        let mut input = InputState::default();
        input.press(InputAction::MainDirectionUp);
        input.press(InputAction::SecondaryDirectionRight);
        assert_eq!(steering_request(&input), Some(Direction::Right));
    }

    #[test]
    fn test_single_request_per_frame() {
        let mut input = InputState::default();
        input.press(InputAction::MainDirectionRight);
        input.press(InputAction::SecondaryDirectionUp);
        assert_eq!(steering_request(&input), Some(Direction::Up));
    }
}
