//! Reaction-time test session.
//!
//! The player clicks a square in the middle of the screen to arm it, waits
//! while it is red, and clicks again as soon as it turns green. Clicking
//! while red costs a point.
//!
//! ```text
//! Waiting --click--> Red --wait elapsed--> Green --click--> Result
//!                     |                                        |
//!                     +--click--> TooEarly --click--> Waiting <+
//! ```
//!
//! Clicks outside the target are ignored in every phase. Leaving the session
//! (Escape) is handled by the driving system.

use bevy_ecs::prelude::Resource;
use raylib::prelude::Vector2;

use crate::components::boxcollider::BoxCollider;
use crate::resources::highscores::HighScores;

/// High-score key of the reaction test.
pub const REACTION_SCORE_KEY: &str = "ReflexGame";
/// Shortest wait before the target turns green, in seconds.
pub const WAIT_MIN: f32 = 1.5;
/// Upper bound (exclusive) of the wait, in seconds.
pub const WAIT_MAX: f32 = 4.0;
/// Side of the square target in pixels.
pub const TARGET_SIZE: f32 = 200.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReactionPhase {
    /// Idle, waiting for the player to arm the target.
    Waiting,
    /// Armed; clicking now is too early.
    Red,
    /// Click as fast as possible.
    Green,
    /// The player clicked during the red phase.
    TooEarly,
    /// A reaction time was recorded.
    Result,
}

/// What a click did to the session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClickOutcome {
    /// Outside the target.
    Ignored,
    /// Waiting -> Red.
    Armed,
    /// Red -> TooEarly, one point lost (never below zero).
    TooEarly,
    /// Green -> Result.
    Reacted { seconds: f32, new_record: bool },
    /// TooEarly/Result -> Waiting.
    NextRound,
}

/// State of one reaction-test play-through.
#[derive(Resource, Debug, Clone)]
pub struct ReactionSession {
    phase: ReactionPhase,
    score: u32,
    last_reaction: Option<f32>,
    wait_time: f32,
    phase_elapsed: f32,
    target: BoxCollider,
    target_center: Vector2,
}

impl ReactionSession {
    /// New session with the target centred in a `width` x `height` screen.
    pub fn new(width: f32, height: f32, rng: &mut fastrand::Rng) -> Self {
        Self {
            phase: ReactionPhase::Waiting,
            score: 0,
            last_reaction: None,
            wait_time: sample_wait(rng),
            phase_elapsed: 0.0,
            target: BoxCollider::centered(TARGET_SIZE, TARGET_SIZE),
            target_center: Vector2::new(width * 0.5, height * 0.5),
        }
    }

    /// Handle a left click at `point` (screen coordinates).
    pub fn click(
        &mut self,
        point: Vector2,
        rng: &mut fastrand::Rng,
        scores: &mut HighScores,
    ) -> ClickOutcome {
        if !self.target.contains_point(self.target_center, point) {
            return ClickOutcome::Ignored;
        }
        match self.phase {
            ReactionPhase::Waiting => {
                self.enter(ReactionPhase::Red);
                ClickOutcome::Armed
            }
            ReactionPhase::Red => {
                self.score = self.score.saturating_sub(1);
                self.enter(ReactionPhase::TooEarly);
                ClickOutcome::TooEarly
            }
            ReactionPhase::Green => {
                let seconds = self.phase_elapsed;
                self.last_reaction = Some(seconds);
                self.score += 1;
                let new_record = scores.update(REACTION_SCORE_KEY, self.score);
                self.enter(ReactionPhase::Result);
                ClickOutcome::Reacted {
                    seconds,
                    new_record,
                }
            }
            ReactionPhase::TooEarly | ReactionPhase::Result => {
                self.reset_round(rng);
                ClickOutcome::NextRound
            }
        }
    }

    /// Add `dt` seconds to the phase clock.
    ///
    /// Must run before this frame's click so a reaction time counts the
    /// frame it was clicked in.
    pub fn advance(&mut self, dt: f32) {
        self.phase_elapsed += dt;
    }

    /// Turn the target green once the red phase has lasted the sampled wait.
    ///
    /// Returns `true` on the frame the target turns green.
    pub fn check_go(&mut self) -> bool {
        if self.phase == ReactionPhase::Red && self.phase_elapsed >= self.wait_time {
            self.enter(ReactionPhase::Green);
            return true;
        }
        false
    }

    /// [`advance`](Self::advance) then [`check_go`](Self::check_go), for a
    /// frame without a click.
    pub fn update(&mut self, dt: f32) -> bool {
        self.advance(dt);
        self.check_go()
    }

    /// Back to [`ReactionPhase::Waiting`] with a new random wait.
    pub fn reset_round(&mut self, rng: &mut fastrand::Rng) {
        self.wait_time = sample_wait(rng);
        self.enter(ReactionPhase::Waiting);
    }

    fn enter(&mut self, phase: ReactionPhase) {
        self.phase = phase;
        self.phase_elapsed = 0.0;
    }

    pub fn phase(&self) -> ReactionPhase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn last_reaction(&self) -> Option<f32> {
        self.last_reaction
    }

    /// Red-phase duration drawn for the current round.
    pub fn wait_time(&self) -> f32 {
        self.wait_time
    }

    /// Seconds spent in the current phase.
    pub fn phase_elapsed(&self) -> f32 {
        self.phase_elapsed
    }

    pub fn target_center(&self) -> Vector2 {
        self.target_center
    }

    pub fn target(&self) -> &BoxCollider {
        &self.target
    }

    /// On-screen instructions for the current phase.
    pub fn instruction(&self) -> &'static str {
        match self.phase {
            ReactionPhase::Waiting => {
                "Cliquez sur le carre pour commencer!\nEchap: Retour au menu"
            }
            ReactionPhase::Red => "ATTENDEZ que le carre devienne VERT...",
            ReactionPhase::Green => "CLIQUEZ MAINTENANT!",
            ReactionPhase::TooEarly => "TROP TOT! Attendez le vert!\nClic pour reessayer",
            ReactionPhase::Result => "Excellent! Clic pour continuer",
        }
    }
}

/// Draw a red-phase duration, uniform in `[WAIT_MIN, WAIT_MAX)`.
pub fn sample_wait(rng: &mut fastrand::Rng) -> f32 {
    let wait = WAIT_MIN + rng.f32() * (WAIT_MAX - WAIT_MIN);
    // f32 rounding can land exactly on the upper bound
    if wait >= WAIT_MAX { WAIT_MIN } else { wait }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::highscores::MemoryStorage;

    const CENTER: Vector2 = Vector2 { x: 400.0, y: 300.0 };

    fn session() -> (ReactionSession, fastrand::Rng, HighScores) {
        let mut rng = fastrand::Rng::with_seed(42);
        let s = ReactionSession::new(800.0, 600.0, &mut rng);
        (s, rng, HighScores::in_memory())
    }

    #[test]
    fn test_wait_samples_stay_in_range() {
        let mut rng = fastrand::Rng::with_seed(1);
        for _ in 0..10_000 {
            let w = sample_wait(&mut rng);
            assert!((WAIT_MIN..WAIT_MAX).contains(&w), "wait {w} out of range");
        }
    }

    #[test]
    fn test_click_outside_target_is_ignored() {
        let (mut s, mut rng, mut scores) = session();
        let outcome = s.click(Vector2::new(10.0, 10.0), &mut rng, &mut scores);
        assert_eq!(outcome, ClickOutcome::Ignored);
        assert_eq!(s.phase(), ReactionPhase::Waiting);
    }

    #[test]
    fn test_red_turns_green_only_after_wait() {
        let (mut s, mut rng, mut scores) = session();
        s.click(CENTER, &mut rng, &mut scores);
        assert_eq!(s.phase(), ReactionPhase::Red);

        let wait = s.wait_time();
        let step = 0.01;
        let mut elapsed = 0.0;
        while s.phase() == ReactionPhase::Red {
            let turned = s.update(step);
            elapsed += step;
            if turned {
                assert!(elapsed + 1e-4 >= wait);
            } else {
                assert!(s.phase_elapsed() < wait);
            }
        }
        assert_eq!(s.phase(), ReactionPhase::Green);
        assert_eq!(s.phase_elapsed(), 0.0);
    }

    #[test]
    fn test_early_click_penalty_floors_at_zero() {
        let (mut s, mut rng, mut scores) = session();
        s.click(CENTER, &mut rng, &mut scores);
        assert_eq!(s.click(CENTER, &mut rng, &mut scores), ClickOutcome::TooEarly);
        assert_eq!(s.phase(), ReactionPhase::TooEarly);
        assert_eq!(s.score(), 0);
    }

    #[test]
    fn test_green_click_scores_and_records() {
        let (mut s, mut rng, mut scores) = session();
        s.click(CENTER, &mut rng, &mut scores);
        s.update(WAIT_MAX);
        s.update(0.25);
        let outcome = s.click(CENTER, &mut rng, &mut scores);
        assert_eq!(
            outcome,
            ClickOutcome::Reacted {
                seconds: 0.25,
                new_record: true
            }
        );
        assert_eq!(s.phase(), ReactionPhase::Result);
        assert_eq!(s.score(), 1);
        assert_eq!(s.last_reaction(), Some(0.25));
        assert_eq!(scores.get(REACTION_SCORE_KEY), 1);
    }

    #[test]
    fn test_penalty_after_success_decrements() {
        let (mut s, mut rng, mut scores) = session();
        s.click(CENTER, &mut rng, &mut scores);
        s.update(WAIT_MAX);
        s.click(CENTER, &mut rng, &mut scores);
        assert_eq!(s.score(), 1);

        assert_eq!(s.click(CENTER, &mut rng, &mut scores), ClickOutcome::NextRound);
        s.click(CENTER, &mut rng, &mut scores);
        s.click(CENTER, &mut rng, &mut scores);
        assert_eq!(s.phase(), ReactionPhase::TooEarly);
        assert_eq!(s.score(), 0);
        assert_eq!(scores.get(REACTION_SCORE_KEY), 1);
    }

    #[test]
    fn test_clock_advances_before_click() {
        let (mut s, mut rng, mut scores) = session();
        s.advance(0.5);
        s.click(CENTER, &mut rng, &mut scores);
        // arming resets the clock, the frame before it does not count
        assert_eq!(s.phase_elapsed(), 0.0);
        assert!(!s.check_go());

        s.advance(s.wait_time());
        assert!(s.check_go());
        s.advance(0.02);
        let outcome = s.click(CENTER, &mut rng, &mut scores);
        assert!(matches!(outcome, ClickOutcome::Reacted { seconds, .. } if seconds == 0.02));
    }

    #[test]
    fn test_stored_record_is_kept_until_beaten() {
        let mut rng = fastrand::Rng::with_seed(42);
        let mut scores = HighScores::load(MemoryStorage::with_contents("ReflexGame:7\n"));
        let mut s = ReactionSession::new(800.0, 600.0, &mut rng);
        assert_eq!(scores.get(REACTION_SCORE_KEY), 7);

        s.click(CENTER, &mut rng, &mut scores);
        s.update(WAIT_MAX);
        let outcome = s.click(CENTER, &mut rng, &mut scores);
        assert!(matches!(
            outcome,
            ClickOutcome::Reacted {
                new_record: false,
                ..
            }
        ));
        assert_eq!(s.score(), 1);
        assert_eq!(scores.get(REACTION_SCORE_KEY), 7);
    }

    #[test]
    fn test_waiting_does_not_turn_green() {
        let (mut s, _, _) = session();
        assert!(!s.update(10.0));
        assert_eq!(s.phase(), ReactionPhase::Waiting);
    }

    #[test]
    fn test_instruction_follows_phase() {
        let (mut s, mut rng, mut scores) = session();
        assert!(s.instruction().starts_with("Cliquez"));
        s.click(CENTER, &mut rng, &mut scores);
        assert!(s.instruction().starts_with("ATTENDEZ"));
    }
}
