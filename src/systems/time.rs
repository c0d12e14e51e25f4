//! Time update system.
//!
//! Updates the shared [`WorldTime`](crate::resources::worldtime::WorldTime)
//! resource once per frame, applying `time_scale` to the provided delta.
use bevy_ecs::prelude::*;

use crate::resources::worldtime::WorldTime;

/// Longest frame delta fed to the games, in seconds.
///
/// A window drag or breakpoint stalls the loop; without a cap the pong ball
/// would tunnel through a paddle on the next frame.
pub const MAX_FRAME_DELTA: f32 = 0.1;

/// Update elapsed and delta seconds on the `WorldTime` resource.
///
/// `dt` is the unscaled frame delta in seconds. It is clamped to
/// `[0, MAX_FRAME_DELTA]` before `time_scale` is applied; `real_delta`
/// keeps it as measured.
pub fn update_world_time(world: &mut World, dt: f32) {
    let mut wt = world.resource_mut::<WorldTime>();
    let scaled_dt = dt.clamp(0.0, MAX_FRAME_DELTA) * wt.time_scale;
    wt.elapsed += scaled_dt;
    wt.delta = scaled_dt;
    wt.real_delta = dt.max(0.0);
    wt.frame_count += 1;
}
