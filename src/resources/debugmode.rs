//! Debug toggle resource.
//!
//! The presence of this resource turns on the F11 overlay (frame rate,
//! current state and session internals). Remove it to hide the overlay.

use bevy_ecs::prelude::Resource;

/// Marker resource: when present, the renderer draws the debug overlay.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct DebugMode {}
