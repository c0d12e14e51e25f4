use bevy_ecs::prelude::*;

/// A menu entry was confirmed.
#[derive(Event, Debug, Clone)]
pub struct MenuSelectionEvent {
    pub menu: Entity,
    pub item_id: String,
}
