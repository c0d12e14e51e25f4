use bevy_ecs::prelude::Component;
use raylib::prelude::{Color, Vector2};
use rustc_hash::FxHashMap;

use crate::resources::gamestate::GameStates;

#[derive(Clone, Debug, PartialEq)]
pub struct MenuItem {
    pub id: String,
    pub label: String,
    pub position: Vector2,
}

/// Vertical list of entries with a wrap-around cursor.
///
/// While `active` the menu reacts to input; it goes inactive once an entry
/// is confirmed, until the selection has been handled.
#[derive(Component, Clone, Debug)]
pub struct Menu {
    pub items: Vec<MenuItem>,
    pub selected_index: usize,
    pub active: bool,
    pub font_size: f32,
    pub item_spacing: f32,
    pub normal_color: Color,
    pub selected_color: Color,
    pub origin: Vector2,
    /// Entry Escape jumps to.
    pub cancel_id: Option<String>,
    pub selection_change_sound: Option<String>,
}

impl Menu {
    pub fn new(
        labels: &[(&str, &str)], // (id, label)
        origin: Vector2,
        font_size: f32,
        item_spacing: f32,
    ) -> Self {
        let items = labels
            .iter()
            .enumerate()
            .map(|(i, (id, label))| MenuItem {
                id: id.to_string(),
                label: label.to_string(),
                position: Vector2 {
                    x: origin.x,
                    y: origin.y + i as f32 * item_spacing,
                },
            })
            .collect();
        Self {
            items,
            selected_index: 0,
            active: true,
            font_size,
            item_spacing,
            normal_color: Color::WHITE,
            selected_color: Color::YELLOW,
            origin,
            cancel_id: None,
            selection_change_sound: None,
        }
    }

    pub fn with_colors(mut self, normal: Color, selected: Color) -> Self {
        self.normal_color = normal;
        self.selected_color = selected;
        self
    }

    pub fn with_cancel(mut self, id: impl Into<String>) -> Self {
        self.cancel_id = Some(id.into());
        self
    }

    pub fn with_selection_sound(mut self, id: impl Into<String>) -> Self {
        self.selection_change_sound = Some(id.into());
        self
    }

    /// Move the cursor down, wrapping to the first entry.
    pub fn select_next(&mut self) -> bool {
        if self.items.is_empty() {
            return false;
        }
        self.selected_index = (self.selected_index + 1) % self.items.len();
        true
    }

    /// Move the cursor up, wrapping to the last entry.
    pub fn select_previous(&mut self) -> bool {
        if self.items.is_empty() {
            return false;
        }
        self.selected_index = (self.selected_index + self.items.len() - 1) % self.items.len();
        true
    }

    /// Put the cursor on the entry with `id`. Returns `false` if absent.
    pub fn select_id(&mut self, id: &str) -> bool {
        match self.items.iter().position(|item| item.id == id) {
            Some(index) => {
                self.selected_index = index;
                true
            }
            None => false,
        }
    }

    /// Put the cursor on the cancel entry, if the menu has one.
    pub fn select_cancel(&mut self) -> bool {
        match self.cancel_id.clone() {
            Some(id) => self.select_id(&id),
            None => false,
        }
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.items
            .get(self.selected_index)
            .map(|item| item.id.as_str())
    }
}

/// What confirming an entry does.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MenuAction {
    /// Switch to a game (or any other state).
    SetState(GameStates),
    QuitGame,
}

/// Per-menu table from entry id to [`MenuAction`].
#[derive(Component, Clone, Debug, Default)]
pub struct MenuActions {
    map: FxHashMap<String, MenuAction>,
}

impl MenuActions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, id: impl Into<String>, action: MenuAction) -> Self {
        self.map.insert(id.into(), action);
        self
    }

    pub fn get(&self, id: &str) -> Option<&MenuAction> {
        self.map.get(id)
    }
}
