//! Focus state machine.
//!
//! States: `NoSelection` and `Selected(id)`. Hover is tracked alongside but only
//! matters while nothing is selected.

use crate::entry::EntryId;
use crate::galaxy::encoder::Role;
use crate::math::Vec3;

/// Current selection / hover.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FocusState {
    pub selected: Option<EntryId>,
    pub hovered: Option<EntryId>,
}

/// Where an entry should be heading and how it should look.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FocusTarget {
    pub position: Vec3,
    pub role: Role,
}

/// Geometry used to turn a role into a target position.
#[derive(Debug, Clone, Copy)]
pub struct FocusGeometry {
    /// Foreground slot a selected entry is pulled to
    pub presentation_slot: Vec3,
    /// Multiplier on sphere positions of dimmed entries
    pub recede_factor: f32,
}

#[derive(Debug, Clone, Default)]
pub struct FocusStateMachine {
    state: FocusState,
}

impl FocusStateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &FocusState {
        &self.state
    }

    pub fn selected(&self) -> Option<&str> {
        self.state.selected.as_deref()
    }

    pub fn hovered(&self) -> Option<&str> {
        self.state.hovered.as_deref()
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected() == Some(id)
    }

    /// Select `id`, replacing any previous selection. Returns whether the
    /// state changed; re-selecting the current selection is a no-op.
    pub fn select(&mut self, id: &str) -> bool {
        if self.is_selected(id) {
            return false;
        }
        log::debug!("focus: {:?} -> Selected({id})", self.state.selected);
        self.state.selected = Some(id.to_string());
        true
    }

    /// Clear the selection. No-op when nothing is selected.
    pub fn deselect(&mut self) -> bool {
        match self.state.selected.take() {
            Some(prev) => {
                log::debug!("focus: Selected({prev}) -> NoSelection");
                true
            }
            None => false,
        }
    }

    pub fn hover(&mut self, id: &str) -> bool {
        if self.hovered() == Some(id) {
            return false;
        }
        self.state.hovered = Some(id.to_string());
        true
    }

    pub fn unhover(&mut self) -> bool {
        self.state.hovered.take().is_some()
    }

    /// Clear hover only if it still refers to `id`.
    pub fn unhover_if(&mut self, id: &str) -> bool {
        if self.hovered() == Some(id) {
            self.state.hovered = None;
            true
        } else {
            false
        }
    }

    /// Role of an entry under the current state. Selection takes precedence
    /// over hover.
    pub fn role_for(&self, id: &str) -> Role {
        match self.selected() {
            Some(sel) if sel == id => Role::Selected,
            Some(_) => Role::Dimmed,
            None if self.hovered() == Some(id) => Role::Hovered,
            None => Role::Neutral,
        }
    }

    /// Target for an entry whose layout position is `sphere_position`.
    pub fn target_for(&self, id: &str, sphere_position: Vec3, geo: &FocusGeometry) -> FocusTarget {
        let role = self.role_for(id);
        let position = match role {
            Role::Selected => geo.presentation_slot,
            Role::Dimmed => sphere_position.scale(geo.recede_factor),
            Role::Hovered | Role::Neutral => sphere_position,
        };
        FocusTarget { position, role }
    }
}
