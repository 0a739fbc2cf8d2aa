use super::controller::Intent;
use crate::core::{Boat, Selection};

/// Label of the synthetic entry that starts a new draft
pub const NEW_ENTRY_LABEL: &str = "New boat...";

/// One row of the boat list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListEntry<'a> {
    pub label: &'a str,
    pub active: bool,
    pub boat: Option<&'a Boat>,
}

/// "New boat..." followed by the collection, with the selected entry active
pub fn entries<'a>(boats: &'a [Boat], selection: &Selection) -> Vec<ListEntry<'a>> {
    let mut rows = Vec::with_capacity(boats.len() + 1);
    rows.push(ListEntry {
        label: NEW_ENTRY_LABEL,
        active: selection.id().is_none(),
        boat: None,
    });
    rows.extend(boats.iter().map(|boat| ListEntry {
        label: &boat.name,
        active: selection.id() == Some(boat.id),
        boat: Some(boat),
    }));
    rows
}

/// Keyboard cursor over the list entries
#[derive(Debug, Clone, Default)]
pub struct BoatList {
    cursor: usize,
}

impl BoatList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Number of entries for a collection, including "New boat..."
    pub fn len(boats: &[Boat]) -> usize {
        boats.len() + 1
    }

    pub fn move_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_down(&mut self, boats: &[Boat]) {
        self.cursor = (self.cursor + 1).min(Self::len(boats) - 1);
    }

    pub fn home(&mut self) {
        self.cursor = 0;
    }

    pub fn end(&mut self, boats: &[Boat]) {
        self.cursor = Self::len(boats) - 1;
    }

    /// Puts the cursor on the active entry
    pub fn follow(&mut self, boats: &[Boat], selection: &Selection) {
        self.cursor = match selection.id() {
            None => 0,
            Some(id) => boats
                .iter()
                .position(|b| b.id == id)
                .map(|index| index + 1)
                .unwrap_or(0),
        };
    }

    /// Select intent for the entry under the cursor
    pub fn activate(&mut self, boats: &[Boat]) -> Intent {
        self.cursor = self.cursor.min(Self::len(boats) - 1);
        match self.cursor {
            0 => Intent::Select(Selection::draft()),
            index => Intent::Select(Selection::Record(boats[index - 1].clone())),
        }
    }
}
