use super::controller::Intent;
use crate::core::{BoatDraft, Selection, SelectionKey};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormState {
    Ready,
    Busy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Description,
}

impl FormField {
    pub fn next(self) -> Self {
        match self {
            FormField::Name => FormField::Description,
            FormField::Description => FormField::Name,
        }
    }
}

/// Edit buffer for the selected boat.
///
/// The buffer belongs to one selection identity: it is seeded when that
/// identity first shows up and re-seeded only when it changes. Dirtiness is
/// always measured against the selection's current values.
#[derive(Debug, Clone)]
pub struct BoatForm {
    key: SelectionKey,
    name: String,
    description: String,
    state: FormState,
}

impl BoatForm {
    pub fn new(key: SelectionKey, selection: &Selection) -> Self {
        Self {
            key,
            name: selection.name().to_string(),
            description: selection.description().to_string(),
            state: FormState::Ready,
        }
    }

    /// Re-seeds the buffer if the selection identity changed.
    /// Returns whether it did.
    pub fn sync(&mut self, key: SelectionKey, selection: &Selection) -> bool {
        if self.key == key {
            return false;
        }
        *self = Self::new(key, selection);
        true
    }

    pub fn key(&self) -> SelectionKey {
        self.key
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn field(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Description => &self.description,
        }
    }

    pub fn state(&self) -> FormState {
        self.state
    }

    pub fn is_busy(&self) -> bool {
        self.state == FormState::Busy
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.set_field(FormField::Name, name);
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.set_field(FormField::Description, description);
    }

    /// Inputs are disabled while busy
    pub fn set_field(&mut self, field: FormField, value: impl Into<String>) {
        if self.is_busy() {
            return;
        }
        match field {
            FormField::Name => self.name = value.into(),
            FormField::Description => self.description = value.into(),
        }
    }

    pub fn is_dirty(&self, selection: &Selection) -> bool {
        self.name != selection.name() || self.description != selection.description()
    }

    /// Both fields are required
    pub fn is_complete(&self) -> bool {
        !self.name.trim().is_empty() && !self.description.trim().is_empty()
    }

    pub fn can_save(&self, selection: &Selection) -> bool {
        !self.is_busy() && self.is_dirty(selection)
    }

    pub fn can_reset(&self, selection: &Selection) -> bool {
        !self.is_busy() && self.is_dirty(selection)
    }

    pub fn can_delete(&self, selection: &Selection) -> bool {
        !self.is_busy() && selection.id().is_some()
    }

    pub fn save_label(selection: &Selection) -> &'static str {
        if selection.is_draft() { "Create" } else { "Save" }
    }

    /// Turns the buffer into a Create or Update intent and goes busy.
    ///
    /// Refuses while disabled or while a required field is blank.
    pub fn save(&mut self, selection: &Selection) -> Option<Intent> {
        if !self.can_save(selection) || !self.is_complete() {
            return None;
        }

        let intent = match selection {
            Selection::Draft(_) => {
                Intent::Create(BoatDraft::new(self.name.clone(), self.description.clone()))
            }
            Selection::Record(boat) => {
                let mut edited = boat.clone();
                edited.name = self.name.clone();
                edited.description = self.description.clone();
                Intent::Update(edited)
            }
        };

        self.state = FormState::Busy;
        Some(intent)
    }

    /// Restores the buffer to the selection's values
    pub fn reset(&mut self, selection: &Selection) -> bool {
        if !self.can_reset(selection) {
            return false;
        }
        self.name = selection.name().to_string();
        self.description = selection.description().to_string();
        true
    }

    pub fn delete(&mut self, selection: &Selection) -> Option<Intent> {
        if !self.can_delete(selection) {
            return None;
        }
        let Selection::Record(boat) = selection else {
            return None;
        };

        self.state = FormState::Busy;
        Some(Intent::Delete(boat.clone()))
    }

    /// Re-enables the form once the emitted intent resolved, whatever its outcome
    pub fn settle(&mut self) {
        self.state = FormState::Ready;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Boat;

    fn record() -> Selection {
        Selection::Record(Boat::new(1, "Alpha", "first"))
    }

    #[test]
    fn test_seeded_from_selection() {
        let form = BoatForm::new(SelectionKey::Record(1), &record());
        assert_eq!(form.name(), "Alpha");
        assert_eq!(form.description(), "first");
        assert_eq!(form.state(), FormState::Ready);
        assert!(!form.is_dirty(&record()));
    }

    #[test]
    fn test_dirty_tracks_both_fields() {
        let selection = record();
        let mut form = BoatForm::new(SelectionKey::Record(1), &selection);

        form.set_name("Alphonse");
        assert!(form.is_dirty(&selection));
        assert!(form.can_save(&selection));
        assert!(form.can_reset(&selection));

        form.set_name("Alpha");
        assert!(!form.is_dirty(&selection));
        assert!(!form.can_save(&selection));
        assert!(!form.can_reset(&selection));

        form.set_description("changed");
        assert!(form.is_dirty(&selection));
    }

    #[test]
    fn test_save_draft_emits_create() {
        let selection = Selection::draft();
        let mut form = BoatForm::new(SelectionKey::Draft(1), &selection);
        form.set_name("Zeta");
        form.set_description("d");

        let intent = form.save(&selection).unwrap();

        assert_eq!(intent, Intent::Create(BoatDraft::new("Zeta", "d")));
        assert!(form.is_busy());
        assert_eq!(BoatForm::save_label(&selection), "Create");
    }

    #[test]
    fn test_save_record_emits_update() {
        let selection = record();
        let mut form = BoatForm::new(SelectionKey::Record(1), &selection);
        form.set_description("refitted");

        let intent = form.save(&selection).unwrap();

        assert_eq!(intent, Intent::Update(Boat::new(1, "Alpha", "refitted")));
        assert_eq!(BoatForm::save_label(&selection), "Save");
    }

    #[test]
    fn test_save_requires_dirty_and_complete() {
        let selection = Selection::draft();
        let mut form = BoatForm::new(SelectionKey::Draft(1), &selection);
        assert!(form.save(&selection).is_none());

        form.set_name("Only a name");
        assert!(form.can_save(&selection));
        assert!(form.save(&selection).is_none());
        assert!(!form.is_busy());
    }

    #[test]
    fn test_busy_disables_everything() {
        let selection = record();
        let mut form = BoatForm::new(SelectionKey::Record(1), &selection);
        form.set_name("Renamed");
        form.save(&selection).unwrap();

        form.set_name("ignored");
        assert_eq!(form.name(), "Renamed");
        assert!(!form.can_save(&selection));
        assert!(!form.can_reset(&selection));
        assert!(!form.can_delete(&selection));
        assert!(form.save(&selection).is_none());

        form.settle();
        assert_eq!(form.state(), FormState::Ready);
        assert!(form.can_delete(&selection));
    }

    #[test]
    fn test_reset_restores_selection_values() {
        let selection = record();
        let mut form = BoatForm::new(SelectionKey::Record(1), &selection);
        assert!(!form.reset(&selection));

        form.set_name("Other");
        form.set_description("other");
        assert!(form.reset(&selection));

        assert_eq!(form.name(), "Alpha");
        assert_eq!(form.description(), "first");
    }

    #[test]
    fn test_delete_only_for_records() {
        let draft = Selection::draft();
        let mut form = BoatForm::new(SelectionKey::Draft(1), &draft);
        assert!(!form.can_delete(&draft));
        assert!(form.delete(&draft).is_none());

        let selection = record();
        let mut form = BoatForm::new(SelectionKey::Record(1), &selection);
        // Delete does not depend on dirtiness.
        assert!(form.can_delete(&selection));
        assert_eq!(
            form.delete(&selection),
            Some(Intent::Delete(Boat::new(1, "Alpha", "first")))
        );
        assert!(form.is_busy());
    }

    #[test]
    fn test_sync_reseeds_only_on_identity_change() {
        let selection = record();
        let mut form = BoatForm::new(SelectionKey::Record(1), &selection);
        form.set_name("edited");

        // Same identity with refreshed values keeps the buffer.
        let refreshed = Selection::Record(Boat::new(1, "edited", "first"));
        assert!(!form.sync(SelectionKey::Record(1), &refreshed));
        assert_eq!(form.name(), "edited");
        assert!(!form.is_dirty(&refreshed));

        let other = Selection::Record(Boat::new(2, "Bravo", "second"));
        assert!(form.sync(SelectionKey::Record(2), &other));
        assert_eq!(form.name(), "Bravo");

        assert!(form.sync(SelectionKey::Draft(5), &Selection::draft()));
        assert_eq!(form.name(), "");
        assert_eq!(form.key(), SelectionKey::Draft(5));
    }

    #[test]
    fn test_field_navigation() {
        assert_eq!(FormField::Name.next(), FormField::Description);
        assert_eq!(FormField::Description.next(), FormField::Name);

        let mut form = BoatForm::new(SelectionKey::Draft(1), &Selection::draft());
        form.set_field(FormField::Description, "text");
        assert_eq!(form.field(FormField::Description), "text");
    }
}
