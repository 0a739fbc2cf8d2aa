use feruca::Collator;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Identifier assigned by the boat store on creation
pub type BoatId = i64;

/// Editable fields of a boat, as sent in POST/PATCH/PUT bodies
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoatData {
    pub name: String,
    pub description: String,
}

impl BoatData {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

/// A persisted boat record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Boat {
    pub id: BoatId,
    pub name: String,
    pub description: String,
}

impl Boat {
    pub fn new(id: BoatId, name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: description.into(),
        }
    }

    /// Fields without the identifier
    pub fn data(&self) -> BoatData {
        BoatData::new(self.name.clone(), self.description.clone())
    }

    pub fn with_data(&self, data: BoatData) -> Self {
        Self {
            id: self.id,
            name: data.name,
            description: data.description,
        }
    }
}

/// A boat that has not been stored yet. It has no identifier by construction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoatDraft {
    pub name: String,
    pub description: String,
}

impl BoatDraft {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

/// The boat currently shown in the form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Draft(BoatDraft),
    Record(Boat),
}

impl Selection {
    /// A fresh, empty draft
    pub fn draft() -> Self {
        Selection::Draft(BoatDraft::default())
    }

    pub fn id(&self) -> Option<BoatId> {
        match self {
            Selection::Draft(_) => None,
            Selection::Record(boat) => Some(boat.id),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Selection::Draft(draft) => &draft.name,
            Selection::Record(boat) => &boat.name,
        }
    }

    pub fn description(&self) -> &str {
        match self {
            Selection::Draft(draft) => &draft.description,
            Selection::Record(boat) => &boat.description,
        }
    }

    pub fn is_draft(&self) -> bool {
        matches!(self, Selection::Draft(_))
    }
}

impl Default for Selection {
    fn default() -> Self {
        Self::draft()
    }
}

impl From<Boat> for Selection {
    fn from(boat: Boat) -> Self {
        Selection::Record(boat)
    }
}

impl From<BoatDraft> for Selection {
    fn from(draft: BoatDraft) -> Self {
        Selection::Draft(draft)
    }
}

/// Identity of a selection, used to decide when the form buffer is re-seeded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SelectionKey {
    Record(BoatId),
    /// Every fresh draft gets its own generation number
    Draft(u64),
}

// ============================================================================
// Name ordering
// ============================================================================

/// Orders boat names with the Unicode Collation Algorithm (CLDR root order).
///
/// Accents and case only break ties between otherwise equal letters, so
/// "Éclair" sorts between "Eagle" and "Zeta" and "alpha" before "Alpha".
pub fn compare_names(a: &str, b: &str) -> Ordering {
    Collator::default().collate(a, b)
}

/// Sorts boats by name in place
pub fn sort_boats(boats: &mut [Boat]) {
    let mut collator = Collator::default();
    boats.sort_by(|b1, b2| collator.collate(b1.name.as_str(), b2.name.as_str()));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compare_names_ignores_case_first() {
        assert_eq!(compare_names("alpha", "Bravo"), Ordering::Less);
        assert_eq!(compare_names("Alpha", "bravo"), Ordering::Less);
        assert_eq!(compare_names("zeta", "Alpha"), Ordering::Greater);
    }

    #[test]
    fn test_compare_names_lowercase_before_uppercase() {
        assert_eq!(compare_names("alpha", "Alpha"), Ordering::Less);
        assert_eq!(compare_names("Alpha", "alpha"), Ordering::Greater);
        assert_eq!(compare_names("Alpha", "Alpha"), Ordering::Equal);
    }

    #[test]
    fn test_compare_names_prefix() {
        assert_eq!(compare_names("Sea", "Seabird"), Ordering::Less);
        assert_eq!(compare_names("", "a"), Ordering::Less);
    }

    #[test]
    fn test_compare_names_accents_are_secondary() {
        assert_eq!(compare_names("Éclair", "Eagle"), Ordering::Greater);
        assert_eq!(compare_names("Éclair", "Zeta"), Ordering::Less);
        assert_eq!(compare_names("Eclair", "Éclair"), Ordering::Less);
        assert_eq!(compare_names("Ångström", "Anchor"), Ordering::Greater);
    }

    #[test]
    fn test_sort_boats_with_accented_names() {
        let mut boats = vec![
            Boat::new(1, "Zeta", ""),
            Boat::new(2, "Éclair", ""),
            Boat::new(3, "Eagle", ""),
            Boat::new(4, "Øresund", ""),
        ];
        sort_boats(&mut boats);

        let names: Vec<&str> = boats.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["Eagle", "Éclair", "Øresund", "Zeta"]);
    }

    #[test]
    fn test_sort_boats() {
        let mut boats = vec![
            Boat::new(2, "Bravo", ""),
            Boat::new(3, "charlie", ""),
            Boat::new(1, "Alpha", ""),
        ];
        sort_boats(&mut boats);

        let names: Vec<&str> = boats.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["Alpha", "Bravo", "charlie"]);
    }

    #[test]
    fn test_selection_identity() {
        let draft = Selection::draft();
        let record = Selection::Record(Boat::new(1, "Alpha", "a"));

        assert!(draft.is_draft());
        assert!(!record.is_draft());
        assert_eq!(record.name(), "Alpha");
        assert_eq!(record.id(), Some(1));
        assert_eq!(draft.id(), None);
    }

    #[test]
    fn test_draft_serializes_without_id() {
        let json = serde_json::to_value(BoatDraft::new("Zeta", "d")).unwrap();
        assert_eq!(json, serde_json::json!({ "name": "Zeta", "description": "d" }));
    }
}
