use serde::Deserialize;

use crate::core::BoatData;

/// Body of POST and PUT requests. Absent fields read as empty so they fail
/// the blank check instead of the JSON extractor.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BoatPayload {
    pub name: String,
    pub description: String,
}

impl From<BoatPayload> for BoatData {
    fn from(payload: BoatPayload) -> Self {
        BoatData::new(payload.name, payload.description)
    }
}

/// Body of PATCH requests; only provided fields change
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BoatPatch {
    pub name: Option<String>,
    pub description: Option<String>,
}

impl BoatPatch {
    pub fn apply(self, data: &mut BoatData) {
        if let Some(name) = self.name {
            data.name = name;
        }
        if let Some(description) = self.description {
            data.description = description;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_missing_fields_default_to_empty() {
        let payload: BoatPayload = serde_json::from_str(r#"{"name":"Alpha"}"#).unwrap();
        assert_eq!(payload.name, "Alpha");
        assert_eq!(payload.description, "");
    }

    #[test]
    fn test_patch_only_touches_given_fields() {
        let mut data = BoatData::new("Alpha", "first");
        let patch: BoatPatch = serde_json::from_str(r#"{"description":"renamed"}"#).unwrap();

        patch.apply(&mut data);
        assert_eq!(data, BoatData::new("Alpha", "renamed"));

        BoatPatch::default().apply(&mut data);
        assert_eq!(data, BoatData::new("Alpha", "renamed"));
    }
}
