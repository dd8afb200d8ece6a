use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

/// A single note as held by the store.
///
/// The handler never looks inside a note beyond its `content` field, so the
/// record is kept as the JSON object the store returned, field order included.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
#[schema(value_type = Object)]
pub struct Note(Map<String, Value>);

impl Note {
    pub fn set_content(&mut self, content: String) {
        self.0.insert("content".to_string(), Value::String(content));
    }
}

impl From<Map<String, Value>> for Note {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serializes_fields_in_stored_order() {
        let note: Note = serde_json::from_str(r#"{"id":"1","content":"hi"}"#).unwrap();
        assert_eq!(
            serde_json::to_string(&note).unwrap(),
            r#"{"id":"1","content":"hi"}"#
        );
    }

    #[test]
    fn set_content_replaces_existing_value() {
        let mut note: Note = serde_json::from_value(json!({"noteId": "id1", "content": "old"})).unwrap();
        note.set_content("new".to_string());

        assert_eq!(
            serde_json::to_value(&note).unwrap(),
            json!({"noteId": "id1", "content": "new"})
        );
    }

    #[test]
    fn set_content_adds_missing_field() {
        let mut note = Note::default();
        note.set_content(String::new());
        assert_eq!(serde_json::to_value(&note).unwrap(), json!({"content": ""}));
    }
}
