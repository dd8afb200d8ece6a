use serde_json::{Map, Value};

use std::{collections::BTreeMap, fs, path::Path};

use crate::models::Note;

/// Read access to every known note, keyed by note id.
pub trait NoteStore: Send + Sync {
    /// Returns a fresh copy of all notes. Callers own the result and may
    /// change it without affecting later snapshots.
    fn snapshot(&self) -> BTreeMap<String, Note>;
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Failed to read notes file: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to parse notes file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Note '{0}' is not a JSON object")]
    NotAnObject(String),
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    notes: BTreeMap<String, Note>,
}

impl MemoryStore {
    pub const fn new(notes: BTreeMap<String, Note>) -> Self {
        Self { notes }
    }

    /// Sample notes served when no notes file is configured.
    pub fn fixtures() -> Self {
        let created_at = chrono::Utc::now().timestamp().to_string();

        let samples = [
            ("id1", "user1", "Hello World!"),
            ("id2", "user2", "Hello Old World! Old note."),
        ];

        let notes = samples
            .into_iter()
            .map(|(note_id, user_id, content)| {
                let mut fields = Map::new();
                fields.insert("noteId".to_string(), Value::from(note_id));
                fields.insert("userId".to_string(), Value::from(user_id));
                fields.insert("createdAt".to_string(), Value::from(created_at.as_str()));
                fields.insert("content".to_string(), Value::from(content));
                (note_id.to_string(), Note::from(fields))
            })
            .collect();

        Self::new(notes)
    }

    /// Parses a JSON object mapping note ids to note objects.
    pub fn from_json(contents: &str) -> Result<Self, StoreError> {
        let raw: BTreeMap<String, Value> = serde_json::from_str(contents)?;

        let mut notes = BTreeMap::new();
        for (id, value) in raw {
            match value {
                Value::Object(fields) => {
                    notes.insert(id, Note::from(fields));
                }
                _ => return Err(StoreError::NotAnObject(id)),
            }
        }

        Ok(Self::new(notes))
    }

    pub fn from_file(path: &Path) -> Result<Self, StoreError> {
        let contents = fs::read_to_string(path)?;
        let store = Self::from_json(&contents)?;

        tracing::info!(
            "Loaded {} notes from '{}'",
            store.notes.len(),
            path.display()
        );

        Ok(store)
    }
}

impl NoteStore for MemoryStore {
    fn snapshot(&self) -> BTreeMap<String, Note> {
        self.notes.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixtures_hold_sample_notes() {
        let notes = MemoryStore::fixtures().snapshot();

        assert_eq!(notes.keys().collect::<Vec<_>>(), ["id1", "id2"]);
        let first = serde_json::to_value(&notes["id1"]).unwrap();
        assert_eq!(first["noteId"], "id1");
        assert_eq!(first["userId"], "user1");
        assert_eq!(first["content"], "Hello World!");
        assert!(first["createdAt"].as_str().is_some());
    }

    #[test]
    fn from_json_keeps_every_note() {
        let store = MemoryStore::from_json(
            r#"{"1": {"id": "1", "content": "hi"}, "2": {"id": "2", "content": "there"}}"#,
        )
        .unwrap();

        let notes = store.snapshot();
        assert_eq!(notes.len(), 2);
        assert_eq!(
            serde_json::to_string(&notes["2"]).unwrap(),
            r#"{"id":"2","content":"there"}"#
        );
    }

    #[test]
    fn from_json_rejects_non_object_notes() {
        let err = MemoryStore::from_json(r#"{"1": "just a string"}"#).unwrap_err();
        assert!(matches!(err, StoreError::NotAnObject(ref id) if id == "1"));
    }

    #[test]
    fn from_json_rejects_malformed_input() {
        let err = MemoryStore::from_json("[1, 2").unwrap_err();
        assert!(matches!(err, StoreError::Parse(_)));
    }

    #[test]
    fn from_file_loads_example_notes() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("notes.example.json");
        let notes = MemoryStore::from_file(&path).unwrap().snapshot();

        assert_eq!(notes.len(), 2);
        assert_eq!(
            serde_json::to_value(&notes["id2"]).unwrap()["content"],
            "Hello Old World! Old note."
        );
    }

    #[test]
    fn from_file_reports_missing_file() {
        let err = MemoryStore::from_file(Path::new("does/not/exist.json")).unwrap_err();
        assert!(matches!(err, StoreError::Read(_)));
    }

    #[test]
    fn snapshots_are_independent_copies() {
        let store = MemoryStore::from_json(r#"{"1": {"content": "hi"}}"#).unwrap();

        let mut first = store.snapshot();
        first.get_mut("1").unwrap().set_content("changed".to_string());
        first.remove("1");

        assert_eq!(
            serde_json::to_string(&store.snapshot()["1"]).unwrap(),
            r#"{"content":"hi"}"#
        );
    }
}
