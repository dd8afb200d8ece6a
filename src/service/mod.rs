use serde::Serialize;

use std::sync::Arc;

use crate::{
    dto::{ErrorResponse, NoteReply, UpdateNoteRequest},
    models::Note,
    repository::NoteStore,
};

#[derive(Clone)]
pub struct NoteService {
    store: Arc<dyn NoteStore>,
}

impl NoteService {
    pub const fn new(store: Arc<dyn NoteStore>) -> Self {
        Self { store }
    }

    /// Looks up a single note. A missing or empty id is a plain miss.
    pub fn get_one_note(&self, id: Option<&str>) -> NoteReply {
        match self.find(id) {
            Some(note) => NoteReply::ok(to_json(&note)),
            None => not_found(id),
        }
    }

    pub fn get_all_notes(&self) -> NoteReply {
        let notes: Vec<Note> = self.store.snapshot().into_values().collect();
        tracing::debug!("Listing {} notes", notes.len());

        NoteReply::ok(to_json(&notes))
    }

    /// Applies `content` from the request body to the snapshot copy of the
    /// note. The store itself is never written.
    pub fn update_note(&self, id: Option<&str>, body: Option<&str>) -> NoteReply {
        let Some(mut note) = self.find(id) else {
            return not_found(id);
        };

        let request = body
            .filter(|body| !body.is_empty())
            .and_then(|body| match serde_json::from_str::<UpdateNoteRequest>(body) {
                Ok(request) => Some(request),
                Err(e) => {
                    tracing::warn!("Ignoring malformed update body: {e}");
                    None
                }
            })
            .unwrap_or_default();

        note.set_content(request.content.unwrap_or_default());

        NoteReply::ok(to_json(&note))
    }

    fn find(&self, id: Option<&str>) -> Option<Note> {
        let id = id.filter(|id| !id.is_empty())?;
        tracing::debug!("Looking up note '{id}'");

        self.store.snapshot().remove(id)
    }
}

fn not_found(id: Option<&str>) -> NoteReply {
    tracing::info!("Note {:?} not found", id.unwrap_or_default());
    NoteReply::not_found(to_json(&ErrorResponse { error: true }))
}

/// Serialization errors are logged and leave the body empty; the request
/// itself does not fail.
fn to_json<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|e| {
        tracing::error!("Failed to serialize response body: {e}");
        String::new()
    })
}
