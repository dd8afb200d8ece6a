use http::StatusCode;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Body returned whenever the requested note does not exist.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Always `true`
    pub error: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateNoteRequest {
    /// New note content
    #[serde(default)]
    pub content: Option<String>,
}

/// Status and JSON text produced by the service, before any transport
/// specific wrapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteReply {
    pub status: StatusCode,
    pub body: String,
}

impl NoteReply {
    pub const fn ok(body: String) -> Self {
        Self {
            status: StatusCode::OK,
            body,
        }
    }

    pub const fn not_found(body: String) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            body,
        }
    }
}
