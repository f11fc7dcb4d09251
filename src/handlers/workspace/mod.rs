// Workspace sessions: each session owns a tab store, a URL and the
// navigation controller that keeps the two in sync.

pub mod navigate;
pub mod session;
pub mod tabs;

use uuid::Uuid;

use crate::error::ApiError;

pub use navigate::{location, navigate};
pub use session::{session_create, session_delete, session_get};
pub use tabs::{tab_activate, tab_close, tab_open};

pub(crate) fn parse_session_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::invalid_field("id", format!("Invalid UUID format: {}", raw)))
}
