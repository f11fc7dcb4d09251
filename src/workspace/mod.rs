pub mod content;
pub mod error;
pub mod navigation;
pub mod session;
pub mod store;

pub use content::{content_from_query, ContentType, Location, SearchParams, UnknownContentType, CONTENT_PARAM};
pub use error::WorkspaceError;
pub use navigation::{set_content_in_url, ContentStore, NavigateOptions, NavigationController, Navigator};
pub use session::{HistoryEntry, NavigationResult, SessionRegistry, WorkspaceSession, WorkspaceSnapshot};
pub use store::{WorkspaceStore, WorkspaceTab};
