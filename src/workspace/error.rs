use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum WorkspaceError {
    #[error("Workspace session not found: {0}")]
    SessionNotFound(Uuid),
    #[error("Workspace session limit reached ({0})")]
    SessionLimit(usize),
    #[error("Tab not found: {0}")]
    TabNotFound(String),
    #[error("Tab limit reached ({0})")]
    TabLimit(usize),
    #[error("Invalid tab key: '{0}'")]
    InvalidTabKey(String),
}
