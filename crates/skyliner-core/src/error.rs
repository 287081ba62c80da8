use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("revision record has {found} fields, expected {expected}")]
    FieldCount { expected: usize, found: usize },
    #[error("cannot nest {path:?}: {at:?} already holds a leaf value")]
    PathConflict { path: String, at: String },
    #[error("invalid ref update line: {0:?}")]
    InvalidRefUpdate(String),
    #[error("record shape error: {0}")]
    Shape(#[from] serde_json::Error),
}
