use thiserror::Error;

pub type Result<T> = std::result::Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("bookmark not found: {0}")]
    NotFound(String),

    #[error("invalid bookmark: {0}")]
    Invalid(&'static str),

    #[error("invalid slot key: {0:?}")]
    InvalidKey(String),

    #[error("cannot migrate from {backend}: {reason}")]
    MigrateSource {
        backend: crate::factory::Backend,
        reason: String,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("serialize bookmarks: {0}")]
    Serialize(#[from] serde_json::Error),

    #[cfg(feature = "sqlite")]
    #[error("sqlite: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

impl From<tempfile::PersistError> for StoreError {
    fn from(e: tempfile::PersistError) -> Self {
        StoreError::Io(e.error)
    }
}
