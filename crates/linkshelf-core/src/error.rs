use crate::link::Link;
use thiserror::Error;

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// Errors returned by a [`LinkStorage`][crate::LinkStorage] implementation.
///
/// `NotFound` and `ShortNameConflict` describe the state of the collection.
/// Every other variant is a storage failure: something unexpected happened
/// inside the backend.
#[derive(Debug, Clone, Error)]
pub enum StorageError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("given short name is already used by another link (existing link id {})", .existing.id)]
    ShortNameConflict {
        /// The stored link currently holding the short name.
        existing: Box<Link>,
    },
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
    #[error("storage operation timed out: {0}")]
    Timeout(String),
    #[error("storage query failed: {0}")]
    Query(String),
    #[error("stored data is invalid: {0}")]
    InvalidData(String),
    #[error("storage failure: {0}")]
    Failure(String),
}

impl StorageError {
    pub fn conflict(existing: Link) -> Self {
        Self::ShortNameConflict {
            existing: Box::new(existing),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::ShortNameConflict { .. })
    }

    /// Returns `true` for unexpected backend conditions, as opposed to
    /// `NotFound` and `ShortNameConflict`.
    pub fn is_failure(&self) -> bool {
        !self.is_not_found() && !self.is_conflict()
    }

    /// The stored link that caused a `ShortNameConflict`, if any.
    pub fn conflicting_link(&self) -> Option<&Link> {
        match self {
            Self::ShortNameConflict { existing } => Some(existing),
            _ => None,
        }
    }
}
