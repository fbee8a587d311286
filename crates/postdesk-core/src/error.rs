//! Domain-level error types.

use std::fmt;

use thiserror::Error;
use uuid::Uuid;

/// Store-level errors, as reported by a [`PostStore`](crate::ports::PostStore).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Store rejected the request: {0}")]
    Rejected(String),

    #[error("Post not found")]
    NotFound,
}

impl StoreError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            StoreError::Unavailable(_) => ErrorKind::StoreUnavailable,
            StoreError::Rejected(_) => ErrorKind::StoreRejected,
            StoreError::NotFound => ErrorKind::NotFound,
        }
    }
}

/// Errors returned by the post collection. Every store failure is wrapped
/// in the operation that triggered it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PostError {
    #[error("Failed to load posts")]
    LoadFailed(#[source] StoreError),

    #[error("Failed to create post")]
    CreateFailed(#[source] StoreError),

    #[error("Failed to update post {id}")]
    UpdateFailed {
        id: Uuid,
        #[source]
        cause: StoreError,
    },

    #[error("Failed to delete post {id}")]
    DeleteFailed {
        id: Uuid,
        #[source]
        cause: StoreError,
    },

    #[error("Post {0} is not in the collection")]
    UnknownPost(Uuid),

    #[error("No authenticated session")]
    Unauthenticated,
}

impl PostError {
    /// The operation-level kind, as surfaced to the notification sink.
    pub fn kind(&self) -> ErrorKind {
        match self {
            PostError::LoadFailed(_) => ErrorKind::LoadFailed,
            PostError::CreateFailed(_) => ErrorKind::CreateFailed,
            PostError::UpdateFailed { .. } => ErrorKind::UpdateFailed,
            PostError::DeleteFailed { .. } => ErrorKind::DeleteFailed,
            PostError::UnknownPost(_) => ErrorKind::NotFound,
            PostError::Unauthenticated => ErrorKind::Unauthenticated,
        }
    }

    /// The store failure underneath, if any.
    pub fn cause(&self) -> Option<&StoreError> {
        match self {
            PostError::LoadFailed(cause) | PostError::CreateFailed(cause) => Some(cause),
            PostError::UpdateFailed { cause, .. } | PostError::DeleteFailed { cause, .. } => {
                Some(cause)
            }
            PostError::UnknownPost(_) | PostError::Unauthenticated => None,
        }
    }

    pub fn cause_kind(&self) -> Option<ErrorKind> {
        self.cause().map(StoreError::kind)
    }

    /// One-line message including the cause, for notifications.
    pub fn message(&self) -> String {
        match self.cause() {
            Some(cause) => format!("{self}: {cause}"),
            None => self.to_string(),
        }
    }
}

/// Flat outcome kinds reported through `NotificationSink::on_error`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    LoadFailed,
    CreateFailed,
    UpdateFailed,
    DeleteFailed,
    ValidationFailed,
    NotFound,
    StoreUnavailable,
    StoreRejected,
    Unauthenticated,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::LoadFailed => "load_failed",
            ErrorKind::CreateFailed => "create_failed",
            ErrorKind::UpdateFailed => "update_failed",
            ErrorKind::DeleteFailed => "delete_failed",
            ErrorKind::ValidationFailed => "validation_failed",
            ErrorKind::NotFound => "not_found",
            ErrorKind::StoreUnavailable => "store_unavailable",
            ErrorKind::StoreRejected => "store_rejected",
            ErrorKind::Unauthenticated => "unauthenticated",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Editable post fields, as named in validation failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Title,
    Content,
    Status,
}

impl Field {
    pub fn as_str(self) -> &'static str {
        match self {
            Field::Title => "title",
            Field::Content => "content",
            Field::Status => "status",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Edit session errors. These never reach the store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditorError {
    #[error("No edit session is open")]
    NotOpen,

    #[error("Validation failed: {}", join_fields(.0))]
    Validation(Vec<Field>),
}

impl EditorError {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::ValidationFailed
    }
}

fn join_fields(fields: &[Field]) -> String {
    fields
        .iter()
        .map(|f| f.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
