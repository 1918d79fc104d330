//! Cycling engine error types.

use crate::domain::foundation::ErrorCode;

/// Errors raised while advancing or inspecting the cycle.
///
/// An empty candidate set is not an error; it is reported as a normal
/// "no articles" outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleError {
    /// The article source could not be read.
    SourceUnavailable(String),
    /// Concurrent writers kept moving the cursor; the write was abandoned.
    StoreConflict { attempts: u32 },
    /// The cursor store could not be read or written.
    StoreUnavailable(String),
    /// Request failed validation.
    ValidationFailed { field: String, message: String },
}

impl CycleError {
    pub fn source_unavailable(message: impl Into<String>) -> Self {
        CycleError::SourceUnavailable(message.into())
    }
    pub fn store_conflict(attempts: u32) -> Self {
        CycleError::StoreConflict { attempts }
    }
    pub fn store_unavailable(message: impl Into<String>) -> Self {
        CycleError::StoreUnavailable(message.into())
    }
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        CycleError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }
    pub fn code(&self) -> ErrorCode {
        match self {
            CycleError::SourceUnavailable(_) => ErrorCode::SourceUnavailable,
            CycleError::StoreConflict { .. } => ErrorCode::StoreConflict,
            CycleError::StoreUnavailable(_) => ErrorCode::StoreUnavailable,
            CycleError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
        }
    }
    pub fn message(&self) -> String {
        match self {
            CycleError::SourceUnavailable(msg) => format!("Article source unavailable: {}", msg),
            CycleError::StoreConflict { attempts } => {
                format!("Cursor update lost {} races in a row", attempts)
            }
            CycleError::StoreUnavailable(msg) => format!("Cursor store unavailable: {}", msg),
            CycleError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
        }
    }
}

impl std::fmt::Display for CycleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for CycleError {}
