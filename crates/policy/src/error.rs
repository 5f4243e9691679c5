use thiserror::Error;

/// Errors raised for malformed input. A denial is never an error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PolicyError {
    #[error("Unknown action: {0:?}")]
    UnknownAction(String),

    #[error("Invalid access code {code:?}: unexpected character {found:?}")]
    InvalidAccessCode { code: String, found: char },

    #[error("Resource name must be non-empty")]
    EmptyResource,

    #[error("Duplicate permission for resource: {0}")]
    DuplicatePermission(String),
}
