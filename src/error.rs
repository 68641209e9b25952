use thiserror::Error;

/// Failures of a single backend call.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("backend returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("invalid response body: {0}")]
    Decode(String),

    #[error("invalid backend url: {0}")]
    InvalidUrl(String),
}

impl ApiError {
    /// Absence of a per-date record, as opposed to a real failure.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound(_))
    }
}

/// Input rejected before anything is sent.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("{0} is required")]
    Missing(&'static str),

    #[error("{field} must be a whole number, got {value:?}")]
    NotAnInteger { field: &'static str, value: String },

    #[error("servings must be a positive number, got {0:?}")]
    InvalidServings(String),

    #[error("expected a YYYY-MM-DD date, got {0:?}")]
    InvalidDate(String),

    #[error("unknown {kind}: {value:?}")]
    UnknownVariant { kind: &'static str, value: String },
}

#[derive(Error, Debug)]
pub enum ViewError {
    #[error(transparent)]
    Form(#[from] FormError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("a message is already being sent")]
    Busy,

    #[error("message is empty")]
    EmptyMessage,
}
