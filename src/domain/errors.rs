use thiserror::Error;

use super::models::FieldId;

/// A form constraint that blocks submission.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("{} is required", .0.label())]
    Missing(FieldId),

    #[error("{} must be a number", .0.label())]
    NotANumber(FieldId),

    #[error("{} must not be negative", .0.label())]
    Negative(FieldId),

    #[error("{} must be a multiple of {step}", field.label())]
    StepMismatch { field: FieldId, step: &'static str },

    #[error("{} must be between {min} and {max}", field.label())]
    OutOfRange { field: FieldId, min: i64, max: i64 },
}

impl FormError {
    /// The field the user has to fix.
    pub fn field(&self) -> FieldId {
        match self {
            FormError::Missing(field)
            | FormError::NotANumber(field)
            | FormError::Negative(field) => *field,
            FormError::StepMismatch { field, .. } | FormError::OutOfRange { field, .. } => *field,
        }
    }
}

/// Failure of a single call to the prediction service.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SubmitError {
    #[error("request failed: {0}")]
    Transport(String),

    #[error("prediction service answered with status {0}")]
    Status(u16),

    #[error("unexpected response body: {0}")]
    MalformedResponse(String),
}

/// Why a submit request did not start.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SubmitRejected {
    #[error("a prediction is already in progress")]
    InFlight,

    #[error("close the current message first")]
    OverlayOpen,

    #[error(transparent)]
    Invalid(#[from] FormError),
}

pub type FormResult<T> = Result<T, FormError>;
