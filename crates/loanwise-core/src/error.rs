use thiserror::Error;

/// A submitted form could not be turned into a [`LoanApplication`](crate::LoanApplication).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("missing form field '{0}'")]
    Missing(&'static str),

    #[error("form field '{field}' is not a finite number: {value:?}")]
    InvalidNumber { field: &'static str, value: String },
}
