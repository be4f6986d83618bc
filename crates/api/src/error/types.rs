//! Error type definitions for curve and pairing operations

use thiserror::Error as ThisError;

/// Primary error type for curve and pairing operations
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum Error {
    /// Inversion of the additive identity of a field
    #[error("Division by zero: {context}")]
    DivisionByZero { context: &'static str },

    /// Bytes that do not describe a valid point
    #[error("Invalid point encoding: {context}: {message}")]
    InvalidPointEncoding {
        context: &'static str,
        message: String,
    },

    /// Multi-scalar multiplication with unequal input lengths
    #[error("{context}: {points} points but {scalars} scalars")]
    LengthMismatch {
        context: &'static str,
        points: usize,
        scalars: usize,
    },

    /// Too few inputs for an operation with a minimum size
    #[error("{context}: needs at least {minimum} inputs, got {actual}")]
    InvalidInputSize {
        context: &'static str,
        minimum: usize,
        actual: usize,
    },

    /// Invalid parameter error
    #[error("{context}: {message}")]
    InvalidParameter {
        context: &'static str,
        message: String,
    },

    /// Failure of the machinery around a computation (worker pool, handles)
    #[error("Processing error in {context}: {message}")]
    Processing {
        context: &'static str,
        message: String,
    },

    /// Other error
    #[error("{context}: {message}")]
    Other {
        context: &'static str,
        message: String,
    },
}

/// Result type for curve and pairing operations
pub type Result<T> = core::result::Result<T, Error>;

impl Error {
    /// Replace the context of an existing error
    pub fn with_context(self, context: &'static str) -> Self {
        match self {
            Self::DivisionByZero { .. } => Self::DivisionByZero { context },
            Self::InvalidPointEncoding { message, .. } => {
                Self::InvalidPointEncoding { context, message }
            }
            Self::LengthMismatch {
                points, scalars, ..
            } => Self::LengthMismatch {
                context,
                points,
                scalars,
            },
            Self::InvalidInputSize { minimum, actual, .. } => Self::InvalidInputSize {
                context,
                minimum,
                actual,
            },
            Self::InvalidParameter { message, .. } => Self::InvalidParameter { context, message },
            Self::Processing { message, .. } => Self::Processing { context, message },
            Self::Other { message, .. } => Self::Other { context, message },
        }
    }

    /// Attach a message to an existing error
    pub fn with_message(self, message: impl Into<String>) -> Self {
        let message = message.into();
        match self {
            Self::InvalidPointEncoding { context, .. } => {
                Self::InvalidPointEncoding { context, message }
            }
            Self::InvalidParameter { context, .. } => Self::InvalidParameter { context, message },
            Self::Processing { context, .. } => Self::Processing { context, message },
            Self::Other { context, .. } => Self::Other { context, message },
            // Variants without a free-form message keep their structured fields.
            other => other,
        }
    }
}
