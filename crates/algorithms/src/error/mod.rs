//! Error handling for the pairing core

use std::borrow::Cow;
use std::fmt;

use shercrypto_api::Error as ApiError;

/// The error type for field, group, MSM and pairing operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Inversion of zero in Fp, Fp2, Fp6, Fp12 or the scalar field
    DivisionByZero {
        /// Where the inversion happened
        context: &'static str,
    },

    /// Bytes that do not describe a valid point
    InvalidPointEncoding {
        /// Point type being decoded
        context: &'static str,
        /// Which check failed
        reason: &'static str,
    },

    /// Multi-scalar multiplication given unequal slices
    LengthMismatch {
        /// Operation that received the inputs
        context: &'static str,
        /// Number of points
        points: usize,
        /// Number of scalars
        scalars: usize,
    },

    /// An operation needing a minimum number of inputs got fewer
    InvalidInputSize {
        /// Operation that received the inputs
        context: &'static str,
        /// Smallest accepted size
        minimum: usize,
        /// Size actually given
        actual: usize,
    },

    /// Parameter validation error
    Parameter {
        /// Name of the invalid parameter
        name: Cow<'static, str>,
        /// Reason why the parameter is invalid
        reason: Cow<'static, str>,
    },

    /// Failure of the machinery around a computation
    Processing {
        /// Operation that failed
        operation: &'static str,
        /// Additional details about the failure
        details: &'static str,
    },
}

impl Error {
    /// Shorthand to create a Parameter error
    pub fn param<N: Into<Cow<'static, str>>, R: Into<Cow<'static, str>>>(
        name: N,
        reason: R,
    ) -> Self {
        Error::Parameter {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Shorthand to create an InvalidPointEncoding error
    pub(crate) fn encoding(context: &'static str, reason: &'static str) -> Self {
        Error::InvalidPointEncoding { context, reason }
    }
}

/// Result type for the pairing core
pub type Result<T> = core::result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::DivisionByZero { context } => {
                write!(f, "Division by zero in {}", context)
            }
            Error::InvalidPointEncoding { context, reason } => {
                write!(f, "Invalid point encoding for {}: {}", context, reason)
            }
            Error::LengthMismatch {
                context,
                points,
                scalars,
            } => {
                write!(
                    f,
                    "Length mismatch in {}: {} points, {} scalars",
                    context, points, scalars
                )
            }
            Error::InvalidInputSize {
                context,
                minimum,
                actual,
            } => {
                write!(
                    f,
                    "Invalid input size for {}: need at least {}, got {}",
                    context, minimum, actual
                )
            }
            Error::Parameter { name, reason } => {
                write!(f, "Invalid parameter '{}': {}", name, reason)
            }
            Error::Processing { operation, details } => {
                write!(f, "Processing error in {}: {}", operation, details)
            }
        }
    }
}

impl std::error::Error for Error {}

// Implement conversion to the public error type
impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        match err {
            Error::DivisionByZero { context } => ApiError::DivisionByZero { context },
            Error::InvalidPointEncoding { context, reason } => ApiError::InvalidPointEncoding {
                context,
                message: reason.to_string(),
            },
            Error::LengthMismatch {
                context,
                points,
                scalars,
            } => ApiError::LengthMismatch {
                context,
                points,
                scalars,
            },
            Error::InvalidInputSize {
                context,
                minimum,
                actual,
            } => ApiError::InvalidInputSize {
                context,
                minimum,
                actual,
            },
            Error::Parameter { name, reason } => ApiError::InvalidParameter {
                context: "parameter",
                message: format!("{}: {}", name, reason),
            },
            Error::Processing { operation, details } => ApiError::Processing {
                context: operation,
                message: details.to_string(),
            },
        }
    }
}

// Re-export the API error extension trait for convenience
pub use shercrypto_api::error::ResultExt;

// Include the validation submodule
pub mod validate;
