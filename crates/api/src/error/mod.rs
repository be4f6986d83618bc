//! Error handling for the shercrypto ecosystem

pub mod traits;
pub mod types;

// Re-export the primary error type and result
pub use types::{Error, Result};

// Re-export error traits
pub use traits::ResultExt;

impl From<core::array::TryFromSliceError> for Error {
    fn from(_: core::array::TryFromSliceError) -> Self {
        Self::InvalidPointEncoding {
            context: "array conversion",
            message: "slice has the wrong length".to_string(),
        }
    }
}
