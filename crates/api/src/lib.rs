//! Public API traits and types for the shercrypto library
//!
//! This crate is the narrow surface that protocol crates (signatures,
//! credentials, zero-knowledge proofs) program against: the error taxonomy
//! and the traits a pairing engine and its point types implement.

pub mod error;
pub mod traits;

// Re-export commonly used items at the crate level for convenience
pub use error::{Error, Result, ResultExt};

pub use traits::{PairingEngine, PointEncoding, Serialize};

// Re-export trait modules for direct access
pub use traits::{pairing, serialize};
