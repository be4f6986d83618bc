//! # shercrypto
//!
//! A pairing-based cryptography core over BLS12-381.
//!
//! ## Usage
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! shercrypto = "0.4"
//! ```
//!
//! ## Features
//!
//! - `std` (default): standard library support, required by the MSM worker pool
//! - `serde`: `Serialize`/`Deserialize` for `CurveConfig`
//! - `full`: all of the above plus a `rand` re-export
//!
//! ## Crate Structure
//!
//! This is a facade crate that re-exports functionality from its sub-crates:
//!
//! - [`shercrypto-api`]: error taxonomy and the `PairingEngine`/`PointEncoding` traits
//! - [`shercrypto-params`]: curve sizes and MSM tuning defaults
//! - [`shercrypto-algorithms`]: field tower, groups, MSM and pairing

// Core re-exports
pub use shercrypto_algorithms as algorithms;
pub use shercrypto_api as api;
pub use shercrypto_params as params;

#[cfg(feature = "rand")]
pub use rand;

/// Common imports for shercrypto users
pub mod prelude {
    // Error types
    pub use crate::api::{Error, Result, ResultExt};

    // Protocol-facing traits
    pub use crate::api::{PairingEngine, PointEncoding, Serialize};

    // Curve types
    pub use crate::algorithms::{
        pairing, pairing_product, Bls12, Curve, CurveConfig, CurveGroup, G1Affine, G1Projective,
        G2Affine, G2Prepared, G2Projective, Gt, MsmHandle, Scalar,
    };
}
