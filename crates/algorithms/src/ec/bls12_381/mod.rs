//! BLS12-381 pairing-friendly elliptic curve.
//!
//! Layout, bottom-up: the field tower in [`field`], the scalar field in
//! [`scalar`], the two source groups in [`g1`] and [`g2`], multi-scalar
//! multiplication in [`msm`], and the optimal-ate pairing in [`pairings`].
//! [`Curve`] holds the shared configuration and worker pool; [`Bls12`]
//! wraps it behind the `PairingEngine` trait.
//!
//! **Warning:** Unaudited implementation. Use at your own risk.

#[macro_use]
mod ops;

pub mod curve;
pub mod engine;
pub mod field;
pub mod g1;
pub mod g2;
pub mod group;
pub mod msm;
pub mod pairings;
pub mod scalar;

#[cfg(test)]
mod tests;

pub use curve::{Curve, CurveConfig};
pub use engine::Bls12;
pub use g1::{G1Affine, G1Projective};
pub use g2::{G2Affine, G2Projective};
pub use group::CurveGroup;
pub use msm::MsmHandle;
pub use pairings::{multi_miller_loop, pairing, pairing_product, G2Prepared, Gt, MillerLoopResult};
pub use scalar::Scalar;

/// |x| for the curve seed x = -0xd201000000010000
pub(crate) const BLS_X: u64 = shercrypto_params::pairing::bls12_381::BLS12_381_SEED;
/// Sign of the curve seed
pub(crate) const BLS_X_IS_NEGATIVE: bool =
    shercrypto_params::pairing::bls12_381::BLS12_381_SEED_IS_NEGATIVE;
