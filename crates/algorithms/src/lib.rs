//! The numerical core of shercrypto: the BLS12-381 field tower, the scalar
//! field, the G1 and G2 groups, multi-scalar multiplication and the
//! optimal-ate pairing.
//!
//! Everything curve-related lives under [`ec::bls12_381`]. A [`Curve`] is
//! built once from a [`CurveConfig`] and shared through `Arc`; it carries the
//! MSM worker pool and the generator tables. Field and group arithmetic do
//! not need a `Curve`.
//!
//! ```no_run
//! use shercrypto_algorithms::{Curve, CurveConfig, G1Projective, Scalar};
//!
//! let curve = Curve::new(CurveConfig::default().with_workers(4))?;
//! let points = vec![G1Projective::generator(); 64];
//! let scalars: Vec<Scalar> = (0..64u64).map(Scalar::from).collect();
//! let sum = curve.multi_exp(&points, &scalars)?.join()?;
//! # Ok::<(), shercrypto_algorithms::Error>(())
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]

// Error module and re-exports
pub mod error;
pub use error::{validate, Error, Result, ResultExt};

// Elliptic curve primitives
pub mod ec;
pub use ec::bls12_381::{
    pairing, pairing_product, Bls12, Curve, CurveConfig, CurveGroup, G1Affine, G1Projective,
    G2Affine, G2Prepared, G2Projective, Gt, MillerLoopResult, MsmHandle, Scalar,
};
