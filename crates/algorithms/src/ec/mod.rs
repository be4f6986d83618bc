//! Elliptic curve primitives
//!
//! Only the pairing-friendly BLS12-381 curve is provided. Its groups use
//! Jacobian coordinates throughout, with affine companions for encoding and
//! mixed addition.

pub mod bls12_381;

pub use bls12_381::{
    G1Projective as Bls12_381G1, G2Projective as Bls12_381G2, Gt as Bls12_381Gt,
    Scalar as Bls12_381Scalar,
};
