//! The pairing engine interface
//!
//! Signature schemes, anonymous credentials and sigma protocols only need a
//! handful of group operations and the pairing itself. They program against
//! this trait so that the curve implementation stays swappable.

use crate::Result;
use rand::{CryptoRng, RngCore};

/// Group and pairing operations of a pairing-friendly curve
pub trait PairingEngine {
    /// Scalar field element
    type Scalar: Clone;
    /// Element of the first source group
    type G1: Clone;
    /// Element of the second source group
    type G2: Clone;
    /// Element of the target group
    type Gt: Clone;

    /// Multiply the G1 generator by `k`.
    fn g1_scalar_base_mult(&self, k: &Self::Scalar) -> Self::G1;

    /// Multiply the G2 generator by `k`.
    fn g2_scalar_base_mult(&self, k: &Self::Scalar) -> Self::G2;

    /// Sample a scalar and return it with the matching G1 multiple of the generator.
    fn random_g1<R: RngCore + CryptoRng>(&self, rng: &mut R) -> (Self::Scalar, Self::G1);

    /// Sample a scalar and return it with the matching G2 multiple of the generator.
    fn random_g2<R: RngCore + CryptoRng>(&self, rng: &mut R) -> (Self::Scalar, Self::G2);

    /// Multiply a G1 point by `k`.
    fn g1_scalar_mult(&self, p: &Self::G1, k: &Self::Scalar) -> Self::G1;

    /// Multiply a G2 point by `k`.
    fn g2_scalar_mult(&self, p: &Self::G2, k: &Self::Scalar) -> Self::G2;

    /// Add two G1 points.
    fn g1_add(&self, a: &Self::G1, b: &Self::G1) -> Self::G1;

    /// Add two G2 points.
    fn g2_add(&self, a: &Self::G2, b: &Self::G2) -> Self::G2;

    /// Negate a G1 point.
    fn g1_neg(&self, p: &Self::G1) -> Self::G1;

    /// Negate a G2 point.
    fn g2_neg(&self, p: &Self::G2) -> Self::G2;

    /// Compare two G1 points.
    fn g1_equal(&self, a: &Self::G1, b: &Self::G1) -> bool;

    /// Compare two G2 points.
    fn g2_equal(&self, a: &Self::G2, b: &Self::G2) -> bool;

    /// Sum of `scalars[i] * points[i]` in G1.
    fn multi_exp_g1(&self, points: &[Self::G1], scalars: &[Self::Scalar]) -> Result<Self::G1>;

    /// Sum of `scalars[i] * points[i]` in G2.
    fn multi_exp_g2(&self, points: &[Self::G2], scalars: &[Self::Scalar]) -> Result<Self::G2>;

    /// Evaluate the pairing.
    fn pair(&self, p: &Self::G1, q: &Self::G2) -> Self::Gt;

    /// Compare two target group elements.
    fn gt_equal(&self, a: &Self::Gt, b: &Self::Gt) -> bool;
}
