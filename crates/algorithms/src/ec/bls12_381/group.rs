//! Group operations shared by G1 and G2.
//!
//! Multi-scalar multiplication and the generator tables are written once
//! against this trait and instantiated for both Jacobian point types.

use core::fmt::Debug;

use subtle::Choice;

use crate::error::Result;

/// A prime-order group in Jacobian coordinates with an affine companion type.
pub trait CurveGroup: Copy + Debug + PartialEq + Send + Sync + 'static {
    /// Affine representation, used for mixed additions and precomputed tables
    type Affine: Copy + Debug + Default + Send + Sync + 'static;

    /// Point at infinity
    fn identity() -> Self;

    /// Fixed generator of the prime-order subgroup
    fn generator() -> Self;

    /// Whether this is the point at infinity
    fn is_identity(&self) -> Choice;

    /// `2·self`
    fn double(&self) -> Self;

    /// `self + rhs`
    fn add(&self, rhs: &Self) -> Self;

    /// `self + rhs` with an affine right-hand side
    fn add_mixed(&self, rhs: &Self::Affine) -> Self;

    /// Normalize to affine form with one inversion
    fn to_affine(&self) -> Self::Affine;

    /// Lift an affine point
    fn from_affine(p: &Self::Affine) -> Self;

    /// Normalize many points with a single inversion.
    ///
    /// `out` must be at least as long as `points`.
    fn batch_normalize(points: &[Self], out: &mut [Self::Affine]) -> Result<()>;
}
