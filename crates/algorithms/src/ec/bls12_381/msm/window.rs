//! Windowed multi-exponentiation with a fixed 4-bit window.
//!
//! This is the special case of Pippenger described by Bootle
//! (<https://jbootle.github.io/Misc/pippenger.pdf>) with `s = b = 4`: every
//! point contributes its 15 small multiples, and the scalar is read as 64
//! hexadecimal digits.

use shercrypto_params::msm::{MSM_WINDOW_BITS, MSM_WINDOW_TABLE_SIZE};
use shercrypto_params::pairing::bls12_381::BLS12_381_SCALAR_DIGIT_BITS;

use super::digit;
use crate::ec::bls12_381::group::CurveGroup;
use crate::ec::bls12_381::Scalar;
use crate::error::Result;

/// Number of 4-bit windows in a scalar
pub const WINDOWS: usize = BLS12_381_SCALAR_DIGIT_BITS / MSM_WINDOW_BITS;

/// The multiples `1·P, 2·P, .., 15·P`.
///
/// Entry `j` is built from entries `j/2` and `(j+1)/2`, so odd entries are a
/// doubling and even entries a single addition.
pub fn precompute_table<G: CurveGroup>(p: &G) -> [G; MSM_WINDOW_TABLE_SIZE] {
    let mut t = [G::identity(); MSM_WINDOW_TABLE_SIZE];
    t[0] = *p;
    let mut j = 1;
    while j < MSM_WINDOW_TABLE_SIZE {
        t[j] = t[j / 2].double();
        t[j + 1] = t[(j + 1) / 2].add(&t[j / 2]);
        j += 2;
    }
    t
}

/// `Σ scalars[i]·points[i]` on the calling thread.
///
/// Both slices are read up to the shorter length; callers check lengths.
pub fn multi_exp_windowed<G: CurveGroup>(points: &[G], scalars: &[Scalar]) -> G {
    let mut windows = [G::identity(); WINDOWS];

    for (p, k) in points.iter().zip(scalars) {
        let table = precompute_table(p);
        let limbs = k.to_canonical_limbs();
        for (w, acc) in windows.iter_mut().enumerate() {
            let d = digit(&limbs, w * MSM_WINDOW_BITS, MSM_WINDOW_BITS);
            if d != 0 {
                *acc = acc.add(&table[d - 1]);
            }
        }
    }

    combine(&windows)
}

/// Single scalar multiplication through the windowed routine.
pub fn mul<G: CurveGroup>(p: &G, k: &Scalar) -> G {
    multi_exp_windowed(core::slice::from_ref(p), core::slice::from_ref(k))
}

// Horner over the windows, most significant first.
fn combine<G: CurveGroup>(windows: &[G; WINDOWS]) -> G {
    let mut res = G::identity();
    for acc in windows.iter().rev() {
        for _ in 0..MSM_WINDOW_BITS {
            res = res.double();
        }
        res = res.add(acc);
    }
    res
}

/// Precomputed multiples of a fixed base for every window.
///
/// Entry `[k][d - 1]` holds `d·16^k·B` in affine form, so a multiplication is
/// one mixed addition per non-zero digit and no doublings.
#[derive(Debug, Clone)]
pub struct FixedBaseTable<G: CurveGroup> {
    entries: Vec<G::Affine>,
}

impl<G: CurveGroup> FixedBaseTable<G> {
    /// Build the table for `base`. Costs 64 table constructions and one
    /// batched inversion.
    pub fn new(base: &G) -> Result<Self> {
        let mut projective = Vec::with_capacity(WINDOWS * MSM_WINDOW_TABLE_SIZE);
        let mut b = *base;
        for _ in 0..WINDOWS {
            projective.extend_from_slice(&precompute_table(&b));
            for _ in 0..MSM_WINDOW_BITS {
                b = b.double();
            }
        }

        let mut entries = vec![G::Affine::default(); projective.len()];
        G::batch_normalize(&projective, &mut entries)?;
        Ok(FixedBaseTable { entries })
    }

    /// `k·B`
    pub fn mul(&self, k: &Scalar) -> G {
        let limbs = k.to_canonical_limbs();
        let mut acc = G::identity();
        for w in 0..WINDOWS {
            let d = digit(&limbs, w * MSM_WINDOW_BITS, MSM_WINDOW_BITS);
            if d != 0 {
                acc = acc.add_mixed(&self.entries[w * MSM_WINDOW_TABLE_SIZE + d - 1]);
            }
        }
        acc
    }
}
