//! The pairing engine protocols program against.

use std::sync::Arc;

use rand::{CryptoRng, RngCore};
use shercrypto_api::{PairingEngine, ResultExt};

use super::curve::Curve;
use super::pairings::{pairing, Gt};
use super::{G1Affine, G1Projective, G2Affine, G2Projective, Scalar};
use crate::error::Result;

/// BLS12-381 behind the [`PairingEngine`] interface.
///
/// Cloning is cheap; every clone shares the same [`Curve`].
#[derive(Debug, Clone)]
pub struct Bls12 {
    curve: Arc<Curve>,
}

impl Bls12 {
    /// Wrap an existing curve
    pub fn new(curve: Arc<Curve>) -> Self {
        Bls12 { curve }
    }

    /// An engine over a curve with the default configuration
    pub fn with_defaults() -> Result<Self> {
        Ok(Bls12::new(Curve::default_shared()?))
    }

    /// The shared curve
    pub fn curve(&self) -> &Arc<Curve> {
        &self.curve
    }
}

impl PairingEngine for Bls12 {
    type Scalar = Scalar;
    type G1 = G1Projective;
    type G2 = G2Projective;
    type Gt = Gt;

    fn g1_scalar_base_mult(&self, k: &Scalar) -> G1Projective {
        self.curve.scalar_mul_by_gen_g1(k)
    }

    fn g2_scalar_base_mult(&self, k: &Scalar) -> G2Projective {
        self.curve.scalar_mul_by_gen_g2(k)
    }

    fn random_g1<R: RngCore + CryptoRng>(&self, rng: &mut R) -> (Scalar, G1Projective) {
        let k = Scalar::random(rng);
        (k, self.g1_scalar_base_mult(&k))
    }

    fn random_g2<R: RngCore + CryptoRng>(&self, rng: &mut R) -> (Scalar, G2Projective) {
        let k = Scalar::random(rng);
        (k, self.g2_scalar_base_mult(&k))
    }

    fn g1_scalar_mult(&self, p: &G1Projective, k: &Scalar) -> G1Projective {
        p * k
    }

    fn g2_scalar_mult(&self, p: &G2Projective, k: &Scalar) -> G2Projective {
        p * k
    }

    fn g1_add(&self, a: &G1Projective, b: &G1Projective) -> G1Projective {
        a + b
    }

    fn g2_add(&self, a: &G2Projective, b: &G2Projective) -> G2Projective {
        a + b
    }

    fn g1_neg(&self, p: &G1Projective) -> G1Projective {
        -p
    }

    fn g2_neg(&self, p: &G2Projective) -> G2Projective {
        -p
    }

    fn g1_equal(&self, a: &G1Projective, b: &G1Projective) -> bool {
        a == b
    }

    fn g2_equal(&self, a: &G2Projective, b: &G2Projective) -> bool {
        a == b
    }

    fn multi_exp_g1(
        &self,
        points: &[G1Projective],
        scalars: &[Scalar],
    ) -> shercrypto_api::Result<G1Projective> {
        self.curve
            .multi_exp_sync(points, scalars)
            .with_context("Bls12::multi_exp_g1")
    }

    fn multi_exp_g2(
        &self,
        points: &[G2Projective],
        scalars: &[Scalar],
    ) -> shercrypto_api::Result<G2Projective> {
        self.curve
            .multi_exp_sync(points, scalars)
            .with_context("Bls12::multi_exp_g2")
    }

    fn pair(&self, p: &G1Projective, q: &G2Projective) -> Gt {
        pairing(&G1Affine::from(p), &G2Affine::from(q))
    }

    fn gt_equal(&self, a: &Gt, b: &Gt) -> bool {
        a == b
    }
}
