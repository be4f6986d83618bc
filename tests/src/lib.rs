//! Shared fixtures for the shercrypto integration and property tests

use std::sync::Arc;

use rand_chacha::rand_core::SeedableRng;
use rand_chacha::ChaCha20Rng;
use shercrypto_algorithms::{Curve, CurveConfig, G1Projective, G2Projective, Scalar};

/// A reproducible RNG for a given test seed
pub fn seeded_rng(seed: u64) -> ChaCha20Rng {
    ChaCha20Rng::seed_from_u64(seed)
}

/// A small curve: two workers, generator tables on
pub fn test_curve() -> Arc<Curve> {
    Curve::new(CurveConfig::default().with_workers(2))
        .unwrap_or_else(|e| panic!("test curve: {}", e))
}

/// `n` random G1 points with `n` random scalars
pub fn g1_instance(n: usize, seed: u64) -> (Vec<G1Projective>, Vec<Scalar>) {
    let mut rng = seeded_rng(seed);
    let points = (0..n).map(|_| G1Projective::random(&mut rng)).collect();
    let scalars = (0..n).map(|_| Scalar::random(&mut rng)).collect();
    (points, scalars)
}

/// `n` random G2 points with `n` random scalars
pub fn g2_instance(n: usize, seed: u64) -> (Vec<G2Projective>, Vec<Scalar>) {
    let mut rng = seeded_rng(seed);
    let points = (0..n).map(|_| G2Projective::random(&mut rng)).collect();
    let scalars = (0..n).map(|_| Scalar::random(&mut rng)).collect();
    (points, scalars)
}

/// `Σ scalars[i]·points[i]` one multiplication at a time
pub fn naive_g1(points: &[G1Projective], scalars: &[Scalar]) -> G1Projective {
    points.iter().zip(scalars).map(|(p, k)| p * k).sum()
}

/// `Σ scalars[i]·points[i]` one multiplication at a time
pub fn naive_g2(points: &[G2Projective], scalars: &[Scalar]) -> G2Projective {
    points.iter().zip(scalars).map(|(p, k)| p * k).sum()
}
