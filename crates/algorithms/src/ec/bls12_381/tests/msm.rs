//! Multi-scalar multiplication against the naive sum

use std::sync::Arc;

use super::super::{Curve, CurveConfig, CurveGroup, G1Projective, G2Projective, Scalar};
use crate::error::Error;

use rand_chacha::rand_core::SeedableRng;
use rand_chacha::ChaCha20Rng;

fn curve(workers: usize) -> Arc<Curve> {
    Curve::new(CurveConfig::default().with_workers(workers)).unwrap()
}

fn inputs<G: CurveGroup + core::ops::Mul<Scalar, Output = G>>(
    n: usize,
    seed: u64,
) -> (Vec<G>, Vec<Scalar>) {
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    let points = (0..n)
        .map(|_| G::generator() * Scalar::random(&mut rng))
        .collect();
    let scalars = (0..n).map(|_| Scalar::random(&mut rng)).collect();
    (points, scalars)
}

fn naive<G: CurveGroup + core::ops::Mul<Scalar, Output = G>>(points: &[G], scalars: &[Scalar]) -> G {
    points
        .iter()
        .zip(scalars)
        .fold(G::identity(), |acc, (p, k)| acc.add(&(*p * *k)))
}

#[test]
fn test_windowed_path_matches_naive() {
    let curve = curve(4);
    for n in [1, 2, 7, 49] {
        let (points, scalars) = inputs::<G1Projective>(n, n as u64);
        let got = curve.multi_exp(&points, &scalars).unwrap().join().unwrap();
        assert_eq!(got, naive(&points, &scalars), "n = {}", n);
    }
}

#[test]
fn test_bucket_path_matches_naive() {
    let curve = curve(4);
    for n in [50, 51, 130] {
        let (points, scalars) = inputs::<G1Projective>(n, 100 + n as u64);
        let got = curve.multi_exp_sync(&points, &scalars).unwrap();
        assert_eq!(got, naive(&points, &scalars), "n = {}", n);
    }
}

#[test]
fn test_g2_both_paths() {
    let curve = curve(3);
    for n in [10, 60] {
        let (points, scalars) = inputs::<G2Projective>(n, 200 + n as u64);
        let got = curve.multi_exp_sync(&points, &scalars).unwrap();
        assert_eq!(got, naive(&points, &scalars), "n = {}", n);
    }
}

#[test]
fn test_paths_agree_on_the_same_input() {
    let (points, scalars) = inputs::<G1Projective>(64, 300);

    // Threshold 1 forces the bucket method, a large threshold the windowed one
    let bucket = Curve::new(CurveConfig::default().with_workers(2).with_msm_threshold(1)).unwrap();
    let windowed =
        Curve::new(CurveConfig::default().with_workers(2).with_msm_threshold(1000)).unwrap();

    assert_eq!(
        bucket.multi_exp_sync(&points, &scalars).unwrap(),
        windowed.multi_exp_sync(&points, &scalars).unwrap()
    );
}

#[test]
fn test_result_is_independent_of_worker_count() {
    let (points, scalars) = inputs::<G1Projective>(80, 400);
    let one = curve(1).multi_exp_sync(&points, &scalars).unwrap();
    let many = curve(5).multi_exp_sync(&points, &scalars).unwrap();
    assert_eq!(one, many);
}

#[test]
fn test_special_scalars() {
    let curve = curve(2);
    let g = G1Projective::generator();
    let points = vec![g; 60];

    let zeros = vec![Scalar::zero(); 60];
    assert_eq!(curve.multi_exp_sync(&points, &zeros).unwrap(), G1Projective::identity());

    // 60 copies of (r - 1)·g sum to -60·g
    let minus_one = vec![-Scalar::one(); 60];
    assert_eq!(
        curve.multi_exp_sync(&points, &minus_one).unwrap(),
        -(g * Scalar::from(60u64))
    );

    let identities = vec![G1Projective::identity(); 60];
    let ones = vec![Scalar::one(); 60];
    assert_eq!(
        curve.multi_exp_sync(&identities, &ones).unwrap(),
        G1Projective::identity()
    );
}

#[test]
fn test_empty_input_is_identity() {
    let curve = curve(2);
    let handle = curve.multi_exp::<G2Projective>(&[], &[]).unwrap();
    assert_eq!(handle.join().unwrap(), G2Projective::identity());
}

#[test]
fn test_length_mismatch_fails_before_spawning() {
    let curve = curve(2);
    let (points, scalars) = inputs::<G1Projective>(5, 500);
    assert!(matches!(
        curve.multi_exp(&points, &scalars[..4]),
        Err(Error::LengthMismatch {
            points: 5,
            scalars: 4,
            ..
        })
    ));
}

#[test]
fn test_handles_can_overlap() {
    let curve = curve(4);
    let (p1, s1) = inputs::<G1Projective>(20, 600);
    let (p2, s2) = inputs::<G1Projective>(70, 601);

    let h1 = curve.multi_exp(&p1, &s1).unwrap();
    let h2 = curve.multi_exp(&p2, &s2).unwrap();

    assert_eq!(h2.join().unwrap(), naive(&p2, &s2));
    assert_eq!(h1.join().unwrap(), naive(&p1, &s1));
}

#[test]
fn test_generator_tables_match_windowed_mul() {
    let curve = curve(2);
    let mut rng = ChaCha20Rng::seed_from_u64(700);
    for _ in 0..4 {
        let k = Scalar::random(&mut rng);
        assert_eq!(curve.scalar_mul_by_gen_g1(&k), G1Projective::generator() * k);
        assert_eq!(curve.scalar_mul_by_gen_g2(&k), G2Projective::generator() * k);
    }
}
