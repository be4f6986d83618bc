//! Group law tests for G1 and G2

use super::super::{CurveGroup, G1Affine, G1Projective, G2Affine, G2Projective, Scalar};

use rand_chacha::rand_core::SeedableRng;
use rand_chacha::ChaCha20Rng;
use subtle::{Choice, ConditionallySelectable};

fn rng() -> ChaCha20Rng {
    ChaCha20Rng::seed_from_u64(0x5eed_0002)
}

// Shared checks for both groups, through the trait the MSM code uses
fn check_identity_laws<G: CurveGroup>(p: G) {
    let id = G::identity();
    assert!(bool::from(id.is_identity()));
    assert_eq!(id.add(&p), p);
    assert_eq!(p.add(&id), p);
    assert_eq!(id.double(), id);
    assert_eq!(G::from_affine(&p.to_affine()), p);
    assert_eq!(p.add_mixed(&G::identity().to_affine()), p);
}

fn check_double_vs_add<G: CurveGroup>(p: G) {
    assert_eq!(p.double(), p.add(&p));
    assert_eq!(p.add_mixed(&p.to_affine()), p.double());
}

// ============================================================================
// G1
// ============================================================================

#[test]
fn test_g1_identity_laws() {
    let p = G1Projective::generator() * Scalar::from(42u64);
    check_identity_laws(p);

    let id = G1Projective::identity();
    assert_eq!(id * Scalar::from(42u64), id);
    assert_eq!(-id, id);
    assert_eq!(p - p, id);
    assert!(bool::from(G1Affine::from(id).is_identity()));
}

#[test]
fn test_g1_double_vs_add() {
    let mut rng = rng();
    for _ in 0..4 {
        check_double_vs_add(G1Projective::random(&mut rng));
    }
}

#[test]
fn test_g1_associativity_and_commutativity() {
    let g = G1Projective::generator();
    let p = g * Scalar::from(2u64);
    let q = g * Scalar::from(3u64);
    let r = g * Scalar::from(5u64);

    assert_eq!((p + q) + r, p + (q + r));
    assert_eq!(p + q, q + p);
    assert_eq!(p + q + r, g * Scalar::from(10u64));
}

#[test]
fn test_g1_scalar_mul_linearity() {
    let mut rng = rng();
    let p = G1Projective::random(&mut rng);
    let a = Scalar::random(&mut rng);
    let b = Scalar::random(&mut rng);

    assert_eq!(p * (a + b), p * a + p * b);
    assert_eq!(p * (a * b), (p * b) * a);
    assert_eq!(p * -a, -(p * a));
}

#[test]
fn test_g1_mixed_addition_consistency() {
    let g = G1Projective::generator();
    let p = g * Scalar::from(13u64);
    let q = g * Scalar::from(17u64);
    let q_aff = G1Affine::from(q);

    assert_eq!(p + q, p + q_aff);
    assert_eq!(p + q, G1Affine::from(p) + q);
    assert_eq!(p - q, p - q_aff);
}

#[test]
fn test_g1_batch_normalize_with_identity() {
    let g = G1Projective::generator();
    let points = [g, G1Projective::identity(), g.double(), G1Projective::identity()];

    let mut out = [G1Affine::default(); 4];
    G1Projective::batch_normalize(&points, &mut out).unwrap();

    assert_eq!(out[0], G1Affine::generator());
    assert_eq!(out[1], G1Affine::identity());
    assert_eq!(out[2], G1Affine::from(g.double()));
    assert_eq!(out[3], G1Affine::identity());
}

#[test]
fn test_g1_conditional_select_and_sum() {
    let a = G1Projective::generator();
    let b = G1Projective::identity();
    assert_eq!(G1Projective::conditional_select(&a, &b, Choice::from(0u8)), a);
    assert_eq!(G1Projective::conditional_select(&a, &b, Choice::from(1u8)), b);

    let points: Vec<G1Projective> = (1..=4u64).map(|i| a * Scalar::from(i)).collect();
    let sum: G1Projective = points.iter().sum();
    assert_eq!(sum, a * Scalar::from(10u64));
}

#[test]
fn test_g1_subgroup_membership() {
    assert!(bool::from(G1Affine::generator().is_torsion_free()));
    assert!(bool::from(G1Affine::identity().is_torsion_free()));

    let mut rng = rng();
    for _ in 0..4 {
        let p = G1Affine::from(G1Projective::random(&mut rng));
        assert!(bool::from(p.is_on_curve()));
        assert!(bool::from(p.is_torsion_free()));
        assert_eq!(G1Projective::from(p) * -Scalar::one(), -G1Projective::from(p));
    }
}

// ============================================================================
// G2
// ============================================================================

#[test]
fn test_g2_identity_laws() {
    let p = G2Projective::generator() * Scalar::from(42u64);
    check_identity_laws(p);

    let id = G2Projective::identity();
    assert_eq!(id * Scalar::from(42u64), id);
    assert_eq!(-id, id);
    assert_eq!(p - p, id);
}

#[test]
fn test_g2_double_vs_add() {
    let mut rng = rng();
    for _ in 0..4 {
        check_double_vs_add(G2Projective::random(&mut rng));
    }
}

#[test]
fn test_g2_group_law() {
    let g = G2Projective::generator();
    let p = g * Scalar::from(7u64);
    let q = g * Scalar::from(11u64);
    let r = g * Scalar::from(13u64);

    assert_eq!((p + q) + r, p + (q + r));
    assert_eq!(p + q, q + p);
    assert_eq!(p + G2Affine::from(q), g * Scalar::from(18u64));
}

#[test]
fn test_g2_scalar_mul_linearity() {
    let mut rng = rng();
    let p = G2Projective::random(&mut rng);
    let a = Scalar::random(&mut rng);
    let b = Scalar::random(&mut rng);

    assert_eq!(p * (a + b), p * a + p * b);
    assert_eq!(p * (a * b), (p * b) * a);
}

#[test]
fn test_g2_batch_normalize() {
    let g = G2Projective::generator();
    let points: Vec<G2Projective> = (1..=8u64).map(|i| g * Scalar::from(i)).collect();

    let mut out = vec![G2Affine::identity(); points.len()];
    G2Projective::batch_normalize(&points, &mut out).unwrap();
    for (p, a) in points.iter().zip(&out) {
        assert_eq!(G2Affine::from(p), *a);
    }
}

#[test]
fn test_g2_subgroup_membership() {
    assert!(bool::from(G2Affine::generator().is_torsion_free()));
    assert!(bool::from(G2Affine::identity().is_torsion_free()));

    let mut rng = rng();
    for _ in 0..3 {
        let p = G2Affine::from(G2Projective::random(&mut rng));
        assert!(bool::from(p.is_on_curve()));
        assert!(bool::from(p.is_torsion_free()));
    }
}

#[test]
fn test_scalar_edge_cases() {
    let p = G1Projective::generator();
    let q = G2Projective::generator();
    let minus_one = Scalar::zero() - Scalar::one();

    assert_eq!(p * Scalar::zero(), G1Projective::identity());
    assert_eq!(p * Scalar::one(), p);
    assert_eq!(p * minus_one, -p);

    assert_eq!(q * Scalar::zero(), G2Projective::identity());
    assert_eq!(q * Scalar::one(), q);
    assert_eq!(q * minus_one, -q);
}
