//! Pairing tests

use super::super::pairings::{multi_miller_loop, pairing, pairing_product, G2Prepared, Gt};
use super::super::{Bls12, G1Affine, G1Projective, G2Affine, G2Projective, Scalar};
use crate::error::Error;

use rand_chacha::rand_core::SeedableRng;
use rand_chacha::ChaCha20Rng;
use shercrypto_api::PairingEngine;

fn rng() -> ChaCha20Rng {
    ChaCha20Rng::seed_from_u64(0x5eed_0003)
}

// ============================================================================
// Bilinearity
// ============================================================================

#[test]
fn test_bilinearity_in_the_first_argument() {
    let mut rng = rng();
    let a = Scalar::random(&mut rng);
    let p = G1Projective::random(&mut rng);
    let q = G2Affine::from(G2Projective::random(&mut rng));

    let lhs = pairing(&G1Affine::from(p * a), &q);
    let rhs = pairing(&G1Affine::from(p), &q) * a;
    assert_eq!(lhs, rhs);
}

#[test]
fn test_bilinearity_in_the_second_argument() {
    let mut rng = rng();
    let b = Scalar::random(&mut rng);
    let p = G1Affine::from(G1Projective::random(&mut rng));
    let q = G2Projective::random(&mut rng);

    let lhs = pairing(&p, &G2Affine::from(q * b));
    let rhs = pairing(&p, &G2Affine::from(q)) * b;
    assert_eq!(lhs, rhs);
}

#[test]
fn test_bilinearity_moves_scalars_across() {
    let mut rng = rng();
    let a = Scalar::random(&mut rng);
    let b = Scalar::random(&mut rng);
    let p = G1Projective::generator();
    let q = G2Projective::generator();

    let both = pairing(&G1Affine::from(p * a), &G2Affine::from(q * b));
    assert_eq!(both, pairing(&G1Affine::from(p * (a * b)), &G2Affine::from(q)));
    assert_eq!(both, pairing(&G1Affine::from(p), &G2Affine::from(q * (a * b))));
    assert_eq!(both, Gt::generator() * (a * b));
}

#[test]
fn test_additivity() {
    let mut rng = rng();
    let p1 = G1Projective::random(&mut rng);
    let p2 = G1Projective::random(&mut rng);
    let q = G2Affine::from(G2Projective::random(&mut rng));

    assert_eq!(
        pairing(&G1Affine::from(p1 + p2), &q),
        pairing(&G1Affine::from(p1), &q) + pairing(&G1Affine::from(p2), &q)
    );
}

#[test]
fn test_non_degeneracy() {
    let e = pairing(&G1Affine::generator(), &G2Affine::generator());
    assert_ne!(e, Gt::identity());
    assert_eq!(e * -Scalar::one() + e, Gt::identity());
}

#[test]
fn test_negation() {
    let p = G1Affine::generator();
    let q = G2Affine::generator();
    let e = pairing(&p, &q);

    assert_eq!(pairing(&-p, &q), -e);
    assert_eq!(pairing(&p, &-q), -e);
    assert_eq!(pairing(&-p, &-q), e);
}

// ============================================================================
// Engine scenario: a = 1, b = 2
// ============================================================================

#[test]
fn test_engine_scenario_a_one_b_two() {
    let engine = Bls12::with_defaults().unwrap();
    let a = Scalar::from(1u64);
    let b = Scalar::from(2u64);

    let g1 = engine.g1_scalar_base_mult(&Scalar::one());
    let g2 = engine.g2_scalar_base_mult(&Scalar::one());
    assert!(engine.g1_equal(&engine.g1_scalar_base_mult(&a), &g1));

    let base = engine.pair(&g1, &g2);
    let lhs = base * (a * b);
    let rhs = engine.pair(
        &engine.g1_scalar_mult(&g1, &a),
        &engine.g2_scalar_mult(&g2, &b),
    );
    assert!(engine.gt_equal(&lhs, &rhs));
    assert!(engine.gt_equal(&rhs, &base.double()));
}

// ============================================================================
// Miller loop sharing
// ============================================================================

#[test]
fn test_multi_miller_loop_matches_individual_pairings() {
    let mut rng = rng();
    let p1 = G1Affine::from(G1Projective::random(&mut rng));
    let p2 = G1Affine::from(G1Projective::random(&mut rng));
    let q1 = G2Affine::from(G2Projective::random(&mut rng));
    let q2 = G2Affine::from(G2Projective::random(&mut rng));

    let prep1 = G2Prepared::from(q1);
    let prep2 = G2Prepared::from(q2);
    let shared = multi_miller_loop(&[(&p1, &prep1), (&p2, &prep2)]).final_exponentiation();

    assert_eq!(shared, pairing(&p1, &q1) + pairing(&p2, &q2));
    assert_eq!(shared, pairing_product(&[(p1, q1), (p2, q2)]).unwrap());
}

#[test]
fn test_pairing_product_check() {
    // e(a·g1, g2) · e(-g1, a·g2) = 1
    let a = Scalar::from(0x1_0000_0001u64);
    let p = G1Affine::from(G1Projective::generator() * a);
    let q = G2Affine::from(G2Projective::generator() * a);

    let res = pairing_product(&[(p, G2Affine::generator()), (-G1Affine::generator(), q)]).unwrap();
    assert_eq!(res, Gt::identity());
}

#[test]
fn test_pairing_product_empty_input() {
    assert!(matches!(
        pairing_product(&[]),
        Err(Error::InvalidInputSize { .. })
    ));
}

#[test]
fn test_identity_terms_contribute_one() {
    let g1 = G1Affine::generator();
    let g2 = G2Affine::generator();
    let res = pairing_product(&[
        (g1, g2),
        (G1Affine::identity(), g2),
        (g1, G2Affine::identity()),
    ])
    .unwrap();
    assert_eq!(res, Gt::generator());
}
