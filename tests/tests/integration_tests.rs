//! End-to-end use of the public surface, the way protocol crates use it

use shercrypto_algorithms::{
    pairing, pairing_product, Bls12, Curve, CurveConfig, G1Affine, G1Projective, G2Affine,
    G2Projective, Gt, Scalar,
};
use shercrypto_api::{Error as ApiError, PairingEngine, PointEncoding, Serialize};
use shercrypto_tests::{g1_instance, g2_instance, naive_g1, naive_g2, seeded_rng, test_curve};

#[test]
fn test_engine_bilinearity() {
    let engine = Bls12::new(test_curve());
    let mut rng = seeded_rng(1);

    let (a, pa) = engine.random_g1(&mut rng);
    let (b, qb) = engine.random_g2(&mut rng);

    let g1 = engine.g1_scalar_base_mult(&Scalar::one());
    let g2 = engine.g2_scalar_base_mult(&Scalar::one());

    let lhs = engine.pair(&pa, &qb);
    assert!(engine.gt_equal(&lhs, &(engine.pair(&g1, &g2) * (a * b))));
    assert!(engine.gt_equal(&lhs, &engine.pair(&engine.g1_scalar_mult(&g1, &(a * b)), &g2)));
}

#[test]
fn test_bls_style_verification() {
    // sk, pk = sk·g2, sig = sk·H, check e(sig, g2) == e(H, pk)
    let engine = Bls12::new(test_curve());
    let mut rng = seeded_rng(2);

    let (sk, pk) = engine.random_g2(&mut rng);
    let h = G1Projective::random(&mut rng);
    let sig = engine.g1_scalar_mult(&h, &sk);

    let g2 = G2Affine::generator();
    let ok = pairing_product(&[
        (G1Affine::from(sig), g2),
        (G1Affine::from(-h), G2Affine::from(pk)),
    ])
    .unwrap();
    assert_eq!(ok, Gt::identity());

    let forged = engine.g1_add(&sig, &G1Projective::generator());
    assert_ne!(
        pairing(&G1Affine::from(forged), &g2),
        pairing(&G1Affine::from(h), &G2Affine::from(pk))
    );
}

#[test]
fn test_msm_through_engine_on_both_sides_of_threshold() {
    let engine = Bls12::new(test_curve());
    for n in [8, 49, 50, 120] {
        let (points, scalars) = g1_instance(n, n as u64);
        assert_eq!(
            engine.multi_exp_g1(&points, &scalars).unwrap(),
            naive_g1(&points, &scalars)
        );
    }

    let (points, scalars) = g2_instance(55, 77);
    assert_eq!(
        engine.multi_exp_g2(&points, &scalars).unwrap(),
        naive_g2(&points, &scalars)
    );
}

#[test]
fn test_msm_length_mismatch_is_reported() {
    let engine = Bls12::new(test_curve());
    let (points, scalars) = g1_instance(3, 3);
    let err = engine.multi_exp_g1(&points, &scalars[..2]).unwrap_err();
    assert!(matches!(
        err,
        ApiError::LengthMismatch {
            points: 3,
            scalars: 2,
            ..
        }
    ));
}

#[test]
fn test_curves_with_different_configs_agree() {
    let small = Curve::new(
        CurveConfig::default()
            .with_workers(1)
            .with_msm_threshold(10)
            .with_max_bucket_bits(3)
            .with_generator_tables(false),
    )
    .unwrap();
    let large = test_curve();

    let (points, scalars) = g1_instance(40, 40);
    assert_eq!(
        small.multi_exp_sync(&points, &scalars).unwrap(),
        large.multi_exp_sync(&points, &scalars).unwrap()
    );

    let k = scalars[0];
    assert_eq!(small.scalar_mul_by_gen_g2(&k), large.scalar_mul_by_gen_g2(&k));
}

#[test]
fn test_invalid_config_is_rejected() {
    let err = Curve::new(CurveConfig::default().with_points_per_bucket(0)).unwrap_err();
    let api: ApiError = err.into();
    assert!(matches!(api, ApiError::InvalidParameter { .. }));
}

#[test]
fn test_encodings_cross_the_api_boundary() {
    let mut rng = seeded_rng(4);
    let p = G1Projective::random(&mut rng);
    let q = G2Projective::random(&mut rng);

    let p_bytes = p.to_compressed_bytes();
    let q_bytes = q.to_uncompressed_bytes();
    assert_eq!(G1Projective::from_compressed_slice(&p_bytes).unwrap(), p);
    assert_eq!(G2Projective::from_uncompressed_slice(&q_bytes).unwrap(), q);

    let mut tampered = p_bytes.clone();
    tampered[5] ^= 0x40;
    match G1Projective::from_compressed_slice(&tampered) {
        Err(ApiError::InvalidPointEncoding { .. }) => {}
        // A flipped bit can land on another valid x; it must then be a different point
        Ok(other) => assert_ne!(other, p),
        Err(e) => panic!("unexpected error: {}", e),
    }

    let gt = pairing(&G1Affine::from(p), &G2Affine::from(q));
    let bytes = Serialize::to_bytes(&gt);
    assert_eq!(<Gt as Serialize>::from_bytes(&bytes).unwrap(), gt);
}
