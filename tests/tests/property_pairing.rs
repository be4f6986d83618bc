//! Property-based tests for scalar multiplication and the pairing

use proptest::prelude::*;
use shercrypto_algorithms::{pairing, G1Affine, G1Projective, G2Affine, G2Projective, Gt, Scalar};

/// Any scalar, reduced from 64 uniform bytes
fn scalar() -> impl Strategy<Value = Scalar> {
    prop::collection::vec(any::<u8>(), 64).prop_map(|v| {
        let mut wide = [0u8; 64];
        wide.copy_from_slice(&v);
        Scalar::from_bytes_wide(&wide)
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(8))]

    #[test]
    fn scalar_mul_is_linear(a in scalar(), b in scalar()) {
        let g = G1Projective::generator();
        prop_assert_eq!(g * (a + b), g * a + g * b);

        let h = G2Projective::generator();
        prop_assert_eq!(h * (a * b), (h * a) * b);
    }

    #[test]
    fn pairing_is_bilinear(a in scalar(), b in scalar()) {
        let p = G1Affine::from(G1Projective::generator() * a);
        let q = G2Affine::from(G2Projective::generator() * b);
        prop_assert_eq!(pairing(&p, &q), Gt::generator() * (a * b));
    }

    #[test]
    fn compressed_encoding_round_trips(k in scalar()) {
        let p = G1Affine::from(G1Projective::generator() * k);
        prop_assert_eq!(G1Affine::from_compressed(&p.to_compressed()).unwrap(), p);

        let q = G2Affine::from(G2Projective::generator() * k);
        prop_assert_eq!(G2Affine::from_compressed(&q.to_compressed()).unwrap(), q);
    }

    #[test]
    fn scalar_bytes_round_trip(k in scalar()) {
        prop_assert_eq!(Scalar::from_bytes(&k.to_bytes()).unwrap(), k);
    }
}
