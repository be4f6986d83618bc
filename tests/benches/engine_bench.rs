// Protocol-level costs through the PairingEngine facade

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use shercrypto_algorithms::{G1Affine, G1Projective, G2Affine, Scalar};
use shercrypto_api::PairingEngine;
use shercrypto_tests::{g1_instance, seeded_rng, test_curve};

fn bench_engine(c: &mut Criterion) {
    let engine = shercrypto_algorithms::Bls12::new(test_curve());
    let mut rng = seeded_rng(9);
    let mut group = c.benchmark_group("engine");
    group.sample_size(20);

    let (k, _) = engine.random_g1(&mut rng);
    group.bench_function("g1_scalar_base_mult", |b| {
        b.iter(|| black_box(engine.g1_scalar_base_mult(&k)))
    });
    group.bench_function("g2_scalar_base_mult", |b| {
        b.iter(|| black_box(engine.g2_scalar_base_mult(&k)))
    });

    let (points, scalars) = g1_instance(128, 10);
    group.bench_function("multi_exp_g1_128", |b| {
        b.iter(|| black_box(engine.multi_exp_g1(&points, &scalars).expect("msm")))
    });

    // Two-pairing check as done by signature verification
    let sig = G1Affine::from(G1Projective::generator() * Scalar::from(5u64));
    let h = G1Affine::from(-(G1Projective::generator() * Scalar::from(5u64)));
    let g2 = G2Affine::generator();
    group.bench_function("pairing_product_2", |b| {
        b.iter(|| {
            black_box(
                shercrypto_algorithms::pairing_product(&[(sig, g2), (h, g2)]).expect("pairs"),
            )
        })
    });

    group.finish();
}

criterion_group!(benches, bench_engine);
criterion_main!(benches);
