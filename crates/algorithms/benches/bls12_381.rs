// Benchmarks for the BLS12-381 field tower, group arithmetic, MSM and pairing

use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use rand_chacha::rand_core::SeedableRng;
use rand_chacha::ChaCha20Rng;
use shercrypto_algorithms::ec::bls12_381::field::{Fp, Fp12};
use shercrypto_algorithms::{
    pairing, Curve, CurveConfig, G1Affine, G1Projective, G2Affine, G2Projective, Scalar,
};

fn rng() -> ChaCha20Rng {
    ChaCha20Rng::seed_from_u64(0xbe7c)
}

/// Field multiplication at the bottom and top of the tower
fn bench_field_operations(c: &mut Criterion) {
    let mut group = c.benchmark_group("bls12_381-field");
    let mut rng = rng();

    group.bench_function("fp_mul", |b| {
        b.iter_batched(
            || (Fp::random(&mut rng), Fp::random(&mut rng)),
            |(x, y)| black_box(x * y),
            BatchSize::SmallInput,
        )
    });

    let mut rng = self::rng();
    group.bench_function("fp12_mul", |b| {
        b.iter_batched(
            || (Fp12::random(&mut rng), Fp12::random(&mut rng)),
            |(x, y)| black_box(x * y),
            BatchSize::SmallInput,
        )
    });

    group.finish();
}

/// Point addition and scalar multiplication
fn bench_group_operations(c: &mut Criterion) {
    let mut group = c.benchmark_group("bls12_381-group");
    let mut rng = rng();

    let p1 = G1Projective::random(&mut rng);
    let q1 = G1Projective::random(&mut rng);
    group.bench_function("g1_add", |b| b.iter(|| black_box(p1 + q1)));

    let p2 = G2Projective::random(&mut rng);
    let q2 = G2Projective::random(&mut rng);
    group.bench_function("g2_add", |b| b.iter(|| black_box(p2 + q2)));

    let k = Scalar::random(&mut rng);
    group.bench_function("g1_scalar_mul", |b| b.iter(|| black_box(p1 * k)));
    group.bench_function("g2_scalar_mul", |b| b.iter(|| black_box(p2 * k)));

    let curve = Curve::new(CurveConfig::default()).expect("default curve");
    group.bench_function("g1_scalar_mul_generator_table", |b| {
        b.iter(|| black_box(curve.scalar_mul_by_gen_g1(&k)))
    });

    group.finish();
}

/// Multi-scalar multiplication on both sides of the strategy threshold
fn bench_msm(c: &mut Criterion) {
    let mut group = c.benchmark_group("bls12_381-msm");
    group.sample_size(20);

    let curve = Curve::new(CurveConfig::default()).expect("default curve");
    let mut rng = rng();

    for n in [32usize, 256] {
        let points: Vec<G1Projective> = (0..n).map(|_| G1Projective::random(&mut rng)).collect();
        let scalars: Vec<Scalar> = (0..n).map(|_| Scalar::random(&mut rng)).collect();

        group.bench_with_input(BenchmarkId::new("g1", n), &n, |b, _| {
            b.iter(|| black_box(curve.multi_exp_sync(&points, &scalars).expect("msm")))
        });
    }

    group.finish();
}

/// Full pairing, including the final exponentiation
fn bench_pairing(c: &mut Criterion) {
    let mut group = c.benchmark_group("bls12_381-pairing");
    group.sample_size(20);

    let p = G1Affine::generator();
    let q = G2Affine::generator();
    group.bench_function("pairing", |b| b.iter(|| black_box(pairing(&p, &q))));

    group.finish();
}

criterion_group!(
    benches,
    bench_field_operations,
    bench_group_operations,
    bench_msm,
    bench_pairing
);
criterion_main!(benches);
