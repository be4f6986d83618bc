//! Parallel bucket method for large inputs.
//!
//! Scalars are cut into chunks of `bits` bits. Each worker owns a slab of the
//! bucket arena and sorts its share of the points into `2^bits - 1` buckets
//! per chunk. Once every worker is done the slabs are merged index by index,
//! each chunk is reduced with a running sum, and the chunk results are
//! combined from the most significant chunk down.

use rayon::ThreadPool;
use shercrypto_params::pairing::bls12_381::BLS12_381_SCALAR_DIGIT_BITS;
use tracing::trace;

use super::digit;
use crate::ec::bls12_381::group::CurveGroup;

/// Bucket width and the shape it implies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BucketPlan {
    /// Bits per chunk
    pub bits: u32,
    /// Number of chunks covering a scalar
    pub chunks: usize,
    /// Buckets per chunk, `2^bits - 1`
    pub buckets: usize,
}

impl BucketPlan {
    /// Grow the width while every bucket would still see about
    /// `points_per_bucket` points, capped at `max_bits`.
    pub fn new(n: usize, points_per_bucket: usize, max_bits: u32) -> Self {
        let mut bits = 0u32;
        while bits < max_bits && (n >> bits) >= points_per_bucket {
            bits += 1;
        }
        let bits = bits.max(1);
        let width = bits as usize;

        BucketPlan {
            bits,
            chunks: (BLS12_381_SCALAR_DIGIT_BITS + width - 1) / width,
            buckets: (1 << width) - 1,
        }
    }

    fn stride(&self) -> usize {
        self.chunks * self.buckets
    }
}

/// `Σ limbs[i]·points[i]` using every thread of `pool`.
///
/// `limbs` are canonical scalar limbs, one entry per point.
pub fn multi_exp_bucket<G: CurveGroup>(
    pool: &ThreadPool,
    plan: &BucketPlan,
    points: &[G::Affine],
    limbs: &[[u64; 4]],
) -> G {
    let n = points.len().min(limbs.len());
    if n == 0 {
        return G::identity();
    }

    let workers = pool.current_num_threads().clamp(1, n);
    let per_worker = (n + workers - 1) / workers;
    let stride = plan.stride();

    // Layout: worker × chunk × bucket
    let mut arena = vec![G::identity(); workers * stride];

    pool.scope(|s| {
        for (w, slab) in arena.chunks_mut(stride).enumerate() {
            let start = (w * per_worker).min(n);
            let end = (start + per_worker).min(n);
            let points = &points[start..end];
            let limbs = &limbs[start..end];
            s.spawn(move |_| fill_buckets(plan, slab, points, limbs));
        }
    });

    // Every slab is complete once the scope returns
    let mut res = G::identity();
    for c in (0..plan.chunks).rev() {
        for _ in 0..plan.bits {
            res = res.double();
        }
        res = res.add(&reduce_chunk(plan, &arena, workers, c));
    }
    res
}

fn fill_buckets<G: CurveGroup>(
    plan: &BucketPlan,
    slab: &mut [G],
    points: &[G::Affine],
    limbs: &[[u64; 4]],
) {
    let width = plan.bits as usize;
    for (p, k) in points.iter().zip(limbs) {
        for c in 0..plan.chunks {
            let d = digit(k, c * width, width);
            if d != 0 {
                let bucket = &mut slab[c * plan.buckets + d - 1];
                *bucket = bucket.add_mixed(p);
            }
        }
    }
}

// Merge the workers' buckets for chunk `c`, then Σ d·bucket[d] as a running sum.
fn reduce_chunk<G: CurveGroup>(plan: &BucketPlan, arena: &[G], workers: usize, c: usize) -> G {
    let stride = plan.stride();
    let base = c * plan.buckets;

    let mut running = G::identity();
    let mut acc = G::identity();
    for b in (0..plan.buckets).rev() {
        let merged = (0..workers).fold(G::identity(), |m, w| m.add(&arena[w * stride + base + b]));
        running = running.add(&merged);
        acc = acc.add(&running);
    }

    trace!(chunk = c, buckets = plan.buckets, "reduced bucket chunk");
    acc
}
