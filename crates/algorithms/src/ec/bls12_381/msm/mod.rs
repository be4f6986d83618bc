//! Multi-scalar multiplication.
//!
//! Two strategies, picked by input size:
//! - below the threshold, the pairs are split across the worker pool, each
//!   worker runs the windowed method on its slice and adds its partial sum
//!   into a mutex-protected accumulator;
//! - at or above it, the bucket method runs with one arena slab per worker
//!   and a single-threaded merge after all workers finish.
//!
//! Either way the call returns an [`MsmHandle`] right away.

pub mod bucket;
pub mod handle;
pub mod window;

use std::sync::{Arc, Mutex, PoisonError};

use tracing::{debug, instrument};

pub use handle::MsmHandle;

use self::bucket::BucketPlan;
use super::curve::Curve;
use super::group::CurveGroup;
use super::Scalar;
use crate::error::{validate, Result};

/// Bits `[offset, offset + width)` of a little-endian 256-bit integer.
///
/// Bits past the top read as zero.
pub(crate) fn digit(limbs: &[u64; 4], offset: usize, width: usize) -> usize {
    let limb = offset / 64;
    if limb >= limbs.len() {
        return 0;
    }
    let shift = offset % 64;

    let mut d = limbs[limb] >> shift;
    if shift + width > 64 && limb + 1 < limbs.len() {
        d |= limbs[limb + 1] << (64 - shift);
    }
    (d & ((1u64 << width) - 1)) as usize
}

impl Curve {
    /// Start `Σ scalars[i]·points[i]` on the worker pool.
    ///
    /// Fails immediately with `LengthMismatch` on unequal slices. An empty
    /// input completes with the identity.
    #[instrument(skip_all, fields(points = points.len()))]
    pub fn multi_exp<G: CurveGroup>(
        self: &Arc<Self>,
        points: &[G],
        scalars: &[Scalar],
    ) -> Result<MsmHandle<G>> {
        validate::matching_lengths("Curve::multi_exp", points.len(), scalars.len())?;

        let n = points.len();
        if n == 0 {
            return Ok(MsmHandle::ready(Ok(G::identity())));
        }

        let (tx, handle) = MsmHandle::channel();
        let curve = Arc::clone(self);
        let config = self.config();

        if n < config.msm_threshold {
            debug!(
                strategy = "windowed",
                workers = self.pool.current_num_threads(),
                "multi_exp"
            );
            let points = points.to_vec();
            let scalars = scalars.to_vec();
            self.pool.spawn(move || {
                let _ = tx.send(Ok(curve.multi_exp_windowed(&points, &scalars)));
            });
        } else {
            let plan = BucketPlan::new(n, config.points_per_bucket, config.max_bucket_bits);
            debug!(
                strategy = "bucket",
                bits = plan.bits,
                chunks = plan.chunks,
                workers = self.pool.current_num_threads(),
                "multi_exp"
            );
            let points = points.to_vec();
            let limbs: Vec<[u64; 4]> = scalars.iter().map(Scalar::to_canonical_limbs).collect();
            self.pool.spawn(move || {
                let _ = tx.send(curve.multi_exp_bucket(&plan, &points, &limbs));
            });
        }

        Ok(handle)
    }

    /// `multi_exp(..)?.join()`
    pub fn multi_exp_sync<G: CurveGroup>(
        self: &Arc<Self>,
        points: &[G],
        scalars: &[Scalar],
    ) -> Result<G> {
        self.multi_exp(points, scalars)?.join()
    }

    fn multi_exp_windowed<G: CurveGroup>(&self, points: &[G], scalars: &[Scalar]) -> G {
        let workers = self.pool.current_num_threads().clamp(1, points.len().max(1));
        let per_worker = (points.len() + workers - 1) / workers;
        let acc = Mutex::new(G::identity());

        self.pool.scope(|s| {
            for (p, k) in points.chunks(per_worker.max(1)).zip(scalars.chunks(per_worker.max(1))) {
                let acc = &acc;
                s.spawn(move |_| {
                    let partial = window::multi_exp_windowed(p, k);
                    let mut guard = acc.lock().unwrap_or_else(PoisonError::into_inner);
                    *guard = guard.add(&partial);
                });
            }
        });

        acc.into_inner().unwrap_or_else(PoisonError::into_inner)
    }

    fn multi_exp_bucket<G: CurveGroup>(
        &self,
        plan: &BucketPlan,
        points: &[G],
        limbs: &[[u64; 4]],
    ) -> Result<G> {
        let mut affine = vec![G::Affine::default(); points.len()];
        G::batch_normalize(points, &mut affine)?;
        Ok(bucket::multi_exp_bucket(&self.pool, plan, &affine, limbs))
    }
}
