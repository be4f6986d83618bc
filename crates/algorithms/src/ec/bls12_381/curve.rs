//! Curve-wide configuration and shared precomputation.
//!
//! A [`Curve`] is built once from a [`CurveConfig`], is immutable afterwards,
//! and is shared through `Arc<Curve>`. It owns the MSM worker pool and the
//! generator tables used by fixed-base multiplication.

use std::sync::Arc;

use rayon::{ThreadPool, ThreadPoolBuilder};
use shercrypto_params::msm::{
    MSM_BUCKET_THRESHOLD, MSM_MAX_BUCKET_BITS, MSM_POINTS_PER_BUCKET, MSM_WORKERS_AUTO,
};
use tracing::{debug, warn};

use super::group::CurveGroup;
use super::msm::window::{self, FixedBaseTable};
use super::{G1Projective, G2Projective, Scalar};
use crate::error::{validate, Error, Result};

/// Largest accepted bucket width; 2^16 buckets per chunk per worker is
/// already far past the point of diminishing returns.
const BUCKET_BITS_LIMIT: u32 = 16;

/// Tuning knobs for a [`Curve`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CurveConfig {
    /// Worker pool size; `0` uses the available parallelism
    pub workers: usize,
    /// Inputs below this size use the windowed MSM, the rest the bucket MSM
    pub msm_threshold: usize,
    /// Target average number of points per bucket
    pub points_per_bucket: usize,
    /// Upper bound on the bucket width in bits
    pub max_bucket_bits: u32,
    /// Build per-window tables for the two generators
    pub generator_tables: bool,
}

impl Default for CurveConfig {
    fn default() -> Self {
        CurveConfig {
            workers: MSM_WORKERS_AUTO,
            msm_threshold: MSM_BUCKET_THRESHOLD,
            points_per_bucket: MSM_POINTS_PER_BUCKET,
            max_bucket_bits: MSM_MAX_BUCKET_BITS,
            generator_tables: true,
        }
    }
}

impl CurveConfig {
    /// Set the worker pool size
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Set the windowed/bucket threshold
    pub fn with_msm_threshold(mut self, threshold: usize) -> Self {
        self.msm_threshold = threshold;
        self
    }

    /// Set the points-per-bucket heuristic
    pub fn with_points_per_bucket(mut self, points: usize) -> Self {
        self.points_per_bucket = points;
        self
    }

    /// Set the bucket width cap
    pub fn with_max_bucket_bits(mut self, bits: u32) -> Self {
        self.max_bucket_bits = bits;
        self
    }

    /// Enable or disable the generator tables
    pub fn with_generator_tables(mut self, enabled: bool) -> Self {
        self.generator_tables = enabled;
        self
    }

    /// Check the values for consistency.
    pub fn validate(&self) -> Result<()> {
        validate::parameter(self.msm_threshold >= 1, "msm_threshold", "must be at least 1")?;
        validate::parameter(
            self.points_per_bucket >= 1,
            "points_per_bucket",
            "must be at least 1",
        )?;
        validate::parameter(
            (1..=BUCKET_BITS_LIMIT).contains(&self.max_bucket_bits),
            "max_bucket_bits",
            "must be between 1 and 16",
        )?;
        Ok(())
    }
}

/// BLS12-381 parameters plus the shared MSM machinery.
pub struct Curve {
    config: CurveConfig,
    pub(crate) pool: ThreadPool,
    g1_table: Option<FixedBaseTable<G1Projective>>,
    g2_table: Option<FixedBaseTable<G2Projective>>,
}

impl core::fmt::Debug for Curve {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Curve")
            .field("config", &self.config)
            .field("workers", &self.pool.current_num_threads())
            .finish_non_exhaustive()
    }
}

impl Curve {
    /// Validate `config`, start the worker pool and build the generator tables.
    pub fn new(config: CurveConfig) -> Result<Arc<Curve>> {
        config.validate()?;

        let mut builder = ThreadPoolBuilder::new()
            .thread_name(|i| format!("shercrypto-msm-{}", i))
            .panic_handler(|_| warn!("msm worker panicked"));
        if config.workers != MSM_WORKERS_AUTO {
            builder = builder.num_threads(config.workers);
        }
        let pool = builder.build().map_err(|_| Error::Processing {
            operation: "Curve::new",
            details: "failed to build the worker pool",
        })?;
        debug!(workers = pool.current_num_threads(), "msm worker pool ready");

        let (g1_table, g2_table) = if config.generator_tables {
            let g1 = FixedBaseTable::new(&G1Projective::generator())?;
            let g2 = FixedBaseTable::new(&G2Projective::generator())?;
            debug!(windows = window::WINDOWS, "generator tables built");
            (Some(g1), Some(g2))
        } else {
            (None, None)
        };

        Ok(Arc::new(Curve {
            config,
            pool,
            g1_table,
            g2_table,
        }))
    }

    /// [`Curve::new`] with the default configuration.
    pub fn default_shared() -> Result<Arc<Curve>> {
        Curve::new(CurveConfig::default())
    }

    /// The configuration this curve was built with
    pub fn config(&self) -> &CurveConfig {
        &self.config
    }

    /// Number of MSM worker threads
    pub fn workers(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// `k·g1`
    pub fn scalar_mul_by_gen_g1(&self, k: &Scalar) -> G1Projective {
        match &self.g1_table {
            Some(table) => table.mul(k),
            None => window::mul(&G1Projective::generator(), k),
        }
    }

    /// `k·g2`
    pub fn scalar_mul_by_gen_g2(&self, k: &Scalar) -> G2Projective {
        match &self.g2_table {
            Some(table) => table.mul(k),
            None => window::mul(&G2Projective::generator(), k),
        }
    }

    /// `k·p` through the windowed method.
    pub fn scalar_mul<G: CurveGroup>(&self, p: &G, k: &Scalar) -> G {
        window::mul(p, k)
    }
}
