//! Defaults for multi-scalar multiplication

/// Window width of the single-scalar (Bootle-Pippenger) method
pub const MSM_WINDOW_BITS: usize = 4;

/// Number of precomputed multiples per point: 1·P ..= (2^s - 1)·P
pub const MSM_WINDOW_TABLE_SIZE: usize = (1 << MSM_WINDOW_BITS) - 1;

/// Inputs at or above this size use the parallel bucket method
pub const MSM_BUCKET_THRESHOLD: usize = 50;

/// Average number of points the bucket width heuristic aims for per bucket
pub const MSM_POINTS_PER_BUCKET: usize = 20;

/// Upper bound on the bucket width
pub const MSM_MAX_BUCKET_BITS: u32 = 12;

/// Worker count meaning "use the available parallelism"
pub const MSM_WORKERS_AUTO: usize = 0;
