//! BLS12-381 test suite
//!
//! One module per layer; every randomized test seeds its own ChaCha20 RNG.

mod groups;
mod msm;
mod pairings;
