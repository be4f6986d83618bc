//! Constant values for shercrypto operations
//!
//! Encoding sizes and curve parameters shared by the algorithm crate and by
//! protocols built on top of it, plus the tuning defaults of the
//! multi-scalar multiplication engine.

#![no_std]

pub mod msm;
pub mod pairing;
