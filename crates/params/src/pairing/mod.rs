//! Constants for pairing-friendly curves

pub mod bls12_381;
