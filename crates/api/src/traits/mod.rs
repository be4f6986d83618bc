//! Traits consumed by protocols built on the pairing core

pub mod pairing;
pub mod serialize;

pub use pairing::PairingEngine;
pub use serialize::{PointEncoding, Serialize};
