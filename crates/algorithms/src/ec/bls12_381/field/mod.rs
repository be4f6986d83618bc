//! The BLS12-381 field tower: Fp, Fp2 = Fp[u], Fp6 = Fp2[v], Fp12 = Fp6[w]

pub(crate) mod arith;

pub mod fp; // Base field
pub mod fp2; // Quadratic extension
pub mod fp6; // Degree-6 extension
pub mod fp12; // Degree-12 extension (target field)

pub use fp::Fp;
pub use fp12::Fp12;
pub use fp2::Fp2;
pub use fp6::Fp6;
