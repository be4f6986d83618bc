//! Constants for the BLS12-381 pairing-friendly curve

/// Size of a base field element in bytes (big-endian)
pub const BLS12_381_FP_SIZE: usize = 48;

/// Size of a scalar field element in bytes (little-endian)
pub const BLS12_381_SCALAR_SIZE: usize = 32;

/// Size of a compressed G1 point in bytes
pub const BLS12_381_G1_COMPRESSED_SIZE: usize = 48;

/// Size of an uncompressed G1 point in bytes
pub const BLS12_381_G1_UNCOMPRESSED_SIZE: usize = 96;

/// Size of a compressed G2 point in bytes
pub const BLS12_381_G2_COMPRESSED_SIZE: usize = 96;

/// Size of an uncompressed G2 point in bytes
pub const BLS12_381_G2_UNCOMPRESSED_SIZE: usize = 192;

/// Size of a target group element (twelve base field elements)
pub const BLS12_381_GT_SIZE: usize = 576;

/// Absolute value of the curve seed x (the seed itself is negative)
pub const BLS12_381_SEED: u64 = 0xd201_0000_0001_0000;

/// Sign of the curve seed
pub const BLS12_381_SEED_IS_NEGATIVE: bool = true;

/// Bit length of the scalar field modulus r
pub const BLS12_381_SCALAR_BITS: u32 = 255;

/// Bit length used when slicing scalars into digits
pub const BLS12_381_SCALAR_DIGIT_BITS: usize = 256;
