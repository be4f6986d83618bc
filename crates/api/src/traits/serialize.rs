//! Traits for byte serialization of curve types.

use crate::Result;

/// A trait for public types that can be serialized to and from bytes.
pub trait Serialize: Sized {
    /// Creates an object from a byte slice.
    fn from_bytes(bytes: &[u8]) -> Result<Self>;
    /// Converts the object to a byte vector.
    fn to_bytes(&self) -> Vec<u8>;
}

/// Canonical point encoding, compressed and uncompressed.
///
/// Decoding validates the flag bits, the coordinates, the curve equation and
/// subgroup membership; any failure is `Error::InvalidPointEncoding`.
pub trait PointEncoding: Sized {
    /// Length of the compressed encoding in bytes
    const COMPRESSED_SIZE: usize;
    /// Length of the uncompressed encoding in bytes
    const UNCOMPRESSED_SIZE: usize;

    /// Encode the x coordinate and the sign of y.
    fn to_compressed_bytes(&self) -> Vec<u8>;

    /// Encode both affine coordinates.
    fn to_uncompressed_bytes(&self) -> Vec<u8>;

    /// Decode a compressed point.
    fn from_compressed_slice(bytes: &[u8]) -> Result<Self>;

    /// Decode an uncompressed point.
    fn from_uncompressed_slice(bytes: &[u8]) -> Result<Self>;
}
