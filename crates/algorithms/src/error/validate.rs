//! Validation utilities for the pairing core

use super::{Error, Result};

/// Validate a parameter condition
#[inline(always)]
pub fn parameter(condition: bool, name: &'static str, reason: &'static str) -> Result<()> {
    if !condition {
        return Err(Error::param(name, reason));
    }
    Ok(())
}

/// Validate an encoded length
#[inline(always)]
pub fn length(context: &'static str, actual: usize, expected: usize) -> Result<()> {
    if actual != expected {
        return Err(Error::encoding(context, "wrong encoding length"));
    }
    Ok(())
}

/// Validate a minimum number of inputs
#[inline(always)]
pub fn min_length(context: &'static str, actual: usize, min: usize) -> Result<()> {
    if actual < min {
        return Err(Error::InvalidInputSize {
            context,
            minimum: min,
            actual,
        });
    }
    Ok(())
}

/// Validate that points and scalars pair up
#[inline(always)]
pub fn matching_lengths(context: &'static str, points: usize, scalars: usize) -> Result<()> {
    if points != scalars {
        return Err(Error::LengthMismatch {
            context,
            points,
            scalars,
        });
    }
    Ok(())
}
