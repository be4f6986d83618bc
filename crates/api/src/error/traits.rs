//! Context helpers for results crossing into the public error type

use super::types::{Error, Result};

/// Converts a foreign error into [`Error`] while relabelling it
pub trait ResultExt<T, E>: Sized {
    /// Convert the error and replace its context with the caller's name
    fn with_context(self, context: &'static str) -> Result<T>
    where
        E: Into<Error>;

    /// Convert the error and attach a free-form message where the variant
    /// carries one
    fn with_message(self, message: impl Into<String>) -> Result<T>
    where
        E: Into<Error>;
}

impl<T, E> ResultExt<T, E> for core::result::Result<T, E> {
    fn with_context(self, context: &'static str) -> Result<T>
    where
        E: Into<Error>,
    {
        self.map_err(|e| e.into().with_context(context))
    }

    fn with_message(self, message: impl Into<String>) -> Result<T>
    where
        E: Into<Error>,
    {
        self.map_err(|e| e.into().with_message(message))
    }
}
