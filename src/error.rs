//! Error types for the splat_grid crate
//!
//! This module defines the error types surfaced by grid construction and
//! the primitive lifecycle operations.

use std::fmt;

/// Result type for splat_grid operations
pub type Result<T> = std::result::Result<T, Error>;

/// Splat grid errors
#[derive(Debug, Clone)]
pub enum Error {
    /// Invalid construction input (empty primitive set, mismatched
    /// attribute lengths, or non-positive minimum cell size)
    InvalidConstruction(String),

    /// Operation on a primitive handle that was never assigned
    UnknownHandle(usize),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidConstruction(msg) => write!(f, "Invalid construction input: {}", msg),
            Error::UnknownHandle(index) => write!(f, "Unknown primitive handle: {}", index),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
