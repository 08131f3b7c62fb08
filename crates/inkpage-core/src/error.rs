//! Error types shared across the core.

use thiserror::Error;

/// A request that does not fit the current gesture or stroke state.
///
/// Touch hardware delivers racy event streams, so these are logged and
/// treated as no-ops rather than propagated as failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidState {
    #[error("no stroke in progress")]
    NoCurrentStroke,
    #[error("no previous pinch distance to compare against")]
    NoDistanceSample,
}

/// The base image could not be turned into pixels.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("Invalid image encoding: {0}")]
    Encoding(String),
    #[error("Unsupported image format: {0}")]
    Format(String),
    #[error("Image decode failed: {0}")]
    Decode(String),
}
