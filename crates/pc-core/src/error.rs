//! Core error type.
//!
//! Sub-crates define their own error enums and wrap `CoreError` as one
//! variant via `#[from]`.

use thiserror::Error;

/// Errors produced by `pc-core` validation.
#[derive(Debug, Error, PartialEq)]
pub enum CoreError {
    #[error("invalid coordinate (lon {lon}, lat {lat})")]
    InvalidCoordinate { lon: f64, lat: f64 },

    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for `pc-core`.
pub type CoreResult<T> = Result<T, CoreError>;
