//! Spatial-subsystem error type.
//!
//! "No connected path" is deliberately absent: it is a normal
//! [`RouteOutcome`](crate::RouteOutcome), not a failure.

use thiserror::Error;

use pc_core::{CoreError, NodeIx};

/// Errors produced by `pc-spatial`.
#[derive(Debug, Error)]
pub enum SpatialError {
    #[error("network has no nodes; at least one complete lane segment is required")]
    EmptyNetwork,

    #[error("{0} is outside the network")]
    NodeNotFound(NodeIx),

    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type SpatialResult<T> = Result<T, SpatialError>;
