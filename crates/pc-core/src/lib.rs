//! `pc-core`: foundational types for the `pathcycle` bike-lane router.
//!
//! This crate is a dependency of every other `pc-*` crate.  It intentionally
//! has no `pc-*` dependencies and minimal external ones (only `thiserror`,
//! plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`geo`]         | `Coordinate`, haversine distance                      |
//! | [`ids`]         | `NodeId` (textual), `NodeIx`, `EdgeIx` (dense)        |
//! | [`segment`]     | `Segment`, `LaneRecord`, record filtering             |
//! | [`config`]      | `BuildConfig`, `SnapOrder`, `SnapMode`                |
//! | [`error`]       | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod error;
pub mod geo;
pub mod ids;
pub mod segment;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{BuildConfig, SnapMode, SnapOrder};
pub use error::{CoreError, CoreResult};
pub use geo::{Coordinate, EARTH_RADIUS_M};
pub use ids::{EdgeIx, NodeId, NodeIx};
pub use segment::{LaneRecord, Segment, segments_from_records};
