//! `pc-topology`: turn raw lane segments into a clean topology.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                 |
//! |---------------|----------------------------------------------------------|
//! | [`intersect`] | `detect_intersections`, orientation + determinant tests  |
//! | [`split`]     | `split_segments` at intersection points                 |
//! | [`snap`]      | `NodeSnapper`, `Snapped`, `NodeMapping`                  |
//!
//! # Feature flags
//!
//! | Flag       | Effect                                                    |
//! |------------|-----------------------------------------------------------|
//! | `parallel` | Pairwise intersection scan on Rayon.                      |
//!
//! All operations are pure functions of their inputs.

pub mod intersect;
pub mod snap;
pub mod split;

#[cfg(test)]
mod tests;

pub use intersect::{
    IntersectionReport, crossing_point, detect_intersections, line_intersection, orientation,
    properly_cross,
};
pub use snap::{NodeMapping, NodeSnapper, Snapped};
pub use split::{split_segment, split_segments};
