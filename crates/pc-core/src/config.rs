//! Network build parameters.
//!
//! Typically left at [`BuildConfig::default`]; the demo binary can also load
//! it from a TOML file (requires the `serde` feature).

use crate::{CoreError, CoreResult};

/// Order in which the node snapper visits input coordinates.
///
/// Greedy snapping is order-dependent, so the order is part of the
/// configuration rather than an accident of container iteration.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SnapOrder {
    /// Order of first appearance in the segment list (start before end).
    #[default]
    FirstSeen,
    /// Sorted by longitude, then latitude.
    Lexicographic,
}

/// Clustering rule used by the node snapper.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SnapMode {
    /// Single pass; each coordinate joins the first existing representative
    /// closer than the threshold, otherwise it becomes a representative.
    #[default]
    Greedy,
    /// Transitive closure: any two coordinates closer than the threshold end
    /// up in the same node.  The representative is the earliest member in
    /// snap order.
    UnionFind,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BuildConfig {
    /// Coordinates closer than this (metres) are merged into one node.
    /// Default: 3.0.
    pub snap_threshold_m: f64,

    /// An intersection point cuts a segment when
    /// `|d(p1, x) + d(x, p2) − d(p1, p2)|` is below this (metres).
    /// Default: 2.0.
    pub colinear_tolerance_m: f64,

    /// Determinant magnitude below which two lines count as parallel.
    /// Default: 1e-12.
    pub parallel_epsilon: f64,

    pub snap_order: SnapOrder,

    pub snap_mode: SnapMode,
}

impl BuildConfig {
    pub const DEFAULT_SNAP_THRESHOLD_M: f64 = 3.0;
    pub const DEFAULT_COLINEAR_TOLERANCE_M: f64 = 2.0;
    pub const DEFAULT_PARALLEL_EPSILON: f64 = 1e-12;

    /// Reject thresholds that are negative, NaN, or infinite.
    pub fn validate(&self) -> CoreResult<()> {
        let fields = [
            ("snap_threshold_m", self.snap_threshold_m),
            ("colinear_tolerance_m", self.colinear_tolerance_m),
            ("parallel_epsilon", self.parallel_epsilon),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(CoreError::Config(format!(
                    "{name} must be a finite non-negative number, got {value}"
                )));
            }
        }
        Ok(())
    }
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            snap_threshold_m:     Self::DEFAULT_SNAP_THRESHOLD_M,
            colinear_tolerance_m: Self::DEFAULT_COLINEAR_TOLERANCE_M,
            parallel_epsilon:     Self::DEFAULT_PARALLEL_EPSILON,
            snap_order:           SnapOrder::default(),
            snap_mode:            SnapMode::default(),
        }
    }
}
