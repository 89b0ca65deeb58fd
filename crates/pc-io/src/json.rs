//! JSON rendering of route outcomes and network statistics.
//!
//! A found route renders as
//!
//! ```json
//! {
//!   "status": "found",
//!   "start_node": "-77.05,-12.05",
//!   "end_node": "-77.03,-12.05",
//!   "distance_m": 2241.6,
//!   "path_nodes": ["-77.05,-12.05", "-77.04,-12.04", "-77.03,-12.05"],
//!   "path_coords": [{"lon": -77.05, "lat": -12.05}, …]
//! }
//! ```
//!
//! and a disconnected query as `{"status": "no_path", "start_node": …,
//! "end_node": …}`.

use pc_spatial::{NetworkStats, RouteOutcome};

use crate::DataResult;

pub fn route_to_json(outcome: &RouteOutcome) -> DataResult<String> {
    Ok(serde_json::to_string_pretty(outcome)?)
}

pub fn stats_to_json(stats: &NetworkStats) -> DataResult<String> {
    Ok(serde_json::to_string_pretty(stats)?)
}
