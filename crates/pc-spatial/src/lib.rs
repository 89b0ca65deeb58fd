//! `pc-spatial`: bike-lane graph, nearest-node lookup, and routing.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                    |
//! |--------------|-------------------------------------------------------------|
//! | [`network`]  | `BikeNetwork` (CSR), `NetworkBuilder`                       |
//! | [`build`]    | `build_network`, `build_route_network`, `BuildOutput`       |
//! | [`router`]   | `Router` trait, `Path`, `DijkstraRouter`                    |
//! | [`query`]    | `RouteQuery`, `RouteOutcome`, `route`, `route_records`      |
//! | [`stats`]    | `NetworkStats`                                              |
//! | [`cache`]    | `NetworkCache` keyed by record-set content hash             |
//! | [`error`]    | `SpatialError`, `SpatialResult<T>`                          |
//!
//! # Feature flags
//!
//! | Flag       | Effect                                                     |
//! |------------|------------------------------------------------------------|
//! | `serde`    | Derives `Serialize`/`Deserialize` on public types.         |
//! | `parallel` | Rayon intersection scan (forwards to `pc-topology`).       |

pub mod build;
pub mod cache;
pub mod error;
pub mod network;
pub mod query;
pub mod router;
pub mod stats;


pub use build::{BuildOutput, build_from_records, build_network, build_route_network};
pub use cache::NetworkCache;
pub use error::{SpatialError, SpatialResult};
pub use network::{BikeNetwork, NetworkBuilder};
pub use query::{RouteOutcome, RouteQuery, RouteResult, route, route_records};
pub use router::{DijkstraRouter, Path, Router};
pub use stats::NetworkStats;
