//! `pc-io`: getting lane records in and networks/routes out.
//!
//! | Module      | Contents                                                  |
//! |-------------|-----------------------------------------------------------|
//! | [`loader`]  | `load_records_csv`, `load_records_reader`                 |
//! | [`export`]  | `export_network_csv` (`nodes.csv`, `edges.csv`)           |
//! | [`json`]    | `route_to_json`, `stats_to_json`                          |
//! | [`error`]   | `DataError`, `DataResult`                                 |

pub mod error;
pub mod export;
pub mod json;
pub mod loader;

#[cfg(test)]
mod tests;

pub use error::{DataError, DataResult};
pub use export::export_network_csv;
pub use json::{route_to_json, stats_to_json};
pub use loader::{load_records_csv, load_records_reader};
