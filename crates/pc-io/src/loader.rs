//! CSV lane-record loader.
//!
//! # CSV format
//!
//! One row per lane stretch.  The `id` column is optional; coordinate cells
//! may be empty.
//!
//! ```csv
//! id,lon_start,lat_start,lon_end,lat_end
//! av-arequipa-1,-77.0365,-12.0897,-77.0341,-12.0810
//! av-arequipa-2,-77.0341,-12.0810,,
//! ```
//!
//! An endpoint is present only when both its `lon` and `lat` cells are
//! filled.  Rows with a missing endpoint are kept as records (the pipeline
//! drops them); rows whose filled values are non-finite or outside
//! geographic range are rejected with [`DataError::InvalidRecord`].

use std::io::Read;
use std::path::Path;

use log::debug;
use serde::Deserialize;

use pc_core::{Coordinate, LaneRecord};

use crate::{DataError, DataResult};

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct LaneRow {
    #[serde(default)]
    id:        Option<String>,
    lon_start: Option<f64>,
    lat_start: Option<f64>,
    lon_end:   Option<f64>,
    lat_end:   Option<f64>,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load lane records from a CSV file.
pub fn load_records_csv(path: &Path) -> DataResult<Vec<LaneRecord>> {
    let file = std::fs::File::open(path)?;
    load_records_reader(file)
}

/// Like [`load_records_csv`] but accepts any `Read` source.
pub fn load_records_reader<R: Read>(reader: R) -> DataResult<Vec<LaneRecord>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut records = Vec::new();

    for (i, result) in csv_reader.deserialize::<LaneRow>().enumerate() {
        let row = result?;
        // Row 1 is the header.
        let line = i + 2;
        records.push(LaneRecord {
            id:    row.id.filter(|s| !s.is_empty()),
            start: endpoint(row.lon_start, row.lat_start, line)?,
            end:   endpoint(row.lon_end, row.lat_end, line)?,
        });
    }

    debug!("loaded {} lane records", records.len());
    Ok(records)
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn endpoint(lon: Option<f64>, lat: Option<f64>, row: usize) -> DataResult<Option<Coordinate>> {
    match (lon, lat) {
        (Some(lon), Some(lat)) => Coordinate::try_new(lon, lat)
            .map(Some)
            .map_err(|source| DataError::InvalidRecord { row, source }),
        _ => Ok(None),
    }
}
