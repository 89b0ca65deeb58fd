//! Snapshot cache for built networks.
//!
//! The topology pipeline itself is stateless.  `NetworkCache` sits above it
//! and keeps the most recent build, keyed by a content hash of the record set
//! and the build configuration.  Readers share the cached network through an
//! `Arc`; a changed key triggers a rebuild under the write lock
//! (single writer, many readers).

use std::hash::{Hash, Hasher};
use std::sync::{Arc, PoisonError, RwLock};

use log::debug;
use rustc_hash::FxHasher;

use pc_core::{BuildConfig, Coordinate, LaneRecord};

use crate::build::build_from_records;
use crate::network::BikeNetwork;
use crate::SpatialResult;

struct Entry {
    key: u64,
    network: Arc<BikeNetwork>,
}

/// Most-recent-snapshot cache.  `Send + Sync`; share it by reference or
/// `Arc`.
#[derive(Default)]
pub struct NetworkCache {
    slot: RwLock<Option<Entry>>,
}

impl NetworkCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The routing network for `records` under `config`, building it with
    /// [`build_from_records`] if the cached snapshot has a different key.
    pub fn get_or_build(&self, records: &[LaneRecord], config: &BuildConfig) -> SpatialResult<Arc<BikeNetwork>> {
        let key = snapshot_key(records, config);

        {
            let slot = self.slot.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(entry) = slot.as_ref().filter(|e| e.key == key) {
                return Ok(Arc::clone(&entry.network));
            }
        }

        let mut slot = self.slot.write().unwrap_or_else(PoisonError::into_inner);
        // Another writer may have built the same snapshot while we waited.
        if let Some(entry) = slot.as_ref().filter(|e| e.key == key) {
            return Ok(Arc::clone(&entry.network));
        }

        debug!("network cache miss (key {key:016x}); rebuilding");
        let network = Arc::new(build_from_records(records, config)?.network);
        *slot = Some(Entry { key, network: Arc::clone(&network) });
        Ok(network)
    }

    /// Drop the cached snapshot.
    pub fn invalidate(&self) {
        *self.slot.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    /// Key of the cached snapshot, if any.
    pub fn cached_key(&self) -> Option<u64> {
        self.slot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(|e| e.key)
    }
}

/// Content hash of a record set and build configuration.
///
/// Order-sensitive, since greedy snapping is.  Record ids are ignored: they do
/// not influence the graph.
pub fn snapshot_key(records: &[LaneRecord], config: &BuildConfig) -> u64 {
    let mut h = FxHasher::default();
    records.len().hash(&mut h);
    for r in records {
        hash_coord(r.start, &mut h);
        hash_coord(r.end, &mut h);
    }
    config.snap_threshold_m.to_bits().hash(&mut h);
    config.colinear_tolerance_m.to_bits().hash(&mut h);
    config.parallel_epsilon.to_bits().hash(&mut h);
    (config.snap_order as u8).hash(&mut h);
    (config.snap_mode as u8).hash(&mut h);
    h.finish()
}

fn hash_coord(c: Option<Coordinate>, h: &mut FxHasher) {
    match c {
        Some(c) => {
            1u8.hash(h);
            c.lon.to_bits().hash(h);
            c.lat.to_bits().hash(h);
        }
        None => 0u8.hash(h),
    }
}
