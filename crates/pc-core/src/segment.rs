//! Lane segments and the raw records they come from.

use crate::Coordinate;

/// One bike-lane stretch, or a sub-division of one.
///
/// Stored as `start → end` but semantically unordered: the graph built from
/// segments is undirected.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Segment {
    pub start: Coordinate,
    pub end: Coordinate,
}

impl Segment {
    #[inline]
    pub fn new(start: Coordinate, end: Coordinate) -> Self {
        Self { start, end }
    }

    /// Great-circle length in metres.
    pub fn length_m(&self) -> f64 {
        self.start.distance_m(self.end)
    }

    pub fn reversed(&self) -> Self {
        Self { start: self.end, end: self.start }
    }

    #[inline]
    pub fn endpoints(&self) -> [Coordinate; 2] {
        [self.start, self.end]
    }
}

/// A lane stretch as it arrives from the record store.  Either endpoint may be
/// unset; such records never reach the topology pipeline.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LaneRecord {
    /// Upstream identifier, carried for diagnostics only.
    pub id: Option<String>,
    pub start: Option<Coordinate>,
    pub end: Option<Coordinate>,
}

impl LaneRecord {
    pub fn new(start: Coordinate, end: Coordinate) -> Self {
        Self { id: None, start: Some(start), end: Some(end) }
    }

    /// The record as a [`Segment`], or `None` if either endpoint is missing.
    pub fn to_segment(&self) -> Option<Segment> {
        Some(Segment::new(self.start?, self.end?))
    }
}

/// Keep only fully specified records, preserving input order.
///
/// Returns the segments and the number of records dropped.
pub fn segments_from_records(records: &[LaneRecord]) -> (Vec<Segment>, usize) {
    let segments: Vec<Segment> = records.iter().filter_map(LaneRecord::to_segment).collect();
    let dropped = records.len() - segments.len();
    (segments, dropped)
}
