//! Geographic coordinate type and the distance metric.
//!
//! `Coordinate` uses `f64` longitude/latitude.  Raw lane records arrive with
//! full double precision and node identifiers are derived from the exact
//! textual form of these values, so single precision would merge points the
//! input distinguishes.

use std::fmt;

use crate::{CoreError, CoreResult};

/// Mean Earth radius in metres used by [`Coordinate::distance_m`].
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// A geographic coordinate in decimal degrees, ordered `(lon, lat)`.
///
/// Equality is exact.  Tolerance-based comparisons only happen where a
/// threshold is passed explicitly (snapping, colinearity).
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coordinate {
    pub lon: f64,
    pub lat: f64,
}

impl Coordinate {
    #[inline]
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    /// Checked constructor: rejects non-finite values and values outside
    /// `[-180, 180] × [-90, 90]`.
    pub fn try_new(lon: f64, lat: f64) -> CoreResult<Self> {
        let c = Self { lon, lat };
        if c.is_valid() {
            Ok(c)
        } else {
            Err(CoreError::InvalidCoordinate { lon, lat })
        }
    }

    /// `true` if both components are finite and within geographic range.
    pub fn is_valid(self) -> bool {
        self.lon.is_finite()
            && self.lat.is_finite()
            && self.lon.abs() <= 180.0
            && self.lat.abs() <= 90.0
    }

    /// Haversine great-circle distance in metres on a sphere of radius
    /// [`EARTH_RADIUS_M`].
    ///
    /// Symmetric, and exactly `0.0` for identical coordinates.  Behaviour for
    /// non-finite input is unspecified; validate with [`try_new`](Self::try_new)
    /// first.
    pub fn distance_m(self, other: Coordinate) -> f64 {
        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();
        let d_lat = lat2 - lat1;
        let d_lon = (other.lon - self.lon).to_radians();

        let a = (d_lat * 0.5).sin().powi(2)
            + lat1.cos() * lat2.cos() * (d_lon * 0.5).sin().powi(2);

        // Rounding can push `a` a hair above 1 for antipodal points.
        2.0 * EARTH_RADIUS_M * a.sqrt().min(1.0).asin()
    }

    /// `(x, y)` view used by the planar orientation and determinant tests.
    #[inline]
    pub fn xy(self) -> [f64; 2] {
        [self.lon, self.lat]
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lon, self.lat)
    }
}
