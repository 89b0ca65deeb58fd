//! Unit tests for pc-core primitives.

#[cfg(test)]
mod geo {
    use crate::{Coordinate, CoreError};

    #[test]
    fn zero_distance() {
        let p = Coordinate::new(-77.0428, -12.0464);
        assert_eq!(p.distance_m(p), 0.0);
    }

    #[test]
    fn symmetric() {
        let pairs = [
            (Coordinate::new(-77.03, -12.05), Coordinate::new(-77.01, -12.11)),
            (Coordinate::new(0.0, 0.0), Coordinate::new(10.0, 10.0)),
            (Coordinate::new(179.9, 45.0), Coordinate::new(-179.9, 45.1)),
        ];
        for (a, b) in pairs {
            assert_eq!(a.distance_m(b), b.distance_m(a), "{a} vs {b}");
        }
    }

    #[test]
    fn one_degree_of_latitude() {
        // ~1 degree of latitude ≈ 111.19 km on a 6371 km sphere
        let a = Coordinate::new(-77.0, -12.0);
        let b = Coordinate::new(-77.0, -11.0);
        let d = a.distance_m(b);
        assert!((d - 111_194.9).abs() < 1.0, "got {d}");
    }

    #[test]
    fn antipodal_is_half_circumference() {
        let a = Coordinate::new(0.0, 0.0);
        let b = Coordinate::new(180.0, 0.0);
        let half = std::f64::consts::PI * crate::EARTH_RADIUS_M;
        assert!((a.distance_m(b) - half).abs() < 1e-6);
    }

    #[test]
    fn try_new_rejects_bad_values() {
        assert!(Coordinate::try_new(-77.0, -12.0).is_ok());
        assert!(matches!(
            Coordinate::try_new(f64::NAN, 0.0),
            Err(CoreError::InvalidCoordinate { .. })
        ));
        assert!(Coordinate::try_new(0.0, f64::INFINITY).is_err());
        assert!(Coordinate::try_new(0.0, 91.0).is_err());
        assert!(Coordinate::try_new(-180.5, 0.0).is_err());
    }
}

#[cfg(test)]
mod ids {
    use crate::{Coordinate, NodeId};

    #[test]
    fn textual_form() {
        let id = NodeId::from_coordinate(Coordinate::new(-77.0428, -12.0464));
        assert_eq!(id.as_str(), "-77.0428,-12.0464");
        assert_eq!(NodeId::from(Coordinate::new(10.0, 0.5)).to_string(), "10,0.5");
    }

    #[test]
    fn reproducible() {
        let c = Coordinate::new(-77.123456789012, -12.987654321098);
        assert_eq!(NodeId::from_coordinate(c), NodeId::from_coordinate(c));
    }

    #[test]
    fn negative_zero_folds() {
        let a = NodeId::from_coordinate(Coordinate::new(-0.0, 1.0));
        let b = NodeId::from_coordinate(Coordinate::new(0.0, 1.0));
        assert_eq!(a, b);
    }

    #[test]
    fn distinct_points_distinct_ids() {
        let a = NodeId::from_coordinate(Coordinate::new(1.0, 2.0));
        let b = NodeId::from_coordinate(Coordinate::new(1.0 + f64::EPSILON, 2.0));
        assert_ne!(a, b);
    }
}

#[cfg(test)]
mod segment {
    use crate::{Coordinate, LaneRecord, Segment, segments_from_records};

    #[test]
    fn record_with_missing_endpoint_is_dropped() {
        let a = Coordinate::new(0.0, 0.0);
        let b = Coordinate::new(0.001, 0.0);
        let records = vec![
            LaneRecord::new(a, b),
            LaneRecord { id: Some("x".into()), start: Some(a), end: None },
            LaneRecord { id: None, start: None, end: Some(b) },
            LaneRecord::new(b, a),
        ];
        let (segments, dropped) = segments_from_records(&records);
        assert_eq!(dropped, 2);
        assert_eq!(segments, vec![Segment::new(a, b), Segment::new(b, a)]);
    }

    #[test]
    fn length_and_reverse() {
        let s = Segment::new(Coordinate::new(0.0, 0.0), Coordinate::new(0.0, 0.01));
        assert!((s.length_m() - 1_111.95).abs() < 0.1);
        assert_eq!(s.reversed().start, s.end);
        assert_eq!(s.reversed().length_m(), s.length_m());
    }
}

#[cfg(test)]
mod config {
    use crate::{BuildConfig, CoreError, SnapMode, SnapOrder};

    #[test]
    fn defaults() {
        let c = BuildConfig::default();
        assert_eq!(c.snap_threshold_m, 3.0);
        assert_eq!(c.colinear_tolerance_m, 2.0);
        assert_eq!(c.parallel_epsilon, 1e-12);
        assert_eq!(c.snap_order, SnapOrder::FirstSeen);
        assert_eq!(c.snap_mode, SnapMode::Greedy);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn validate_rejects_negative_and_nan() {
        let c = BuildConfig { snap_threshold_m: -1.0, ..Default::default() };
        assert!(matches!(c.validate(), Err(CoreError::Config(_))));
        let c = BuildConfig { colinear_tolerance_m: f64::NAN, ..Default::default() };
        assert!(c.validate().is_err());
    }
}

#[cfg(test)]
mod indices {
    use crate::{EdgeIx, NodeIx};

    #[test]
    fn index_roundtrip() {
        let ix = NodeIx(42);
        assert_eq!(ix.index(), 42);
        assert_eq!(NodeIx::try_from(42usize).unwrap(), ix);
    }

    #[test]
    fn invalid_sentinels_are_max() {
        assert_eq!(NodeIx::INVALID.0, u32::MAX);
        assert_eq!(EdgeIx::default(), EdgeIx::INVALID);
    }

    #[test]
    fn display() {
        assert_eq!(NodeIx(7).to_string(), "NodeIx(7)");
    }
}
