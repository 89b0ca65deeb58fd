//! Unit tests for pc-io.

#[cfg(test)]
mod loader {
    use std::io::Cursor;

    use pc_core::{Coordinate, CoreError};

    use crate::{DataError, load_records_csv, load_records_reader};

    const CSV: &str = "\
id,lon_start,lat_start,lon_end,lat_end
a,-77.05,-12.05,-77.03,-12.03
b,-77.05,-12.03,-77.03,-12.05
c,-77.02,-12.02,,
,,,-77.01,-12.01
";

    #[test]
    fn parses_complete_and_partial_rows() {
        let records = load_records_reader(Cursor::new(CSV)).unwrap();
        assert_eq!(records.len(), 4);
        assert_eq!(records[0].id.as_deref(), Some("a"));
        assert_eq!(records[0].start, Some(Coordinate::new(-77.05, -12.05)));
        assert_eq!(records[0].end, Some(Coordinate::new(-77.03, -12.03)));
        assert_eq!(records[2].end, None);
        assert_eq!(records[3].id, None);
        assert_eq!(records[3].start, None);
        assert!(records[3].end.is_some());
    }

    #[test]
    fn id_column_is_optional() {
        let csv = "lon_start,lat_start,lon_end,lat_end\n0,0,0.01,0\n";
        let records = load_records_reader(Cursor::new(csv)).unwrap();
        assert_eq!(records.len(), 1);
        assert!(records[0].to_segment().is_some());
    }

    #[test]
    fn half_filled_endpoint_is_missing() {
        let csv = "id,lon_start,lat_start,lon_end,lat_end\nx,-77.0,,-77.01,-12.0\n";
        let records = load_records_reader(Cursor::new(csv)).unwrap();
        assert_eq!(records[0].start, None);
        assert!(records[0].to_segment().is_none());
    }

    #[test]
    fn out_of_range_value_is_rejected_with_row() {
        let csv = "id,lon_start,lat_start,lon_end,lat_end\nok,0,0,1,1\nbad,0,95,1,1\n";
        let err = load_records_reader(Cursor::new(csv)).unwrap_err();
        match err {
            DataError::InvalidRecord { row, source } => {
                assert_eq!(row, 3);
                assert!(matches!(source, CoreError::InvalidCoordinate { .. }));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn unparsable_number_is_a_csv_error() {
        let csv = "id,lon_start,lat_start,lon_end,lat_end\nx,abc,0,1,1\n";
        assert!(matches!(load_records_reader(Cursor::new(csv)), Err(DataError::Csv(_))));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_records_csv(&dir.path().join("nope.csv")).unwrap_err();
        assert!(matches!(err, DataError::Io(_)));
    }
}

#[cfg(test)]
mod export {
    use pc_core::{BuildConfig, Coordinate, LaneRecord};
    use pc_spatial::build_from_records;

    use crate::export_network_csv;

    fn x_records() -> Vec<LaneRecord> {
        vec![
            LaneRecord::new(Coordinate::new(-77.05, -12.05), Coordinate::new(-77.03, -12.03)),
            LaneRecord::new(Coordinate::new(-77.05, -12.03), Coordinate::new(-77.03, -12.05)),
        ]
    }

    #[test]
    fn writes_nodes_and_edges() {
        let dir = tempfile::tempdir().unwrap();
        let out = build_from_records(&x_records(), &BuildConfig::default()).unwrap();
        export_network_csv(&out.network, dir.path()).unwrap();

        let mut nodes = csv::Reader::from_path(dir.path().join("nodes.csv")).unwrap();
        let rows: Vec<csv::StringRecord> = nodes.records().map(Result::unwrap).collect();
        assert_eq!(rows.len(), 5);
        let degrees: Vec<u32> = rows.iter().map(|r| r[3].parse().unwrap()).collect();
        assert_eq!(degrees.iter().sum::<u32>(), 8);
        assert_eq!(degrees.iter().filter(|&&d| d == 4).count(), 1);

        let mut edges = csv::Reader::from_path(dir.path().join("edges.csv")).unwrap();
        let headers: Vec<&str> = edges.headers().unwrap().iter().collect();
        assert_eq!(headers, ["from", "to", "length_m"]);
        assert_eq!(edges.records().count(), 4);
    }
}

#[cfg(test)]
mod json {
    use pc_core::{BuildConfig, Coordinate, LaneRecord};
    use pc_spatial::{DijkstraRouter, NetworkStats, RouteQuery, build_from_records, route};

    use crate::{route_to_json, stats_to_json};

    #[test]
    fn found_and_no_path_render_with_status() {
        let records = vec![
            LaneRecord::new(Coordinate::new(-77.05, -12.05), Coordinate::new(-77.04, -12.05)),
            LaneRecord::new(Coordinate::new(-77.00, -12.00), Coordinate::new(-76.99, -12.00)),
        ];
        let out = build_from_records(&records, &BuildConfig::default()).unwrap();

        let q = RouteQuery::new(Coordinate::new(-77.05, -12.05), Coordinate::new(-77.04, -12.05));
        let found = route(&out.network, &q, &DijkstraRouter).unwrap();
        let v: serde_json::Value = serde_json::from_str(&route_to_json(&found).unwrap()).unwrap();
        assert_eq!(v["status"], "found");
        assert_eq!(v["start_node"], "-77.05,-12.05");
        assert_eq!(v["path_coords"][1]["lon"], -77.04);
        assert!(v["distance_m"].as_f64().unwrap() > 1_000.0);

        let q = RouteQuery::new(Coordinate::new(-77.05, -12.05), Coordinate::new(-76.99, -12.00));
        let none = route(&out.network, &q, &DijkstraRouter).unwrap();
        let v: serde_json::Value = serde_json::from_str(&route_to_json(&none).unwrap()).unwrap();
        assert_eq!(v["status"], "no_path");
        assert_eq!(v["end_node"], "-76.99,-12");
    }

    #[test]
    fn stats_render() {
        let out = build_from_records(&[], &BuildConfig::default()).unwrap();
        let json = stats_to_json(&NetworkStats::compute(&out.network)).unwrap();
        let v: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(v["node_count"], 0);
        assert_eq!(v["density"], 0.0);
    }
}
