//! Session-level integration tests: transactional imports, state lifecycle,
//! and the renderer data contracts.

use crate::common::{raw_dataset, sample_ecu, sample_gps};
use tracklog::record::{LATITUDE, LONGITUDE, UTC_TIME};
use tracklog::spatial;
use tracklog::{ImportError, ImportMode, ImportSource, Session};

fn paired_session() -> Session {
    let mut session = Session::new();
    session
        .import(
            Some(ImportSource::new("engine.csv", sample_ecu())),
            Some(ImportSource::new("track.csv", sample_gps())),
            ImportMode::Paired,
        )
        .unwrap();
    session
}

#[test]
fn test_paired_import_end_to_end() {
    let session = paired_session();

    assert_eq!(session.fused().len(), 5);
    assert_eq!(session.scaled().len(), 5);
    assert_eq!(session.ecu_filename(), Some("engine.csv"));
    assert_eq!(session.gps_filename(), Some("track.csv"));

    // Statistics run against the fused (unscaled) values
    let stats = session.describe("RPM", 0..5);
    assert_eq!(stats.count, 4);
    assert_eq!(stats.max, 5480.0);
}

#[test]
fn test_validation_failure_is_transactional() {
    let mut session = paired_session();
    session.select("RPM");

    let headerless = ImportSource::new(
        "nofix.csv",
        raw_dataset(&["Lat", "Lon"], &[&["45.0", "9.0"]]),
    );
    let err = session
        .import(
            Some(ImportSource::new("engine.csv", sample_ecu())),
            Some(headerless),
            ImportMode::Paired,
        )
        .unwrap_err();

    assert!(matches!(err, ImportError::MissingGpsFields { .. }));
    let message = err.to_string();
    assert!(message.contains("Latitude"));
    assert!(message.contains("Longitude"));
    assert!(message.contains("UTC Time"));

    // Previous session survives untouched
    assert_eq!(session.fused().len(), 5);
    assert_eq!(session.gps_filename(), Some("track.csv"));
    assert_eq!(session.selected(), ["RPM"]);
}

#[test]
fn test_ecu_only_mode_skips_gps_validation() {
    let mut session = Session::new();
    session
        .import(
            Some(ImportSource::new("engine.csv", sample_ecu())),
            None,
            ImportMode::EcuOnly,
        )
        .unwrap();

    assert_eq!(session.fused().len(), 4);
    // Synthesized GPS side: zero fixes everywhere, so the map has no trace
    assert!(spatial::filtered_trace(session.fused()).is_empty());
    assert!(spatial::nearest(session.fused(), 45.0, 9.0).is_none());
}

#[test]
fn test_gps_only_mode_keeps_trace_and_channels() {
    let mut session = Session::new();
    session
        .import(
            None,
            Some(ImportSource::new("track.csv", sample_gps())),
            ImportMode::GpsOnly,
        )
        .unwrap();

    assert_eq!(session.fused().len(), 5);
    assert_eq!(spatial::filtered_trace(session.fused()).len(), 4);

    // GPS extras remain available for trace coloring
    let channels = spatial::overlay_channels(session.fused());
    assert!(channels.contains(&"Altitude".to_string()));
    assert!(channels.contains(&"Satellites".to_string()));
    assert!(!channels.contains(&LATITUDE.to_string()));
    assert!(!channels.contains(&LONGITUDE.to_string()));
    assert!(!channels.contains(&UTC_TIME.to_string()));
}

#[test]
fn test_reimport_replaces_dataset_wholesale() {
    let mut session = paired_session();
    session.select("RPM");

    session
        .import(
            Some(ImportSource::new(
                "short.csv",
                raw_dataset(&["RPM"], &[&["900"]]),
            )),
            None,
            ImportMode::EcuOnly,
        )
        .unwrap();

    assert_eq!(session.fused().len(), 1);
    assert_eq!(session.ecu_filename(), Some("short.csv"));
    assert_eq!(session.gps_filename(), None);
    assert!(session.selected().is_empty());
}

#[test]
fn test_scaled_feed_shares_selection_with_fused_feed() {
    let mut session = paired_session();
    session.select("RPM");
    session.select("TPS");

    let fused_feed = session.chart_feed();
    let scaled_feed = session.scaled_chart_feed();

    assert_eq!(fused_feed.index, UTC_TIME);
    assert_eq!(scaled_feed.index, UTC_TIME);
    assert_eq!(fused_feed.categories, scaled_feed.categories);
    assert_eq!(fused_feed.rows.len(), scaled_feed.rows.len());

    // Same row, two views: raw value in one, dimensionless in the other
    assert_eq!(fused_feed.rows[0].number("RPM"), Some(4500.0));
    assert_eq!(scaled_feed.rows[0].number("RPM"), Some(0.0));
}
