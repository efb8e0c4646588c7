//! End-to-end pipeline tests: raw string cells through pruning, fusion,
//! scaling, statistics, and spatial segmentation.

use crate::common::{raw_dataset, sample_ecu, sample_gps};
use tracklog::record::{FieldValue, ROW_INDEX, UTC_TIME};
use tracklog::scale::SCALE_MAX;
use tracklog::spatial::{self, RAMP_STOPS, UNIFORM_TRACE_COLOR};
use tracklog::{classify, fuse, scale, stats, timecode};

#[test]
fn test_full_pipeline_row_counts_and_labels() {
    let gps = classify::prune(&sample_gps());
    let ecu = classify::prune(&sample_ecu());

    // GPS has 5 rows, ECU has 4: the longer source wins
    let fused = fuse::fuse(&ecu, &gps);
    assert_eq!(fused.len(), 5);

    // Decoded labels on rows with a fix, sentinel on the dropped-fix row
    assert_eq!(fused.rows[0].text(UTC_TIME), Some("14:30:22.500"));
    assert_eq!(fused.rows[2].text(UTC_TIME), Some(timecode::NO_TIME));

    // ECU channels pad out with Missing past their end
    assert_eq!(fused.rows[4].get("RPM"), Some(&FieldValue::Missing));
    assert_eq!(fused.rows[3].number("RPM"), Some(5480.0));

    // Row-index stamps line up with positions
    for (i, row) in fused.rows.iter().enumerate() {
        assert_eq!(row.number(ROW_INDEX), Some(i as f64));
    }
}

#[test]
fn test_pruning_drops_dead_channel_before_fusion() {
    let ecu = classify::prune(&sample_ecu());
    assert!(!ecu.fields.iter().any(|f| f == "Aux Spare"));

    let fused = fuse::fuse(&ecu, &classify::prune(&sample_gps()));
    assert!(!fused.fields.iter().any(|f| f == "Aux Spare"));
    assert!(fused.fields.iter().any(|f| f == "RPM"));
}

#[test]
fn test_scaled_output_bounds_and_exclusions() {
    let fused = fuse::fuse(
        &classify::prune(&sample_ecu()),
        &classify::prune(&sample_gps()),
    );
    let scaled = scale::scale(&fused);

    // RPM spans 4500..5480 over four numeric rows
    assert_eq!(scaled.rows[0].number("RPM"), Some(0.0));
    assert_eq!(scaled.rows[3].number("RPM"), Some(SCALE_MAX));
    for row in &scaled.rows {
        if let Some(v) = row.number("RPM") {
            assert!((0.0..=SCALE_MAX).contains(&v));
        }
    }

    // Position and time pass through untouched
    assert_eq!(scaled.rows[0].number("Latitude"), Some(45.6201));
    assert_eq!(scaled.rows[0].text(UTC_TIME), Some("14:30:22.500"));
}

#[test]
fn test_stats_over_display_range() {
    let fused = fuse::fuse(
        &classify::prune(&sample_ecu()),
        &classify::prune(&sample_gps()),
    );

    let all = stats::describe(&fused, "RPM", 0..fused.len());
    assert_eq!(all.count, 4);
    assert_eq!(all.min, 4500.0);
    assert_eq!(all.max, 5480.0);
    assert_eq!(all.mean, 4950.0);
    assert_eq!(all.peak_to_peak, 980.0);

    let window = stats::describe(&fused, "RPM", 1..3);
    assert_eq!(window.count, 2);
    assert_eq!(window.mean, 4910.0);
}

#[test]
fn test_trace_segmentation_skips_dropped_fix() {
    let fused = fuse::fuse(
        &classify::prune(&sample_ecu()),
        &classify::prune(&sample_gps()),
    );

    // Five GPS rows minus the zero-fix row leave four points, three segments
    let trace = spatial::filtered_trace(&fused);
    assert_eq!(trace.len(), 4);
    assert!(trace.iter().all(|p| p.latitude != 0.0 || p.longitude != 0.0));

    let segments = spatial::color_segments(&fused, None);
    assert_eq!(segments.len(), 3);
    assert!(segments.iter().all(|s| s.color == UNIFORM_TRACE_COLOR));

    // The segment bridging the gap connects rows 1 and 3
    assert_eq!(segments[1].start, [45.6203, 9.2815]);
    assert_eq!(segments[1].end, [45.6207, 9.2824]);
    assert_eq!(segments[1].row_index, 3);
}

#[test]
fn test_click_to_chart_round_trip() {
    let fused = fuse::fuse(
        &classify::prune(&sample_ecu()),
        &classify::prune(&sample_gps()),
    );

    // Click near the last trace point; its row index must recover the fused
    // row so the chart can highlight it
    let found = spatial::nearest(&fused, 45.62101, 9.28301).unwrap();
    assert_eq!(found.row_index, 4);
    assert_eq!(found.time_label, "14:30:22.900");
    assert_eq!(
        fused.row(found.row_index).unwrap().number("Latitude"),
        Some(45.6210)
    );
}

#[test]
fn test_channel_colored_segments_follow_domain() {
    let fused = fuse::fuse(
        &classify::prune(&sample_ecu()),
        &classify::prune(&sample_gps()),
    );

    let segments = spatial::color_segments(&fused, Some("RPM"));
    assert_eq!(segments.len(), 3);
    // Final trace point has no RPM (padded row): reads as 0, below the
    // filtered-domain minimum, clamped to the low stop
    assert_eq!(segments[2].color, RAMP_STOPS[0]);
}

#[test]
fn test_text_cells_survive_fusion_but_not_aggregates() {
    let ecu = raw_dataset(
        &["RPM", "Gear Label"],
        &[&["4000", "third"], &["5000", "fourth"]],
    );
    let gps = raw_dataset(
        &["Latitude", "Longitude", "UTC Time"],
        &[
            &["45.0", "9.0", "120000.000"],
            &["45.1", "9.1", "120000.100"],
        ],
    );

    // Text-only channel is pruned away (no numeric signal)
    let fused = fuse::fuse(&classify::prune(&ecu), &classify::prune(&gps));
    assert!(!fused.fields.iter().any(|f| f == "Gear Label"));

    let s = stats::describe(&fused, "RPM", 0..2);
    assert_eq!(s.count, 2);
    assert_eq!(s.mean, 4500.0);
}

#[test]
fn test_malformed_cells_become_missing_not_errors() {
    let ecu = raw_dataset(
        &["RPM", "Boost"],
        &[&["4000", "1.2"], &["err", "1.4"], &["5000", ""]],
    );
    let gps = raw_dataset(
        &["Latitude", "Longitude", "UTC Time"],
        &[
            &["45.0", "9.0", "120000.000"],
            &["45.1", "9.1", "120000.100"],
            &["45.2", "9.2", "120000.200"],
        ],
    );

    let fused = fuse::fuse(&classify::prune(&ecu), &classify::prune(&gps));
    assert_eq!(
        fused.rows[1].get("RPM"),
        Some(&FieldValue::Text("err".to_string()))
    );
    assert_eq!(fused.rows[2].get("Boost"), Some(&FieldValue::Missing));

    // Aggregates silently exclude the coercion gaps
    let s = stats::describe(&fused, "RPM", 0..3);
    assert_eq!(s.count, 2);
    let b = stats::describe(&fused, "Boost", 0..3);
    assert_eq!(b.count, 2);
    assert_eq!(b.mean, 1.3);
}
