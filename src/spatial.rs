//! Spatial operations over the fused position trace.
//!
//! Two jobs: find the trace point nearest to a clicked map location, and
//! break the trace into colored line segments driven by a selected channel's
//! value. Both operate on the filtered trace only — rows with a
//! zero-latitude, zero-longitude "no fix" sentinel are dropped first.

use serde::Serialize;

use crate::fuse::FusedDataset;
use crate::record::{LATITUDE, LONGITUDE, ROW_INDEX, UTC_TIME};

/// Mean Earth radius in meters, for great-circle distances
const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Segment color when no channel is selected (uniform dark blue trace)
pub const UNIFORM_TRACE_COLOR: [u8; 3] = [0, 0, 139];

/// Three-stop color ramp for channel-driven traces: low, mid, high
pub const RAMP_STOPS: [[u8; 3]; 3] = [
    [0, 128, 0],   // Green (low)
    [255, 255, 0], // Yellow (mid)
    [255, 0, 0],   // Red (high)
];

/// One point of the filtered position trace
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct TracePoint {
    pub latitude: f64,
    pub longitude: f64,
    /// Stamped fused-row position, for click-to-chart synchronization
    pub row_index: usize,
}

/// The trace point closest to a queried location, with everything the map
/// marker and chart highlight need
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NearestPoint {
    pub latitude: f64,
    pub longitude: f64,
    /// Fused-row position of the matched point
    pub row_index: usize,
    /// Decoded display time of the matched row
    pub time_label: String,
}

/// One colored line segment between two consecutive filtered trace points
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TraceSegment {
    /// `[latitude, longitude]` of the segment start
    pub start: [f64; 2],
    /// `[latitude, longitude]` of the segment end
    pub end: [f64; 2],
    /// RGB segment color
    pub color: [u8; 3],
    /// Fused-row position of the trailing endpoint (the one that picked the
    /// color)
    pub row_index: usize,
}

/// Extract the position trace from a fused dataset, dropping rows without a
/// GPS fix (`Latitude == 0 && Longitude == 0`) or without numeric
/// coordinates at all.
pub fn filtered_trace(dataset: &FusedDataset) -> Vec<TracePoint> {
    dataset
        .rows
        .iter()
        .enumerate()
        .filter_map(|(i, row)| {
            let latitude = row.number(LATITUDE)?;
            let longitude = row.number(LONGITUDE)?;
            if latitude == 0.0 && longitude == 0.0 {
                return None;
            }
            let row_index = row.number(ROW_INDEX).map(|v| v as usize).unwrap_or(i);
            Some(TracePoint {
                latitude,
                longitude,
                row_index,
            })
        })
        .collect()
}

/// Great-circle distance in meters (haversine)
fn haversine_m(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lng = (lng2 - lng1).to_radians();
    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_M * a.sqrt().atan2((1.0 - a).sqrt())
}

/// Find the filtered trace point nearest to a queried location.
///
/// Linear scan; ties resolve to the point appearing earlier in trace order.
/// Returns `None` when the filtered trace is empty.
pub fn nearest(dataset: &FusedDataset, latitude: f64, longitude: f64) -> Option<NearestPoint> {
    let mut min_dist = f64::INFINITY;
    let mut closest: Option<TracePoint> = None;

    for point in filtered_trace(dataset) {
        let dist = haversine_m(point.latitude, point.longitude, latitude, longitude);
        if dist < min_dist {
            min_dist = dist;
            closest = Some(point);
        }
    }

    closest.map(|point| {
        let time_label = dataset
            .row(point.row_index)
            .and_then(|row| row.text(UTC_TIME))
            .unwrap_or(crate::timecode::NO_TIME)
            .to_string();
        NearestPoint {
            latitude: point.latitude,
            longitude: point.longitude,
            row_index: point.row_index,
            time_label,
        }
    })
}

/// Linear interpolation between two RGB stops
fn lerp_color(from: [u8; 3], to: [u8; 3], t: f64) -> [u8; 3] {
    let t = t.clamp(0.0, 1.0);
    let mut out = [0u8; 3];
    for (i, channel) in out.iter_mut().enumerate() {
        *channel = (from[i] as f64 + (to[i] as f64 - from[i] as f64) * t).round() as u8;
    }
    out
}

/// Map a normalized position `t` in `[0, 1]` through the 3-stop ramp
fn ramp_color(t: f64) -> [u8; 3] {
    let t = t.clamp(0.0, 1.0);
    if t <= 0.5 {
        lerp_color(RAMP_STOPS[0], RAMP_STOPS[1], t * 2.0)
    } else {
        lerp_color(RAMP_STOPS[1], RAMP_STOPS[2], (t - 0.5) * 2.0)
    }
}

/// Channel reading used for trace coloring. An unset cell reads as `0.0`,
/// indistinguishable from an explicit zero — a deliberate carry-over from the
/// source behavior, kept because distinguishing them changes visible output.
fn color_value(dataset: &FusedDataset, row_index: usize, channel: &str) -> f64 {
    dataset
        .row(row_index)
        .and_then(|row| row.number(channel))
        .unwrap_or(0.0)
}

/// Segment the filtered trace and color each segment.
///
/// With no channel selected every segment gets [`UNIFORM_TRACE_COLOR`].
/// Otherwise the channel's domain is computed across the filtered trace and
/// each segment takes the ramp color of the value at its trailing endpoint.
/// A degenerate domain (constant channel) maps every segment to the low stop.
pub fn color_segments(dataset: &FusedDataset, channel: Option<&str>) -> Vec<TraceSegment> {
    let trace = filtered_trace(dataset);
    if trace.len() < 2 {
        return Vec::new();
    }

    let domain = channel.map(|name| {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for point in &trace {
            let v = color_value(dataset, point.row_index, name);
            min = min.min(v);
            max = max.max(v);
        }
        (name, min, max)
    });

    trace
        .windows(2)
        .map(|pair| {
            let (prev, point) = (pair[0], pair[1]);
            let color = match domain {
                Some((name, min, max)) => {
                    let v = color_value(dataset, point.row_index, name);
                    let t = if max > min { (v - min) / (max - min) } else { 0.0 };
                    ramp_color(t)
                }
                None => UNIFORM_TRACE_COLOR,
            };
            TraceSegment {
                start: [prev.latitude, prev.longitude],
                end: [point.latitude, point.longitude],
                color,
                row_index: point.row_index,
            }
        })
        .collect()
}

/// Channel names offered for trace coloring: every fused field except the
/// position/time/index bookkeeping, provided the first row carries a numeric
/// value for it.
pub fn overlay_channels(dataset: &FusedDataset) -> Vec<String> {
    let Some(first) = dataset.rows.first() else {
        return Vec::new();
    };
    dataset
        .fields
        .iter()
        .filter(|name| {
            !matches!(name.as_str(), LATITUDE | LONGITUDE | UTC_TIME | ROW_INDEX)
                && first.number(name).is_some()
        })
        .cloned()
        .collect()
}
