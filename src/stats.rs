//! Descriptive statistics over a range-limited column.
//!
//! Backs the per-channel summary cards: the UI picks a channel and a display
//! range, the engine reports what the numeric cells in that window look like.

use std::ops::Range;

use serde::Serialize;

use crate::fuse::FusedDataset;

/// Descriptive statistics for one channel over one display range.
///
/// All values are rounded to 3 decimal places at this boundary for consistent
/// display precision; intermediate accumulations stay unrounded. A result
/// with `count == 0` means "no data" — the zeroed statistics are explicit
/// neutral values, not readings.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ChannelStats {
    /// Number of numeric entries in the range
    pub count: usize,
    /// Largest value
    pub max: f64,
    /// Smallest value
    pub min: f64,
    /// Arithmetic mean
    pub mean: f64,
    /// Middle value (average of the two middle values for even counts)
    pub median: f64,
    /// Most frequent value; ties resolve to the value encountered first
    pub mode: f64,
    /// `|max - min|`
    pub peak_to_peak: f64,
}

/// Round to 3 decimal places for display
#[inline]
fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// Compute [`ChannelStats`] for `field` over the rows in `range`
/// (half-open, clamped to the dataset length).
///
/// Rows whose cell is text or missing are filtered out before any
/// computation. An empty filtered set yields the all-zero result.
pub fn describe(dataset: &FusedDataset, field: &str, range: Range<usize>) -> ChannelStats {
    let end = range.end.min(dataset.rows.len());
    let start = range.start.min(end);

    let values: Vec<f64> = dataset.rows[start..end]
        .iter()
        .filter_map(|row| row.number(field))
        .collect();

    if values.is_empty() {
        return ChannelStats::default();
    }

    let n = values.len();
    let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
    let mean = values.iter().sum::<f64>() / n as f64;

    let mut sorted = values.clone();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    #[allow(clippy::manual_is_multiple_of)]
    let median = if n % 2 == 0 {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    } else {
        sorted[n / 2]
    };

    ChannelStats {
        count: n,
        max: round3(max),
        min: round3(min),
        mean: round3(mean),
        median: round3(median),
        mode: round3(mode_first_encountered(&values)),
        peak_to_peak: round3((max - min).abs()),
    }
}

/// Most frequent value, preserving input order so ties resolve to the value
/// seen first. No sort-then-pick: sorting would break the tie-break contract.
fn mode_first_encountered(values: &[f64]) -> f64 {
    let mut occurrences: Vec<(f64, usize)> = Vec::new();
    for &v in values {
        // Plain equality so 0.0 and -0.0 count as one value (the coercion
        // grammar accepts "-0"); NaN never reaches here
        match occurrences.iter_mut().find(|(seen, _)| *seen == v) {
            Some((_, count)) => *count += 1,
            None => occurrences.push((v, 1)),
        }
    }

    let mut best = occurrences[0];
    for &candidate in &occurrences[1..] {
        // Strictly greater keeps the first-encountered winner on ties
        if candidate.1 > best.1 {
            best = candidate;
        }
    }
    best.0
}
