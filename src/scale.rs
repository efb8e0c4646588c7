//! Min-max normalization of a fused dataset.
//!
//! Rescales every numeric column into a common dimensionless range so wildly
//! different channels (RPM vs. throttle %) can share one chart axis. A pure
//! batch transform: the whole dataset is recomputed whenever the fused data
//! changes, there is no incremental update.

use rayon::prelude::*;

use crate::fuse::FusedDataset;
use crate::record::{FieldValue, TabularRecord, LATITUDE, LONGITUDE, ROW_INDEX, UTC_TIME};

/// Upper bound of the normalized output range
pub const SCALE_MAX: f64 = 1000.0;

/// Fields that pass through scaling unchanged: position and time keep their
/// real-world values, and the row-index stamp must stay a usable index.
pub const EXCLUDED_FIELDS: &[&str] = &[UTC_TIME, LATITUDE, LONGITUDE, ROW_INDEX];

/// Structurally identical to [`FusedDataset`], but every non-excluded numeric
/// cell is replaced by a dimensionless value in `[0, SCALE_MAX]`.
pub type ScaledDataset = FusedDataset;

/// Dataset-wide bounds for one column
#[derive(Clone, Copy, Debug)]
struct ColumnBounds {
    min: f64,
    max: f64,
}

/// Min/max over the numeric cells of one column. Text and missing cells are
/// skipped; a column with no numeric cells yields no bounds.
fn column_bounds(rows: &[TabularRecord], name: &str) -> Option<ColumnBounds> {
    let mut bounds: Option<ColumnBounds> = None;
    for row in rows {
        if let Some(v) = row.number(name) {
            bounds = Some(match bounds {
                Some(b) => ColumnBounds {
                    min: b.min.min(v),
                    max: b.max.max(v),
                },
                None => ColumnBounds { min: v, max: v },
            });
        }
    }
    bounds
}

/// Rescale every non-excluded numeric column of a fused dataset to
/// `[0, SCALE_MAX]`, linearly interpolated between that column's dataset-wide
/// min and max.
///
/// A constant (or singleton) column scales to exactly `0` rather than
/// dividing by zero. Non-numeric cells in a scaled column come out `Missing`;
/// excluded fields pass through untouched.
pub fn scale(fused: &FusedDataset) -> ScaledDataset {
    let scaled_fields: Vec<&String> = fused
        .fields
        .iter()
        .filter(|name| !EXCLUDED_FIELDS.contains(&name.as_str()))
        .collect();

    // Column scans are independent, so bound computation parallelizes cleanly
    let bounds: Vec<(&str, Option<ColumnBounds>)> = scaled_fields
        .par_iter()
        .map(|name| {
            let name = name.as_str();
            (name, column_bounds(&fused.rows, name))
        })
        .collect();

    let bounds_for = |name: &str| -> Option<ColumnBounds> {
        bounds
            .iter()
            .find(|(n, _)| *n == name)
            .and_then(|(_, b)| *b)
    };

    let rows: Vec<TabularRecord> = fused
        .rows
        .iter()
        .map(|row| {
            row.iter()
                .map(|(name, value)| {
                    if EXCLUDED_FIELDS.contains(&name) {
                        return (name.to_string(), value.clone());
                    }
                    let scaled = match (value.as_number(), bounds_for(name)) {
                        (Some(v), Some(b)) if b.max > b.min => {
                            FieldValue::Number((v - b.min) / (b.max - b.min) * SCALE_MAX)
                        }
                        // Constant column: avoid dividing by zero
                        (Some(_), Some(_)) => FieldValue::Number(0.0),
                        _ => FieldValue::Missing,
                    };
                    (name.to_string(), scaled)
                })
                .collect()
        })
        .collect();

    ScaledDataset {
        rows,
        fields: fused.fields.clone(),
    }
}
