//! Significant-column detection.
//!
//! Logging devices routinely emit always-zero or always-blank channels.
//! Keeping them wastes memory and clutters the channel picker, so imports are
//! pruned down to the columns that carry at least one meaningful reading.

use crate::record::{RawDataset, MANDATORY_GPS_FIELDS};

/// Return the subset of header names worth keeping, in input order.
///
/// A field survives if it is one of the mandatory GPS fields, or if at least
/// one row holds a non-missing, non-zero numeric value for it. This is a
/// filter over the header list, not a projection of the rows.
pub fn significant_fields(dataset: &RawDataset) -> Vec<String> {
    dataset
        .fields
        .iter()
        .filter(|name| {
            MANDATORY_GPS_FIELDS.contains(&name.as_str())
                || dataset
                    .rows
                    .iter()
                    .any(|row| row.number(name.as_str()).is_some_and(|v| v != 0.0))
        })
        .cloned()
        .collect()
}

/// Prune a dataset to its significant columns and normalize every row to that
/// common key set, so downstream consumers see a fixed schema.
pub fn prune(dataset: &RawDataset) -> RawDataset {
    let kept = significant_fields(dataset);
    let rows = dataset.rows.iter().map(|row| row.project(&kept)).collect();
    RawDataset::new(rows, kept)
}
