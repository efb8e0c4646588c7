//! Row-wise fusion of an ECU log and a GPS log.
//!
//! Rows are aligned strictly by positional index; no timestamp resampling or
//! interpolation happens here. The first record of each source is assumed to
//! have been captured at the same instant. The fused output carries a decoded
//! time label and a row-index stamp per row so chart and map consumers can
//! cross-reference each other.

use serde::Serialize;
use strum::{AsRefStr, IntoStaticStr};
use thiserror::Error;

use crate::record::{
    FieldValue, RawDataset, TabularRecord, MANDATORY_GPS_FIELDS, ROW_INDEX, UTC_TIME,
};
use crate::timecode;

// ============================================================================
// Error Types
// ============================================================================

/// Errors that abort an import before any session state is replaced
#[derive(Debug, Error)]
pub enum ImportError {
    /// GPS file lacks one or more of the mandatory headers
    #[error("The GPS file MUST contain following properties: \"Latitude\", \"Longitude\", \"UTC Time\" (missing: {})", .missing.join(", "))]
    MissingGpsFields {
        /// The mandatory names the file failed to provide
        missing: Vec<String>,
    },

    /// The chosen import mode requires an ECU source that was not supplied
    #[error("ECU log source required for {mode} import")]
    MissingEcuSource { mode: &'static str },

    /// The chosen import mode requires a GPS source that was not supplied
    #[error("GPS log source required for {mode} import")]
    MissingGpsSource { mode: &'static str },
}

/// Reject a GPS dataset missing any mandatory header. Enforced at the fusion
/// boundary; the check looks at headers only, so an import is refused before
/// any row work happens.
pub fn validate_gps_fields(gps: &RawDataset) -> Result<(), ImportError> {
    let missing: Vec<String> = MANDATORY_GPS_FIELDS
        .iter()
        .filter(|name| !gps.has_field(name))
        .map(|name| name.to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(ImportError::MissingGpsFields { missing })
    }
}

// ============================================================================
// Import modes
// ============================================================================

/// Which sources an import supplies. Single-source modes synthesize the
/// missing side so downstream consumers never special-case it.
#[derive(AsRefStr, IntoStaticStr, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ImportMode {
    /// One ECU log plus one GPS log
    #[default]
    Paired,
    /// ECU log only; GPS rows are synthesized as zero-fix placeholders
    EcuOnly,
    /// GPS log only; ECU rows are synthesized empty
    GpsOnly,
}

/// Placeholder GPS rows for an ECU-only import: zero latitude/longitude (the
/// "no fix" sentinel) and a zero time code that decodes to the N/A label.
pub fn placeholder_gps(len: usize) -> RawDataset {
    let template: TabularRecord = MANDATORY_GPS_FIELDS
        .iter()
        .map(|name| (name.to_string(), FieldValue::Number(0.0)))
        .collect();

    RawDataset::new(
        vec![template; len],
        MANDATORY_GPS_FIELDS.iter().map(|s| s.to_string()).collect(),
    )
}

/// Placeholder ECU rows for a GPS-only import: empty records, no channels
pub fn placeholder_ecu(len: usize) -> RawDataset {
    RawDataset::new(vec![TabularRecord::new(); len], Vec::new())
}

// ============================================================================
// Fused dataset
// ============================================================================

/// Positionally-aligned merge of ECU and GPS rows.
///
/// Every row contains the union of both sources' fields at that index, a
/// decoded `UTC Time` display string, and a `row index` stamp. The field list
/// preserves GPS-then-ECU header order for UI listing.
#[derive(Clone, Debug, Default, Serialize)]
pub struct FusedDataset {
    /// Fused rows, one per aligned index
    pub rows: Vec<TabularRecord>,
    /// Union of both sources' header names plus the row-index stamp
    pub fields: Vec<String>,
}

impl FusedDataset {
    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check whether the dataset has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Look up a row by its stamped index
    pub fn row(&self, index: usize) -> Option<&TabularRecord> {
        self.rows.get(index)
    }
}

/// Merge two pruned datasets into one aligned sequence.
///
/// The longer source determines the output length; the shorter one
/// contributes `Missing` cells past its end. On key collision the GPS value
/// wins. `UTC Time` is replaced by its decoded display string, and each row
/// is stamped with its zero-based position.
pub fn fuse(ecu: &RawDataset, gps: &RawDataset) -> FusedDataset {
    let len = ecu.len().max(gps.len());

    // GPS headers first, then ECU headers not already present
    let mut fields: Vec<String> = gps.fields.clone();
    for name in &ecu.fields {
        if !fields.contains(name) {
            fields.push(name.clone());
        }
    }

    let rows: Vec<TabularRecord> = (0..len)
        .map(|i| {
            let gps_row = gps.rows.get(i);
            let ecu_row = ecu.rows.get(i);

            let mut fused: TabularRecord = fields
                .iter()
                .map(|name| {
                    // GPS precedence: only fall back to the ECU cell when the
                    // GPS source never declared this header
                    let value = if gps.has_field(name) {
                        gps_row.and_then(|r| r.get(name)).cloned()
                    } else {
                        ecu_row.and_then(|r| r.get(name)).cloned()
                    };
                    (name.clone(), value.unwrap_or(FieldValue::Missing))
                })
                .collect();

            let time_label =
                timecode::decode_opt(gps_row.and_then(|r| r.number(UTC_TIME)));
            fused.insert(UTC_TIME, FieldValue::Text(time_label));
            fused.insert(ROW_INDEX, FieldValue::Number(i as f64));

            fused
        })
        .collect();

    // Every row carries both stamps, so the field list must declare them
    // even when the GPS headers never did
    if !fields.iter().any(|f| f == UTC_TIME) {
        fields.push(UTC_TIME.to_string());
    }
    if !fields.iter().any(|f| f == ROW_INDEX) {
        fields.push(ROW_INDEX.to_string());
    }

    tracing::info!(
        rows = rows.len(),
        fields = fields.len(),
        "Fused ECU ({} rows) and GPS ({} rows) sources",
        ecu.len(),
        gps.len()
    );

    FusedDataset { rows, fields }
}
