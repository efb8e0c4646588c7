//! Common test utilities shared across all test modules
//!
//! Builders for raw datasets that mimic what the external CSV tokenizer
//! hands the core: string cells keyed by header, plus the header list.

use std::sync::Once;

use tracklog::record::{RawDataset, TabularRecord};

static TRACING: Once = Once::new();

/// Install a test subscriber once per binary so failing tests surface the
/// pipeline's import/fusion logs.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_max_level(tracing::Level::DEBUG)
            .try_init();
    });
}

/// Build a raw dataset from header names and string rows, running every cell
/// through the core's numeric coercion (the same path real imports take).
/// Rows shorter than the header list stay sparse.
pub fn raw_dataset(headers: &[&str], rows: &[&[&str]]) -> RawDataset {
    init_tracing();
    let records = rows
        .iter()
        .map(|cells| {
            let mut record = TabularRecord::new();
            for (name, raw) in headers.iter().zip(cells.iter()) {
                record.insert_raw(*name, raw);
            }
            record
        })
        .collect();
    RawDataset::new(records, headers.iter().map(|h| h.to_string()).collect())
}

/// A small GPS lap fragment with a dropped-fix row in the middle
pub fn sample_gps() -> RawDataset {
    raw_dataset(
        &["Latitude", "Longitude", "UTC Time", "Altitude", "Satellites"],
        &[
            &["45.6201", "9.2810", "143022.500", "226.0", "9"],
            &["45.6203", "9.2815", "143022.600", "226.1", "9"],
            &["0", "0", "0", "0", "0"],
            &["45.6207", "9.2824", "143022.800", "226.4", "8"],
            &["45.6210", "9.2830", "143022.900", "226.6", "8"],
        ],
    )
}

/// A matching ECU fragment, one row shorter than the GPS log and with a dead
/// always-zero channel
pub fn sample_ecu() -> RawDataset {
    raw_dataset(
        &["RPM", "TPS", "Coolant Temp", "Aux Spare"],
        &[
            &["4500", "35.5", "88.0", "0"],
            &["4720", "41.0", "88.1", "0"],
            &["5100", "55.5", "88.3", "0"],
            &["5480", "71.0", "88.4", "0"],
        ],
    )
}
