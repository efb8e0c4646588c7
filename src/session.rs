//! Session state container.
//!
//! A single owned structure holding everything one imported telemetry session
//! exposes to its consumers: source filenames, the fused dataset, the scaled
//! dataset, and the current plot selection. The hosting application owns the
//! one mutable instance; writes only happen on import and explicit clear, so
//! chart/map/statistics consumers read a stable snapshot between events.

use std::ops::Range;

use crate::classify;
use crate::fuse::{self, FusedDataset, ImportError, ImportMode};
use crate::record::{RawDataset, TabularRecord, UTC_TIME};
use crate::scale::{self, ScaledDataset};
use crate::stats::{self, ChannelStats};

/// Fallback display name when a synthesized/unnamed source is imported
const BLANK_FILENAME: &str = "blank.csv";

/// One source handed to [`Session::import`]: display filename plus parsed rows
#[derive(Clone, Debug)]
pub struct ImportSource {
    /// Name shown in the file list (elided by the UI, never by the core)
    pub filename: String,
    /// Parsed rows and header names from the external CSV tokenizer
    pub dataset: RawDataset,
}

impl ImportSource {
    pub fn new(filename: impl Into<String>, dataset: RawDataset) -> Self {
        Self {
            filename: filename.into(),
            dataset,
        }
    }
}

/// Everything the chart renderer needs for one draw: row-ordered records, the
/// display index key, and the category names to plot
#[derive(Clone, Copy, Debug)]
pub struct ChartFeed<'a> {
    /// Fused rows in display order
    pub rows: &'a [TabularRecord],
    /// Field name used as the x-axis index
    pub index: &'static str,
    /// Selected category field names
    pub categories: &'a [String],
}

/// Application state for one imported telemetry session.
///
/// Datasets are replaced wholesale on import and dropped on clear; there is
/// no in-place mutation of published data.
#[derive(Clone, Debug, Default)]
pub struct Session {
    ecu_filename: Option<String>,
    gps_filename: Option<String>,
    fused: FusedDataset,
    scaled: ScaledDataset,
    selected: Vec<String>,
}

impl Session {
    /// Create an empty session
    pub fn new() -> Self {
        Self::default()
    }

    /// Import one ECU and/or GPS source, replacing the previous session data.
    ///
    /// Transactional: all validation happens before any state is touched, so
    /// a rejected import leaves the previous datasets and selection intact.
    /// The missing side of a single-source import is synthesized per the
    /// chosen [`ImportMode`].
    pub fn import(
        &mut self,
        ecu: Option<ImportSource>,
        gps: Option<ImportSource>,
        mode: ImportMode,
    ) -> Result<(), ImportError> {
        // Validate before anything is replaced
        match mode {
            ImportMode::Paired => {
                if ecu.is_none() {
                    return Err(ImportError::MissingEcuSource { mode: mode.into() });
                }
                let Some(gps) = gps.as_ref() else {
                    return Err(ImportError::MissingGpsSource { mode: mode.into() });
                };
                fuse::validate_gps_fields(&gps.dataset)?;
            }
            ImportMode::EcuOnly => {
                if ecu.is_none() {
                    return Err(ImportError::MissingEcuSource { mode: mode.into() });
                }
            }
            ImportMode::GpsOnly => {
                let Some(gps) = gps.as_ref() else {
                    return Err(ImportError::MissingGpsSource { mode: mode.into() });
                };
                fuse::validate_gps_fields(&gps.dataset)?;
            }
        }

        let ecu_len = ecu.as_ref().map(|s| s.dataset.len()).unwrap_or(0);
        let gps_len = gps.as_ref().map(|s| s.dataset.len()).unwrap_or(0);

        let (ecu_filename, ecu_data) = match (mode, ecu) {
            (ImportMode::GpsOnly, _) => (None, fuse::placeholder_ecu(gps_len)),
            (_, Some(source)) => {
                let name = if source.filename.is_empty() {
                    BLANK_FILENAME.to_string()
                } else {
                    source.filename
                };
                (Some(name), classify::prune(&source.dataset))
            }
            // Unreachable after validation, but keep the fallback total
            (_, None) => (None, fuse::placeholder_ecu(gps_len)),
        };

        let (gps_filename, gps_data) = match (mode, gps) {
            (ImportMode::EcuOnly, _) => (None, fuse::placeholder_gps(ecu_len)),
            (_, Some(source)) => {
                let name = if source.filename.is_empty() {
                    BLANK_FILENAME.to_string()
                } else {
                    source.filename
                };
                (Some(name), classify::prune(&source.dataset))
            }
            (_, None) => (None, fuse::placeholder_gps(ecu_len)),
        };

        let fused = fuse::fuse(&ecu_data, &gps_data);
        let scaled = scale::scale(&fused);

        self.ecu_filename = ecu_filename;
        self.gps_filename = gps_filename;
        self.fused = fused;
        self.scaled = scaled;
        self.selected.clear();

        tracing::info!(
            mode = mode.as_ref(),
            rows = self.fused.len(),
            "Imported telemetry session"
        );

        Ok(())
    }

    /// Drop all session data and the selection
    pub fn clear(&mut self) {
        *self = Session::default();
        tracing::debug!("Session cleared");
    }

    /// ECU source filename, if an ECU file was imported
    pub fn ecu_filename(&self) -> Option<&str> {
        self.ecu_filename.as_deref()
    }

    /// GPS source filename, if a GPS file was imported
    pub fn gps_filename(&self) -> Option<&str> {
        self.gps_filename.as_deref()
    }

    /// The fused dataset for this session
    pub fn fused(&self) -> &FusedDataset {
        &self.fused
    }

    /// The min-max normalized dataset for this session
    pub fn scaled(&self) -> &ScaledDataset {
        &self.scaled
    }

    /// Field names currently selected for plotting
    pub fn selected(&self) -> &[String] {
        &self.selected
    }

    /// Add a field to the plot selection; adding an already-selected name is
    /// a no-op
    pub fn select(&mut self, name: &str) {
        if !self.selected.iter().any(|s| s == name) {
            self.selected.push(name.to_string());
        }
    }

    /// Remove a field from the plot selection; absent names are ignored
    pub fn deselect(&mut self, name: &str) {
        self.selected.retain(|s| s != name);
    }

    /// Chart renderer contract: fused rows, the time index key, and the
    /// selected categories
    pub fn chart_feed(&self) -> ChartFeed<'_> {
        ChartFeed {
            rows: &self.fused.rows,
            index: UTC_TIME,
            categories: &self.selected,
        }
    }

    /// Chart renderer contract over the scaled dataset, for plots sharing a
    /// single dimensionless axis
    pub fn scaled_chart_feed(&self) -> ChartFeed<'_> {
        ChartFeed {
            rows: &self.scaled.rows,
            index: UTC_TIME,
            categories: &self.selected,
        }
    }

    /// Descriptive statistics for a channel over a display range
    pub fn describe(&self, field: &str, range: Range<usize>) -> ChannelStats {
        stats::describe(&self.fused, field, range)
    }
}
