//! TrackLog - data-fusion and normalization core for paired telemetry logs
//!
//! This library merges one ECU log and one GPS log — two independently
//! sampled, heterogeneously keyed tabular sources — into a single
//! row-aligned, time-labeled dataset ready for charting and track-map
//! rendering. CSV tokenizing and all rendering surfaces live in the hosting
//! application; the core only consumes parsed rows and produces data
//! contracts.
//!
//! ## Module Structure
//!
//! - [`record`] - Tabular data model: field values, records, raw datasets
//! - [`classify`] - Significant-column detection and dataset pruning
//! - [`timecode`] - Packed `HHMMSS.fff` UTC time decoding
//! - [`fuse`] - Positional row fusion, import modes, GPS validation
//! - [`scale`] - Min-max normalization of fused datasets to `[0, 1000]`
//! - [`stats`] - Range-limited descriptive statistics per channel
//! - [`spatial`] - Nearest trace point lookup and colored trace segmentation
//! - [`session`] - Owned session state: transactional import, clear, selection
//! - [`display`] - Presentational helpers (filename elision, value formatting)

pub mod classify;
pub mod display;
pub mod fuse;
pub mod record;
pub mod scale;
pub mod session;
pub mod spatial;
pub mod stats;
pub mod timecode;

pub use fuse::{fuse, FusedDataset, ImportError, ImportMode};
pub use record::{FieldValue, RawDataset, TabularRecord};
pub use session::{ImportSource, Session};
