//! Core tabular data model.
//!
//! Telemetry sources deliver sparse, heterogeneously-keyed rows. This module
//! models them as ordered records of [`FieldValue`] cells so that "missing"
//! is an explicit state rather than an absent map entry, and provides the
//! numeric coercion rules shared by the whole pipeline.

use std::sync::LazyLock;

use regex::Regex;
use serde::ser::SerializeMap;
use serde::Serialize;

// ============================================================================
// Well-known field names
// ============================================================================

/// Latitude column name required in every GPS log
pub const LATITUDE: &str = "Latitude";

/// Longitude column name required in every GPS log
pub const LONGITUDE: &str = "Longitude";

/// Packed UTC time column name required in every GPS log.
/// Raw GPS rows carry it as a packed decimal code; fused rows carry the
/// decoded display string instead.
pub const UTC_TIME: &str = "UTC Time";

/// Zero-based row position stamped into every fused record, used to map a
/// clicked map point back to its chart row
pub const ROW_INDEX: &str = "row index";

/// The three fields a GPS import must provide
pub const MANDATORY_GPS_FIELDS: &[&str] = &[LATITUDE, LONGITUDE, UTC_TIME];

/// Matches the numeric strings the core accepts for coercion: an optional
/// sign, digits, and an optional decimal part. Anything else stays text.
static NUMERIC_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?\d+(\.\d+)?$").expect("Failed to compile numeric regex")
});

// ============================================================================
// Field values
// ============================================================================

/// A single cell of a telemetry record.
///
/// `Missing` arises when a source row lacks a key, when one source is shorter
/// than the other at fusion time, or when a raw cell fails numeric coercion.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum FieldValue {
    /// Free-form text (unparseable cells, decoded time labels)
    Text(String),
    /// A numeric reading
    Number(f64),
    /// No value recorded for this field
    #[default]
    Missing,
}

impl FieldValue {
    /// Coerce a raw cell into a value. Numeric-looking strings become
    /// [`FieldValue::Number`], empty cells become [`FieldValue::Missing`],
    /// everything else is kept as text.
    pub fn from_raw(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return FieldValue::Missing;
        }
        if NUMERIC_RE.is_match(trimmed) {
            if let Ok(value) = trimmed.parse::<f64>() {
                return FieldValue::Number(value);
            }
        }
        FieldValue::Text(trimmed.to_string())
    }

    /// Numeric view of this cell, or `None` for text/missing
    #[inline]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(v) => Some(*v),
            _ => None,
        }
    }

    /// Check whether this cell carries no value
    #[inline]
    pub fn is_missing(&self) -> bool {
        matches!(self, FieldValue::Missing)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl Serialize for FieldValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            FieldValue::Text(s) => serializer.serialize_str(s),
            FieldValue::Number(v) => serializer.serialize_f64(*v),
            FieldValue::Missing => serializer.serialize_none(),
        }
    }
}

// ============================================================================
// Records and datasets
// ============================================================================

/// An ordered mapping from field name to [`FieldValue`].
///
/// Field names are unique within a record; insertion order is preserved and
/// drives UI listing order only. Records are small (tens of fields), so
/// lookups are linear scans rather than hashed.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TabularRecord {
    entries: Vec<(String, FieldValue)>,
}

impl TabularRecord {
    /// Create an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field, replacing the value in place if the name already exists
    pub fn insert(&mut self, name: impl Into<String>, value: FieldValue) {
        let name = name.into();
        if let Some(entry) = self.entries.iter_mut().find(|(n, _)| *n == name) {
            entry.1 = value;
        } else {
            self.entries.push((name, value));
        }
    }

    /// Coerce and set a raw string cell
    pub fn insert_raw(&mut self, name: impl Into<String>, raw: &str) {
        self.insert(name, FieldValue::from_raw(raw));
    }

    /// Look up a field by name
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    /// Numeric view of a field, or `None` if absent/text/missing
    pub fn number(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(FieldValue::as_number)
    }

    /// Text view of a field, or `None` if absent or not text
    pub fn text(&self, name: &str) -> Option<&str> {
        match self.get(name) {
            Some(FieldValue::Text(s)) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Check whether a field name is present (even if its value is missing)
    pub fn contains_field(&self, name: &str) -> bool {
        self.entries.iter().any(|(n, _)| n == name)
    }

    /// Number of fields in this record
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check whether the record has no fields
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate fields in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// Project this record onto a common key set: keeps one entry per kept
    /// name, in kept-name order, inserting `Missing` for names this row never
    /// observed. Used to normalize sparse rows to a fixed schema after pruning.
    pub fn project(&self, kept: &[String]) -> TabularRecord {
        let entries = kept
            .iter()
            .map(|name| {
                let value = self.get(name).cloned().unwrap_or(FieldValue::Missing);
                (name.clone(), value)
            })
            .collect();
        TabularRecord { entries }
    }
}

impl Serialize for TabularRecord {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl FromIterator<(String, FieldValue)> for TabularRecord {
    fn from_iter<T: IntoIterator<Item = (String, FieldValue)>>(iter: T) -> Self {
        let mut record = TabularRecord::new();
        for (name, value) in iter {
            record.insert(name, value);
        }
        record
    }
}

/// A parsed source file: ordered rows plus the header names observed during
/// parsing. Row field sets may differ (sparse CSV) until the dataset is
/// projected onto a pruned key set.
#[derive(Clone, Debug, Default)]
pub struct RawDataset {
    /// Rows in file order
    pub rows: Vec<TabularRecord>,
    /// Header names in the order the parser reported them
    pub fields: Vec<String>,
}

impl RawDataset {
    /// Create a dataset from rows and the parser's header list
    pub fn new(rows: Vec<TabularRecord>, fields: Vec<String>) -> Self {
        Self { rows, fields }
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check whether the dataset has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Check whether a header name was observed during parsing
    pub fn has_field(&self, name: &str) -> bool {
        self.fields.iter().any(|f| f == name)
    }
}
