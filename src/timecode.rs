//! Packed UTC time decoding.
//!
//! GPS loggers emit time-of-day as a single packed decimal, `HHMMSS.fff`
//! (e.g. `143022.500` for 14:30:22.500). Decoding is fixed-offset substring
//! slicing over the canonical ten-character rendering of that number; the
//! character at offset 6 is the decimal point and is skipped deliberately.

/// Sentinel label for rows without a usable time fix. Downstream consumers
/// treat it as a valid-but-unplottable label, not an error.
pub const NO_TIME: &str = "N/A Time";

/// Decode a packed `HHMMSS.fff` time code into a `HH:MM:SS.fff` display
/// string. Non-positive input returns [`NO_TIME`].
///
/// The code is zero-padded to the fixed ten-character layout before slicing,
/// so early-morning fixes like `93022.5` decode as `09:30:22.500`.
pub fn decode(value: f64) -> String {
    if !(value > 0.0) {
        return NO_TIME.to_string();
    }

    // Canonical layout: HHMMSS.fff, offsets 0-9, '.' at offset 6
    let code = format!("{:010.3}", value);
    format!("{}:{}:{}.{}", &code[0..2], &code[2..4], &code[4..6], &code[7..10])
}

/// Decode an optional packed time, falling back to [`NO_TIME`] when the GPS
/// row is absent or carries no numeric time at that index.
pub fn decode_opt(value: Option<f64>) -> String {
    match value {
        Some(v) => decode(v),
        None => NO_TIME.to_string(),
    }
}
