//! Presentational helpers.
//!
//! Nothing here touches the data model; these functions only shape values
//! for display surfaces owned by the hosting application.

/// Default maximum length for displayed filenames
pub const MAX_FILENAME_LENGTH: usize = 24;

/// Elide a filename to `prefix...suffix`, preserving the extension.
///
/// The kept characters are split with the larger half in front. When the
/// extension alone exhausts the budget the result collapses to `...ext`;
/// names without an extension (or dotfiles) are truncated tail-first.
pub fn truncate_filename(filename: &str, max_length: usize) -> String {
    let chars: Vec<char> = filename.chars().collect();
    if chars.len() <= max_length {
        return filename.to_string();
    }

    let ext_index = match filename.rfind('.') {
        Some(0) | None => {
            // No extension, or a dotfile
            let keep: String = chars.iter().take(max_length.saturating_sub(3)).collect();
            return format!("{keep}...");
        }
        Some(i) => i,
    };

    let name_part = &filename[..ext_index];
    let ext = &filename[ext_index..];

    let keep_chars = max_length.saturating_sub(ext.len() + 3);
    if keep_chars == 0 {
        return format!("...{ext}");
    }

    let start = keep_chars.div_ceil(2);
    let end = keep_chars / 2;
    let name_chars: Vec<char> = name_part.chars().collect();
    let head: String = name_chars.iter().take(start).collect();
    let tail: String = name_chars[name_chars.len().saturating_sub(end)..]
        .iter()
        .collect();

    format!("{head}...{tail}{ext}")
}

/// Format a numeric reading for display with fixed 3-decimal precision
pub fn format_value(value: f64) -> String {
    format!("{value:.3}")
}
