//! Terminal size detection.
//!
//! Width is queried on every call and never cached. A positive `COLUMNS`
//! environment variable wins over the size reported by the terminal, and
//! 80 columns is used when neither is available.

/// Width used when the terminal size cannot be determined.
pub const DEFAULT_WIDTH: usize = 80;

/// Get the terminal size (width, height) in cells.
///
/// Returns `None` if the terminal size cannot be determined.
#[must_use]
pub fn get_terminal_size() -> Option<(usize, usize)> {
    crossterm::terminal::size()
        .ok()
        .filter(|&(w, h)| w > 0 && h > 0)
        .map(|(w, h)| (usize::from(w), usize::from(h)))
}

/// Get the terminal width in cells.
///
/// Returns a default of 80 if the width cannot be determined.
#[must_use]
pub fn get_terminal_width() -> usize {
    resolve_width(
        std::env::var("COLUMNS").ok().as_deref(),
        get_terminal_size().map(|(w, _)| w),
    )
}

fn columns_override(columns: Option<&str>) -> Option<usize> {
    columns
        .and_then(|value| value.trim().parse::<usize>().ok())
        .filter(|&width| width > 0)
}

fn resolve_width(columns: Option<&str>, detected: Option<usize>) -> usize {
    columns_override(columns).or(detected).unwrap_or_else(|| {
        log::debug!("terminal width unavailable, assuming {DEFAULT_WIDTH} columns");
        DEFAULT_WIDTH
    })
}
