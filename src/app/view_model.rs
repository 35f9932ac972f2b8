//! Display formatting for catalog entries crossing the IPC boundary.

use serde::Serialize;

use crate::core::FileEntry;

/// A catalog entry rendered for display: human-readable size, date-only
/// timestamps, camelCase wire keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryView {
    pub id: String,
    pub name: String,
    pub path: String,
    /// Human-readable, e.g. `1.5 KB` or `2.34 MB`.
    pub size: String,
    #[serde(rename = "type")]
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub create_time: Option<String>,
    /// Date part only, `YYYY-MM-DD`.
    pub modify_time: String,
    pub user: String,
    pub year_month: String,
}

pub fn entry_view(entry: &FileEntry) -> EntryView {
    EntryView {
        id: entry.id.clone(),
        name: entry.name.clone(),
        path: entry.path.to_string_lossy().to_string(),
        size: format_file_size(entry.size),
        category: entry.category.as_str().to_string(),
        create_time: entry.created.map(|t| t.format("%Y-%m-%d").to_string()),
        modify_time: entry.modified.format("%Y-%m-%d").to_string(),
        user: entry.user.clone(),
        year_month: entry.year_month.clone(),
    }
}

pub fn entry_views(entries: &[FileEntry]) -> Vec<EntryView> {
    entries.iter().map(entry_view).collect()
}

/// Formats a byte count as B/KB/MB/GB with two-decimal rounding and
/// trailing zeros trimmed (`1 KB`, not `1.00 KB`). Everything at a
/// terabyte or beyond still renders in GB.
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    if bytes == 0 {
        return "0 B".to_string();
    }

    let exponent = ((bytes as f64).log2() / 10.0).floor() as usize;
    let exponent = exponent.min(UNITS.len() - 1);
    let value = bytes as f64 / 1024f64.powi(exponent as i32);

    let mut formatted = format!("{value:.2}");
    if formatted.contains('.') {
        while formatted.ends_with('0') {
            formatted.pop();
        }
        if formatted.ends_with('.') {
            formatted.pop();
        }
    }
    format!("{formatted} {}", UNITS[exponent])
}
