//! Decides whether a discovered file belongs in the catalog.

use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;

/// Extensions of internal/system files that are never user content.
const EXCLUDED_EXTENSIONS: [&str; 6] = ["dat", "ini", "log", "tmp", "temp", "db"];

/// Exact file names that are never user content.
const EXCLUDED_NAMES: [&str; 3] = ["Thumbs.db", "desktop.ini", "config"];

/// Files below this size are thumbnails or placeholders, not real content.
const MIN_FILE_SIZE: u64 = 1024;

/// Matches WeChat's internal cache-key file names: one or more digit
/// runs separated by underscores and nothing else (`123`, `123_456`).
fn cache_key_name() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d+(_\d+)*$").expect("static pattern is valid"))
}

/// A stateless filter applying the catalog's inclusion rules.
pub struct InclusionFilter;

impl InclusionFilter {
    /// Returns `true` when the file should appear in the catalog.
    ///
    /// All rules must pass. The size rule needs a metadata lookup; if
    /// that lookup fails the file is excluded (fail-closed) and the
    /// failure is logged, never raised to the caller.
    pub fn should_include(file_name: &str, path: &Path) -> bool {
        if let Some(ext) = Path::new(file_name).extension().and_then(|e| e.to_str()) {
            if EXCLUDED_EXTENSIONS
                .iter()
                .any(|excluded| ext.eq_ignore_ascii_case(excluded))
            {
                return false;
            }
        }

        if EXCLUDED_NAMES.contains(&file_name) {
            return false;
        }

        if cache_key_name().is_match(file_name) {
            return false;
        }

        match std::fs::metadata(path) {
            Ok(metadata) => metadata.len() >= MIN_FILE_SIZE,
            Err(e) => {
                tracing::warn!("Failed to read size of {}, excluding: {}", path.display(), e);
                false
            }
        }
    }
}
