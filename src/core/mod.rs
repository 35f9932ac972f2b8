pub mod catalog;
pub mod classify;
pub mod error;
pub mod filter;
pub mod paths;
pub mod traverse;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};

/// Coarse content category assigned to every cataloged file.
///
/// The set is closed; anything that does not match a known extension
/// receives the fallback supplied by the traversal strategy that found it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileCategory {
    Image,
    Video,
    Audio,
    File,
    Archive,
    Other,
}

impl FileCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileCategory::Image => "image",
            FileCategory::Video => "video",
            FileCategory::Audio => "audio",
            FileCategory::File => "file",
            FileCategory::Archive => "archive",
            FileCategory::Other => "other",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "image" => Some(FileCategory::Image),
            "video" => Some(FileCategory::Video),
            "audio" => Some(FileCategory::Audio),
            "file" => Some(FileCategory::File),
            "archive" => Some(FileCategory::Archive),
            "other" => Some(FileCategory::Other),
            _ => None,
        }
    }
}

impl std::fmt::Display for FileCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One cataloged file. Created during traversal, never updated in place.
#[derive(Debug, Clone, Serialize)]
pub struct FileEntry {
    /// Unique within a single scan (per-scan counter, see [`IdGenerator`]).
    pub id: String,
    /// File base name as reported by the filesystem.
    pub name: String,
    /// Absolute path. Entries are not deduplicated by content.
    pub path: PathBuf,
    pub size: u64,
    pub category: FileCategory,
    /// Creation time is not reported on every platform.
    pub created: Option<DateTime<Local>>,
    pub modified: DateTime<Local>,
    /// Name of the profile folder the file was discovered under.
    pub user: String,
    /// `YYYY-MM` bucket. Folder-derived for category-folder strategies,
    /// mtime-derived for the recursive message walk.
    pub year_month: String,
}

/// Which layout a resolved scan root came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RootSource {
    /// User-supplied override path.
    Custom,
    /// Classic `~/Documents/WeChat Files` layout.
    Documents,
    /// Windows-Store packaged variant under LOCALAPPDATA.
    AppStore,
    /// Newer `~/Documents/xwechat_files` layout.
    XWeChat,
}

/// A resolved, existence-checked directory to scan. Not persisted.
#[derive(Debug, Clone)]
pub struct ScanRoot {
    pub path: PathBuf,
    pub source: RootSource,
}

/// Hands out entry ids that are unique within one scan, even when roots
/// are walked concurrently. A fresh generator is created per scan pass;
/// no global or sortable uniqueness is claimed.
#[derive(Debug, Default)]
pub struct IdGenerator {
    next: AtomicU64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&self) -> String {
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        format!("f-{n:08x}")
    }
}

pub use catalog::{Catalog, CatalogStats, ScanConfig, TypeFilter};
pub use classify::classify;
pub use error::CoreError;
pub use filter::InclusionFilter;
pub use paths::resolve_roots;
pub use traverse::Traverser;
