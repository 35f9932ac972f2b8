//! The in-memory catalog: one immutable snapshot per scan pass, a
//! time-bounded cache in front of the traversal, and the query surface
//! (search, filter, sort, stats) over the current snapshot.

use rayon::prelude::*;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use super::{resolve_roots, CoreError, FileCategory, FileEntry, Traverser};

/// Snapshots older than this are considered stale and trigger a fresh walk.
const CACHE_TTL: Duration = Duration::from_secs(300);

/// Resolver inputs for a scan. Owned by the catalog, updated only
/// through the setters (which invalidate the cache).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanConfig {
    /// Optional override root; empty means "no custom path".
    pub custom_path: String,
    /// Whether the known default layouts are probed.
    pub use_default_paths: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            custom_path: String::new(),
            use_default_paths: true,
        }
    }
}

/// Selector for [`Catalog::filter_by_type`]. `All` is the wire-level
/// `"all"` sentinel and returns the snapshot unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeFilter {
    All,
    Category(FileCategory),
}

impl TypeFilter {
    pub fn parse(s: &str) -> Option<Self> {
        if s == "all" {
            Some(TypeFilter::All)
        } else {
            FileCategory::parse(s).map(TypeFilter::Category)
        }
    }
}

/// Aggregate statistics over the current snapshot.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogStats {
    pub total: usize,
    pub by_type: HashMap<String, usize>,
    pub by_user: HashMap<String, usize>,
    pub by_month: HashMap<String, usize>,
}

/// The complete result of one scan pass.
struct Snapshot {
    entries: Arc<Vec<FileEntry>>,
    taken_at: Instant,
}

/// Catalog of discovered files.
///
/// A scan replaces the snapshot wholesale; queries read the current
/// snapshot and never touch the filesystem. Readers therefore always
/// observe a complete, consistent result, never a partial one.
pub struct Catalog {
    config: ScanConfig,
    ttl: Duration,
    snapshot: Option<Snapshot>,
}

impl Catalog {
    pub fn new(config: ScanConfig) -> Self {
        Self::with_ttl(config, CACHE_TTL)
    }

    /// Constructor with an explicit cache TTL, used by tests that need
    /// to exercise expiry without waiting five minutes.
    pub fn with_ttl(config: ScanConfig, ttl: Duration) -> Self {
        Self {
            config,
            ttl,
            snapshot: None,
        }
    }

    /// Returns the cached snapshot when it is still fresh; otherwise
    /// resolves roots, walks them concurrently (one blocking task per
    /// root) and atomically replaces the snapshot.
    ///
    /// An empty root list is a valid outcome and produces an empty
    /// snapshot. The only hard failure is a per-root task that cannot
    /// be joined (i.e. panicked).
    pub async fn scan(&mut self) -> Result<Arc<Vec<FileEntry>>, CoreError> {
        if let Some(snapshot) = &self.snapshot {
            if snapshot.taken_at.elapsed() < self.ttl {
                tracing::debug!("Scan served from cache ({} entries)", snapshot.entries.len());
                return Ok(snapshot.entries.clone());
            }
        }

        let roots = resolve_roots(&self.config.custom_path, self.config.use_default_paths);
        if roots.is_empty() {
            tracing::info!("No WeChat directories found; catalog is empty");
        }

        let traverser = Traverser::new();
        let mut handles = Vec::with_capacity(roots.len());
        for root in roots {
            let traverser = traverser.clone();
            handles.push(tokio::task::spawn_blocking(move || {
                traverser.scan_root(&root)
            }));
        }

        let mut entries = Vec::new();
        for handle in handles {
            entries.extend(handle.await?);
        }
        tracing::info!("Scan complete: {} entries", entries.len());

        let entries = Arc::new(entries);
        self.snapshot = Some(Snapshot {
            entries: entries.clone(),
            taken_at: Instant::now(),
        });
        Ok(entries)
    }

    /// The current snapshot's entries; empty before the first scan.
    pub fn entries(&self) -> &[FileEntry] {
        self.snapshot
            .as_ref()
            .map(|s| s.entries.as_slice())
            .unwrap_or(&[])
    }

    /// Case-insensitive substring match on the file name. An empty
    /// keyword returns the full snapshot, unfiltered.
    pub fn search(&self, keyword: &str) -> Vec<FileEntry> {
        if keyword.is_empty() {
            return self.entries().to_vec();
        }
        let keyword = keyword.to_lowercase();
        self.entries()
            .par_iter()
            .filter(|entry| entry.name.to_lowercase().contains(&keyword))
            .cloned()
            .collect()
    }

    pub fn filter_by_type(&self, filter: TypeFilter) -> Vec<FileEntry> {
        match filter {
            TypeFilter::All => self.entries().to_vec(),
            TypeFilter::Category(category) => self
                .entries()
                .par_iter()
                .filter(|entry| entry.category == category)
                .cloned()
                .collect(),
        }
    }

    /// Stable sort by modification time into a new sequence; the
    /// snapshot itself keeps its traversal order.
    pub fn sort_by_time(&self, ascending: bool) -> Vec<FileEntry> {
        let mut sorted = self.entries().to_vec();
        if ascending {
            sorted.sort_by(|a, b| a.modified.cmp(&b.modified));
        } else {
            sorted.sort_by(|a, b| b.modified.cmp(&a.modified));
        }
        sorted
    }

    /// Recomputed from the snapshot on every call, not cached.
    pub fn stats(&self) -> CatalogStats {
        let mut by_type = HashMap::new();
        let mut by_user = HashMap::new();
        let mut by_month = HashMap::new();
        for entry in self.entries() {
            *by_type.entry(entry.category.as_str().to_string()).or_insert(0) += 1;
            *by_user.entry(entry.user.clone()).or_insert(0) += 1;
            *by_month.entry(entry.year_month.clone()).or_insert(0) += 1;
        }
        CatalogStats {
            total: self.entries().len(),
            by_type,
            by_user,
            by_month,
        }
    }

    /// Updates the override root. Always invalidates the cache, even
    /// when the value is unchanged: the next scan walks the filesystem.
    pub fn set_custom_path(&mut self, path: impl Into<String>) {
        self.config.custom_path = path.into();
        self.invalidate();
    }

    /// See [`Catalog::set_custom_path`]; same invalidation contract.
    pub fn set_use_default_paths(&mut self, use_defaults: bool) {
        self.config.use_default_paths = use_defaults;
        self.invalidate();
    }

    fn invalidate(&mut self) {
        self.snapshot = None;
        tracing::debug!("Catalog cache invalidated");
    }

    #[cfg(test)]
    fn seed(&mut self, entries: Vec<FileEntry>) {
        self.snapshot = Some(Snapshot {
            entries: Arc::new(entries),
            taken_at: Instant::now(),
        });
    }
}
