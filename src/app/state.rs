//! Defines the central, mutable state of the backend.

use std::path::PathBuf;

use crate::config::Settings;
use crate::core::{Catalog, ScanConfig};

/// Holds the backend state shared by all request handlers.
///
/// Wrapped in an `Arc<tokio::sync::Mutex<...>>`; handlers hold the lock
/// for the duration of their operation, so scans serialize and a
/// settings update can never interleave with an in-flight scan.
pub struct AppState {
    /// The last settings observed from the shell.
    pub settings: Settings,
    /// The file catalog and its cache.
    pub catalog: Catalog,
    /// Where `update-settings` persists. `None` uses the per-user
    /// default location; tests point this at a temp directory.
    pub settings_dir: Option<PathBuf>,
}

impl AppState {
    pub fn new(settings: Settings) -> Self {
        let catalog = Catalog::new(ScanConfig {
            custom_path: settings.wechat_path.clone(),
            use_default_paths: settings.use_default_paths,
        });
        Self {
            settings,
            catalog,
            settings_dir: None,
        }
    }
}

impl Default for AppState {
    /// Creates a default `AppState` instance, loading settings from disk.
    fn default() -> Self {
        Self::new(Settings::load().unwrap_or_default())
    }
}
