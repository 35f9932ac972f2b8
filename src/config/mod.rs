pub mod settings;

use serde::{Deserialize, Serialize};

/// User-facing settings persisted to the per-user settings file.
///
/// The catalog only observes these through explicit setter calls; the
/// struct itself is owned by the collaborator layer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Optional override root to scan; empty means "no custom path".
    pub wechat_path: String,
    /// Whether the known default WeChat layouts are probed.
    pub use_default_paths: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            wechat_path: String::new(),
            use_default_paths: true,
        }
    }
}

impl Settings {
    pub fn load() -> anyhow::Result<Self> {
        settings::load_settings(None)
    }
}
