use anyhow::Result;
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};

use super::Settings;

const APP_NAME: &str = "WeChatFileManager";
const SETTINGS_FILE: &str = "settings.json";

/// Returns the platform-specific configuration directory for the application.
pub fn get_settings_directory() -> Option<PathBuf> {
    ProjectDirs::from("com", "wechatfilemanager", APP_NAME)
        .map(|proj_dirs| proj_dirs.config_dir().to_path_buf())
}

fn resolve_directory(override_dir: Option<&Path>) -> Result<PathBuf> {
    match override_dir {
        Some(dir) => Ok(dir.to_path_buf()),
        None => get_settings_directory()
            .ok_or_else(|| anyhow::anyhow!("Could not determine settings directory")),
    }
}

/// Loads the settings from the settings file.
///
/// A missing file yields the defaults. A file that cannot be parsed is
/// logged as a warning and also falls back to the defaults, so a
/// corrupted settings file never prevents startup. `override_dir`
/// replaces the per-user location, which tests use to stay isolated.
pub fn load_settings(override_dir: Option<&Path>) -> Result<Settings> {
    let settings_path = resolve_directory(override_dir)?.join(SETTINGS_FILE);

    if !settings_path.exists() {
        tracing::info!("Settings file not found at {settings_path:?}, using defaults");
        return Ok(Settings::default());
    }

    let content = fs::read_to_string(&settings_path)?;
    match serde_json::from_str::<Settings>(&content) {
        Ok(settings) => {
            tracing::info!("Loaded settings from {settings_path:?}");
            Ok(settings)
        }
        Err(e) => {
            tracing::warn!(
                "Failed to parse settings file at {settings_path:?}: {e}. Falling back to defaults."
            );
            Ok(Settings::default())
        }
    }
}

/// Saves the provided settings, rewriting the file wholesale.
pub fn save_settings(settings: &Settings, override_dir: Option<&Path>) -> Result<()> {
    let settings_dir = resolve_directory(override_dir)?;

    if !settings_dir.exists() {
        fs::create_dir_all(&settings_dir)?;
        tracing::info!("Created settings directory: {settings_dir:?}");
    }

    let settings_path = settings_dir.join(SETTINGS_FILE);
    let settings_json = serde_json::to_string_pretty(settings)?;
    fs::write(&settings_path, settings_json)?;
    tracing::info!("Saved settings to {settings_path:?}");

    Ok(())
}
