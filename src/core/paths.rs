//! Resolves the candidate root directories to scan.
//!
//! WeChat has shipped several incompatible on-disk layouts over time, so
//! a scan starts from every known location that actually exists on this
//! machine, plus an optional user-supplied override.

use std::path::PathBuf;

use super::{RootSource, ScanRoot};

const APP_STORE_PACKAGE: &str = "TencentWeChatLimited.forWindows10_sdtnhv12zgd7a";

/// Resolves the scan roots for the given configuration.
///
/// The custom path comes first when it is non-empty and exists, followed
/// by the default layouts in a fixed order. Candidates that do not exist
/// are skipped silently; an empty result is a valid outcome that the
/// caller surfaces as "nothing found".
pub fn resolve_roots(custom_path: &str, use_defaults: bool) -> Vec<ScanRoot> {
    let mut roots = Vec::new();

    if !custom_path.is_empty() {
        let path = PathBuf::from(custom_path);
        if path.is_dir() {
            roots.push(ScanRoot {
                path,
                source: RootSource::Custom,
            });
        } else {
            tracing::warn!("Custom WeChat path does not exist, skipping: {custom_path}");
        }
    }

    if use_defaults {
        for (path, source) in default_candidates() {
            if path.is_dir() {
                roots.push(ScanRoot { path, source });
            }
        }
    }

    tracing::info!("Resolved {} scan root(s)", roots.len());
    roots
}

/// The known default layouts, in resolution order.
fn default_candidates() -> Vec<(PathBuf, RootSource)> {
    let mut candidates = Vec::new();
    let home = dirs::home_dir().unwrap_or_default();

    candidates.push((
        home.join("Documents").join("WeChat Files"),
        RootSource::Documents,
    ));

    // The store-packaged build keeps its cache under LOCALAPPDATA.
    let local_app_data = std::env::var_os("LOCALAPPDATA")
        .map(PathBuf::from)
        .unwrap_or_else(|| home.join("AppData").join("Local"));
    candidates.push((
        local_app_data
            .join("Packages")
            .join(APP_STORE_PACKAGE)
            .join("LocalCache")
            .join("Roaming")
            .join("Tencent")
            .join("WeChatAppStore")
            .join("WeChatAppStore Files"),
        RootSource::AppStore,
    ));

    candidates.push((
        home.join("Documents").join("xwechat_files"),
        RootSource::XWeChat,
    ));

    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn existing_custom_path_is_included_first() {
        let dir = tempdir().unwrap();
        let custom = dir.path().to_string_lossy().to_string();

        let roots = resolve_roots(&custom, false);

        assert_eq!(roots.len(), 1);
        assert_eq!(roots[0].source, RootSource::Custom);
        assert_eq!(roots[0].path, dir.path());
    }

    #[test]
    fn missing_custom_path_is_skipped() {
        let roots = resolve_roots("/definitely/not/a/real/wechat/dir", false);
        assert!(roots.is_empty());
    }

    #[test]
    fn empty_custom_path_without_defaults_yields_nothing() {
        let roots = resolve_roots("", false);
        assert!(roots.is_empty());
    }

    #[test]
    fn default_candidates_keep_fixed_order() {
        let candidates = default_candidates();
        let sources: Vec<_> = candidates.iter().map(|(_, s)| *s).collect();
        assert_eq!(
            sources,
            vec![
                RootSource::Documents,
                RootSource::AppStore,
                RootSource::XWeChat
            ]
        );
    }
}
