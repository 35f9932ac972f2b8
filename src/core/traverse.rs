//! Walks resolved scan roots and emits catalog entries.
//!
//! Every immediate subdirectory of a root is treated as a user profile.
//! WeChat has used several on-disk schemas over time, so each profile is
//! probed with three independent strategies; a missing subpath simply
//! contributes nothing, and a failing unit (one profile, one category
//! folder) is logged and skipped without affecting its siblings.

use chrono::{DateTime, Local};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use walkdir::WalkDir;

use super::{classify, CoreError, FileCategory, FileEntry, IdGenerator, InclusionFilter, ScanRoot};

const FILE_STORAGE_DIR: &str = "FileStorage";
const MSG_ATTACH_DIR: &str = "MsgAttach";
const MSG_DIR: &str = "msg";

/// The fixed category folders of the `FileStorage` layout, with the
/// classification fallback each one implies.
const CATEGORY_FOLDERS: [(&str, FileCategory); 4] = [
    ("Image", FileCategory::Image),
    ("Video", FileCategory::Video),
    ("File", FileCategory::File),
    ("Audio", FileCategory::Audio),
];

/// Walks scan roots and produces [`FileEntry`] values.
///
/// Cloneable so that one traverser (and its id generator) can be shared
/// across per-root worker tasks; ids stay unique for the whole scan.
#[derive(Clone)]
pub struct Traverser {
    ids: Arc<IdGenerator>,
}

impl Default for Traverser {
    fn default() -> Self {
        Self::new()
    }
}

impl Traverser {
    pub fn new() -> Self {
        Self {
            ids: Arc::new(IdGenerator::new()),
        }
    }

    /// Scans one root. Emitted order is not stable across runs; sorting
    /// is a query operation on the catalog, not a traversal guarantee.
    pub fn scan_root(&self, root: &ScanRoot) -> Vec<FileEntry> {
        let mut entries = Vec::new();

        let profiles = match list_subdirs(&root.path) {
            Ok(profiles) => profiles,
            Err(e) => {
                tracing::warn!("Failed to list profiles under {}: {e}", root.path.display());
                return entries;
            }
        };
        tracing::info!(
            "Scanning root {} ({} profile folder(s))",
            root.path.display(),
            profiles.len()
        );

        for (user, profile_path) in profiles {
            self.scan_profile(&profile_path, &user, &mut entries);
        }
        entries
    }

    fn scan_profile(&self, profile: &Path, user: &str, out: &mut Vec<FileEntry>) {
        let file_storage = profile.join(FILE_STORAGE_DIR);
        if file_storage.is_dir() {
            self.scan_category_folders(&file_storage, user, out);
        }

        let msg_attach = file_storage.join(MSG_ATTACH_DIR);
        if msg_attach.is_dir() {
            if let Err(e) = self.scan_msg_attach(&msg_attach, user, out) {
                tracing::warn!("Failed to scan MsgAttach for profile {user}: {e}");
            }
        }

        let msg = profile.join(MSG_DIR);
        if msg.is_dir() {
            if let Err(e) = self.scan_msg_tree(&msg, user, out) {
                tracing::warn!("Failed to scan msg folder for profile {user}: {e}");
            }
        }
    }

    /// Category-folder strategy: `<base>/{Image,Video,File,Audio}/<YYYY-MM>/*`.
    fn scan_category_folders(&self, base: &Path, user: &str, out: &mut Vec<FileEntry>) {
        for (folder, fallback) in CATEGORY_FOLDERS {
            let category_path = base.join(folder);
            if !category_path.is_dir() {
                continue;
            }
            if let Err(e) = self.scan_category_folder(&category_path, fallback, user, out) {
                tracing::warn!("Failed to scan {folder} category for profile {user}: {e}");
            }
        }
    }

    fn scan_category_folder(
        &self,
        category_path: &Path,
        fallback: FileCategory,
        user: &str,
        out: &mut Vec<FileEntry>,
    ) -> Result<(), CoreError> {
        for (year_month, month_path) in list_subdirs(category_path)? {
            if let Err(e) = self.scan_month_folder(&month_path, fallback, user, &year_month, out) {
                tracing::warn!("Failed to scan month folder {year_month}: {e}");
            }
        }
        Ok(())
    }

    fn scan_month_folder(
        &self,
        month_path: &Path,
        fallback: FileCategory,
        user: &str,
        year_month: &str,
        out: &mut Vec<FileEntry>,
    ) -> Result<(), CoreError> {
        let read_dir =
            fs::read_dir(month_path).map_err(|e| CoreError::Io(e, month_path.to_path_buf()))?;
        for dir_entry in read_dir.filter_map(Result::ok) {
            if !dir_entry.file_type().map(|t| t.is_file()).unwrap_or(false) {
                continue;
            }
            let name = dir_entry.file_name().to_string_lossy().to_string();
            let path = dir_entry.path();
            if !InclusionFilter::should_include(&name, &path) {
                continue;
            }
            // The folder name supplies the bucket here, not the mtime.
            if let Some(entry) = self.build_entry(
                &path,
                &name,
                user,
                classify(&name, fallback),
                Some(year_month.to_string()),
            ) {
                out.push(entry);
            }
        }
        Ok(())
    }

    /// Attachment-group strategy: an extra layer of group folders, each
    /// containing the same category layout as `FileStorage` itself.
    fn scan_msg_attach(
        &self,
        msg_attach: &Path,
        user: &str,
        out: &mut Vec<FileEntry>,
    ) -> Result<(), CoreError> {
        for (_group, group_path) in list_subdirs(msg_attach)? {
            self.scan_category_folders(&group_path, user, out);
        }
        Ok(())
    }

    /// Generic-message strategy: unrestricted depth-first walk of every
    /// subfolder of `msg`, fallback category `other`, bucket from mtime.
    fn scan_msg_tree(&self, msg: &Path, user: &str, out: &mut Vec<FileEntry>) -> Result<(), CoreError> {
        for (_sub, sub_path) in list_subdirs(msg)? {
            for walk_entry in WalkDir::new(&sub_path)
                .follow_links(false)
                .into_iter()
                .filter_map(Result::ok)
            {
                if !walk_entry.file_type().is_file() {
                    continue;
                }
                let name = walk_entry.file_name().to_string_lossy().to_string();
                let path = walk_entry.path();
                if !InclusionFilter::should_include(&name, path) {
                    continue;
                }
                if let Some(entry) =
                    self.build_entry(path, &name, user, classify(&name, FileCategory::Other), None)
                {
                    out.push(entry);
                }
            }
        }
        Ok(())
    }

    /// Builds one entry from filesystem metadata. A failed lookup
    /// excludes the file (logged) without aborting the traversal.
    fn build_entry(
        &self,
        path: &Path,
        name: &str,
        user: &str,
        category: FileCategory,
        year_month: Option<String>,
    ) -> Option<FileEntry> {
        let metadata = match fs::metadata(path) {
            Ok(metadata) => metadata,
            Err(e) => {
                tracing::warn!("Failed to stat {}, skipping: {e}", path.display());
                return None;
            }
        };
        let modified: DateTime<Local> = match metadata.modified() {
            Ok(time) => time.into(),
            Err(e) => {
                tracing::warn!("No modification time for {}, skipping: {e}", path.display());
                return None;
            }
        };
        let created = metadata.created().ok().map(DateTime::<Local>::from);
        let year_month = year_month.unwrap_or_else(|| modified.format("%Y-%m").to_string());

        Some(FileEntry {
            id: self.ids.next_id(),
            name: name.to_string(),
            path: path.to_path_buf(),
            size: metadata.len(),
            category,
            created,
            modified,
            user: user.to_string(),
            year_month,
        })
    }
}

/// Lists the immediate subdirectories of `dir` as `(name, path)` pairs.
fn list_subdirs(dir: &Path) -> Result<Vec<(String, PathBuf)>, CoreError> {
    let read_dir = fs::read_dir(dir).map_err(|e| CoreError::Io(e, dir.to_path_buf()))?;
    let mut subdirs = Vec::new();
    for dir_entry in read_dir.filter_map(Result::ok) {
        if dir_entry.file_type().map(|t| t.is_dir()).unwrap_or(false) {
            subdirs.push((
                dir_entry.file_name().to_string_lossy().to_string(),
                dir_entry.path(),
            ));
        }
    }
    Ok(subdirs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::RootSource;
    use std::collections::HashSet;
    use tempfile::{tempdir, TempDir};

    struct Fixture {
        root: ScanRoot,
        _dir: TempDir,
    }

    impl Fixture {
        fn new() -> Self {
            let dir = tempdir().unwrap();
            Self {
                root: ScanRoot {
                    path: dir.path().to_path_buf(),
                    source: RootSource::Custom,
                },
                _dir: dir,
            }
        }

        fn write(&self, relative: &str, len: usize) {
            let path = self.root.path.join(relative);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, vec![b'x'; len]).unwrap();
        }

        fn scan(&self) -> Vec<FileEntry> {
            Traverser::new().scan_root(&self.root)
        }
    }

    #[test]
    fn category_folder_strategy_yields_exactly_the_included_file() {
        let fx = Fixture::new();
        fx.write("alice/FileStorage/Image/2024-01/photo.png", 2000);
        fx.write("alice/FileStorage/Image/2024-01/9999", 500);

        let entries = fx.scan();

        assert_eq!(entries.len(), 1);
        let entry = &entries[0];
        assert_eq!(entry.name, "photo.png");
        assert_eq!(entry.category, FileCategory::Image);
        assert_eq!(entry.year_month, "2024-01");
        assert_eq!(entry.user, "alice");
        assert_eq!(entry.size, 2000);
    }

    #[test]
    fn year_month_comes_from_the_folder_name_not_mtime() {
        let fx = Fixture::new();
        // The file is written now, but lives in a 2019 bucket folder.
        fx.write("alice/FileStorage/File/2019-07/notes.txt", 4096);

        let entries = fx.scan();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].year_month, "2019-07");
    }

    #[test]
    fn unknown_extension_in_category_folder_falls_back_to_folder_category() {
        let fx = Fixture::new();
        fx.write("alice/FileStorage/Audio/2023-03/voice.silk", 4096);

        let entries = fx.scan();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].category, FileCategory::Audio);
    }

    #[test]
    fn msg_attach_groups_repeat_the_category_layout() {
        let fx = Fixture::new();
        fx.write(
            "bob/FileStorage/MsgAttach/9a1f3c/Image/2023-12/pic.gif",
            2048,
        );
        fx.write(
            "bob/FileStorage/MsgAttach/77e0ab/Video/2023-11/clip.mp4",
            4096,
        );

        let mut entries = fx.scan();
        entries.sort_by(|a, b| a.name.cmp(&b.name));

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].name, "clip.mp4");
        assert_eq!(entries[0].category, FileCategory::Video);
        assert_eq!(entries[0].year_month, "2023-11");
        assert_eq!(entries[1].name, "pic.gif");
        assert_eq!(entries[1].category, FileCategory::Image);
    }

    #[test]
    fn msg_tree_walks_every_depth_with_other_fallback() {
        let fx = Fixture::new();
        fx.write("carol/msg/chat_a/deeply/nested/report.pdf", 4096);
        fx.write("carol/msg/chat_a/deeply/nested/blob.unknown", 4096);
        fx.write("carol/msg/chat_b/cache.dat", 4096);

        let mut entries = fx.scan();
        entries.sort_by(|a, b| a.name.cmp(&b.name));

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].name, "blob.unknown");
        assert_eq!(entries[0].category, FileCategory::Other);
        assert_eq!(entries[1].name, "report.pdf");
        assert_eq!(entries[1].category, FileCategory::File);
        // mtime-derived bucket for the recursive strategy.
        let expected = Local::now().format("%Y-%m").to_string();
        assert_eq!(entries[0].year_month, expected);
    }

    #[test]
    fn files_directly_under_msg_are_not_scanned() {
        // Only subfolders of msg are walked; a stray file at the top
        // level belongs to no conversation and is ignored.
        let fx = Fixture::new();
        fx.write("dave/msg/stray.pdf", 4096);

        let entries = fx.scan();
        assert!(entries.is_empty());
    }

    #[test]
    fn profile_without_known_subpaths_contributes_nothing() {
        let fx = Fixture::new();
        fx.write("erin/Backup/whatever.png", 4096);

        let entries = fx.scan();
        assert!(entries.is_empty());
    }

    #[test]
    fn strategies_combine_across_profiles() {
        let fx = Fixture::new();
        fx.write("alice/FileStorage/Image/2024-01/a.png", 2048);
        fx.write("bob/msg/chat/b.zip", 2048);

        let entries = fx.scan();
        assert_eq!(entries.len(), 2);
        let users: HashSet<_> = entries.iter().map(|e| e.user.as_str()).collect();
        assert_eq!(users, HashSet::from(["alice", "bob"]));
    }

    #[test]
    fn ids_are_unique_within_a_scan() {
        let fx = Fixture::new();
        for i in 0..20 {
            fx.write(&format!("alice/FileStorage/Image/2024-01/p{i}.png"), 2048);
        }

        let entries = fx.scan();
        let ids: HashSet<_> = entries.iter().map(|e| e.id.clone()).collect();
        assert_eq!(ids.len(), entries.len());
    }

    #[test]
    fn month_folders_only_list_files_not_nested_dirs() {
        let fx = Fixture::new();
        fx.write("alice/FileStorage/Image/2024-01/sub/inner.png", 2048);

        let entries = fx.scan();
        assert!(entries.is_empty(), "nested dirs in month folders are not walked");
    }
}
