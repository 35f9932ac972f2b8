//! Maps a file name's extension to a coarse content category.

use std::path::Path;

use super::FileCategory;

/// Classifies a file by extension, case-insensitively.
///
/// Pure function, no I/O. When no rule matches, the caller-supplied
/// fallback wins: the category-folder strategies pass the category
/// implied by the folder they are scanning, the recursive message walk
/// passes [`FileCategory::Other`].
pub fn classify(file_name: &str, fallback: FileCategory) -> FileCategory {
    let ext = match Path::new(file_name).extension().and_then(|e| e.to_str()) {
        Some(ext) => ext.to_lowercase(),
        None => return fallback,
    };

    match ext.as_str() {
        "jpg" | "jpeg" | "png" | "gif" | "bmp" | "webp" => FileCategory::Image,
        "mp4" | "avi" | "mov" | "wmv" | "flv" | "mkv" => FileCategory::Video,
        "mp3" | "wav" | "aac" | "flac" | "ogg" | "amr" => FileCategory::Audio,
        "doc" | "docx" | "xls" | "xlsx" | "ppt" | "pptx" | "pdf" | "txt" | "md" => {
            FileCategory::File
        }
        "zip" | "rar" | "7z" | "tar" | "gz" | "bz2" => FileCategory::Archive,
        _ => fallback,
    }
}
