//! Image folder scanning.

use std::io;
use std::path::Path;

use walkdir::WalkDir;

use crate::error::IngestResult;

/// True when `path` carries one of the allowed image extensions
/// (compared case-insensitively, without the dot).
#[must_use]
pub fn is_image_file(path: &Path, allowed_extensions: &[String]) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| allowed_extensions.iter().any(|allowed| allowed == &ext))
}

/// Recursively scan `folder` for image files.
///
/// Returns full paths in walk order. A missing folder or a path that
/// is not a directory is an error; unreadable entries inside the walk
/// are skipped.
pub fn scan_image_folder(folder: &Path, allowed_extensions: &[String]) -> IngestResult<Vec<String>> {
    if !folder.exists() {
        return Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("folder not found: {}", folder.display()),
        )
        .into());
    }

    if !folder.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("expected a directory: {}", folder.display()),
        )
        .into());
    }

    let mut images = Vec::new();
    for entry in WalkDir::new(folder)
        .follow_links(false)
        .into_iter()
        .filter_map(Result::ok)
    {
        let path = entry.path();
        if path.is_file() && is_image_file(path, allowed_extensions) {
            images.push(path.to_string_lossy().into_owned());
        }
    }

    log::info!("found {} images in {}", images.len(), folder.display());
    Ok(images)
}
