//! Source file discovery.
//!
//! Walks the input tree and collects every file carrying the source
//! extension. Entries are visited in file-name order within each directory,
//! so the resulting list (and therefore chunk membership) is stable for a
//! given tree.

use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};
use trackforged_common::{Extension, SourceFile};
use walkdir::WalkDir;

/// Find all files under `root` whose extension is exactly `extension`.
///
/// Unreadable directory entries are logged and skipped; unreadable files,
/// dangling symlinks included, are still returned and fail later, when the
/// encoder opens them.
pub fn discover(root: &Path, extension: &Extension) -> Vec<SourceFile> {
    info!("Scanning {:?} for {} files", root, extension);
    let mut files = Vec::new();

    for entry in WalkDir::new(root)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                match e.path().filter(|path| is_dangling_link(path)) {
                    Some(path) if extension.matches(path) => {
                        debug!("Found dangling link {:?}", path);
                        files.push(SourceFile::new(path));
                    }
                    Some(_) => {}
                    None => warn!("Skipping unreadable entry: {}", e),
                }
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        if !extension.matches(entry.path()) {
            continue;
        }

        debug!("Found {:?}", entry.path());
        files.push(SourceFile::new(entry.into_path()));
    }

    info!("Scan complete: {} files found under {:?}", files.len(), root);
    files
}

/// A symlink whose target cannot be resolved.
fn is_dangling_link(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok_and(|m| m.file_type().is_symlink())
        && fs::metadata(path).is_err()
}
