//! Read-only filesystem access.
//!
//! Nothing here fails: an unreadable directory lists as empty and an
//! unreadable file reads as `None`. The failure is logged and the caller
//! skips whatever depended on it, so one bad path never aborts a run.

use std::{
    fs,
    path::{Path, PathBuf},
};

use walkdir::WalkDir;

/// Names of the subdirectories of `path`, sorted.
pub fn list_directories(path: &Path) -> Vec<String> {
    list_entries(path, |file_type| file_type.is_dir())
}

/// Names of the regular files in `path`, sorted.
pub fn list_files(path: &Path) -> Vec<String> {
    list_entries(path, |file_type| file_type.is_file())
}

fn list_entries(path: &Path, keep: impl Fn(&fs::FileType) -> bool) -> Vec<String> {
    let entries = match fs::read_dir(path) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!("Cannot list {}: {e}", path.display());
            return Vec::new();
        }
    };

    let mut names: Vec<String> = entries
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::warn!("Cannot read entry in {}: {e}", path.display());
                None
            }
        })
        .filter(|entry| {
            // Follow symlinks so a linked lesson directory still counts.
            fs::metadata(entry.path())
                .map(|meta| keep(&meta.file_type()))
                .unwrap_or(false)
        })
        .filter_map(|entry| entry.file_name().into_string().ok())
        .collect();

    names.sort();
    names
}

/// Reads a file as UTF-8 text.
///
/// Returns `None` (and logs) on any failure: missing file, permission error,
/// broken symlink or invalid UTF-8.
pub fn read_text(path: &Path) -> Option<String> {
    match fs::read_to_string(path) {
        Ok(text) => Some(text),
        Err(e) => {
            tracing::warn!("Cannot read {}: {e}", path.display());
            None
        }
    }
}

/// Every directory under `root` (including `root`), depth-first and sorted.
///
/// `skip` is consulted with each directory name below the root; a skipped
/// directory is not descended into. `max_depth` bounds the recursion, with
/// the root at depth 0.
pub fn walk_directories(
    root: &Path,
    max_depth: Option<usize>,
    skip: impl Fn(&str) -> bool,
) -> Vec<PathBuf> {
    let mut walker = WalkDir::new(root).follow_links(true).sort_by_file_name();
    if let Some(depth) = max_depth {
        walker = walker.max_depth(depth);
    }

    walker
        .into_iter()
        .filter_entry(|entry| {
            entry.depth() == 0
                || !entry.file_type().is_dir()
                || !entry.file_name().to_str().is_some_and(&skip)
        })
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::warn!("Skipping unreadable path while scanning: {e}");
                None
            }
        })
        .filter(|entry| entry.file_type().is_dir())
        .map(walkdir::DirEntry::into_path)
        .collect()
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    fn tree() -> TempDir {
        let tmp = TempDir::new().expect("failed to create temp dir");
        let root = tmp.path();
        fs::create_dir_all(root.join("02-b/nested")).unwrap();
        fs::create_dir_all(root.join("01-a")).unwrap();
        fs::create_dir_all(root.join("node_modules/pkg")).unwrap();
        fs::write(root.join("README.md"), "# Module").unwrap();
        fs::write(root.join("01-a/README.md"), "# A").unwrap();
        tmp
    }

    #[test]
    fn lists_directories_and_files_separately() {
        let tmp = tree();

        assert_eq!(
            list_directories(tmp.path()),
            ["01-a", "02-b", "node_modules"]
        );
        assert_eq!(list_files(tmp.path()), ["README.md"]);
    }

    #[test]
    fn unreadable_directory_lists_as_empty() {
        let tmp = tree();
        let missing = tmp.path().join("does-not-exist");

        assert!(list_directories(&missing).is_empty());
        assert!(list_files(&missing).is_empty());
    }

    #[test]
    fn read_text_returns_none_on_failure() {
        let tmp = tree();

        assert_eq!(read_text(&tmp.path().join("01-a/README.md")).as_deref(), Some("# A"));
        assert_eq!(read_text(&tmp.path().join("01-a/README_ID.md")), None);
        assert_eq!(read_text(&tmp.path().join("01-a")), None);
    }

    #[test]
    fn walk_skips_named_directories_and_their_children() {
        let tmp = tree();
        let root = tmp.path();

        let dirs = walk_directories(root, None, |name| name == "node_modules");

        assert_eq!(
            dirs,
            vec![
                root.to_path_buf(),
                root.join("01-a"),
                root.join("02-b"),
                root.join("02-b/nested"),
            ]
        );
    }

    #[test]
    fn walk_respects_max_depth() {
        let tmp = tree();
        let root = tmp.path();

        let dirs = walk_directories(root, Some(1), |_| false);

        assert!(dirs.contains(&root.join("02-b")));
        assert!(!dirs.contains(&root.join("02-b/nested")));
    }
}
