use std::fs;
use std::path::{Path, PathBuf};

use autodoc_config::ProjectConfig;
use walkdir::{DirEntry, WalkDir};

/// Build-output directory names that are pruned in addition to hidden
/// (dot-prefixed) directories, which already cover `.git`/`.svn`/`.hg`.
const DEFAULT_EXCLUDED_DIRS: &[&str] = &["target", "build", "out", "bin", "node_modules"];

/// A file selected by traversal for potential transformation. The existence
/// and writability flags are a snapshot taken at selection time; the runner
/// re-checks both before processing because the filesystem may change in
/// between.
#[derive(Clone, Debug)]
pub struct FileCandidate {
    pub path: PathBuf,
    pub existed: bool,
    pub writable: bool,
}

impl FileCandidate {
    fn snapshot(path: PathBuf) -> Self {
        let writable = is_writable(&path);
        FileCandidate {
            existed: path.exists(),
            writable,
            path,
        }
    }
}

pub(crate) fn is_writable(path: &Path) -> bool {
    fs::metadata(path)
        .map(|metadata| !metadata.permissions().readonly())
        .unwrap_or(false)
}

/// Recursive candidate scanner.
///
/// Traversal is depth-first with directory entries sorted by file name, so
/// the returned order is deterministic (lexicographic within each
/// directory). Matching against the include/exclude patterns is
/// case-insensitive, symbolic links are never followed, and unreadable
/// subtrees are skipped rather than failing the whole scan.
pub struct FileSelector {
    project: ProjectConfig,
}

impl FileSelector {
    pub fn new(project: &ProjectConfig) -> Self {
        FileSelector {
            project: project.clone(),
        }
    }

    /// Scan `root` and return the matching candidates. An absent root or a
    /// root that is not a directory yields an empty list; there is simply
    /// nothing to process.
    pub fn select(&self, root: &Path) -> Vec<FileCandidate> {
        if !root.is_dir() {
            return Vec::new();
        }

        let mut candidates = Vec::new();
        let walker = WalkDir::new(root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !is_pruned_dir(entry));

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    // Best-effort policy: unreadable subtrees drop out of
                    // the scan without aborting it.
                    tracing::debug!(error = %err, "skipping unreadable entry");
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }

            let relative = entry.path().strip_prefix(root).unwrap_or(entry.path());
            if !self.project.include.matches(relative) {
                continue;
            }
            if self.project.exclude.matches(relative) {
                continue;
            }

            candidates.push(FileCandidate::snapshot(entry.path().to_path_buf()));
        }

        candidates
    }
}

fn is_pruned_dir(entry: &DirEntry) -> bool {
    if !entry.file_type().is_dir() {
        return false;
    }
    let name = entry.file_name().to_string_lossy();
    name.starts_with('.') || DEFAULT_EXCLUDED_DIRS.contains(&name.as_ref())
}
