use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::{EngineError, EngineResult};

/// Scoped bootstrap context for engines that need ambient state before the
/// first file is processed.
///
/// Initialisation happens exactly once per run and creates the workspace
/// directory plus its `.metadata` store; failure here is run-fatal. Teardown
/// happens exactly once via [`EngineWorkspace::close`], and `Drop` covers the
/// early-exit paths so the workspace is released no matter which file
/// triggered an error. A workspace directory that already existed is left in
/// place on teardown; only the `.metadata` store is removed.
pub struct EngineWorkspace {
    dir: PathBuf,
    created: bool,
    closed: bool,
}

impl EngineWorkspace {
    pub fn initialize(dir: &Path) -> EngineResult<Self> {
        let created = !dir.exists();
        fs::create_dir_all(dir).map_err(|source| EngineError::Workspace {
            path: dir.to_path_buf(),
            source,
        })?;
        let metadata = dir.join(".metadata");
        fs::create_dir_all(&metadata).map_err(|source| EngineError::Workspace {
            path: metadata,
            source,
        })?;
        tracing::debug!(workspace = %dir.display(), "engine workspace initialized");

        Ok(EngineWorkspace {
            dir: dir.to_path_buf(),
            created,
            closed: false,
        })
    }

    pub fn path(&self) -> &Path {
        &self.dir
    }

    /// Tear the workspace down. Errors here are reported to the caller but
    /// must not change an already-computed report.
    pub fn close(mut self) -> EngineResult<()> {
        self.closed = true;
        teardown(&self.dir, self.created).map_err(|source| EngineError::Workspace {
            path: self.dir.clone(),
            source,
        })
    }
}

impl Drop for EngineWorkspace {
    fn drop(&mut self) {
        if self.closed {
            return;
        }
        if let Err(err) = teardown(&self.dir, self.created) {
            tracing::warn!(
                workspace = %self.dir.display(),
                error = %err,
                "engine workspace teardown failed"
            );
        }
    }
}

fn teardown(dir: &Path, created: bool) -> io::Result<()> {
    if created {
        fs::remove_dir_all(dir)
    } else {
        let metadata = dir.join(".metadata");
        if metadata.exists() {
            fs::remove_dir_all(&metadata)
        } else {
            Ok(())
        }
    }
}
