//! Boundary around the external documentation engine.
//!
//! The orchestrator never generates or merges comment text itself; it hands
//! each writable candidate to a [`SourceEngine`] together with the shared
//! [`TransformConfig`] and classifies the outcome. [`CommandEngine`] is the
//! production adapter: it launches the configured engine command once per
//! file, so every invocation gets a fresh context. [`EngineWorkspace`] is the
//! scoped bootstrap the engine may require before any file is processed.

use std::io;
use std::path::{Path, PathBuf};

use autodoc_config::TransformConfig;
use thiserror::Error;

mod command;
mod workspace;

pub use command::{config_env, CommandEngine};
pub use workspace::EngineWorkspace;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to launch engine '{program}': {source}")]
    Spawn { program: String, source: io::Error },

    #[error("engine failed on {}: {detail}", path.display())]
    Process { path: PathBuf, detail: String },

    #[error("workspace error at {}: {source}", path.display())]
    Workspace { path: PathBuf, source: io::Error },
}

pub type EngineResult<T> = Result<T, EngineError>;

/// Capability interface of the external engine: mutate the file in place or
/// report a failure. The adapter owns re-reading and re-writing the file's
/// persisted bytes; the caller only learns success or failure.
pub trait SourceEngine {
    fn process(&self, path: &Path, config: &TransformConfig) -> EngineResult<()>;
}
