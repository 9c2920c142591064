//! Shared test harness utilities for autodoc crates.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use autodoc_config::{TransformConfig, TransformOptions};
use autodoc_engine::{EngineError, EngineResult, SourceEngine};

/// Returns a baseline configuration for tests.
pub fn test_config() -> TransformConfig {
    TransformOptions::default().build()
}

/// Creates `relative` under `dir` with the given contents, including any
/// missing parent directories.
pub fn setup_file(dir: &Path, relative: &str, contents: &str) {
    let path = dir.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent directory");
    }
    let mut file = fs::File::create(&path).expect("create file");
    file.write_all(contents.as_bytes()).expect("write file");
}

/// In-memory engine double implementing the same capability as the real
/// adapter, so the batch loop can be exercised without spawning processes.
#[derive(Default)]
pub struct FakeEngine {
    failures: Vec<PathBuf>,
    processed: Mutex<Vec<PathBuf>>,
}

impl FakeEngine {
    /// Engine that succeeds on every file.
    pub fn succeeding() -> Self {
        FakeEngine::default()
    }

    /// Engine that fails on any path ending with one of `suffixes`.
    pub fn failing_on(suffixes: &[&str]) -> Self {
        FakeEngine {
            failures: suffixes.iter().map(PathBuf::from).collect(),
            processed: Mutex::new(Vec::new()),
        }
    }

    /// Paths the engine was asked to process, in invocation order.
    pub fn processed(&self) -> Vec<PathBuf> {
        self.processed.lock().expect("processed lock").clone()
    }
}

impl SourceEngine for FakeEngine {
    fn process(&self, path: &Path, _config: &TransformConfig) -> EngineResult<()> {
        self.processed
            .lock()
            .expect("processed lock")
            .push(path.to_path_buf());

        if self.failures.iter().any(|suffix| path.ends_with(suffix)) {
            return Err(EngineError::Process {
                path: path.to_path_buf(),
                detail: "synthetic parse failure".to_string(),
            });
        }
        Ok(())
    }
}
