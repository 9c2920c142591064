use std::path::{Path, PathBuf};
use std::process::Command;

use autodoc_config::TransformConfig;

use crate::{EngineError, EngineResult, SourceEngine};

/// Adapter that runs the configured engine command once per candidate file.
///
/// The command receives the candidate path as its final argument and the full
/// configuration as `AUTODOC_*` environment variables. A fresh process is
/// spawned per file, so no engine state can leak from one candidate into the
/// next.
pub struct CommandEngine {
    program: String,
    args: Vec<String>,
    workspace_dir: PathBuf,
}

impl CommandEngine {
    pub fn new(
        program: impl Into<String>,
        args: Vec<String>,
        workspace_dir: impl Into<PathBuf>,
    ) -> Self {
        CommandEngine {
            program: program.into(),
            args,
            workspace_dir: workspace_dir.into(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl SourceEngine for CommandEngine {
    fn process(&self, path: &Path, config: &TransformConfig) -> EngineResult<()> {
        let mut command = Command::new(&self.program);
        command
            .args(&self.args)
            .arg(path)
            .env("AUTODOC_WORKSPACE", &self.workspace_dir)
            .envs(config_env(config));

        let output = command.output().map_err(|source| EngineError::Spawn {
            program: self.program.clone(),
            source,
        })?;

        if output.status.success() {
            return Ok(());
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        let detail = match stderr.lines().next_back() {
            Some(line) if !line.trim().is_empty() => line.trim().to_string(),
            _ => format!("exited with {}", output.status),
        };
        Err(EngineError::Process {
            path: path.to_path_buf(),
            detail,
        })
    }
}

/// Serialise the shared configuration into the environment contract the
/// engine command is documented against. Booleans render as `true`/`false`;
/// the mode variable is only present when a mode is selected.
pub fn config_env(config: &TransformConfig) -> Vec<(String, String)> {
    let mut vars: Vec<(String, String)> = Vec::new();

    if let Some(mode) = config.mode {
        vars.push(("AUTODOC_MODE".into(), mode.as_str().into()));
    }

    let toggles: [(&str, bool); 20] = [
        ("AUTODOC_VISIBILITY_PUBLIC", config.visibility_public),
        ("AUTODOC_VISIBILITY_PACKAGE", config.visibility_package),
        ("AUTODOC_VISIBILITY_PROTECTED", config.visibility_protected),
        ("AUTODOC_VISIBILITY_PRIVATE", config.visibility_private),
        ("AUTODOC_COMMENT_TYPES", config.comment_types),
        ("AUTODOC_COMMENT_FIELDS", config.comment_fields),
        ("AUTODOC_COMMENT_METHODS", config.comment_methods),
        ("AUTODOC_GETTER_SETTER_ONLY", config.getter_setter_only),
        ("AUTODOC_EXCLUDE_GETTER_SETTER", config.exclude_getter_setter),
        (
            "AUTODOC_GETTER_SETTER_FROM_FIELD",
            config.getter_setter_from_field,
        ),
        (
            "AUTODOC_GETTER_SETTER_FROM_FIELD_FIRST",
            config.getter_setter_from_field_first,
        ),
        (
            "AUTODOC_GETTER_SETTER_FROM_FIELD_REPLACE",
            config.getter_setter_from_field_replace,
        ),
        ("AUTODOC_CREATE_DUMMY_COMMENT", config.create_dummy_comment),
        ("AUTODOC_ADD_TODO", config.add_todo),
        ("AUTODOC_SINGLE_LINE_COMMENT", config.single_line_comment),
        ("AUTODOC_USE_FORMATTER", config.use_formatter),
        ("AUTODOC_ADD_HEADER", config.add_header),
        ("AUTODOC_REPLACE_HEADER", config.replace_header),
        ("AUTODOC_MULTI_COMMENT_HEADER", config.multi_comment_header),
        ("AUTODOC_HEADER_ONLY", config.header_only),
    ];
    for (name, value) in toggles {
        vars.push((name.into(), value.to_string()));
    }

    if let Some(text) = &config.header_text {
        vars.push(("AUTODOC_HEADER_TEXT".into(), text.clone()));
    }
    if !config.properties.is_empty() {
        let joined = config
            .properties
            .iter()
            .map(|(key, value)| format!("{key}={value}"))
            .collect::<Vec<_>>()
            .join("\n");
        vars.push(("AUTODOC_PROPERTIES".into(), joined));
    }

    vars
}
