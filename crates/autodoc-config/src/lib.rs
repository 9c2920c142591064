//! Option records and configuration assembly for the autodoc batch runner.
//!
//! `TransformOptions` carries the flat set of toggles the invocation surface
//! exposes; [`TransformOptions::build`] maps them into the immutable
//! [`TransformConfig`] shared read-only across the whole run. Project-level
//! settings (include/exclude patterns, header text, template properties) come
//! from an optional `.autodoc.toml` at the scan root and are merged in with
//! [`TransformConfig::with_project`].

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use globset::{Glob, GlobBuilder, GlobMatcher};
use serde::Deserialize;
use thiserror::Error;

pub const CONFIG_FILE_NAME: &str = ".autodoc.toml";

/// Existing-comment handling policy. The variants are mutually exclusive by
/// construction; "no special mode" is represented as `Option::None` rather
/// than a fourth variant, so an unset selector is a legitimate idle state.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Mode {
    /// Keep existing documentation comments untouched.
    Keep,
    /// Replace existing documentation comments.
    Replace,
    /// Complete existing documentation comments in place.
    Complete,
}

impl Mode {
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Keep => "keep",
            Mode::Replace => "replace",
            Mode::Complete => "complete",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Mode {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "keep" => Ok(Mode::Keep),
            "replace" => Ok(Mode::Replace),
            "complete" => Ok(Mode::Complete),
            _ => Err(()),
        }
    }
}

/// Raw option set as supplied by the invocation surface. Defaults mirror the
/// documented defaults of the original tool.
#[derive(Clone, Debug)]
pub struct TransformOptions {
    pub mode: Option<Mode>,
    pub visibility_public: bool,
    pub visibility_package: bool,
    pub visibility_protected: bool,
    pub visibility_private: bool,
    pub comment_types: bool,
    pub comment_fields: bool,
    pub comment_methods: bool,
    pub getter_setter_only: bool,
    pub exclude_getter_setter: bool,
    pub getter_setter_from_field: bool,
    pub getter_setter_from_field_first: bool,
    pub getter_setter_from_field_replace: bool,
    pub create_dummy_comment: bool,
    pub add_todo: bool,
    pub single_line_comment: bool,
    pub use_formatter: bool,
    pub add_header: bool,
    pub replace_header: bool,
    pub multi_comment_header: bool,
    pub header_only: bool,
}

impl Default for TransformOptions {
    fn default() -> Self {
        TransformOptions {
            mode: None,
            visibility_public: true,
            visibility_package: true,
            visibility_protected: false,
            visibility_private: false,
            comment_types: true,
            comment_fields: true,
            comment_methods: true,
            getter_setter_only: false,
            exclude_getter_setter: false,
            getter_setter_from_field: false,
            getter_setter_from_field_first: false,
            getter_setter_from_field_replace: true,
            create_dummy_comment: true,
            add_todo: false,
            single_line_comment: true,
            use_formatter: false,
            add_header: false,
            replace_header: false,
            multi_comment_header: false,
            header_only: false,
        }
    }
}

impl TransformOptions {
    /// Pure mapping from the raw option set to the immutable run
    /// configuration. No I/O, no side effects.
    pub fn build(self) -> TransformConfig {
        TransformConfig {
            mode: self.mode,
            visibility_public: self.visibility_public,
            visibility_package: self.visibility_package,
            visibility_protected: self.visibility_protected,
            visibility_private: self.visibility_private,
            comment_types: self.comment_types,
            comment_fields: self.comment_fields,
            comment_methods: self.comment_methods,
            getter_setter_only: self.getter_setter_only,
            exclude_getter_setter: self.exclude_getter_setter,
            getter_setter_from_field: self.getter_setter_from_field,
            getter_setter_from_field_first: self.getter_setter_from_field_first,
            getter_setter_from_field_replace: self.getter_setter_from_field_replace,
            create_dummy_comment: self.create_dummy_comment,
            add_todo: self.add_todo,
            single_line_comment: self.single_line_comment,
            use_formatter: self.use_formatter,
            add_header: self.add_header,
            replace_header: self.replace_header,
            multi_comment_header: self.multi_comment_header,
            header_only: self.header_only,
            header_text: None,
            properties: BTreeMap::new(),
        }
    }
}

/// Immutable configuration handed to the engine adapter for every file.
/// Built once per run via [`TransformOptions::build`]; the `Option<Mode>`
/// field guarantees that at most one of keep/replace/complete is active.
#[derive(Clone, Debug)]
pub struct TransformConfig {
    pub mode: Option<Mode>,
    pub visibility_public: bool,
    pub visibility_package: bool,
    pub visibility_protected: bool,
    pub visibility_private: bool,
    pub comment_types: bool,
    pub comment_fields: bool,
    pub comment_methods: bool,
    pub getter_setter_only: bool,
    pub exclude_getter_setter: bool,
    pub getter_setter_from_field: bool,
    pub getter_setter_from_field_first: bool,
    pub getter_setter_from_field_replace: bool,
    pub create_dummy_comment: bool,
    pub add_todo: bool,
    pub single_line_comment: bool,
    pub use_formatter: bool,
    pub add_header: bool,
    pub replace_header: bool,
    pub multi_comment_header: bool,
    pub header_only: bool,
    pub header_text: Option<String>,
    pub properties: BTreeMap<String, String>,
}

impl TransformConfig {
    /// Merge project-file settings that have no flag equivalent.
    pub fn with_project(mut self, project: &ProjectConfig) -> Self {
        self.header_text = project.header_text.clone();
        self.properties = project.properties.clone();
        self
    }
}

/// Glob pattern plus compiled matcher. Matching is case-insensitive across
/// the board to support case-insensitive filesystems.
#[derive(Clone, Debug)]
pub struct Pattern {
    original: String,
    matcher: GlobMatcher,
}

impl Pattern {
    fn new(value: String, context: &'static str) -> Result<Self, ConfigError> {
        let glob = GlobBuilder::new(&value)
            .case_insensitive(true)
            .build()
            .map_err(|source| ConfigError::Pattern {
                pattern: value.clone(),
                context,
                source,
            })?;
        Ok(Pattern {
            matcher: glob.compile_matcher(),
            original: value,
        })
    }

    pub fn original(&self) -> &str {
        &self.original
    }

    pub fn is_match(&self, path: &Path) -> bool {
        self.matcher.is_match(path)
    }
}

/// Ordered list of glob patterns.
#[derive(Clone, Debug, Default)]
pub struct PatternList {
    patterns: Vec<Pattern>,
}

impl PatternList {
    fn compile(values: Vec<String>, context: &'static str) -> Result<Self, ConfigError> {
        let mut patterns = Vec::with_capacity(values.len());
        for value in values {
            patterns.push(Pattern::new(value, context)?);
        }
        Ok(PatternList { patterns })
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn matches(&self, path: &Path) -> bool {
        self.patterns.iter().any(|pattern| pattern.is_match(path))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Pattern> {
        self.patterns.iter()
    }
}

/// Errors surfaced while resolving project configuration. All of these are
/// run-fatal: they are reported before any file is touched.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config {path} not found")]
    NotFound { path: PathBuf },
    #[error("failed to read config {path}: {source}")]
    Io { path: PathBuf, source: io::Error },
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("invalid glob pattern '{pattern}' in {context}: {source}")]
    Pattern {
        pattern: String,
        context: &'static str,
        source: globset::Error,
    },
}

/// Project-level settings resolved from `.autodoc.toml`. Absent file means
/// built-in defaults; an explicit override path that does not exist is an
/// error.
#[derive(Clone, Debug)]
pub struct ProjectConfig {
    pub include: PatternList,
    pub exclude: PatternList,
    pub header_text: Option<String>,
    pub properties: BTreeMap<String, String>,
    pub source: Option<PathBuf>,
}

impl ProjectConfig {
    /// Resolve project settings for `root`. `override_path` takes precedence
    /// over `<root>/.autodoc.toml`.
    pub fn load(root: &Path, override_path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match override_path {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::NotFound {
                        path: path.to_path_buf(),
                    });
                }
                Some(path.to_path_buf())
            }
            None => {
                let candidate = root.join(CONFIG_FILE_NAME);
                candidate.exists().then_some(candidate)
            }
        };

        let raw = match &path {
            Some(path) => {
                let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
                    path: path.clone(),
                    source,
                })?;
                toml::from_str::<RawProjectConfig>(&contents).map_err(|source| {
                    ConfigError::Parse {
                        path: path.clone(),
                        source,
                    }
                })?
            }
            None => RawProjectConfig::default(),
        };

        let files = raw.files.unwrap_or_default();
        let include = files
            .include
            .unwrap_or_else(|| vec!["**/*.java".to_string()]);

        Ok(ProjectConfig {
            include: PatternList::compile(include, "files.include")?,
            exclude: PatternList::compile(files.exclude.unwrap_or_default(), "files.exclude")?,
            header_text: raw.header.and_then(|header| header.text),
            properties: raw.properties.unwrap_or_default(),
            source: path,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
struct RawProjectConfig {
    #[serde(default)]
    files: Option<RawFiles>,
    #[serde(default)]
    header: Option<RawHeader>,
    #[serde(default)]
    properties: Option<BTreeMap<String, String>>,
}

#[derive(Debug, Default, Deserialize)]
struct RawFiles {
    #[serde(default)]
    include: Option<Vec<String>>,
    #[serde(default)]
    exclude: Option<Vec<String>>,
}

#[derive(Debug, Default, Deserialize)]
struct RawHeader {
    #[serde(default)]
    text: Option<String>,
}
