use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, ValueEnum};
use serde_json::json;
use tracing_subscriber::EnvFilter;

use autodoc_batch::{BatchRunner, FileSelector, ResultReport};
use autodoc_config::{Mode, ProjectConfig, TransformOptions};
use autodoc_engine::{CommandEngine, EngineWorkspace};

/// Exit code for a run-fatal bootstrap failure, distinct from per-file
/// outcomes (which never fail the process) and from argument errors.
pub const EXIT_BOOTSTRAP_FAILURE: i32 = 2;

/// Entry point for CLI execution. Returns the desired exit code.
pub fn run() -> Result<i32> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if cli.skip {
        println!("autodoc run skipped");
        return Ok(0);
    }

    // The clock starts before selection and bootstrap so the reported time
    // covers the whole run.
    let started = Instant::now();

    let root = resolve_root(&cli.root);
    let project = ProjectConfig::load(&root, cli.config.as_deref())?;
    let config = cli.transform_options().build().with_project(&project);

    let selector = FileSelector::new(&project);
    let candidates = selector.select(&root);
    println!("Number of candidate files: {} file(s)", candidates.len());
    if candidates.is_empty() {
        return Ok(0);
    }

    let program = cli
        .engine
        .clone()
        .context("--engine is required when there are files to process")?;

    let workspace_dir = cli
        .workspace_dir
        .clone()
        .unwrap_or_else(|| root.join(".autodoc-workspace"));
    let workspace = match EngineWorkspace::initialize(&workspace_dir) {
        Ok(workspace) => workspace,
        Err(err) => {
            eprintln!("fatal: unable to bootstrap engine workspace: {err}");
            return Ok(EXIT_BOOTSTRAP_FAILURE);
        }
    };

    let engine = CommandEngine::new(program, cli.engine_arg.clone(), workspace.path());
    let report = BatchRunner::new(&config).run(&candidates, &engine, started);

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&json_summary(&report))?);
    } else {
        print!("{}", report.render_plain());
    }

    // Teardown is best-effort: the report above stands either way.
    if let Err(err) = workspace.close() {
        tracing::warn!(error = %err, "engine workspace teardown failed");
    }

    Ok(0)
}

fn resolve_root(root: &Path) -> PathBuf {
    // Canonicalise when possible so candidates carry absolute paths; an
    // absent root is handled by the selector (empty selection).
    std::fs::canonicalize(root).unwrap_or_else(|_| root.to_path_buf())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

fn json_summary(report: &ResultReport) -> serde_json::Value {
    json!({
        "succeeded": report.succeeded,
        "failed": report.failed,
        "skipped": report.skipped,
        "read_only": report.read_only,
        "total": report.total(),
        "elapsed_seconds": report.elapsed.as_secs_f64(),
    })
}

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Batch documentation-comment generation over a source tree",
    propagate_version = true
)]
struct Cli {
    /// Root directory to scan
    #[arg(value_name = "ROOT", default_value = ".")]
    root: PathBuf,

    /// External engine command, invoked once per file with the candidate
    /// path as final argument and the configuration as AUTODOC_* variables
    #[arg(long, value_name = "CMD")]
    engine: Option<String>,

    /// Extra fixed argument passed to the engine command (repeatable)
    #[arg(long = "engine-arg", value_name = "ARG", action = ArgAction::Append)]
    engine_arg: Vec<String>,

    /// Existing-comment handling; unset means no special mode
    #[arg(long, value_enum, value_name = "MODE")]
    mode: Option<ModeValue>,

    /// Comment public members
    #[arg(long = "public", default_value_t = true, action = ArgAction::Set, value_name = "BOOL")]
    visibility_public: bool,

    /// Comment package-visible members
    #[arg(long = "package", default_value_t = true, action = ArgAction::Set, value_name = "BOOL")]
    visibility_package: bool,

    /// Comment protected members
    #[arg(long = "protected", default_value_t = false, action = ArgAction::Set, value_name = "BOOL")]
    visibility_protected: bool,

    /// Comment private members
    #[arg(long = "private", default_value_t = false, action = ArgAction::Set, value_name = "BOOL")]
    visibility_private: bool,

    /// Comment type declarations
    #[arg(long = "types", default_value_t = true, action = ArgAction::Set, value_name = "BOOL")]
    comment_types: bool,

    /// Comment fields
    #[arg(long = "fields", default_value_t = true, action = ArgAction::Set, value_name = "BOOL")]
    comment_fields: bool,

    /// Comment methods
    #[arg(long = "methods", default_value_t = true, action = ArgAction::Set, value_name = "BOOL")]
    comment_methods: bool,

    /// Only comment getters and setters
    #[arg(long = "getter-setter-only", default_value_t = false, action = ArgAction::Set, value_name = "BOOL")]
    getter_setter_only: bool,

    /// Exclude getters and setters from commenting
    #[arg(long = "exclude-getter-setter", default_value_t = false, action = ArgAction::Set, value_name = "BOOL")]
    exclude_getter_setter: bool,

    /// Derive getter/setter comments from the backing field
    #[arg(long = "getter-setter-from-field", default_value_t = false, action = ArgAction::Set, value_name = "BOOL")]
    getter_setter_from_field: bool,

    /// Use only the first sentence of the field comment
    #[arg(long = "getter-setter-from-field-first", default_value_t = false, action = ArgAction::Set, value_name = "BOOL")]
    getter_setter_from_field_first: bool,

    /// Replace existing getter/setter comments derived from fields
    #[arg(long = "getter-setter-from-field-replace", default_value_t = true, action = ArgAction::Set, value_name = "BOOL")]
    getter_setter_from_field_replace: bool,

    /// Create a placeholder comment from the element name
    #[arg(long = "dummy-comment", default_value_t = true, action = ArgAction::Set, value_name = "BOOL")]
    create_dummy_comment: bool,

    /// Tag generated comments with a TODO marker
    #[arg(long = "todo", default_value_t = false, action = ArgAction::Set, value_name = "BOOL")]
    add_todo: bool,

    /// Render single-line field comments
    #[arg(long = "single-line", default_value_t = true, action = ArgAction::Set, value_name = "BOOL")]
    single_line_comment: bool,

    /// Run the engine's formatter over touched comments
    #[arg(long = "formatter", default_value_t = false, action = ArgAction::Set, value_name = "BOOL")]
    use_formatter: bool,

    /// Insert a file header when missing
    #[arg(long = "add-header", default_value_t = false, action = ArgAction::Set, value_name = "BOOL")]
    add_header: bool,

    /// Replace an existing file header
    #[arg(long = "replace-header", default_value_t = false, action = ArgAction::Set, value_name = "BOOL")]
    replace_header: bool,

    /// Treat consecutive comments as one header block
    #[arg(long = "multi-comment-header", default_value_t = false, action = ArgAction::Set, value_name = "BOOL")]
    multi_comment_header: bool,

    /// Only insert/refresh headers, no comment generation
    #[arg(long = "header-only", default_value_t = false, action = ArgAction::Set, value_name = "BOOL")]
    header_only: bool,

    /// Workspace directory the engine may require (default: ROOT/.autodoc-workspace)
    #[arg(long = "workspace-dir", value_name = "PATH")]
    workspace_dir: Option<PathBuf>,

    /// Explicit project config file (default: ROOT/.autodoc.toml when present)
    #[arg(long = "config", value_name = "PATH")]
    config: Option<PathBuf>,

    /// Skip the entire run with an informational message
    #[arg(long)]
    skip: bool,

    /// Trace every candidate and its outcome
    #[arg(long)]
    verbose: bool,

    /// Emit the summary as JSON
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn transform_options(&self) -> TransformOptions {
        TransformOptions {
            mode: self.mode.map(ModeValue::into_mode),
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
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum ModeValue {
    Keep,
    Replace,
    Complete,
}

impl ModeValue {
    fn into_mode(self) -> Mode {
        match self {
            ModeValue::Keep => Mode::Keep,
            ModeValue::Replace => Mode::Replace,
            ModeValue::Complete => Mode::Complete,
        }
    }
}
