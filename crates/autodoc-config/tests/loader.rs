use std::fs;
use std::path::Path;

use autodoc_config::{ConfigError, Mode, ProjectConfig, TransformOptions, CONFIG_FILE_NAME};
use tempfile::TempDir;

#[test]
fn mode_selector_parses_known_values() {
    assert_eq!("keep".parse::<Mode>(), Ok(Mode::Keep));
    assert_eq!("replace".parse::<Mode>(), Ok(Mode::Replace));
    assert_eq!("complete".parse::<Mode>(), Ok(Mode::Complete));
    assert!("".parse::<Mode>().is_err());
    assert!("KEEP".parse::<Mode>().is_err());
    assert!("merge".parse::<Mode>().is_err());
}

#[test]
fn build_keeps_mode_exclusive() {
    for selector in [None, Some(Mode::Keep), Some(Mode::Replace), Some(Mode::Complete)] {
        let options = TransformOptions {
            mode: selector,
            ..TransformOptions::default()
        };
        let config = options.build();
        assert_eq!(config.mode, selector);
    }
}

#[test]
fn build_applies_documented_defaults() {
    let config = TransformOptions::default().build();

    assert!(config.visibility_public);
    assert!(config.visibility_package);
    assert!(!config.visibility_protected);
    assert!(!config.visibility_private);
    assert!(config.comment_types);
    assert!(config.comment_fields);
    assert!(config.comment_methods);
    assert!(config.create_dummy_comment);
    assert!(config.single_line_comment);
    assert!(config.getter_setter_from_field_replace);
    assert!(!config.add_header);
    assert!(!config.header_only);
    assert!(config.mode.is_none());
    assert!(config.header_text.is_none());
    assert!(config.properties.is_empty());
}

#[test]
fn missing_project_file_yields_defaults() {
    let temp = TempDir::new().expect("tempdir");
    let project = ProjectConfig::load(temp.path(), None).expect("load defaults");

    assert!(project.source.is_none());
    assert!(project.exclude.is_empty());
    assert!(project.include.matches(Path::new("src/Main.java")));
    assert!(project.include.matches(Path::new("src/LEGACY.JAVA")));
    assert!(!project.include.matches(Path::new("src/main.rs")));
}

#[test]
fn project_file_supplies_patterns_and_header() {
    let temp = TempDir::new().expect("tempdir");
    fs::write(
        temp.path().join(CONFIG_FILE_NAME),
        concat!(
            "[files]\n",
            "include = [\"src/**/*.java\"]\n",
            "exclude = [\"**/generated/**\"]\n\n",
            "[header]\n",
            "text = \"Copyright ${year}\"\n\n",
            "[properties]\n",
            "year = \"2025\"\n",
        ),
    )
    .expect("write config");

    let project = ProjectConfig::load(temp.path(), None).expect("load config");
    let config = TransformOptions::default().build().with_project(&project);

    assert!(project.source.is_some());
    assert!(project.include.matches(Path::new("src/a/B.java")));
    assert!(!project.include.matches(Path::new("docs/B.java")));
    assert!(project.exclude.matches(Path::new("src/generated/C.java")));
    assert_eq!(config.header_text.as_deref(), Some("Copyright ${year}"));
    assert_eq!(config.properties.get("year").map(String::as_str), Some("2025"));
}

#[test]
fn explicit_override_must_exist() {
    let temp = TempDir::new().expect("tempdir");
    let missing = temp.path().join("nowhere.toml");

    let err = ProjectConfig::load(temp.path(), Some(&missing)).unwrap_err();
    assert!(matches!(err, ConfigError::NotFound { .. }));
}

#[test]
fn malformed_toml_is_reported() {
    let temp = TempDir::new().expect("tempdir");
    fs::write(temp.path().join(CONFIG_FILE_NAME), "[files\ninclude = 3").expect("write config");

    let err = ProjectConfig::load(temp.path(), None).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
}

#[test]
fn invalid_glob_is_reported() {
    let temp = TempDir::new().expect("tempdir");
    fs::write(
        temp.path().join(CONFIG_FILE_NAME),
        "[files]\ninclude = [\"src/[\"]\n",
    )
    .expect("write config");

    let err = ProjectConfig::load(temp.path(), None).unwrap_err();
    assert!(matches!(err, ConfigError::Pattern { .. }));
}
