// tests/config_loading.rs

use std::io::Write;
use std::path::PathBuf;

use runlens::config::{default_config_path, load_and_validate};
use runlens::debug::engine::CODELLDB_ID;
use runlens::errors::RunlensError;
use runlens::types::EnginePreference;
use tempfile::NamedTempFile;

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(contents.as_bytes()).expect("write config");
    file
}

#[test]
fn full_config_loads_runnables_and_debug_settings() {
    let file = write_config(
        r#"
[debug]
engine = "vadimcn.vscode-lldb"

[debug.source_file_map]
"/rustc/abc123" = "/home/me/src/rust"

[runnable.server]
label = "run server"
bin = "cargo"
args = ["run", "--package", "server"]
extra_args = ["--port", "8080"]
cwd = "backend"

[runnable.server.env]
RUST_LOG = "debug"

[runnable.tests]
bin = "cargo"
args = ["test"]
"#,
    );

    let cfg = load_and_validate(file.path()).expect("valid config");

    let runnables = cfg.runnables();
    assert_eq!(runnables.len(), 2);

    let server = cfg.find_runnable("server").expect("server exists");
    assert_eq!(server.label, "run server");
    assert_eq!(server.bin, "cargo");
    assert_eq!(server.args, vec!["run", "--package", "server"]);
    assert_eq!(server.extra_args, vec!["--port", "8080"]);
    assert_eq!(server.cwd, Some(PathBuf::from("backend")));
    assert_eq!(server.env.get("RUST_LOG").map(String::as_str), Some("debug"));

    // Label falls back to the section name.
    let tests = cfg.find_runnable("tests").expect("tests exists");
    assert_eq!(tests.label, "tests");
    assert_eq!(tests.cwd, None);

    let settings = cfg.debug_settings();
    assert_eq!(
        settings.engine,
        EnginePreference::Explicit(CODELLDB_ID.to_string())
    );
    assert_eq!(
        settings.source_file_map.get("/rustc/abc123").map(String::as_str),
        Some("/home/me/src/rust")
    );
}

#[test]
fn missing_debug_section_defaults_to_auto() {
    let file = write_config(
        r#"
[runnable.check]
bin = "cargo"
args = ["check"]
"#,
    );

    let cfg = load_and_validate(file.path()).expect("valid config");

    assert_eq!(cfg.debug.engine, EnginePreference::Auto);
    assert!(cfg.debug.source_file_map.is_empty());
    assert!(cfg.debug.extensions_dir.is_none());
}

#[test]
fn config_without_runnables_is_rejected() {
    let file = write_config("[debug]\nengine = \"auto\"\n");

    let err = load_and_validate(file.path()).expect_err("invalid config");
    assert!(matches!(err, RunlensError::ConfigError(_)));
}

#[test]
fn empty_bin_is_rejected() {
    let file = write_config(
        r#"
[runnable.broken]
bin = "  "
"#,
    );

    let err = load_and_validate(file.path()).expect_err("invalid config");
    assert!(matches!(err, RunlensError::ConfigError(_)));
}

#[test]
fn duplicate_labels_are_rejected() {
    let file = write_config(
        r#"
[runnable.check]
label = "check it"
bin = "cargo"
args = ["check"]

[runnable.clippy]
label = "check it"
bin = "cargo"
args = ["clippy"]
"#,
    );

    let err = load_and_validate(file.path()).expect_err("invalid config");
    assert!(matches!(err, RunlensError::ConfigError(_)));
}

#[test]
fn unknown_debug_engine_is_rejected() {
    let file = write_config(
        r#"
[debug]
engine = "some.other-debugger"

[runnable.check]
bin = "cargo"
args = ["check"]
"#,
    );

    let err = load_and_validate(file.path()).expect_err("invalid config");
    match err {
        RunlensError::UnknownDebugEngine(id) => assert_eq!(id, "some.other-debugger"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn empty_engine_string_fails_deserialization() {
    let file = write_config(
        r#"
[debug]
engine = ""

[runnable.check]
bin = "cargo"
"#,
    );

    let err = load_and_validate(file.path()).expect_err("invalid config");
    assert!(matches!(err, RunlensError::TomlError(_)));
}

#[test]
fn missing_file_is_an_io_error() {
    let err = load_and_validate("does/not/exist/Runlens.toml").expect_err("missing file");
    assert!(matches!(err, RunlensError::IoError(_)));
}

#[test]
fn default_config_path_is_in_the_working_directory() {
    assert_eq!(default_config_path(), PathBuf::from("Runlens.toml"));
}
