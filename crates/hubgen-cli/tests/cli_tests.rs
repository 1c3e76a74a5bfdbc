//! Integration tests for the hubgen binary.

use std::fs;
use std::path::Path;

use assert_cmd::cargo;
use predicates::prelude::*;
use tempfile::TempDir;

const TODO_MODEL: &str = r#"{
  "page": { "name": "Todos", "primary_entity": "Todo" },
  "entities": [
    {
      "name": "Todo",
      "fields": [
        { "name": "title", "type": "String" },
        { "name": "done", "type": "bool" }
      ],
      "unique_field": { "name": "title", "type": "String" },
      "persist": true
    }
  ]
}"#;

const ABOUT_MODEL: &str = r#"{ "page": { "name": "About", "ui_only": true } }"#;

/// A `hubgen` command isolated from the user's config and `.env`.
fn hubgen(dir: &TempDir) -> assert_cmd::Command {
    let mut cmd = cargo::cargo_bin_cmd!("hubgen");
    cmd.current_dir(dir.path())
        .env("HOME", dir.path())
        .env("XDG_CONFIG_HOME", dir.path().join(".config"))
        .env_remove("RUST_LOG")
        .env_remove("HUBGEN_TEMPLATES_DIR")
        .env("NO_COLOR", "1");
    cmd
}

fn write_model(dir: &TempDir, name: &str, body: &str) {
    fs::write(dir.path().join(name), body).unwrap();
}

fn read(path: impl AsRef<Path>) -> String {
    fs::read_to_string(path).unwrap()
}

#[test]
fn help_lists_subcommands() {
    let dir = TempDir::new().unwrap();
    hubgen(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("generate"))
        .stdout(predicate::str::contains("templates"))
        .stdout(predicate::str::contains("completions"));
}

#[test]
fn version_flag() {
    let dir = TempDir::new().unwrap();
    hubgen(&dir)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn init_then_generate_registers_entity_once() {
    let dir = TempDir::new().unwrap();
    let lib = dir.path().join("my_app").join("lib");
    fs::create_dir_all(&lib).unwrap();
    write_model(&dir, "todos.json", TODO_MODEL);

    hubgen(&dir)
        .args(["init", "--root", "my_app/lib"])
        .assert()
        .success()
        .stdout(predicate::str::contains("state/app/app_state.dart"));
    let pubspec = read(dir.path().join("my_app/pubspec.yaml"));
    assert!(pubspec.starts_with("name: my_app\n"));

    for _ in 0..2 {
        hubgen(&dir)
            .args(["generate", "todos.json", "--root", "my_app/lib", "--no-overwrite"])
            .assert()
            .success();
    }

    let app_state = read(lib.join("state/app/app_state.dart"));
    assert_eq!(app_state.matches("final TodoState todoState;").count(), 1);
    assert_eq!(
        app_state
            .matches("import 'package:my_app/state/todo/todo_state.dart';")
            .count(),
        1
    );
    assert!(lib.join("data/model/todo_data.dart").exists());
    assert!(lib.join("features/todos/todos_view.dart").exists());
}

#[test]
fn rerun_reports_unchanged_hubs() {
    let dir = TempDir::new().unwrap();
    write_model(&dir, "todos.json", TODO_MODEL);

    hubgen(&dir)
        .args(["generate", "todos.json", "--project", "shop", "--init", "--yes"])
        .assert()
        .success();

    hubgen(&dir)
        .args(["generate", "todos.json", "--project", "shop", "--no-overwrite"])
        .assert()
        .success()
        .stdout(predicate::str::contains("unchanged state/store.dart"))
        .stdout(predicate::str::contains("skipped"));
}

#[test]
fn generate_into_uninitialised_root_fails() {
    let dir = TempDir::new().unwrap();
    write_model(&dir, "todos.json", TODO_MODEL);

    hubgen(&dir)
        .args(["generate", "todos.json", "--project", "shop"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("not initialised"))
        .stderr(predicate::str::contains("--init"));

    assert!(!dir.path().join("lib/state").exists());
}

#[test]
fn ui_only_page_needs_no_skeleton() {
    let dir = TempDir::new().unwrap();
    write_model(&dir, "about.json", ABOUT_MODEL);

    hubgen(&dir)
        .args(["generate", "about.json", "--project", "shop"])
        .assert()
        .success();

    assert!(dir.path().join("lib/features/about/about_view.dart").exists());
    assert!(!dir.path().join("lib/state").exists());
}

#[test]
fn json_report_is_machine_readable() {
    let dir = TempDir::new().unwrap();
    write_model(&dir, "about.json", ABOUT_MODEL);

    let out = hubgen(&dir)
        .args(["--output-format", "json", "generate", "about.json", "--project", "shop"])
        .output()
        .unwrap();
    assert!(out.status.success());

    let report: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(report["state"]["state"], "done");
    assert_eq!(report["entries"].as_array().unwrap().len(), 2);
    assert_eq!(report["entries"][0]["outcome"], "written");
}

#[test]
fn invalid_model_is_user_error() {
    let dir = TempDir::new().unwrap();
    write_model(&dir, "broken.json", "{ \"page\": ");

    hubgen(&dir)
        .args(["generate", "broken.json", "--project", "shop"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid model file"));
}

#[test]
fn duplicate_entities_are_rejected_before_writing() {
    let dir = TempDir::new().unwrap();
    write_model(
        &dir,
        "dup.json",
        r#"{ "page": { "name": "Todos", "primary_entity": "Todo" },
             "entities": [ { "name": "Todo" }, { "name": "todo" } ] }"#,
    );

    hubgen(&dir)
        .args(["generate", "dup.json", "--project", "shop", "--init"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("todo"));

    assert!(!dir.path().join("lib").exists());
}

#[test]
fn templates_lists_builtin_bundle() {
    let dir = TempDir::new().unwrap();
    hubgen(&dir)
        .args(["templates", "--format", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("view.dart.hbs"))
        .stdout(predicate::str::contains("app_state.dart.hbs"));
}

#[test]
fn templates_check_reports_missing_override() {
    let dir = TempDir::new().unwrap();
    write_model(&dir, "about.json", ABOUT_MODEL);

    hubgen(&dir)
        .args(["templates", "--check", "about.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("covers page 'About'"));
}

#[test]
fn missing_explicit_config_is_configuration_error() {
    let dir = TempDir::new().unwrap();
    hubgen(&dir)
        .args(["--config", "nope.toml", "templates"])
        .assert()
        .code(4);
}

#[test]
fn config_set_then_get() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("hubgen.toml"), "").unwrap();

    hubgen(&dir)
        .args(["--config", "hubgen.toml", "config", "set", "project.name", "shop"])
        .assert()
        .success();

    hubgen(&dir)
        .args(["--config", "hubgen.toml", "config", "get", "project.name"])
        .assert()
        .success()
        .stdout(predicate::str::diff("shop\n"));
}

#[test]
fn config_set_rejects_unknown_key() {
    let dir = TempDir::new().unwrap();
    hubgen(&dir)
        .args(["config", "set", "project.colour", "blue"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Unknown config key"));
}

#[test]
fn env_overrides_config_file() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join(".hubgen.toml"), "[project]\nname = \"from_file\"\n").unwrap();

    hubgen(&dir)
        .env("HUBGEN__PROJECT__NAME", "from_env")
        .args(["config", "get", "project.name"])
        .assert()
        .success()
        .stdout(predicate::str::contains("from_env"));
}

#[test]
fn completions_for_bash() {
    let dir = TempDir::new().unwrap();
    hubgen(&dir)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("hubgen"));
}

#[test]
fn no_color_env_accepts_any_truthy_value() {
    let dir = TempDir::new().unwrap();
    for value in ["1", "yes", "true"] {
        hubgen(&dir)
            .env("NO_COLOR", value)
            .args(["completions", "bash"])
            .assert()
            .success();
    }
}

#[test]
fn no_color_env_falsey_value_keeps_parsing() {
    let dir = TempDir::new().unwrap();
    hubgen(&dir)
        .env("NO_COLOR", "0")
        .arg("--version")
        .assert()
        .success();
}
