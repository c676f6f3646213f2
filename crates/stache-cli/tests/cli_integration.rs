// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Integration tests for the render and check commands.
//!
//! These tests build small template projects in temporary directories and
//! run both the library entry points and the `stache` binary against them.

use std::fs;
use std::path::Path;
use std::process::Command;

use tempfile::tempdir;

use stache_cli::commands::check::check;
use stache_cli::commands::render::{render_to_string, RenderArgs};
use stache_cli::config::Config;

/// Create a project with a page, two partials and data files.
fn setup_project(dir: &Path) {
    fs::create_dir_all(dir.join("partials/layout")).unwrap();

    fs::write(
        dir.join("page.mustache"),
        "{{> layout/header}}\n<ul>\n  {{#items}}\n  <li>{{name}}</li>\n  {{/items}}\n</ul>\n",
    )
    .unwrap();
    fs::write(
        dir.join("partials/layout/header.mustache"),
        "<h1>{{title}}</h1>\n",
    )
    .unwrap();
    fs::write(
        dir.join("data.json"),
        r#"{ "title": "Tom & Jerry", "items": [{ "name": "a" }, { "name": "b" }] }"#,
    )
    .unwrap();
    fs::write(
        dir.join("data.toml"),
        "title = \"Tom & Jerry\"\n\n[[items]]\nname = \"a\"\n\n[[items]]\nname = \"b\"\n",
    )
    .unwrap();
}

fn args(dir: &Path, data: &str) -> RenderArgs {
    RenderArgs {
        template: dir.join("page.mustache"),
        data: Some(dir.join(data)),
        partials: Some(dir.join("partials")),
        output: None,
        raw: false,
    }
}

const EXPECTED: &str = "<h1>Tom &amp; Jerry</h1>\n<ul>\n  <li>a</li>\n  <li>b</li>\n</ul>\n";

#[test]
fn test_render_json_data_with_partials() {
    let dir = tempdir().unwrap();
    setup_project(dir.path());

    let out = render_to_string(&Config::default(), &args(dir.path(), "data.json")).unwrap();
    assert_eq!(out, EXPECTED);
}

#[test]
fn test_render_toml_data_matches_json() {
    let dir = tempdir().unwrap();
    setup_project(dir.path());

    let out = render_to_string(&Config::default(), &args(dir.path(), "data.toml")).unwrap();
    assert_eq!(out, EXPECTED);
}

#[test]
fn test_render_raw_disables_escaping() {
    let dir = tempdir().unwrap();
    setup_project(dir.path());

    let mut args = args(dir.path(), "data.json");
    args.raw = true;
    let out = render_to_string(&Config::default(), &args).unwrap();
    assert!(out.starts_with("<h1>Tom & Jerry</h1>\n"));
}

#[test]
fn test_render_without_partials_dir_drops_partials() {
    let dir = tempdir().unwrap();
    setup_project(dir.path());

    let mut args = args(dir.path(), "data.json");
    args.partials = None;
    let out = render_to_string(&Config::default(), &args).unwrap();
    assert_eq!(out, "<ul>\n  <li>a</li>\n  <li>b</li>\n</ul>\n");
}

#[test]
fn test_partials_dir_from_config() {
    let dir = tempdir().unwrap();
    setup_project(dir.path());
    fs::rename(
        dir.path().join("partials/layout/header.mustache"),
        dir.path().join("partials/layout/header.html"),
    )
    .unwrap();

    let config = Config::from_toml(&format!(
        "[partials]\ndir = {:?}\nextension = \"html\"\n",
        dir.path().join("partials").display().to_string()
    ))
    .unwrap();
    let mut args = args(dir.path(), "data.json");
    args.partials = None;

    let out = render_to_string(&config, &args).unwrap();
    assert_eq!(out, EXPECTED);
}

#[test]
fn test_render_reports_parse_errors_with_file_name() {
    let dir = tempdir().unwrap();
    let template = dir.path().join("broken.mustache");
    fs::write(&template, "{{#open}}never closed\n").unwrap();

    let args = RenderArgs {
        template,
        ..RenderArgs::default()
    };
    let err = render_to_string(&Config::default(), &args).unwrap_err();
    let message = err.to_string();
    assert!(message.contains("broken.mustache"), "{message}");
    assert!(message.contains("unclosed section"), "{message}");
}

#[test]
fn test_check_reports_failures_and_unmatched_patterns() {
    let dir = tempdir().unwrap();
    setup_project(dir.path());
    fs::write(dir.path().join("bad.mustache"), "{{#a}}{{/b}}").unwrap();

    let root = dir.path().display().to_string();
    let report = check(
        &Config::default(),
        &[
            format!("{root}/*.mustache"),
            format!("{root}/partials/**/*.mustache"),
            format!("{root}/*.hbs"),
        ],
    )
    .unwrap();

    assert_eq!(report.passed.len(), 2);
    assert_eq!(report.failed.len(), 1);
    assert!(report.failed[0].0.ends_with("bad.mustache"));
    assert!(report.failed[0].1.contains("closed by"));
    assert_eq!(report.unmatched, vec![format!("{root}/*.hbs")]);
    assert!(!report.is_clean());
}

#[test]
fn test_binary_renders_to_output_file() {
    let dir = tempdir().unwrap();
    setup_project(dir.path());
    let output = dir.path().join("out.html");

    let status = Command::new(env!("CARGO_BIN_EXE_stache"))
        .current_dir(dir.path())
        .args(["render", "page.mustache", "--data", "data.json"])
        .args(["--partials", "partials", "--output", "out.html"])
        .status()
        .unwrap();

    assert!(status.success());
    assert_eq!(fs::read_to_string(output).unwrap(), EXPECTED);
}

#[test]
fn test_binary_check_exit_codes() {
    let dir = tempdir().unwrap();
    setup_project(dir.path());

    let ok = Command::new(env!("CARGO_BIN_EXE_stache"))
        .current_dir(dir.path())
        .args(["check", "*.mustache"])
        .output()
        .unwrap();
    assert!(ok.status.success());

    fs::write(dir.path().join("bad.mustache"), "{{unclosed").unwrap();
    let failed = Command::new(env!("CARGO_BIN_EXE_stache"))
        .current_dir(dir.path())
        .args(["check", "*.mustache"])
        .output()
        .unwrap();
    assert!(!failed.status.success());
    let stdout = String::from_utf8_lossy(&failed.stdout);
    assert!(stdout.contains("bad.mustache"), "{stdout}");
}
