//! Integration tests for `loglayout render` and `loglayout config`.
//!
//! Drives the command handlers with real TOML and JSON-lines files.

use std::fs;

use tempfile::TempDir;

use loglayout_cli::cli::{OutputFormat, RenderArgs};
use loglayout_cli::commands::{config, load_config, render};
use loglayout_cli::error::CliError;
use loglayout_cli::output::OutputWriter;

const EVENTS: &str = r#"{"timestamp":"2024-05-17T08:30:00Z","level":"INFO","logger_name":"com.example.app.Server","thread_name":"main","message":"started <v1>"}
{"timestamp":"2024-05-17T08:30:01Z","level":"WARN","logger_name":"com.example.app.Server","thread_name":"worker-1","message":"slow request"}
{"timestamp":"2024-05-17T08:30:02Z","level":"ERROR","logger_name":"com.example.db.Pool","thread_name":"worker-2","message":"query failed","throwable":{"class_name":"java.sql.SQLException","message":"timeout","stack_trace":["com.example.db.Pool.run(Pool.java:42)"]}}
"#;

#[tokio::test]
async fn test_load_config_missing_file_uses_defaults() {
    // Given: A path that does not exist
    let temp_dir = TempDir::new().expect("should create temp dir");
    let path = temp_dir.path().join("absent.toml");

    // When: Loading the config
    let config = load_config(&path).await.expect("missing file should fall back");

    // Then: Built-in defaults apply
    assert_eq!(config.layout.title, "Log Messages");
    assert_eq!(config.layout.row_limit, 10_000);
}

#[tokio::test]
async fn test_load_config_malformed_toml_fails() {
    let temp_dir = TempDir::new().expect("should create temp dir");
    let path = temp_dir.path().join("bad.toml");
    fs::write(&path, "[layout\ntitle = \"x\"\n").expect("should write config");

    let err = load_config(&path).await.expect_err("malformed TOML should fail");
    assert_eq!(CliError::from(err).exit_code(), 2);
}

#[tokio::test]
async fn test_render_writes_document_to_file() {
    // Given: A config with a small page size and an event file
    let temp_dir = TempDir::new().expect("should create temp dir");
    let config_path = temp_dir.path().join("loglayout.toml");
    fs::write(
        &config_path,
        r#"
[layout]
pattern = "%date{HH:mm:ss}%thread%level%logger{12}%msg"
title = "Ops & Audit"
row_limit = 2
"#,
    )
    .expect("should write config");
    let input = temp_dir.path().join("events.jsonl");
    fs::write(&input, EVENTS).expect("should write events");
    let out = temp_dir.path().join("report.html");

    // When: Rendering
    let args = RenderArgs {
        input,
        out: Some(out.clone()),
        pattern: None,
        title: None,
        row_limit: None,
    };
    render::execute(args, &config_path, &OutputWriter::new(OutputFormat::Json))
        .await
        .expect("render should succeed");

    // Then: The document holds every row, split into two tables
    let html = fs::read_to_string(&out).expect("document should exist");
    assert!(html.contains("<title>Ops &amp; Audit</title>"));
    assert!(html.contains("started &lt;v1&gt;"));
    assert!(html.contains("<td class=\"Date\">08:30:01</td>"));
    assert!(html.contains("<tr class=\"warn odd\">"));
    assert!(html.contains("java.sql.SQLException: timeout"));
    assert_eq!(html.matches("<table cellspacing=\"0\">").count(), 2);
    assert!(html.ends_with("</body></html>"));
}

#[tokio::test]
async fn test_render_overrides_take_precedence() {
    let temp_dir = TempDir::new().expect("should create temp dir");
    let input = temp_dir.path().join("events.jsonl");
    fs::write(&input, EVENTS).expect("should write events");
    let out = temp_dir.path().join("out.html");

    let args = RenderArgs {
        input,
        out: Some(out.clone()),
        pattern: Some("%level%msg".to_owned()),
        title: Some("Override".to_owned()),
        row_limit: Some(10),
    };
    render::execute(
        args,
        &temp_dir.path().join("none.toml"),
        &OutputWriter::new(OutputFormat::Text),
    )
    .await
    .expect("render should succeed");

    let html = fs::read_to_string(&out).expect("document should exist");
    assert!(html.contains("<title>Override</title>"));
    assert!(!html.contains("class=\"Thread\""));
    assert_eq!(html.matches("<table cellspacing=\"0\">").count(), 1);
}

#[tokio::test]
async fn test_render_missing_input_is_io_error() {
    let temp_dir = TempDir::new().expect("should create temp dir");
    let args = RenderArgs {
        input: temp_dir.path().join("nope.jsonl"),
        out: Some(temp_dir.path().join("out.html")),
        pattern: None,
        title: None,
        row_limit: None,
    };

    let err = render::execute(
        args,
        &temp_dir.path().join("none.toml"),
        &OutputWriter::new(OutputFormat::Text),
    )
    .await
    .expect_err("missing input should fail");
    assert_eq!(err.exit_code(), 10);
}

#[tokio::test]
async fn test_render_unknown_conversion_word_fails() {
    let temp_dir = TempDir::new().expect("should create temp dir");
    let input = temp_dir.path().join("events.jsonl");
    fs::write(&input, EVENTS).expect("should write events");
    let out = temp_dir.path().join("out.html");

    let args = RenderArgs {
        input,
        out: Some(out.clone()),
        pattern: Some("%level%nope".to_owned()),
        title: None,
        row_limit: None,
    };
    let err = render::execute(
        args,
        &temp_dir.path().join("none.toml"),
        &OutputWriter::new(OutputFormat::Text),
    )
    .await
    .expect_err("unknown word should fail");

    assert_eq!(err.exit_code(), 1);
    assert!(err.to_string().contains("nope"));
    assert!(!out.exists(), "no document should be written");
}

#[tokio::test]
async fn test_config_validate_report_invalid_renderer() {
    let temp_dir = TempDir::new().expect("should create temp dir");
    let path = temp_dir.path().join("loglayout.toml");
    fs::write(&path, "[layout]\nthrowable_renderer = \"fancy\"\n").expect("should write config");

    let report = config::validate_report(&path).await;
    assert!(!report.valid);
    assert_eq!(report.errors.len(), 1);
    assert!(report.errors[0].contains("throwable_renderer"));
}

#[tokio::test]
async fn test_config_validate_report_valid_example() {
    let temp_dir = TempDir::new().expect("should create temp dir");
    let path = temp_dir.path().join("loglayout.toml");
    fs::write(&path, include_str!("../../loglayout.toml.example")).expect("should write config");

    let report = config::validate_report(&path).await;
    assert!(report.valid, "example config should validate: {:?}", report.errors);
    assert!(report.errors.is_empty());
}
