//! CLI Exit Code Tests
//!
//! 0 success, 1 bad input, 2 invalid configuration, 3 a value failed to render.

use std::fs;
use std::process::{Command, Output};

fn cli(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_barcodes-cli"))
        .args(args)
        .env("RUST_LOG", "off")
        .output()
        .unwrap()
}

fn json_lines(output: &Output) -> Vec<serde_json::Value> {
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

#[test]
fn cli_render_success() {
    let out = cli(&["render", "--type", "CODE128", "hello"]);
    assert_eq!(out.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&out.stdout).starts_with("<svg"));
}

#[test]
fn cli_invalid_configuration_exits_2() {
    let out = cli(&["render", "--width", "0", "hello"]);
    assert_eq!(out.status.code(), Some(2));
    assert!(out.stdout.is_empty());

    let out = cli(&["render", "--format", "UNICODE ", "hello"]);
    assert_eq!(out.status.code(), Some(2));

    let out = cli(&["validate", "--payload", r##"{"color": " #000000"}"##]);
    assert_eq!(out.status.code(), Some(2));
    let reply: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(reply["valid"], false);
    assert_eq!(reply["error"]["field"], "color");
}

#[test]
fn cli_bad_payload_exits_1() {
    let out = cli(&["validate", "--payload", "{ not json"]);
    assert_eq!(out.status.code(), Some(1));
}

#[test]
fn cli_render_failure_exits_3_after_rendering_the_rest() {
    let out = cli(&["render", "--type", "EAN8", "--json", "9638507", "bad", "96385074"]);
    assert_eq!(out.status.code(), Some(3));

    let shown = json_lines(&out);
    assert_eq!(shown.len(), 2);
    assert_eq!(shown[0]["extended_value"], "96385074");
    assert_eq!(shown[0]["fingerprint"].as_str().map(str::len), Some(64));
}

#[test]
fn cli_show_value_overrides_preset_both_ways() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("shown.json"),
        r##"{"id": "shown", "label": "Shown", "settings": {"show_value": true}}"##,
    )
    .unwrap();
    fs::write(
        dir.path().join("hidden.json"),
        r##"{"id": "hidden", "label": "Hidden", "settings": {"show_value": false}}"##,
    )
    .unwrap();
    let presets = dir.path().to_str().unwrap();

    let out = cli(&["--presets-dir", presets, "render", "--preset", "shown", "--json", "--show-value=false", "v"]);
    assert_eq!(out.status.code(), Some(0));
    assert!(json_lines(&out)[0]["caption"].is_null());

    let out = cli(&["--presets-dir", presets, "render", "--preset", "hidden", "--json", "--show-value", "v"]);
    assert_eq!(out.status.code(), Some(0));
    assert_eq!(json_lines(&out)[0]["caption"], "v");

    let out = cli(&["--presets-dir", presets, "render", "--preset", "shown", "--json", "v"]);
    assert_eq!(json_lines(&out)[0]["caption"], "v");
}
