use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use serde_json::Value;
use tempfile::tempdir;

fn tintbridge_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_tintbridge"))
}

fn run_cli(args: &[&str]) -> Output {
    Command::new(tintbridge_bin())
        .args(args)
        .env_remove("TINTBRIDGE_LOG")
        .output()
        .expect("tintbridge binary runs")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).expect("write fixture");
    path
}

#[test]
fn derive_prints_complete_json_token_set() {
    let output = run_cli(&["derive", "--accent", "Purple", "--dark"]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let tokens: Value = serde_json::from_str(&stdout(&output)).expect("json");
    assert_eq!(tokens["isInverted"], true);
    assert_eq!(tokens["themePrimary"], "#8b5cf6");
    assert_eq!(tokens["bodyText"], "#f3f2f1");
}

#[test]
fn derive_css_matches_document_rendering() {
    let output = run_cli(&["derive", "--accent", "blue", "--format", "css"]);
    assert!(output.status.success());
    let css = stdout(&output);
    assert!(css.starts_with(":root {\n"));
    assert!(css.contains("  --themePrimary: #3b82f6;\n"));
}

#[test]
fn unknown_accent_warns_on_stderr_and_falls_back() {
    let output = run_cli(&["derive", "--accent", "chartreuse"]);
    assert!(output.status.success());
    let tokens: Value = serde_json::from_str(&stdout(&output)).expect("json");
    assert_eq!(tokens["themePrimary"], "#3b82f6");
    assert!(String::from_utf8_lossy(&output.stderr).contains("chartreuse"));
}

#[test]
fn custom_family_from_toml_config_is_listed_and_derivable() {
    let dir = tempdir().expect("tempdir");
    let mut shades = String::new();
    for shade in [50, 100, 200, 300, 400, 500, 600, 700, 800, 900, 950] {
        shades.push_str(&format!("\"{shade}\" = \"#10{:04x}\"\n", shade));
    }
    let config = write(
        dir.path(),
        "bridge.toml",
        &format!("default_accent = \"brand\"\n\n[custom_families.brand]\n{shades}"),
    );
    let config = config.to_str().expect("utf8 path");

    let listed = run_cli(&["accents", "--config", config]);
    assert!(listed.status.success(), "stderr: {}", String::from_utf8_lossy(&listed.stderr));
    assert_eq!(stdout(&listed).lines().last(), Some("brand"));

    let derived = run_cli(&["derive", "--accent", "brand", "--config", config]);
    assert!(derived.status.success());
    let tokens: Value = serde_json::from_str(&stdout(&derived)).expect("json");
    assert_eq!(tokens["themePrimary"], format!("#10{:04x}", 500));
}

#[test]
fn dark_variant_of_host_theme() {
    let dir = tempdir().expect("tempdir");
    let host = write(
        dir.path(),
        "host.json",
        r##"{"themePrimary": "#0f6cbd", "themeDarkAlt": "#115ea3", "white": "#ffffff", "black": "#000000"}"##,
    );
    let output = run_cli(&["dark-variant", "--input", host.to_str().expect("utf8 path")]);
    assert!(output.status.success());
    let tokens: Value = serde_json::from_str(&stdout(&output)).expect("json");
    assert_eq!(tokens["isInverted"], true);
    assert_eq!(tokens["black"], "#ffffff");
}

#[test]
fn invalid_config_exits_nonzero_with_message() {
    let dir = tempdir().expect("tempdir");
    let config = write(dir.path(), "bridge.json", r#"{"mode_class": "two words"}"#);
    let output = run_cli(&["accents", "--config", config.to_str().expect("utf8 path")]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("mode_class"));
}

#[test]
fn simulate_rejects_unknown_op() {
    let output = run_cli(&["simulate", "spin"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("unknown op 'spin'"));
}

#[test]
fn preset_json_references_accent_ramp() {
    let output = run_cli(&["preset", "--accent", "teal"]);
    assert!(output.status.success());
    let preset: Value = serde_json::from_str(&stdout(&output)).expect("json");
    assert!(preset["primitive"]["teal"].is_object());
}
