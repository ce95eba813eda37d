//! Shared test fixtures for rule and CLI tests.
#![allow(dead_code)] // Not every test binary uses every fixture

use hyperkey::generator::{HyperKey, Toggle};
use hyperkey::models::{KeyReference, Modifier, RuleGroup};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Path to the hyperkey binary
pub fn hyperkey_bin() -> &'static str {
    env!("CARGO_BIN_EXE_hyperkey")
}

/// Control + spacebar, the shift-lock enable chord.
pub fn ctrl_space() -> KeyReference {
    KeyReference::with_mandatory("spacebar", [Modifier::Control]).unwrap()
}

/// A bare escape press.
pub fn escape() -> KeyReference {
    KeyReference::new("escape").unwrap()
}

/// The default hyper key.
pub fn hyper() -> HyperKey {
    HyperKey::right_command().unwrap()
}

/// Shift-lock group with one enable and one disable trigger.
pub fn shift_lock_group(enable: KeyReference, disable: KeyReference) -> RuleGroup {
    let toggle = Toggle::shift_lock();
    RuleGroup::new("Shift-lock toggle")
        .with(toggle.enable(enable))
        .with(toggle.disable(disable, Default::default()))
}

/// Creates a temp directory with an isolated config home.
///
/// Returns the working directory (where the document is written) and the
/// guard that keeps both alive.
pub fn temp_workspace() -> (PathBuf, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let work_dir = temp_dir.path().join("work");
    fs::create_dir_all(&work_dir).expect("Failed to create work dir");
    fs::create_dir_all(temp_dir.path().join("config")).expect("Failed to create config dir");
    (work_dir, temp_dir)
}

/// Runs the binary in `work_dir` with the config home inside `temp_dir`.
pub fn run_hyperkey(work_dir: &Path, temp_dir: &TempDir, args: &[&str]) -> Output {
    Command::new(hyperkey_bin())
        .args(args)
        .current_dir(work_dir)
        .env("XDG_CONFIG_HOME", temp_dir.path().join("config"))
        .env("HOME", temp_dir.path())
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute command")
}

/// Reads and parses a generated document.
pub fn read_document(path: &Path) -> serde_json::Value {
    let content = fs::read_to_string(path).expect("Failed to read document");
    serde_json::from_str(&content).expect("Document is not valid JSON")
}

/// Rule groups of the first profile in a parsed document.
pub fn rules_of(document: &serde_json::Value) -> &Vec<serde_json::Value> {
    document["profiles"][0]["complex_modifications"]["rules"]
        .as_array()
        .expect("rules should be an array")
}
