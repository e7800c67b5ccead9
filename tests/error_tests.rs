//! Error scenario integration tests

use std::process::Command;

fn plansnap_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_plansnap"))
}

#[test]
fn config_get_unknown_key() {
    let output = plansnap_bin()
        .args(["config", "get", "unknown_key"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Unknown") || stderr.contains("unknown") || stderr.contains("Valid"),
        "Expected error about unknown key, got: {}",
        stderr
    );
}

#[test]
fn config_set_unknown_key() {
    let output = plansnap_bin()
        .args(["config", "set", "unknown_key", "value"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Unknown") || stderr.contains("unknown") || stderr.contains("Valid"),
        "Expected error about unknown key, got: {}",
        stderr
    );
}

#[test]
fn config_set_invalid_hotkey() {
    let output = plansnap_bin()
        .args(["config", "set", "hotkey", "not a combo"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Invalid") || stderr.contains("hotkey"),
        "Expected error about invalid hotkey, got: {}",
        stderr
    );
}

#[test]
fn config_set_invalid_boolean() {
    let output = plansnap_bin()
        .args(["config", "set", "notify", "maybe"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("true") || stderr.contains("false"),
        "Expected error about boolean value, got: {}",
        stderr
    );
}

#[test]
fn config_set_invalid_api_url() {
    let output = plansnap_bin()
        .args(["config", "set", "api_url", "localhost:8000"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("http"),
        "Expected error about URL scheme, got: {}",
        stderr
    );
}

#[test]
fn config_set_empty_timezone() {
    let output = plansnap_bin()
        .args(["config", "set", "timezone", "  "])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("empty"),
        "Expected error about empty value, got: {}",
        stderr
    );
}
