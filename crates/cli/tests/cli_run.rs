// LabWired - Firmware Simulation Platform
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

use std::path::PathBuf;
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

fn temp_dir(prefix: &str) -> PathBuf {
    let nonce = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let mut dir = std::env::temp_dir();
    dir.push("copperv-cli-tests");
    dir.push(format!("{}-{}", prefix, nonce));
    std::fs::create_dir_all(&dir).expect("Failed to create temp dir");
    dir
}

#[test]
fn test_run_default_layout() {
    let output = Command::new(env!("CARGO_BIN_EXE_copperv-diag"))
        .args(["run"])
        .output()
        .expect("Failed to run copperv-diag");

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("timer value 1: 15\ntimer value 2: 34\n"),
        "stdout: {}",
        stdout
    );
}

#[test]
fn test_run_json_and_artifacts() {
    let dir = temp_dir("artifacts");
    let config_path = dir.join("harness.yaml");
    std::fs::write(
        &config_path,
        r#"
schema_version: "1.0"
timer:
  start: 100
assertions:
  - output_contains: "timer value 1: 115"
  - expected_status: pass
  - timer_samples: 2
"#,
    )
    .unwrap();
    let output_dir = dir.join("out");

    let output = Command::new(env!("CARGO_BIN_EXE_copperv-diag"))
        .args([
            "run",
            "--config",
            config_path.to_str().unwrap(),
            "--output-dir",
            output_dir.to_str().unwrap(),
            "--json",
        ])
        .output()
        .expect("Failed to run copperv-diag");
    assert_eq!(output.status.code(), Some(0));

    let stdout = String::from_utf8_lossy(&output.stdout);
    let json: serde_json::Value = serde_json::from_str(stdout.trim()).unwrap();
    assert_eq!(json["status"], "pass");
    assert_eq!(json["verdict"], "pass");
    assert_eq!(json["served"][0], 115);
    assert_eq!(json["served"][1], 135);
    assert_eq!(json["assertions"].as_array().unwrap().len(), 3);

    let on_disk: serde_json::Value =
        serde_json::from_slice(&std::fs::read(output_dir.join("result.json")).unwrap()).unwrap();
    assert_eq!(on_disk["status_word"], 0x0100_0001);
    assert_eq!(
        std::fs::read_to_string(output_dir.join("output.log")).unwrap(),
        "timer value 1: 115\ntimer value 2: 135\n"
    );
}

#[test]
fn test_run_failed_assertion_exit_code() {
    let dir = temp_dir("assert");
    let config_path = dir.join("harness.yaml");
    std::fs::write(
        &config_path,
        "assertions:\n  - expected_status: fail\n",
    )
    .unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_copperv-diag"))
        .args(["run", "--no-output-stdout", "-c", config_path.to_str().unwrap()])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_run_config_error_exit_code() {
    let dir = temp_dir("config");
    let config_path = dir.join("harness.yaml");
    std::fs::write(&config_path, "schema_version: \"9.9\"\n").unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_copperv-diag"))
        .args(["run", "-c", config_path.to_str().unwrap()])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Unsupported schema_version"), "stderr: {}", stderr);
}

#[test]
fn test_verify_captured_transcript() {
    let dir = temp_dir("verify");
    let transcript = dir.join("sim.log");
    std::fs::write(&transcript, "timer value 1: 812\ntimer value 2: 1290\n").unwrap();

    let pass = Command::new(env!("CARGO_BIN_EXE_copperv-diag"))
        .args([
            "verify",
            "--transcript",
            transcript.to_str().unwrap(),
            "--status",
            "0x01000001",
            "--json",
        ])
        .output()
        .unwrap();
    assert_eq!(pass.status.code(), Some(0));
    let json: serde_json::Value =
        serde_json::from_str(String::from_utf8_lossy(&pass.stdout).trim()).unwrap();
    assert_eq!(json["samples"][1]["value"], 1290);

    let fail = Command::new(env!("CARGO_BIN_EXE_copperv-diag"))
        .args([
            "verify",
            "--transcript",
            transcript.to_str().unwrap(),
            "--status",
            "0x02000001",
        ])
        .output()
        .unwrap();
    assert_eq!(fail.status.code(), Some(1));
}

#[test]
fn test_verify_missing_transcript() {
    let output = Command::new(env!("CARGO_BIN_EXE_copperv-diag"))
        .args(["verify", "--transcript", "/nonexistent/copperv/sim.log"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
}
