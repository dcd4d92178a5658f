// LabWired - Firmware Simulation Platform
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

use copperv_config::{Assertion, ExpectedStatus, HarnessConfig};
use std::time::{SystemTime, UNIX_EPOCH};

fn write_temp_file(prefix: &str, contents: &str) -> std::path::PathBuf {
    let mut dir = std::env::temp_dir();
    dir.push("copperv-config-tests");
    let _ = std::fs::create_dir_all(&dir);

    let nonce = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let path = dir.join(format!("{}-{}.yaml", prefix, nonce));
    std::fs::write(&path, contents).expect("Failed to write temp file");
    path
}

#[test]
fn test_full_manifest_parses() {
    let yaml = r#"
schema_version: "1.0"
registers:
  result: 0x10000000
  output: 0x10000004
  timer_counter: 0x10000008
status_codes:
  pass: 0x1
  fail: 0x2
timer:
  start: 100
  step: 3
limits:
  max_output: "1KB"
  max_accesses: 64
assertions:
  - output_contains: "timer value 1: "
  - expected_status: pass
  - timer_samples: 2
  - timer_monotonic: true
"#;
    let config = HarnessConfig::from_yaml(yaml).unwrap();
    assert_eq!(config.registers.timer_counter, 0x1000_0008);
    assert_eq!(config.status_codes.pass, 1);
    assert_eq!(config.timer.start, 100);
    assert_eq!(config.timer.step, 3);
    assert_eq!(config.limits.max_output_bytes().unwrap(), 1024);
    assert_eq!(config.assertions.len(), 4);
    assert!(matches!(
        config.assertions[1],
        Assertion::ExpectedStatus(ref a) if a.expected_status == ExpectedStatus::Pass
    ));
    assert!(matches!(
        config.assertions[2],
        Assertion::TimerSamples(ref a) if a.timer_samples == 2
    ));
}

#[test]
fn test_partial_sections_keep_defaults() {
    let yaml = r#"
timer:
  start: 7
"#;
    let config = HarnessConfig::from_yaml(yaml).unwrap();
    assert_eq!(config.timer.start, 7);
    assert_eq!(config.timer.step, 1);
    assert_eq!(config.registers.result, 0x8000_0000);
    assert_eq!(config.limits.max_accesses, 4096);
}

#[test]
fn test_unknown_fields_rejected() {
    let yaml = r#"
registers:
  result: 0x80000000
  uart: 0x40000000
"#;
    assert!(HarnessConfig::from_yaml(yaml).is_err());
}

#[test]
fn test_expected_status_variants() {
    let yaml = r#"
assertions:
  - expected_status: no_result
  - expected_status: other
  - expected_status: fail
"#;
    let config = HarnessConfig::from_yaml(yaml).unwrap();
    let statuses: Vec<_> = config
        .assertions
        .iter()
        .filter_map(|a| match a {
            Assertion::ExpectedStatus(s) => Some(s.expected_status),
            _ => None,
        })
        .collect();
    assert_eq!(
        statuses,
        vec![
            ExpectedStatus::NoResult,
            ExpectedStatus::Other,
            ExpectedStatus::Fail
        ]
    );
}

#[test]
fn test_from_file() {
    let path = write_temp_file("harness", "schema_version: \"1.0\"\n");
    let config = HarnessConfig::from_file(&path).unwrap();
    assert_eq!(config.schema_version, "1.0");

    let missing = path.with_extension("missing");
    let err = HarnessConfig::from_file(&missing).unwrap_err();
    assert!(err.to_string().contains("Failed to read harness config"));
}
