// LabWired - Firmware Simulation Platform
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

use anyhow::{Context, Result};
use copperv_platform::map::{OUTPUT_ADDR, RESULT_ADDR, TIMER_COUNTER_ADDR};
use copperv_platform::{RegisterMap, Status};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const SCHEMA_VERSION: &str = "1.0";

/// Default schema version for YAML configs
fn default_schema_version() -> String {
    SCHEMA_VERSION.to_string()
}

fn default_result_addr() -> u32 {
    RESULT_ADDR
}

fn default_output_addr() -> u32 {
    OUTPUT_ADDR
}

fn default_timer_counter_addr() -> u32 {
    TIMER_COUNTER_ADDR
}

fn default_pass_code() -> u32 {
    Status::PASS_CODE
}

fn default_fail_code() -> u32 {
    Status::FAIL_CODE
}

fn default_timer_step() -> u32 {
    1
}

fn default_max_output() -> String {
    "4KB".to_string()
}

fn default_max_accesses() -> u64 {
    4096
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct RegistersConfig {
    #[serde(default = "default_result_addr")]
    pub result: u32,
    #[serde(default = "default_output_addr")]
    pub output: u32,
    #[serde(default = "default_timer_counter_addr")]
    pub timer_counter: u32,
}

impl Default for RegistersConfig {
    fn default() -> Self {
        Self::from(RegisterMap::COPPERV)
    }
}

impl From<RegisterMap> for RegistersConfig {
    fn from(map: RegisterMap) -> Self {
        Self {
            result: map.result,
            output: map.output,
            timer_counter: map.timer_counter,
        }
    }
}

impl RegistersConfig {
    pub fn register_map(&self) -> RegisterMap {
        RegisterMap {
            result: self.result,
            output: self.output,
            timer_counter: self.timer_counter,
        }
    }
}

/// Words the result register interprets as pass and fail.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct StatusCodes {
    #[serde(default = "default_pass_code")]
    pub pass: u32,
    #[serde(default = "default_fail_code")]
    pub fail: u32,
}

impl Default for StatusCodes {
    fn default() -> Self {
        Self {
            pass: Status::PASS_CODE,
            fail: Status::FAIL_CODE,
        }
    }
}

/// Free-running counter model: `start`, then `+step` on every bus access.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct TimerModel {
    #[serde(default)]
    pub start: u32,
    #[serde(default = "default_timer_step")]
    pub step: u32,
}

impl Default for TimerModel {
    fn default() -> Self {
        Self {
            start: 0,
            step: default_timer_step(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct HarnessLimits {
    /// Output stream cap, e.g. "4KB".
    #[serde(default = "default_max_output")]
    pub max_output: String,
    #[serde(default = "default_max_accesses")]
    pub max_accesses: u64,
}

impl Default for HarnessLimits {
    fn default() -> Self {
        Self {
            max_output: default_max_output(),
            max_accesses: default_max_accesses(),
        }
    }
}

impl HarnessLimits {
    pub fn max_output_bytes(&self) -> Result<u64> {
        parse_size(&self.max_output)
            .with_context(|| format!("Invalid limit 'max_output': {:?}", self.max_output))
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ExpectedStatus {
    Pass,
    Fail,
    /// A status word that is neither the pass nor the fail code.
    Other,
    /// The result register was never written.
    NoResult,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct OutputContainsAssertion {
    pub output_contains: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct ExpectedStatusAssertion {
    pub expected_status: ExpectedStatus,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct TimerSamplesAssertion {
    pub timer_samples: usize,
}

/// Samples compare as unsigned words, so crossing the sign bit still counts
/// as moving forward; only the 32-bit wrap goes back.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct TimerMonotonicAssertion {
    pub timer_monotonic: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(untagged)]
pub enum Assertion {
    OutputContains(OutputContainsAssertion),
    ExpectedStatus(ExpectedStatusAssertion),
    TimerSamples(TimerSamplesAssertion),
    TimerMonotonic(TimerMonotonicAssertion),
}

/// Harness manifest: where the registers live, what the result codes mean,
/// how the counter behaves, and what a run must show.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct HarnessConfig {
    #[serde(default = "default_schema_version")]
    pub schema_version: String,
    #[serde(default)]
    pub registers: RegistersConfig,
    #[serde(default)]
    pub status_codes: StatusCodes,
    #[serde(default)]
    pub timer: TimerModel,
    #[serde(default)]
    pub limits: HarnessLimits,
    #[serde(default)]
    pub assertions: Vec<Assertion>,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            registers: RegistersConfig::default(),
            status_codes: StatusCodes::default(),
            timer: TimerModel::default(),
            limits: HarnessLimits::default(),
            assertions: Vec::new(),
        }
    }
}

impl HarnessConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read harness config at {:?}", path.as_ref()))?;
        Self::from_yaml(&contents)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Self =
            serde_yaml::from_str(yaml).context("Failed to parse Harness Config YAML")?;
        config.validate()?;
        tracing::debug!(
            "Harness config: result={:#x} output={:#x} timer_counter={:#x}",
            config.registers.result,
            config.registers.output,
            config.registers.timer_counter
        );
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.schema_version != SCHEMA_VERSION {
            anyhow::bail!(
                "Unsupported schema_version '{}'. Supported versions: '{}'",
                self.schema_version,
                SCHEMA_VERSION
            );
        }

        let regs = &self.registers;
        for (name, addr) in [
            ("result", regs.result),
            ("output", regs.output),
            ("timer_counter", regs.timer_counter),
        ] {
            if addr % 4 != 0 {
                anyhow::bail!("Register '{}' at {:#x} is not word aligned", name, addr);
            }
        }
        if regs.result == regs.output
            || regs.result == regs.timer_counter
            || regs.output == regs.timer_counter
        {
            anyhow::bail!("Register addresses must be distinct");
        }

        if self.status_codes.pass == self.status_codes.fail {
            anyhow::bail!(
                "Status codes 'pass' and 'fail' must differ (both {:#x})",
                self.status_codes.pass
            );
        }

        if self.limits.max_output_bytes()? == 0 {
            anyhow::bail!("Limit 'max_output' must be greater than zero");
        }

        if self.limits.max_accesses == 0 {
            anyhow::bail!("Limit 'max_accesses' must be greater than zero");
        }

        Ok(())
    }
}

pub fn parse_size(size_str: &str) -> Result<u64> {
    use human_size::{Byte, Size, SpecificSize};
    let s: Size = size_str
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid size format: {}", e))?;
    let bytes: SpecificSize<Byte> = s.into();
    Ok(bytes.value() as u64)
}
