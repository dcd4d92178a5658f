// LabWired - Firmware Simulation Platform
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

use crate::bus::{AccessKind, BusAccess, RegisterBus};
use crate::transcript::{parse_samples, TimerSample};
use crate::{HarnessError, Register};
use copperv_config::{ExpectedStatus, HarnessConfig, StatusCodes};
use std::sync::{Arc, Mutex};
use tracing::{info, warn};

/// Outcome signalled through the result register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Pass,
    Fail,
    Other(u32),
    NoResult,
}

impl Verdict {
    pub fn from_status(word: Option<u32>, codes: &StatusCodes) -> Self {
        match word {
            None => Verdict::NoResult,
            Some(w) if w == codes.pass => Verdict::Pass,
            Some(w) if w == codes.fail => Verdict::Fail,
            Some(w) => Verdict::Other(w),
        }
    }

    pub fn matches(self, expected: ExpectedStatus) -> bool {
        matches!(
            (self, expected),
            (Verdict::Pass, ExpectedStatus::Pass)
                | (Verdict::Fail, ExpectedStatus::Fail)
                | (Verdict::Other(_), ExpectedStatus::Other)
                | (Verdict::NoResult, ExpectedStatus::NoResult)
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Verdict::Pass => "pass",
            Verdict::Fail => "fail",
            Verdict::Other(_) => "other",
            Verdict::NoResult => "no_result",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Echo the output stream to stdout as it is written.
    pub echo_stdout: bool,
    /// Shared capture buffer; a fresh one is used when `None`.
    pub sink: Option<Arc<Mutex<Vec<u8>>>>,
}

#[derive(Debug, Clone)]
pub struct RunReport {
    pub verdict: Verdict,
    pub status_word: Option<u32>,
    pub output: String,
    /// Samples printed in the output stream.
    pub samples: Vec<TimerSample>,
    /// Counter values served on the bus, in read order. Empty for transcripts.
    pub served: Vec<i32>,
    pub result_writes: usize,
    pub accesses: Vec<BusAccess>,
    pub violations: Vec<HarnessError>,
    pub devices: serde_json::Value,
}

impl RunReport {
    fn from_output(output: String, status_word: Option<u32>, codes: &StatusCodes) -> Self {
        let mut violations = Vec::new();
        let samples = parse_samples(&output).unwrap_or_else(|e| {
            violations.push(e);
            Vec::new()
        });
        Self {
            verdict: Verdict::from_status(status_word, codes),
            status_word,
            output,
            samples,
            served: Vec::new(),
            result_writes: usize::from(status_word.is_some()),
            accesses: Vec::new(),
            violations,
            devices: serde_json::Value::Null,
        }
    }

    /// Checks the printed samples against the bus history: every counter read
    /// is printed as read, and a single result write closes the run.
    pub fn check_sequence(&self) -> Vec<HarnessError> {
        let mut problems = Vec::new();

        if self.samples.len() != self.served.len() {
            problems.push(HarnessError::SampleCount {
                printed: self.samples.len(),
                served: self.served.len(),
            });
        }
        for (sample, served) in self.samples.iter().zip(&self.served) {
            if sample.value != *served {
                problems.push(HarnessError::SampleMismatch {
                    index: sample.index,
                    printed: sample.value,
                    served: *served,
                });
            }
        }

        if self.result_writes != 1 {
            problems.push(HarnessError::ResultWrites(self.result_writes));
        }
        let last_is_result = self
            .accesses
            .last()
            .is_some_and(|a| a.kind == AccessKind::Write && a.register == Some(Register::Result));
        if self.result_writes > 0 && !last_is_result {
            problems.push(HarnessError::ResultNotLast);
        }

        problems
    }

    /// Pass verdict and no recorded violations.
    pub fn passed(&self) -> bool {
        self.verdict == Verdict::Pass && self.violations.is_empty()
    }
}

/// Runs the timer diagnostic against a fresh register bus.
pub fn run_diagnostic(config: &HarnessConfig, options: RunOptions) -> anyhow::Result<RunReport> {
    let mut bus = RegisterBus::new(config)?;
    let sink = options.sink.unwrap_or_else(|| bus.output.sink());
    bus.output.set_sink(sink, options.echo_stdout);

    let map = *bus.map();
    info!(
        "Running timer diagnostic (result={:#x} output={:#x} timer_counter={:#x})",
        map.result, map.output, map.timer_counter
    );
    copperv_platform::diag::run(&mut bus, &map);

    let output = String::from_utf8_lossy(&bus.output.contents()).into_owned();
    let mut report = RunReport::from_output(output, bus.result.first(), &config.status_codes);
    report.served = bus
        .accesses()
        .iter()
        .filter(|a| a.kind == AccessKind::Read && a.register == Some(Register::TimerCounter))
        .map(|a| a.value as i32)
        .collect();
    report.result_writes = bus.result.writes().len();
    report.accesses = bus.accesses().to_vec();
    let mut violations = bus.violations().to_vec();
    violations.append(&mut report.violations);
    report.violations = violations;
    report.devices = bus.snapshot();

    log_verdict(&report);
    Ok(report)
}

/// Builds a report from output captured by an external simulator run.
pub fn verify_transcript(
    config: &HarnessConfig,
    transcript: &str,
    status_word: Option<u32>,
) -> RunReport {
    let report = RunReport::from_output(transcript.to_string(), status_word, &config.status_codes);
    log_verdict(&report);
    report
}

fn log_verdict(report: &RunReport) {
    match report.status_word {
        Some(word) => info!("Verdict: {} ({:#010x})", report.verdict.as_str(), word),
        None => warn!("Verdict: {} (result register never written)", report.verdict.as_str()),
    }
}
