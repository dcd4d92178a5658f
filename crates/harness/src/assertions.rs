// LabWired - Firmware Simulation Platform
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

use crate::report::RunReport;
use copperv_config::Assertion;

#[derive(Debug, Clone, serde::Serialize)]
pub struct AssertionResult {
    pub assertion: Assertion,
    pub passed: bool,
}

pub fn evaluate(assertions: &[Assertion], report: &RunReport) -> Vec<AssertionResult> {
    assertions
        .iter()
        .map(|assertion| AssertionResult {
            assertion: assertion.clone(),
            passed: check(assertion, report),
        })
        .collect()
}

fn check(assertion: &Assertion, report: &RunReport) -> bool {
    match assertion {
        Assertion::OutputContains(a) => report.output.contains(&a.output_contains),
        Assertion::ExpectedStatus(a) => report.verdict.matches(a.expected_status),
        Assertion::TimerSamples(a) => report.samples.len() == a.timer_samples,
        Assertion::TimerMonotonic(a) => {
            // The counter is an unsigned word; only a 32-bit wrap counts as going back.
            let monotonic = report
                .samples
                .windows(2)
                .all(|w| w[1].value as u32 >= w[0].value as u32);
            monotonic == a.timer_monotonic
        }
    }
}

pub fn describe(assertion: &Assertion) -> String {
    match assertion {
        Assertion::OutputContains(a) => format!("output_contains: {:?}", a.output_contains),
        Assertion::ExpectedStatus(a) => format!("expected_status: {:?}", a.expected_status),
        Assertion::TimerSamples(a) => format!("timer_samples: {}", a.timer_samples),
        Assertion::TimerMonotonic(a) => format!("timer_monotonic: {}", a.timer_monotonic),
    }
}
