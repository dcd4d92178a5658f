// LabWired - Firmware Simulation Platform
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

use crate::{HarnessError, HarnessResult};

const SAMPLE_PREFIX: &str = "timer value ";

/// One `timer value N: V` line of the output stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct TimerSample {
    pub index: u32,
    pub value: i32,
}

/// Extracts the timer samples from a captured output stream.
///
/// Lines that do not start with `timer value ` are ignored. A line that does
/// but does not carry a decimal index and value is an error.
pub fn parse_samples(text: &str) -> HarnessResult<Vec<TimerSample>> {
    let mut samples = Vec::new();
    for (n, line) in text.lines().enumerate() {
        let Some(rest) = line.strip_prefix(SAMPLE_PREFIX) else {
            continue;
        };
        let malformed = || HarnessError::MalformedSample {
            line: n + 1,
            text: line.to_string(),
        };
        let (index, value) = rest.split_once(": ").ok_or_else(malformed)?;
        samples.push(TimerSample {
            index: index.parse().map_err(|_| malformed())?,
            value: value.trim_end().parse().map_err(|_| malformed())?,
        });
    }
    Ok(samples)
}
