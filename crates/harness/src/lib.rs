// LabWired - Firmware Simulation Platform
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

//! Host harness for the copperv timer smoke test.
//!
//! Models the three memory-mapped registers the diagnostic touches, runs the
//! diagnostic against them, and turns what happened on the bus into a
//! verdict. Instruction execution is not modelled: the diagnostic runs as
//! native code through [`copperv_platform::Mmio`].

pub mod assertions;
pub mod bus;
pub mod devices;
pub mod report;
pub mod transcript;

pub use assertions::{describe, evaluate, AssertionResult};
pub use bus::{AccessKind, BusAccess, RegisterBus};
pub use report::{run_diagnostic, verify_transcript, RunOptions, RunReport, Verdict};
pub use transcript::{parse_samples, TimerSample};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HarnessError {
    #[error("read of write-only register {register} at {addr:#x}")]
    WriteOnly { register: Register, addr: u32 },
    #[error("write of {value:#x} to read-only register {register} at {addr:#x}")]
    ReadOnly {
        register: Register,
        addr: u32,
        value: u32,
    },
    #[error("access to unmapped address {0:#x}")]
    Unmapped(u32),
    #[error("result register written again with {0:#x}")]
    ResultRewritten(u32),
    #[error("access to {0:#x} after the result register was written")]
    AccessAfterResult(u32),
    #[error("output limit of {0} bytes exceeded")]
    OutputLimit(u64),
    #[error("bus access budget of {0} exhausted")]
    AccessBudget(u64),
    #[error("malformed timer sample on line {line}: {text:?}")]
    MalformedSample { line: usize, text: String },
    #[error("timer value {index} printed as {printed} but the counter returned {served}")]
    SampleMismatch { index: u32, printed: i32, served: i32 },
    #[error("printed {printed} timer samples but the counter was read {served} times")]
    SampleCount { printed: usize, served: usize },
    #[error("expected exactly one result write, saw {0}")]
    ResultWrites(usize),
    #[error("result write was not the last bus access")]
    ResultNotLast,
}

pub type HarnessResult<T> = Result<T, HarnessError>;

/// The three platform registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Register {
    Result,
    Output,
    TimerCounter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    ReadOnly,
    WriteOnly,
}

impl Register {
    pub const ALL: [Register; 3] = [Register::Result, Register::Output, Register::TimerCounter];

    pub fn name(self) -> &'static str {
        match self {
            Register::Result => "result",
            Register::Output => "output",
            Register::TimerCounter => "timer_counter",
        }
    }

    pub fn access(self) -> Access {
        match self {
            Register::Result | Register::Output => Access::WriteOnly,
            Register::TimerCounter => Access::ReadOnly,
        }
    }
}

impl std::fmt::Display for Register {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
