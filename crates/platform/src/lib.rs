// LabWired - Firmware Simulation Platform
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

//! Bare-metal side of the copperv timer smoke test.
//!
//! The program talks to exactly three memory-mapped registers: a result
//! register the simulator watches for a status code, an output port that
//! appends every written byte to a character stream, and a free-running
//! timer counter. Everything here is `no_std` and allocation free so the same
//! code runs on the hart and inside the host harness.
#![no_std]

#[cfg(test)]
extern crate std;

pub mod diag;
pub mod map;
pub mod mmio;
pub mod output;
pub mod timer;

#[cfg(test)]
mod testing;

pub use map::{RegisterMap, Status};
pub use mmio::{Mmio, Volatile};
pub use output::SimOut;
pub use timer::DecimalBuf;
