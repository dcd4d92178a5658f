// LabWired - Firmware Simulation Platform
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

pub mod output;
pub mod result;
pub mod timer;

pub use output::OutputPort;
pub use result::ResultRegister;
pub use timer::TimerCounter;

use crate::HarnessResult;

/// A single-word memory-mapped device.
///
/// Direction checks happen on the bus, so a device only sees the accesses its
/// register allows.
pub trait Device: std::fmt::Debug + Send {
    fn read(&mut self) -> u32 {
        0
    }
    fn write(&mut self, _value: u32) -> HarnessResult<()> {
        Ok(())
    }
    /// Called once after every bus access.
    fn tick(&mut self) {}
    fn snapshot(&self) -> serde_json::Value {
        serde_json::Value::Null
    }
}
