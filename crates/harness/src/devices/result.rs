// LabWired - Firmware Simulation Platform
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

use crate::HarnessResult;

/// Test result register. Keeps every word written to it.
#[derive(Debug, Default, serde::Serialize)]
pub struct ResultRegister {
    writes: Vec<u32>,
}

impl ResultRegister {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn writes(&self) -> &[u32] {
        &self.writes
    }

    /// The status that ended the test.
    pub fn first(&self) -> Option<u32> {
        self.writes.first().copied()
    }
}

impl super::Device for ResultRegister {
    fn write(&mut self, value: u32) -> HarnessResult<()> {
        tracing::info!("Result register <- {:#010x}", value);
        self.writes.push(value);
        Ok(())
    }

    fn snapshot(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}
