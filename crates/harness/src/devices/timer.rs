// LabWired - Firmware Simulation Platform
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

use copperv_config::TimerModel;

/// Free-running counter. Advances by `step` after every bus access and wraps
/// at 32 bits.
#[derive(Debug, Default, serde::Serialize)]
pub struct TimerCounter {
    cnt: u32,
    step: u32,
    reads: u64,
}

impl TimerCounter {
    pub fn new(model: &TimerModel) -> Self {
        Self {
            cnt: model.start,
            step: model.step,
            reads: 0,
        }
    }

    pub fn count(&self) -> u32 {
        self.cnt
    }
}

impl super::Device for TimerCounter {
    fn read(&mut self) -> u32 {
        self.reads += 1;
        self.cnt
    }

    fn tick(&mut self) {
        self.cnt = self.cnt.wrapping_add(self.step);
    }

    fn snapshot(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}
