// LabWired - Firmware Simulation Platform
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

use crate::devices::{Device, OutputPort, ResultRegister, TimerCounter};
use crate::{Access, HarnessError, Register};
use copperv_config::HarnessConfig;
use copperv_platform::{Mmio, RegisterMap};
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessKind {
    Read,
    Write,
}

/// One word access as seen on the bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct BusAccess {
    pub seq: u64,
    pub kind: AccessKind,
    pub register: Option<Register>,
    pub addr: u32,
    pub value: u32,
}

/// The three platform registers behind their configured addresses.
///
/// Protocol problems never stop the program: they are recorded as violations
/// and the access completes as a no-op (reads return 0).
#[derive(Debug)]
pub struct RegisterBus {
    map: RegisterMap,
    pub result: ResultRegister,
    pub output: OutputPort,
    pub timer: TimerCounter,
    max_accesses: u64,
    accesses: Vec<BusAccess>,
    violations: Vec<HarnessError>,
    budget_reported: bool,
}

impl RegisterBus {
    pub fn new(config: &HarnessConfig) -> anyhow::Result<Self> {
        Ok(Self {
            map: config.registers.register_map(),
            result: ResultRegister::new(),
            output: OutputPort::new(config.limits.max_output_bytes()?),
            timer: TimerCounter::new(&config.timer),
            max_accesses: config.limits.max_accesses,
            accesses: Vec::new(),
            violations: Vec::new(),
            budget_reported: false,
        })
    }

    pub fn map(&self) -> &RegisterMap {
        &self.map
    }

    pub fn accesses(&self) -> &[BusAccess] {
        &self.accesses
    }

    pub fn violations(&self) -> &[HarnessError] {
        &self.violations
    }

    pub fn decode(&self, addr: u32) -> Option<Register> {
        Register::ALL.into_iter().find(|r| self.register_addr(*r) == addr)
    }

    pub fn register_addr(&self, register: Register) -> u32 {
        match register {
            Register::Result => self.map.result,
            Register::Output => self.map.output,
            Register::TimerCounter => self.map.timer_counter,
        }
    }

    fn device_mut(&mut self, register: Register) -> &mut dyn Device {
        match register {
            Register::Result => &mut self.result,
            Register::Output => &mut self.output,
            Register::TimerCounter => &mut self.timer,
        }
    }

    pub fn snapshot(&self) -> serde_json::Value {
        serde_json::json!({
            "result": self.result.snapshot(),
            "output": self.output.snapshot(),
            "timer_counter": self.timer.snapshot(),
        })
    }

    fn violation(&mut self, err: HarnessError) {
        warn!("Bus violation: {}", err);
        self.violations.push(err);
    }

    /// Bookkeeping shared by reads and writes. Returns false when the access
    /// must be dropped.
    fn begin(&mut self) -> bool {
        if self.accesses.len() as u64 >= self.max_accesses {
            if !self.budget_reported {
                self.budget_reported = true;
                self.violation(HarnessError::AccessBudget(self.max_accesses));
            }
            return false;
        }
        true
    }

    fn finish(&mut self, kind: AccessKind, register: Option<Register>, addr: u32, value: u32) {
        let access = BusAccess {
            seq: self.accesses.len() as u64,
            kind,
            register,
            addr,
            value,
        };
        debug!("{:?}", access);
        self.accesses.push(access);
        self.timer.tick();
    }

    fn result_written(&self) -> bool {
        !self.result.writes().is_empty()
    }
}

impl Mmio for RegisterBus {
    fn read_word(&mut self, addr: u32) -> u32 {
        if !self.begin() {
            return 0;
        }
        if self.result_written() {
            self.violation(HarnessError::AccessAfterResult(addr));
        }

        let register = self.decode(addr);
        let value = match register {
            None => {
                self.violation(HarnessError::Unmapped(addr));
                0
            }
            Some(register) if register.access() == Access::WriteOnly => {
                self.violation(HarnessError::WriteOnly { register, addr });
                0
            }
            Some(register) => self.device_mut(register).read(),
        };

        self.finish(AccessKind::Read, register, addr, value);
        value
    }

    fn write_word(&mut self, addr: u32, value: u32) {
        if !self.begin() {
            return;
        }

        let register = self.decode(addr);
        if self.result_written() {
            let err = if register == Some(Register::Result) {
                HarnessError::ResultRewritten(value)
            } else {
                HarnessError::AccessAfterResult(addr)
            };
            self.violation(err);
        }

        match register {
            None => self.violation(HarnessError::Unmapped(addr)),
            Some(register) if register.access() == Access::ReadOnly => {
                self.violation(HarnessError::ReadOnly {
                    register,
                    addr,
                    value,
                });
            }
            Some(register) => {
                if let Err(e) = self.device_mut(register).write(value) {
                    self.violation(e);
                }
            }
        }

        self.finish(AccessKind::Write, register, addr, value);
    }
}
