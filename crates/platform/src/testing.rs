// LabWired - Firmware Simulation Platform
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

use std::string::String;
use std::vec::Vec;

use crate::map::RegisterMap;
use crate::mmio::Mmio;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Read(u32),
    Write(u32, u32),
}

/// Records every access; reads are answered from a fixed script.
pub struct RecordingBus {
    pub accesses: Vec<Access>,
    reads: Vec<u32>,
}

impl RecordingBus {
    pub fn new(reads: &[u32]) -> Self {
        Self {
            accesses: Vec::new(),
            reads: reads.iter().rev().copied().collect(),
        }
    }

    pub fn output(&self, map: &RegisterMap) -> String {
        self.accesses
            .iter()
            .filter_map(|a| match a {
                Access::Write(addr, value) if *addr == map.output => Some(*value as u8 as char),
                _ => None,
            })
            .collect()
    }
}

impl Mmio for RecordingBus {
    fn read_word(&mut self, addr: u32) -> u32 {
        self.accesses.push(Access::Read(addr));
        self.reads.pop().unwrap_or(0)
    }

    fn write_word(&mut self, addr: u32, value: u32) {
        self.accesses.push(Access::Write(addr, value));
    }
}
