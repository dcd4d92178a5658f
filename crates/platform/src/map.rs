// LabWired - Firmware Simulation Platform
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

/// Default result register (`T_ADDR`).
pub const RESULT_ADDR: u32 = 0x8000_0000;
/// Default output port (`O_ADDR`).
pub const OUTPUT_ADDR: u32 = 0x8000_0004;
/// Default timer counter (`TC_ADDR`).
pub const TIMER_COUNTER_ADDR: u32 = 0x8000_0008;

/// Addresses of the three platform registers.
///
/// The values are fixed by the platform: firmware bakes them in at build time
/// and the host harness fixes them for the duration of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegisterMap {
    /// Write-only test result register.
    pub result: u32,
    /// Write-only character output port.
    pub output: u32,
    /// Read-only free-running counter.
    pub timer_counter: u32,
}

impl RegisterMap {
    /// Register layout of the copperv simulation testbench.
    pub const COPPERV: Self = Self {
        result: RESULT_ADDR,
        output: OUTPUT_ADDR,
        timer_counter: TIMER_COUNTER_ADDR,
    };
}

impl Default for RegisterMap {
    fn default() -> Self {
        Self::COPPERV
    }
}

/// Status words understood by the result register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Pass,
    Fail,
    Other(u32),
}

impl Status {
    pub const PASS_CODE: u32 = 0x0100_0001;
    pub const FAIL_CODE: u32 = 0x0200_0001;

    pub const fn word(self) -> u32 {
        match self {
            Status::Pass => Self::PASS_CODE,
            Status::Fail => Self::FAIL_CODE,
            Status::Other(word) => word,
        }
    }

    pub const fn from_word(word: u32) -> Self {
        match word {
            Self::PASS_CODE => Status::Pass,
            Self::FAIL_CODE => Status::Fail,
            other => Status::Other(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{RegisterMap, Status};

    #[test]
    fn test_default_map_matches_testbench_layout() {
        let map = RegisterMap::default();
        assert_eq!(map.result, 0x8000_0000);
        assert_eq!(map.output, 0x8000_0004);
        assert_eq!(map.timer_counter, 0x8000_0008);
    }

    #[test]
    fn test_status_words() {
        assert_eq!(Status::Pass.word(), 0x0100_0001);
        assert_eq!(Status::from_word(0x0200_0001), Status::Fail);
        assert_eq!(Status::from_word(0xDEAD_BEEF), Status::Other(0xDEAD_BEEF));
        assert_eq!(Status::Other(7).word(), 7);
    }
}
