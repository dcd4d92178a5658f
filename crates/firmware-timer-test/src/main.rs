// LabWired - Firmware Simulation Platform
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.
#![no_std]
#![no_main]

use copperv_platform::{diag, RegisterMap, Volatile};
use panic_halt as _;
use riscv_rt::entry;

// Addresses come from the build environment (COPPERV_*_ADDR), falling back to
// the testbench layout.
const REGISTERS: RegisterMap = include!(concat!(env!("OUT_DIR"), "/register_map.rs"));

#[entry]
fn main() -> ! {
    // SAFETY: REGISTERS only names the testbench device registers.
    let mut mmio = unsafe { Volatile::new() };
    diag::run(&mut mmio, &REGISTERS);

    // The result write ended the test; park the hart until the testbench stops.
    loop {
        // SAFETY: `wfi` only stalls the hart until the next interrupt.
        unsafe { riscv::asm::wfi() };
    }
}
