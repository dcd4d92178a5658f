// LabWired - Firmware Simulation Platform
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

use std::env;
use std::fs;
use std::path::PathBuf;

// Testbench defaults; see `copperv_platform::map`.
const REGISTERS: [(&str, &str, u32); 3] = [
    ("COPPERV_T_ADDR", "result", 0x8000_0000),
    ("COPPERV_O_ADDR", "output", 0x8000_0004),
    ("COPPERV_TC_ADDR", "timer_counter", 0x8000_0008),
];

fn parse_addr(var: &str, raw: &str) -> u32 {
    let trimmed = raw.trim();
    let parsed = match trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
    {
        Some(hex) => u32::from_str_radix(&hex.replace('_', ""), 16),
        None => trimmed.parse(),
    };
    match parsed {
        Ok(addr) if addr % 4 == 0 => addr,
        Ok(addr) => panic!("{} = {:#x} is not word aligned", var, addr),
        Err(e) => panic!("invalid {} '{}': {}", var, raw, e),
    }
}

fn main() {
    let out = &PathBuf::from(env::var_os("OUT_DIR").unwrap());

    let mut fields = String::new();
    for (var, field, default) in REGISTERS {
        println!("cargo:rerun-if-env-changed={}", var);
        let addr = env::var(var)
            .map(|raw| parse_addr(var, &raw))
            .unwrap_or(default);
        fields.push_str(&format!("    {}: {:#010x},\n", field, addr));
    }
    fs::write(
        out.join("register_map.rs"),
        format!("RegisterMap {{\n{}}}\n", fields),
    )
    .unwrap();

    fs::copy("memory.x", out.join("memory.x")).unwrap();
    println!("cargo:rustc-link-search={}", out.display());
    println!("cargo:rustc-link-arg=-Tmemory.x");
    println!("cargo:rustc-link-arg=-Tlink.x");
    println!("cargo:rerun-if-changed=memory.x");
}
