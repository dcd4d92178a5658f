// LabWired - Firmware Simulation Platform
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

use crate::map::RegisterMap;
use crate::mmio::Mmio;

/// Character writer on top of the simulator output port.
///
/// Every byte goes straight to the port, one store per byte.
pub struct SimOut<'a, M: Mmio> {
    mmio: &'a mut M,
    port: u32,
}

impl<'a, M: Mmio> SimOut<'a, M> {
    pub fn new(mmio: &'a mut M, map: &RegisterMap) -> Self {
        Self {
            mmio,
            port: map.output,
        }
    }

    pub fn putc(&mut self, c: u8) {
        self.mmio.write_word(self.port, c as u32);
    }

    /// Writes `bytes` in order, stopping at the first NUL if there is one.
    pub fn print_bytes(&mut self, bytes: &[u8]) {
        for &c in bytes.iter().take_while(|&&c| c != 0) {
            self.putc(c);
        }
    }

    pub fn print(&mut self, s: &str) {
        self.print_bytes(s.as_bytes());
    }
}

impl<M: Mmio> core::fmt::Write for SimOut<'_, M> {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        self.print(s);
        Ok(())
    }
}
