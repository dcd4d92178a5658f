// LabWired - Firmware Simulation Platform
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

use core::fmt::Write;

use crate::map::RegisterMap;
use crate::mmio::Mmio;

// "-2147483648" is the longest `i32`.
const DECIMAL_CAPACITY: usize = 11;

/// Decimal text of one counter reading.
///
/// Each reading owns its buffer, so formatting a second value never clobbers
/// text that is still in use.
#[derive(Clone, Copy)]
pub struct DecimalBuf {
    bytes: [u8; DECIMAL_CAPACITY],
    len: usize,
}

impl DecimalBuf {
    const fn empty() -> Self {
        Self {
            bytes: [0; DECIMAL_CAPACITY],
            len: 0,
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len]
    }

    pub fn as_str(&self) -> &str {
        // Only `write_str` fills the buffer, and it copies whole `&str`s.
        core::str::from_utf8(self.as_bytes()).unwrap_or_default()
    }
}

impl Write for DecimalBuf {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        let end = self.len + s.len();
        if end > DECIMAL_CAPACITY {
            return Err(core::fmt::Error);
        }
        self.bytes[self.len..end].copy_from_slice(s.as_bytes());
        self.len = end;
        Ok(())
    }
}

impl core::fmt::Debug for DecimalBuf {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_tuple("DecimalBuf").field(&self.as_str()).finish()
    }
}

impl PartialEq<&str> for DecimalBuf {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

/// Base-10 text of `value`, with a leading minus sign when negative.
pub fn format_decimal(value: i32) -> DecimalBuf {
    let mut buf = DecimalBuf::empty();
    // Cannot fail: every i32 fits in DECIMAL_CAPACITY.
    let _ = write!(buf, "{}", value);
    buf
}

/// One read of the free-running counter, reinterpreted as a signed word.
pub fn read_counter<M: Mmio>(mmio: &mut M, map: &RegisterMap) -> i32 {
    mmio.read_word(map.timer_counter) as i32
}

pub fn read_timer_value<M: Mmio>(mmio: &mut M, map: &RegisterMap) -> DecimalBuf {
    format_decimal(read_counter(mmio, map))
}
