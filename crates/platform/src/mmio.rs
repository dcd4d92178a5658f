// LabWired - Firmware Simulation Platform
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

/// Word-sized access to memory-mapped registers.
///
/// There is no error path: the devices behind these addresses always accept a
/// write and always answer a read.
pub trait Mmio {
    fn read_word(&mut self, addr: u32) -> u32;
    fn write_word(&mut self, addr: u32, value: u32);
}

impl<M: Mmio + ?Sized> Mmio for &mut M {
    fn read_word(&mut self, addr: u32) -> u32 {
        (**self).read_word(addr)
    }

    fn write_word(&mut self, addr: u32, value: u32) {
        (**self).write_word(addr, value)
    }
}

/// Direct volatile access to the physical address space.
#[derive(Debug)]
pub struct Volatile {
    _private: (),
}

impl Volatile {
    /// # Safety
    ///
    /// Every address later passed to [`Mmio`] must be a word-aligned device
    /// register that is valid to access with volatile loads and stores.
    pub const unsafe fn new() -> Self {
        Self { _private: () }
    }
}

impl Mmio for Volatile {
    #[inline]
    fn read_word(&mut self, addr: u32) -> u32 {
        // SAFETY: guaranteed by the contract of `Volatile::new`.
        unsafe { core::ptr::read_volatile(addr as usize as *const u32) }
    }

    #[inline]
    fn write_word(&mut self, addr: u32, value: u32) {
        // SAFETY: guaranteed by the contract of `Volatile::new`.
        unsafe { core::ptr::write_volatile(addr as usize as *mut u32, value) }
    }
}
