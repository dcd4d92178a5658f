// LabWired - Firmware Simulation Platform
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

use crate::map::{RegisterMap, Status};
use crate::mmio::Mmio;
use crate::output::SimOut;
use crate::timer::read_timer_value;

pub const FIRST_LABEL: &str = "timer value 1: ";
pub const SECOND_LABEL: &str = "timer value 2: ";

/// The timer smoke test.
///
/// Prints two counter readings and reports `PASS`. The result write is the
/// last access; the simulator treats it as end-of-test.
pub fn run<M: Mmio>(mmio: &mut M, map: &RegisterMap) {
    for label in [FIRST_LABEL, SECOND_LABEL] {
        SimOut::new(&mut *mmio, map).print(label);
        let value = read_timer_value(&mut *mmio, map);
        let mut out = SimOut::new(&mut *mmio, map);
        out.print_bytes(value.as_bytes());
        out.print("\n");
    }

    mmio.write_word(map.result, Status::Pass.word());
}

#[cfg(test)]
mod tests {
    use super::run;
    use crate::map::{RegisterMap, Status};
    use crate::testing::{Access, RecordingBus};
    use std::vec::Vec;

    #[test]
    fn test_prints_both_readings() {
        let map = RegisterMap::default();
        let mut bus = RecordingBus::new(&[42, 57]);
        run(&mut bus, &map);

        assert_eq!(bus.output(&map), "timer value 1: 42\ntimer value 2: 57\n");
    }

    #[test]
    fn test_second_reading_is_a_fresh_read() {
        let map = RegisterMap::default();
        let mut bus = RecordingBus::new(&[0, 0]);
        run(&mut bus, &map);

        let reads = bus
            .accesses
            .iter()
            .filter(|a| matches!(a, Access::Read(addr) if *addr == map.timer_counter))
            .count();
        assert_eq!(reads, 2);
        assert_eq!(bus.output(&map), "timer value 1: 0\ntimer value 2: 0\n");
    }

    #[test]
    fn test_counter_read_happens_after_label() {
        let map = RegisterMap::default();
        let mut bus = RecordingBus::new(&[1, 2]);
        run(&mut bus, &map);

        let first_read = bus
            .accesses
            .iter()
            .position(|a| *a == Access::Read(map.timer_counter))
            .unwrap();
        // "timer value 1: " is 15 bytes.
        assert_eq!(first_read, 15);
    }

    #[test]
    fn test_pass_is_the_single_last_access() {
        let map = RegisterMap::default();
        let mut bus = RecordingBus::new(&[-5i32 as u32, 9]);
        run(&mut bus, &map);

        let result_writes: Vec<_> = bus
            .accesses
            .iter()
            .filter(|a| matches!(a, Access::Write(addr, _) if *addr == map.result))
            .collect();
        assert_eq!(result_writes.len(), 1);
        assert_eq!(
            bus.accesses.last(),
            Some(&Access::Write(map.result, Status::Pass.word()))
        );
        assert_eq!(bus.output(&map), "timer value 1: -5\ntimer value 2: 9\n");
    }

    #[test]
    fn test_honours_relocated_registers() {
        let map = RegisterMap {
            result: 0x1000,
            output: 0x1004,
            timer_counter: 0x1008,
        };
        let mut bus = RecordingBus::new(&[3, 4]);
        run(&mut bus, &map);

        assert_eq!(bus.output(&map), "timer value 1: 3\ntimer value 2: 4\n");
        assert_eq!(bus.accesses.last(), Some(&Access::Write(0x1000, 0x0100_0001)));
    }
}
