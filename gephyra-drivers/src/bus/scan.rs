//! Bus-wide address discovery
//!
//! Probes a range of 7-bit addresses to find which peers are present,
//! independent of any open [`BusDevice`](crate::bus::BusDevice) claims.

use core::ops::RangeInclusive;

use gephyra_hal::i2c::{Error as _, ErrorKind, I2cBus};
use heapless::Vec;

/// First address probed by a default scan; lower addresses are reserved
pub const SCAN_FIRST: u8 = 0x08;

/// Last address probed by a default scan; higher addresses are reserved
pub const SCAN_LAST: u8 = 0x77;

/// Maximum number of addresses a scan can report
pub const MAX_SCAN_RESULTS: usize = 128;

/// Probe every address in `range` and report the ones that respond
///
/// Each address gets a one-byte write; an address is recorded unless it
/// NACKed the probe.
pub fn scan<B: I2cBus>(bus: &mut B, range: RangeInclusive<u8>) -> Vec<u8, MAX_SCAN_RESULTS> {
    let mut found = Vec::new();

    for address in range {
        let present = match bus.write(address, &[0]) {
            Ok(()) => true,
            Err(err) => err.kind() != ErrorKind::NoAcknowledge,
        };
        if present {
            // The 7-bit address space fits the result buffer
            let _ = found.push(address);
        }
    }

    found
}

/// Scan the canonical 0x08-0x77 range
pub fn scan_default<B: I2cBus>(bus: &mut B) -> Vec<u8, MAX_SCAN_RESULTS> {
    scan(bus, SCAN_FIRST..=SCAN_LAST)
}
