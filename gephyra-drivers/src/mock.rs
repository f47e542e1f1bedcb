//! Mock bus plumbing shared by the driver tests

use core::cell::RefCell;

use gephyra_hal::controller::{AcquireErrorKind, BusController};
use gephyra_hal::i2c::{Error, ErrorKind, I2cBus, I2cConfig};
use heapless::Vec;

/// Behavior knobs for the mock controller and bus
pub struct MockSettings {
    /// Whether the host has a bus controller at all
    pub available: bool,
    /// Addresses already claimed by someone else
    pub in_use: Vec<u8, 4>,
    /// Addresses that acknowledge traffic
    pub acks: Vec<u8, 8>,
}

impl Default for MockSettings {
    fn default() -> Self {
        Self {
            available: true,
            in_use: Vec::new(),
            acks: Vec::new(),
        }
    }
}

impl MockSettings {
    pub fn acking(addresses: &[u8]) -> Self {
        let mut settings = Self::default();
        settings.acks.extend_from_slice(addresses).unwrap();
        settings
    }
}

/// Everything the mock bus saw and what it will answer next
#[derive(Default)]
pub struct BusLog {
    /// Frames written, oldest first
    pub writes: Vec<Vec<u8, 32>, 8>,
    /// Queued responses handed out on reads, oldest first
    pub responses: Vec<Vec<u8, 32>, 8>,
    next_response: usize,
}

impl BusLog {
    pub fn queue_response(&mut self, bytes: &[u8]) {
        let mut response = Vec::new();
        response.extend_from_slice(bytes).unwrap();
        self.responses.push(response).unwrap();
    }

    pub fn last_write(&self) -> &[u8] {
        self.writes.last().map(|w| &w[..]).unwrap_or(&[])
    }

    fn pop_response(&mut self, buf: &mut [u8]) {
        buf.fill(0);
        if let Some(response) = self.responses.get(self.next_response) {
            let n = response.len().min(buf.len());
            buf[..n].copy_from_slice(&response[..n]);
            self.next_response += 1;
        }
    }
}

#[derive(Debug)]
pub struct MockError(pub ErrorKind);

impl Error for MockError {
    fn kind(&self) -> ErrorKind {
        self.0
    }
}

pub struct MockBus<'a> {
    settings: &'a RefCell<MockSettings>,
    log: &'a RefCell<BusLog>,
}

impl<'a> MockBus<'a> {
    pub fn new(settings: &'a RefCell<MockSettings>, log: &'a RefCell<BusLog>) -> Self {
        Self { settings, log }
    }
}

impl MockBus<'_> {
    fn check_ack(&self, address: u8) -> Result<(), MockError> {
        if self.settings.borrow().acks.contains(&address) {
            Ok(())
        } else {
            Err(MockError(ErrorKind::NoAcknowledge))
        }
    }
}

impl I2cBus for MockBus<'_> {
    type Error = MockError;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
        self.check_ack(address)?;
        let mut frame = Vec::new();
        frame
            .extend_from_slice(data)
            .map_err(|_| MockError(ErrorKind::Other))?;
        let _ = self.log.borrow_mut().writes.push(frame);
        Ok(())
    }

    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), Self::Error> {
        self.check_ack(address)?;
        self.log.borrow_mut().pop_response(buf);
        Ok(())
    }

    fn write_read(
        &mut self,
        address: u8,
        write_data: &[u8],
        read_buf: &mut [u8],
    ) -> Result<(), Self::Error> {
        self.write(address, write_data)?;
        self.log.borrow_mut().pop_response(read_buf);
        Ok(())
    }
}

pub struct MockController<'a> {
    pub settings: &'a RefCell<MockSettings>,
    pub log: &'a RefCell<BusLog>,
}

impl<'a> BusController for MockController<'a> {
    type Bus = MockBus<'a>;
    type Error = AcquireErrorKind;

    fn acquire(&mut self, address: u8, _config: I2cConfig) -> Result<Self::Bus, Self::Error> {
        let settings = self.settings.borrow();
        if !settings.available {
            return Err(AcquireErrorKind::NoController);
        }
        if settings.in_use.contains(&address) {
            return Err(AcquireErrorKind::AddressInUse);
        }
        Ok(MockBus {
            settings: self.settings,
            log: self.log,
        })
    }
}

/// Delay provider that records total requested sleep time
pub struct MockDelay<'a> {
    pub total_ns: &'a core::cell::Cell<u64>,
}

impl embedded_hal::delay::DelayNs for MockDelay<'_> {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns.set(self.total_ns.get() + u64::from(ns));
    }
}
