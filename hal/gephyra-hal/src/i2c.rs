//! I2C bus abstractions
//!
//! Provides traits for I2C master operations that can be implemented
//! by platform-specific backends (Linux I2C character devices, MCU
//! HALs, bus simulators).

/// Coarse classification of raw bus failures.
///
/// Backends map their native error codes onto these kinds so that upper
/// layers can react to a failure without knowing which backend produced
/// it. The one that matters most to callers is [`ErrorKind::NoAcknowledge`]:
/// it is how a missing or wrongly-addressed peer shows up on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ErrorKind {
    /// The peer did not acknowledge its address or a data byte
    NoAcknowledge,
    /// Lost arbitration against another master
    ArbitrationLoss,
    /// Bus-level fault (missing start/stop condition, stuck lines)
    Bus,
    /// Backend-specific failure with no closer classification
    Other,
}

/// Error reported by an I2C backend
pub trait Error: core::fmt::Debug {
    /// Classify this error
    fn kind(&self) -> ErrorKind;
}

impl Error for core::convert::Infallible {
    fn kind(&self) -> ErrorKind {
        match *self {}
    }
}

/// I2C bus master
///
/// Provides basic I2C read/write operations for communicating with
/// peripheral devices.
pub trait I2cBus {
    /// Error type for I2C operations
    type Error: Error;

    /// Write data to a device at the given address
    ///
    /// # Arguments
    /// * `address` - 7-bit I2C address
    /// * `data` - Bytes to write
    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error>;

    /// Read data from a device at the given address
    ///
    /// # Arguments
    /// * `address` - 7-bit I2C address
    /// * `buf` - Buffer to read into
    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), Self::Error>;

    /// Write then read in a single transaction (repeated start)
    ///
    /// This is commonly used to write a register address then read data
    /// back without releasing the bus in between, so no other traffic
    /// can be interleaved into the exchange.
    ///
    /// # Arguments
    /// * `address` - 7-bit I2C address
    /// * `write_data` - Bytes to write (typically register address)
    /// * `read_buf` - Buffer to read into
    fn write_read(
        &mut self,
        address: u8,
        write_data: &[u8],
        read_buf: &mut [u8],
    ) -> Result<(), Self::Error>;
}

/// I2C configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct I2cConfig {
    /// Clock frequency in Hz
    pub frequency: u32,
}

impl Default for I2cConfig {
    fn default() -> Self {
        Self {
            frequency: 100_000, // 100kHz standard mode
        }
    }
}

impl I2cConfig {
    /// Standard mode (100 kHz)
    pub const STANDARD: Self = Self { frequency: 100_000 };

    /// Fast mode (400 kHz)
    pub const FAST: Self = Self { frequency: 400_000 };
}

/// Adapter exposing any `embedded-hal` I2C master as an [`I2cBus`].
///
/// Lets backends that already implement `embedded_hal::i2c::I2c`
/// (`linux-embedded-hal` on an SBC, chip HALs on bare metal) plug into
/// Gephyra unchanged.
#[cfg(feature = "embedded-hal")]
pub struct HalBus<T> {
    inner: T,
}

#[cfg(feature = "embedded-hal")]
impl<T> HalBus<T> {
    /// Wrap an `embedded-hal` I2C master
    pub fn new(inner: T) -> Self {
        Self { inner }
    }

    /// Release the wrapped master
    pub fn release(self) -> T {
        self.inner
    }
}

/// Error produced by [`HalBus`], classifying the backend's error kinds
#[cfg(feature = "embedded-hal")]
#[derive(Debug)]
pub struct HalError<E>(pub E);

#[cfg(feature = "embedded-hal")]
impl<E: embedded_hal::i2c::Error> Error for HalError<E> {
    fn kind(&self) -> ErrorKind {
        use embedded_hal::i2c::ErrorKind as Hal;

        match self.0.kind() {
            Hal::NoAcknowledge(_) => ErrorKind::NoAcknowledge,
            Hal::ArbitrationLoss => ErrorKind::ArbitrationLoss,
            Hal::Bus => ErrorKind::Bus,
            _ => ErrorKind::Other,
        }
    }
}

#[cfg(feature = "embedded-hal")]
impl<T: embedded_hal::i2c::I2c> I2cBus for HalBus<T> {
    type Error = HalError<T::Error>;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
        self.inner.write(address, data).map_err(HalError)
    }

    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), Self::Error> {
        self.inner.read(address, buf).map_err(HalError)
    }

    fn write_read(
        &mut self,
        address: u8,
        write_data: &[u8],
        read_buf: &mut [u8],
    ) -> Result<(), Self::Error> {
        self.inner
            .write_read(address, write_data, read_buf)
            .map_err(HalError)
    }
}
