//! Bus-attached device transport
//!
//! [`BusDevice`] owns exclusive, ordered byte-level access to one
//! addressed peer: it claims the address from a
//! [`BusController`] during initialization, gates every raw operation on
//! that claim, and releases it on disposal. Sensor drivers compose a
//! `BusDevice` for their register traffic rather than inheriting
//! transport behavior.

pub mod scan;

use gephyra_hal::controller::{AcquireError, AcquireErrorKind, BusController};
use gephyra_hal::i2c::{Error as _, ErrorKind, I2cBus, I2cConfig};

/// Why initialization failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InitFailure {
    /// The host has no usable bus controller
    NoController,
    /// Another exclusive claim already holds the address
    DeviceInUse,
    /// The peer did not acknowledge the initialization probe
    InvalidAddress,
}

/// Transport lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DeviceState {
    /// No initialization attempted yet
    Uninitialized,
    /// Claim and probe in progress
    Initializing,
    /// Claim held and peer probed; transport operations allowed
    Initialized,
    /// Initialization failed; retry allowed
    Failed(InitFailure),
    /// Claim released; terminal
    Disposed,
}

/// Transport errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusError {
    /// Operation requires a successfully initialized device
    NotInitialized,
    /// Operation attempted after disposal
    Disposed,
    /// Initialize called on an already-initialized device
    AlreadyInitialized,
    /// The host has no usable bus controller
    NoController,
    /// Another exclusive claim already holds the address
    DeviceInUse,
    /// The peer did not acknowledge the initialization probe
    InvalidAddress,
    /// Raw bus failure during an exchange
    Io(ErrorKind),
}

impl From<InitFailure> for BusError {
    fn from(failure: InitFailure) -> Self {
        match failure {
            InitFailure::NoController => BusError::NoController,
            InitFailure::DeviceInUse => BusError::DeviceInUse,
            InitFailure::InvalidAddress => BusError::InvalidAddress,
        }
    }
}

/// Exclusive transport to one bus-attached peer
///
/// The address and clock configuration are fixed at construction. The
/// device starts [`DeviceState::Uninitialized`]; every transport
/// operation requires [`DeviceState::Initialized`] and the claim is
/// held for the whole lifetime of the device, so a command/response
/// exchange can never be interleaved with a re-initialization.
pub struct BusDevice<C: BusController> {
    controller: C,
    bus: Option<C::Bus>,
    address: u8,
    config: I2cConfig,
    state: DeviceState,
}

impl<C: BusController> BusDevice<C> {
    /// Create a device at `address` with standard bus speed
    pub fn new(controller: C, address: u8) -> Self {
        Self::with_config(controller, address, I2cConfig::STANDARD)
    }

    /// Create a device at `address` with an explicit bus configuration
    pub fn with_config(controller: C, address: u8, config: I2cConfig) -> Self {
        Self {
            controller,
            bus: None,
            address,
            config,
            state: DeviceState::Uninitialized,
        }
    }

    /// 7-bit address this device was constructed with
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Bus configuration this device was constructed with
    pub fn config(&self) -> I2cConfig {
        self.config
    }

    /// Current lifecycle state
    pub fn state(&self) -> DeviceState {
        self.state
    }

    /// Whether transport operations are currently allowed
    pub fn is_initialized(&self) -> bool {
        self.state == DeviceState::Initialized
    }

    /// Claim the address and probe the peer with the default 2-byte read
    ///
    /// Re-initializing an already-initialized device is an error
    /// ([`BusError::AlreadyInitialized`]); a failed device may retry,
    /// a disposed one may not.
    pub fn initialize(&mut self) -> Result<(), BusError> {
        self.initialize_with(|bus, address| {
            let mut probe = [0u8; 2];
            bus.read(address, &mut probe)
        })
    }

    /// Claim the address and probe the peer with a device-specific check
    ///
    /// Drivers whose peer cannot service the default read (or that need
    /// a richer identity check, like reading a who-am-I register)
    /// supply their own probe here.
    pub fn initialize_with<F>(&mut self, probe: F) -> Result<(), BusError>
    where
        F: FnOnce(&mut C::Bus, u8) -> Result<(), <C::Bus as I2cBus>::Error>,
    {
        match self.state {
            DeviceState::Uninitialized | DeviceState::Failed(_) => {}
            DeviceState::Initializing | DeviceState::Initialized => {
                return Err(BusError::AlreadyInitialized)
            }
            DeviceState::Disposed => return Err(BusError::Disposed),
        }
        self.state = DeviceState::Initializing;

        let mut bus = match self.controller.acquire(self.address, self.config) {
            Ok(bus) => bus,
            Err(err) => {
                let failure = match err.kind() {
                    AcquireErrorKind::NoController => InitFailure::NoController,
                    AcquireErrorKind::AddressInUse => InitFailure::DeviceInUse,
                };
                self.state = DeviceState::Failed(failure);
                return Err(failure.into());
            }
        };

        // The peer must acknowledge a probe before the claim counts as open
        if probe(&mut bus, self.address).is_err() {
            self.state = DeviceState::Failed(InitFailure::InvalidAddress);
            return Err(BusError::InvalidAddress);
        }

        self.bus = Some(bus);
        self.state = DeviceState::Initialized;
        Ok(())
    }

    fn bus_mut(&mut self) -> Result<&mut C::Bus, BusError> {
        match self.state {
            DeviceState::Initialized => {}
            DeviceState::Disposed => return Err(BusError::Disposed),
            _ => return Err(BusError::NotInitialized),
        }
        self.bus.as_mut().ok_or(BusError::NotInitialized)
    }

    /// Transmit `bytes` to the peer in one transaction
    pub fn write(&mut self, bytes: &[u8]) -> Result<(), BusError> {
        let address = self.address;
        let bus = self.bus_mut()?;
        bus.write(address, bytes).map_err(|e| BusError::Io(e.kind()))
    }

    /// Read `buf.len()` bytes from the peer
    pub fn read(&mut self, buf: &mut [u8]) -> Result<(), BusError> {
        let address = self.address;
        let bus = self.bus_mut()?;
        bus.read(address, buf).map_err(|e| BusError::Io(e.kind()))
    }

    /// Write then read in a single transaction (repeated start)
    ///
    /// Used for register reads that must not be interleaved with other
    /// bus traffic.
    pub fn write_read(&mut self, write_bytes: &[u8], read_buf: &mut [u8]) -> Result<(), BusError> {
        let address = self.address;
        let bus = self.bus_mut()?;
        bus.write_read(address, write_bytes, read_buf)
            .map_err(|e| BusError::Io(e.kind()))
    }

    /// Read `buf.len()` bytes from a register
    ///
    /// Writes the register id and reads back in the same transaction.
    pub fn read_register(&mut self, register: u8, buf: &mut [u8]) -> Result<(), BusError> {
        self.write_read(&[register], buf)
    }

    /// Send the device-specific reset sequence
    ///
    /// The default device has no reset sequence; drivers that need one
    /// use [`BusDevice::reset_with`].
    pub fn reset(&mut self) -> Result<(), BusError> {
        self.reset_with(|_, _| Ok(()))
    }

    /// Reset the peer with a device-specific sequence
    pub fn reset_with<F>(&mut self, sequence: F) -> Result<(), BusError>
    where
        F: FnOnce(&mut C::Bus, u8) -> Result<(), <C::Bus as I2cBus>::Error>,
    {
        let address = self.address;
        let bus = self.bus_mut()?;
        sequence(bus, address).map_err(|e| BusError::Io(e.kind()))
    }

    /// Release the claim on the peer address
    ///
    /// Terminal: a disposed device cannot be re-initialized and every
    /// further operation fails with [`BusError::Disposed`].
    pub fn dispose(&mut self) {
        self.bus = None;
        self.state = DeviceState::Disposed;
    }
}
