//! Bus controller discovery and device claims
//!
//! A [`BusController`] models the host side of the bus: it knows which
//! controller hardware the platform offers and can hand out an exclusive
//! claim on a single peer address. The transport layer asks for a claim
//! once during initialization and keeps the returned bus handle for the
//! lifetime of the device.

use crate::i2c::{I2cBus, I2cConfig};

/// Classification of claim failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AcquireErrorKind {
    /// The host has no usable bus controller
    NoController,
    /// Another exclusive claim already holds this address
    AddressInUse,
}

/// Error reported by a failed claim
pub trait AcquireError: core::fmt::Debug {
    /// Classify this error
    fn kind(&self) -> AcquireErrorKind;
}

impl AcquireError for AcquireErrorKind {
    fn kind(&self) -> AcquireErrorKind {
        *self
    }
}

/// Host-side bus controller
///
/// Implementations enumerate whatever bus hardware the platform offers
/// and hand out exclusive claims on peer addresses. Dropping the
/// returned bus handle releases the claim.
pub trait BusController {
    /// Bus handle produced by a successful claim
    type Bus: I2cBus;
    /// Error type for claim failures
    type Error: AcquireError;

    /// Claim exclusive access to the peer at `address`
    ///
    /// # Arguments
    /// * `address` - 7-bit I2C address of the peer
    /// * `config` - requested bus clock configuration
    fn acquire(&mut self, address: u8, config: I2cConfig) -> Result<Self::Bus, Self::Error>;
}
