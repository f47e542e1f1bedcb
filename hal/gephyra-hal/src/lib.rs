//! Gephyra Hardware Abstraction Layer
//!
//! This crate defines the traits that connect Gephyra's transport and
//! protocol layers to whatever bus hardware the platform offers (a Linux
//! I2C character device, an MCU HAL, a simulator). This enables the same
//! driver code to run against different backends.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Drivers (gephyra-drivers, sensors)     │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  gephyra-hal (this crate - traits)      │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ embedded-hal  │       │  platform     │
//! │ adapter       │       │  backends     │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`i2c::I2cBus`] - raw 7-bit-addressed master operations
//! - [`i2c::Error`] - backend error classification
//! - [`controller::BusController`] - controller discovery and exclusive
//!   claims on peer addresses

#![no_std]
#![deny(unsafe_code)]

pub mod controller;
pub mod i2c;

// Re-export key traits at crate root for convenience
pub use controller::{AcquireError, AcquireErrorKind, BusController};
pub use i2c::{Error, ErrorKind, I2cBus, I2cConfig};
