//! Concrete drivers for the Gephyra peripheral toolkit
//!
//! This crate provides the two layers that turn a raw bus into useful
//! peripherals:
//!
//! - [`bus::BusDevice`] - exclusive, lifecycle-managed transport to one
//!   addressed peer, plus bus-wide address scanning
//! - [`companion::Companion`] - the register-command RPC driver for a
//!   companion microcontroller's pins, analog channels, and tone/pulse
//!   generators
//!
//! Sensor drivers compose a [`bus::BusDevice`] for their register
//! traffic; applications talk to a companion board through
//! [`companion::Companion`] or extend its command set with custom
//! opcodes.

#![no_std]
#![deny(unsafe_code)]

pub mod bus;
pub mod companion;

#[cfg(test)]
mod mock;
