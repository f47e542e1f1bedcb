//! Register-command protocol for Gephyra companion microcontrollers
//!
//! This crate defines the I2C wire format spoken between the host and a
//! companion microcontroller (typically an Arduino-class board) that
//! exposes its pins, analog channels, tone and pulse generators over the
//! bus. The format turns the raw byte transport into a miniature
//! remote-procedure-call channel.
//!
//! # Protocol Overview
//!
//! Every exchange is one command frame followed, after a settle delay,
//! by one response frame:
//!
//! ```text
//! command   ┌──────────┬─────────────────┐
//!           │ REGISTER │ PAYLOAD         │
//!           │ 1B       │ 0–31B (per op)  │
//!           └──────────┴─────────────────┘
//! response  ┌──────────┬─────────────────┐
//!           │ STATUS   │ PAYLOAD         │
//!           │ 1B       │ 0–31B (per op)  │
//!           └──────────┴─────────────────┘
//! ```
//!
//! Multi-byte payload fields are little-endian. Register ids occupy a
//! single byte on the wire; ids at or above [`FIRST_CUSTOM_REGISTER`]
//! are reserved for application-defined commands that the firmware
//! dispatches to installed handlers.

#![no_std]
#![deny(unsafe_code)]

pub mod command;
pub mod registers;
pub mod result;
pub mod wire;

pub use command::{
    AnalogReference, BitOrder, Command, FrameError, PinMode, PinValue, MAX_COMMAND_SIZE,
    MAX_PAYLOAD_SIZE, MAX_RESPONSE_SIZE,
};
pub use registers::{Register, FIRST_CUSTOM_REGISTER};
pub use result::{decode_ack, decode_analog, decode_digital, status_ok, CommandError, ResultCode};
