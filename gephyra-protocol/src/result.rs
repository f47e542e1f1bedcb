//! Result codes and response decoding
//!
//! The first byte of every response frame is a status code reported by
//! the peer. [`ResultCode::check`] is the single decode point: success
//! yields `Ok`, every other code maps 1:1 onto a distinct
//! [`CommandError`] so callers can tell "retry shortly"
//! ([`CommandError::BufferNotReady`]) from "this will never work"
//! ([`CommandError::CommandNotSupported`]).

use crate::command::PinValue;

/// Status byte values reported by the peer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ResultCode {
    /// Command executed
    Success,
    /// Payload length did not match the opcode's expected layout
    BufferSizeNotExpected,
    /// Peer-side buffer handling failed
    BufferError,
    /// Opcode not implemented by the firmware
    CommandNotSupported,
    /// Opcode resolved to a different operation than the host intended
    MappingMismatch,
    /// No handler installed for a custom opcode
    MissingCallback,
    /// Opcode beyond the peer's register table
    RegisterIdTooLarge,
    /// Peer has not finished preparing the response
    BufferNotReady,
    /// Unrecognizable status byte (never sent by the peer)
    Unknown(u8),
}

impl ResultCode {
    /// Decode the leading status byte of a response frame
    pub fn from_byte(byte: u8) -> Self {
        match byte {
            0 => ResultCode::Success,
            1 => ResultCode::BufferSizeNotExpected,
            2 => ResultCode::BufferError,
            3 => ResultCode::CommandNotSupported,
            4 => ResultCode::MappingMismatch,
            5 => ResultCode::MissingCallback,
            6 => ResultCode::RegisterIdTooLarge,
            0xFF => ResultCode::BufferNotReady,
            other => ResultCode::Unknown(other),
        }
    }

    /// Turn this code into the outcome of the call
    ///
    /// [`ResultCode::Success`] is the only code that yields `Ok`.
    pub fn check(self) -> Result<(), CommandError> {
        match self {
            ResultCode::Success => Ok(()),
            ResultCode::BufferSizeNotExpected => Err(CommandError::BufferSizeNotExpected),
            ResultCode::BufferError => Err(CommandError::BufferError),
            ResultCode::CommandNotSupported => Err(CommandError::CommandNotSupported),
            ResultCode::MappingMismatch => Err(CommandError::MappingMismatch),
            ResultCode::MissingCallback => Err(CommandError::MissingCallback),
            ResultCode::RegisterIdTooLarge => Err(CommandError::RegisterIdTooLarge),
            ResultCode::BufferNotReady => Err(CommandError::BufferNotReady),
            ResultCode::Unknown(byte) => Err(CommandError::Unknown(byte)),
        }
    }
}

/// Returns true when `status` reports success
///
/// The silent counterpart of [`ResultCode::check`] for callers that
/// poll and retry instead of failing. Both paths share the same decode.
pub fn status_ok(status: u8) -> bool {
    ResultCode::from_byte(status).check().is_ok()
}

/// Protocol-level disagreement between host and peer firmware
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CommandError {
    /// Payload length did not match the opcode's expected layout
    BufferSizeNotExpected,
    /// Peer-side buffer handling failed
    BufferError,
    /// Opcode not implemented by the firmware
    CommandNotSupported,
    /// Opcode resolved to a different operation than the host intended
    MappingMismatch,
    /// No handler installed for a custom opcode
    MissingCallback,
    /// Opcode beyond the peer's register table
    RegisterIdTooLarge,
    /// Retryable: the peer needs more time before the response is read
    BufferNotReady,
    /// Unrecognizable status byte
    Unknown(u8),
}

/// Decode a write-style response: `[status]`
pub fn decode_ack(response: &[u8]) -> Result<(), CommandError> {
    let status = *response.first().ok_or(CommandError::BufferSizeNotExpected)?;
    ResultCode::from_byte(status).check()
}

/// Decode a digital-read response: `[status][value]`
pub fn decode_digital(response: &[u8]) -> Result<PinValue, CommandError> {
    let (status, payload) = response
        .split_first()
        .ok_or(CommandError::BufferSizeNotExpected)?;
    ResultCode::from_byte(*status).check()?;

    match payload.first() {
        Some(&value) => Ok(PinValue::from_byte(value)),
        None => Err(CommandError::BufferSizeNotExpected),
    }
}

/// Decode an analog-read response: `[status][lo][hi]`
pub fn decode_analog(response: &[u8]) -> Result<u16, CommandError> {
    let (status, payload) = response
        .split_first()
        .ok_or(CommandError::BufferSizeNotExpected)?;
    ResultCode::from_byte(*status).check()?;

    if payload.len() < 2 {
        return Err(CommandError::BufferSizeNotExpected);
    }
    Ok(u16::from_le_bytes([payload[0], payload[1]]))
}
