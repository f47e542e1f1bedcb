//! Command frame construction
//!
//! A command frame is the opcode byte followed by an opcode-specific
//! payload. Layouts are fixed per opcode and must match the companion
//! firmware byte for byte; multi-byte fields are little-endian.

use crate::registers::Register;
use heapless::Vec;

/// Maximum payload size in bytes
pub const MAX_PAYLOAD_SIZE: usize = 31;

/// Maximum complete command frame size (REGISTER + MAX_PAYLOAD)
pub const MAX_COMMAND_SIZE: usize = 1 + MAX_PAYLOAD_SIZE;

/// Maximum response frame size (STATUS + MAX_PAYLOAD)
pub const MAX_RESPONSE_SIZE: usize = 1 + MAX_PAYLOAD_SIZE;

/// Errors that can occur while building or sizing a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// Payload exceeds [`MAX_PAYLOAD_SIZE`]
    PayloadTooLarge,
    /// Requested response exceeds [`MAX_RESPONSE_SIZE`]
    ResponseTooLarge,
}

/// Pin direction configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum PinMode {
    /// High-impedance input
    Input = 0,
    /// Driven output
    Output = 1,
    /// Input with the internal pull-up enabled
    InputPullup = 2,
}

/// Digital pin level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum PinValue {
    Low = 0,
    High = 1,
}

impl PinValue {
    /// Interpret a response byte as a pin level (1 is high, anything
    /// else low)
    pub fn from_byte(byte: u8) -> Self {
        if byte == 1 {
            PinValue::High
        } else {
            PinValue::Low
        }
    }
}

/// Bit ordering for shift-out transfers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum BitOrder {
    LsbFirst = 0,
    MsbFirst = 1,
}

/// Analog reference voltage selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum AnalogReference {
    /// Supply voltage
    Default = 0,
    /// Chip-specific internal reference
    Internal = 1,
    /// Internal 1.1 V reference
    Internal1v1 = 2,
    /// Internal 2.56 V reference
    Internal2v56 = 3,
    /// Voltage applied to the AREF pin
    External = 4,
}

/// A command addressed to the companion microcontroller
///
/// Each variant encodes to the corresponding opcode's fixed frame
/// layout. `Custom` passes an application-defined opcode and payload
/// through unmodified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command<'a> {
    PinMode { pin: u8, mode: PinMode },
    DigitalRead { pin: u8 },
    DigitalWrite { pin: u8, value: PinValue },
    AnalogRead { pin: u8 },
    AnalogWrite { pin: u8, value: u8 },
    AnalogReference { reference: AnalogReference },
    Tone { pin: u8, frequency_hz: u16 },
    ToneFor { pin: u8, frequency_hz: u16, duration_ms: u32 },
    NoTone { pin: u8 },
    ShiftOut { data_pin: u8, clock_pin: u8, bit_order: BitOrder, value: u8 },
    EnableInterrupts,
    DisableInterrupts,
    BreatheLed { pin: u8, rate: u8, step: u8, off_value: u8 },
    NoBreatheLed { pin: u8 },
    PulsePin { pin: u8, off_value: PinValue, on_ms: u32, off_ms: u32 },
    NoPulsePin { pin: u8 },
    Custom { register: u8, payload: &'a [u8] },
}

impl Command<'_> {
    /// Opcode byte leading this command's frame
    pub fn register(&self) -> u8 {
        match self {
            Command::PinMode { .. } => Register::PinMode as u8,
            Command::DigitalRead { .. } => Register::DigitalRead as u8,
            Command::DigitalWrite { .. } => Register::DigitalWrite as u8,
            Command::AnalogRead { .. } => Register::AnalogRead as u8,
            Command::AnalogWrite { .. } => Register::AnalogWrite as u8,
            Command::AnalogReference { .. } => Register::AnalogReference as u8,
            Command::Tone { .. } | Command::ToneFor { .. } => Register::Tone as u8,
            Command::NoTone { .. } => Register::NoTone as u8,
            Command::ShiftOut { .. } => Register::ShiftOut as u8,
            Command::EnableInterrupts => Register::Interrupts as u8,
            Command::DisableInterrupts => Register::NoInterrupts as u8,
            Command::BreatheLed { .. } => Register::BreatheLed as u8,
            Command::NoBreatheLed { .. } => Register::NoBreatheLed as u8,
            Command::PulsePin { .. } => Register::PulsePin as u8,
            Command::NoPulsePin { .. } => Register::NoPulsePin as u8,
            Command::Custom { register, .. } => *register,
        }
    }

    /// Number of bytes the peer sends back, status byte included
    ///
    /// Custom commands report only the mandatory status byte here; the
    /// caller of a custom exchange states the real length itself.
    pub fn response_len(&self) -> usize {
        match self {
            Command::DigitalRead { .. } => 2,
            Command::AnalogRead { .. } => 3,
            _ => 1,
        }
    }

    /// Encode this command into a wire frame
    pub fn encode(&self) -> Result<Vec<u8, MAX_COMMAND_SIZE>, FrameError> {
        let mut frame = Vec::new();
        // The opcode always fits in an empty frame
        let _ = frame.push(self.register());

        match *self {
            Command::PinMode { pin, mode } => extend(&mut frame, &[pin, mode as u8])?,
            Command::DigitalRead { pin } => extend(&mut frame, &[pin])?,
            Command::DigitalWrite { pin, value } => extend(&mut frame, &[pin, value as u8])?,
            Command::AnalogRead { pin } => extend(&mut frame, &[pin])?,
            Command::AnalogWrite { pin, value } => extend(&mut frame, &[pin, value])?,
            Command::AnalogReference { reference } => extend(&mut frame, &[reference as u8])?,
            Command::Tone { pin, frequency_hz } => {
                let f = frequency_hz.to_le_bytes();
                extend(&mut frame, &[pin, f[0], f[1]])?
            }
            Command::ToneFor {
                pin,
                frequency_hz,
                duration_ms,
            } => {
                let f = frequency_hz.to_le_bytes();
                let d = duration_ms.to_le_bytes();
                extend(&mut frame, &[pin, f[0], f[1], d[0], d[1], d[2], d[3]])?
            }
            Command::NoTone { pin } => extend(&mut frame, &[pin])?,
            Command::ShiftOut {
                data_pin,
                clock_pin,
                bit_order,
                value,
            } => extend(&mut frame, &[data_pin, clock_pin, bit_order as u8, value])?,
            Command::EnableInterrupts | Command::DisableInterrupts => {}
            Command::BreatheLed {
                pin,
                rate,
                step,
                off_value,
            } => extend(&mut frame, &[pin, rate, step, off_value])?,
            Command::NoBreatheLed { pin } => extend(&mut frame, &[pin])?,
            Command::PulsePin {
                pin,
                off_value,
                on_ms,
                off_ms,
            } => {
                let on = on_ms.to_le_bytes();
                let off = off_ms.to_le_bytes();
                extend(
                    &mut frame,
                    &[
                        pin,
                        off_value as u8,
                        on[0],
                        on[1],
                        on[2],
                        on[3],
                        off[0],
                        off[1],
                        off[2],
                        off[3],
                    ],
                )?
            }
            Command::NoPulsePin { pin } => extend(&mut frame, &[pin])?,
            Command::Custom { payload, .. } => extend(&mut frame, payload)?,
        }

        Ok(frame)
    }
}

fn extend(frame: &mut Vec<u8, MAX_COMMAND_SIZE>, bytes: &[u8]) -> Result<(), FrameError> {
    frame
        .extend_from_slice(bytes)
        .map_err(|_| FrameError::PayloadTooLarge)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pin_mode_layout() {
        let frame = Command::PinMode {
            pin: 9,
            mode: PinMode::Output,
        }
        .encode()
        .unwrap();
        assert_eq!(&frame[..], &[0x00, 0x09, 0x01]);
    }

    #[test]
    fn test_digital_io_layouts() {
        let read = Command::DigitalRead { pin: 2 }.encode().unwrap();
        assert_eq!(&read[..], &[0x01, 0x02]);

        let write = Command::DigitalWrite {
            pin: 13,
            value: PinValue::High,
        }
        .encode()
        .unwrap();
        assert_eq!(&write[..], &[0x02, 0x0D, 0x01]);
    }

    #[test]
    fn test_analog_io_layouts() {
        let read = Command::AnalogRead { pin: 3 }.encode().unwrap();
        assert_eq!(&read[..], &[0x03, 0x03]);

        let write = Command::AnalogWrite { pin: 5, value: 0x80 }.encode().unwrap();
        assert_eq!(&write[..], &[0x04, 0x05, 0x80]);

        let reference = Command::AnalogReference {
            reference: AnalogReference::External,
        }
        .encode()
        .unwrap();
        assert_eq!(&reference[..], &[0x05, 0x04]);
    }

    #[test]
    fn test_tone_is_little_endian() {
        // 440 Hz = 0x01B8
        let frame = Command::Tone {
            pin: 8,
            frequency_hz: 440,
        }
        .encode()
        .unwrap();
        assert_eq!(&frame[..], &[0x06, 0x08, 0xB8, 0x01]);
    }

    #[test]
    fn test_tone_for_appends_duration() {
        let frame = Command::ToneFor {
            pin: 8,
            frequency_hz: 440,
            duration_ms: 0x0102_0304,
        }
        .encode()
        .unwrap();
        assert_eq!(
            &frame[..],
            &[0x06, 0x08, 0xB8, 0x01, 0x04, 0x03, 0x02, 0x01]
        );
    }

    #[test]
    fn test_no_tone_layout() {
        let frame = Command::NoTone { pin: 8 }.encode().unwrap();
        assert_eq!(&frame[..], &[0x07, 0x08]);
    }

    #[test]
    fn test_shift_out_layout() {
        let frame = Command::ShiftOut {
            data_pin: 11,
            clock_pin: 12,
            bit_order: BitOrder::MsbFirst,
            value: 0xA5,
        }
        .encode()
        .unwrap();
        assert_eq!(&frame[..], &[0x08, 0x0B, 0x0C, 0x01, 0xA5]);
    }

    #[test]
    fn test_interrupt_commands_have_no_payload() {
        let enable = Command::EnableInterrupts.encode().unwrap();
        assert_eq!(&enable[..], &[0x09]);

        let disable = Command::DisableInterrupts.encode().unwrap();
        assert_eq!(&disable[..], &[0x0A]);
    }

    #[test]
    fn test_breathe_led_layouts() {
        let start = Command::BreatheLed {
            pin: 6,
            rate: 10,
            step: 2,
            off_value: 0,
        }
        .encode()
        .unwrap();
        assert_eq!(&start[..], &[0x0B, 0x06, 0x0A, 0x02, 0x00]);

        let stop = Command::NoBreatheLed { pin: 6 }.encode().unwrap();
        assert_eq!(&stop[..], &[0x0C, 0x06]);
    }

    #[test]
    fn test_pulse_pin_layout() {
        let frame = Command::PulsePin {
            pin: 4,
            off_value: PinValue::Low,
            on_ms: 500,
            off_ms: 0x0001_0000,
        }
        .encode()
        .unwrap();
        // 500 = 0x01F4 little-endian over 4 bytes
        assert_eq!(
            &frame[..],
            &[0x0D, 0x04, 0x00, 0xF4, 0x01, 0x00, 0x00, 0x00, 0x00, 0x01, 0x00]
        );

        let stop = Command::NoPulsePin { pin: 4 }.encode().unwrap();
        assert_eq!(&stop[..], &[0x0E, 0x04]);
    }

    #[test]
    fn test_custom_command_passthrough() {
        let frame = Command::Custom {
            register: 20,
            payload: &[1, 2, 3],
        }
        .encode()
        .unwrap();
        assert_eq!(&frame[..], &[20, 1, 2, 3]);
    }

    #[test]
    fn test_custom_payload_too_large() {
        let payload = [0u8; MAX_PAYLOAD_SIZE + 1];
        let result = Command::Custom {
            register: 20,
            payload: &payload,
        }
        .encode();
        assert_eq!(result, Err(FrameError::PayloadTooLarge));
    }

    #[test]
    fn test_response_lengths() {
        assert_eq!(Command::DigitalRead { pin: 0 }.response_len(), 2);
        assert_eq!(Command::AnalogRead { pin: 0 }.response_len(), 3);
        assert_eq!(
            Command::DigitalWrite {
                pin: 0,
                value: PinValue::Low
            }
            .response_len(),
            1
        );
        assert_eq!(Command::EnableInterrupts.response_len(), 1);
    }

    #[test]
    fn test_pin_value_from_byte() {
        assert_eq!(PinValue::from_byte(1), PinValue::High);
        assert_eq!(PinValue::from_byte(0), PinValue::Low);
        assert_eq!(PinValue::from_byte(42), PinValue::Low);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn tone_frequency_round_trips(pin in 0u8..=255, frequency_hz in 0u16..=u16::MAX) {
                let frame = Command::Tone { pin, frequency_hz }.encode().unwrap();
                let decoded = u16::from_le_bytes([frame[2], frame[3]]);
                prop_assert_eq!(decoded, frequency_hz);
            }

            #[test]
            fn pulse_durations_round_trip(on_ms in 0u32..=u32::MAX, off_ms in 0u32..=u32::MAX) {
                let frame = Command::PulsePin {
                    pin: 0,
                    off_value: PinValue::Low,
                    on_ms,
                    off_ms,
                }
                .encode()
                .unwrap();
                let on = u32::from_le_bytes([frame[3], frame[4], frame[5], frame[6]]);
                let off = u32::from_le_bytes([frame[7], frame[8], frame[9], frame[10]]);
                prop_assert_eq!(on, on_ms);
                prop_assert_eq!(off, off_ms);
            }
        }
    }
}
