//! Register opcodes for the built-in command set

/// First register id available to caller-defined custom commands
///
/// Built-in opcodes stop at [`Register::NoPulsePin`]. Firmware routes
/// any id at or above this value to application-installed handlers, so
/// applications extending the protocol should allocate from here up.
pub const FIRST_CUSTOM_REGISTER: u8 = 15;

/// Built-in remote operations
///
/// The discriminant is the opcode byte that leads every command frame.
/// A single `Tone` opcode serves both the indefinite and the
/// fixed-duration variants; the firmware tells them apart by payload
/// length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Register {
    /// Configure a pin as input, output, or input with pull-up
    PinMode = 0,
    /// Sample a digital pin
    DigitalRead = 1,
    /// Drive a digital pin high or low
    DigitalWrite = 2,
    /// Sample an analog channel (10-bit reading)
    AnalogRead = 3,
    /// Set a PWM duty cycle on a pin
    AnalogWrite = 4,
    /// Select the analog reference voltage
    AnalogReference = 5,
    /// Start a square wave on a pin
    Tone = 6,
    /// Stop a square wave
    NoTone = 7,
    /// Clock a byte out serially over a data/clock pin pair
    ShiftOut = 8,
    /// Enable interrupt dispatch on the peer
    Interrupts = 9,
    /// Disable interrupt dispatch on the peer
    NoInterrupts = 10,
    /// Start a breathing (fade in/out) effect on an LED pin
    BreatheLed = 11,
    /// Stop a breathing effect
    NoBreatheLed = 12,
    /// Start a timed on/off pulse train on a pin
    PulsePin = 13,
    /// Stop a pulse train
    NoPulsePin = 14,
}
