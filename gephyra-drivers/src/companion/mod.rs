//! Companion microcontroller driver
//!
//! Drives the register-command protocol over a [`BusDevice`]: encode a
//! command, write the frame in full, wait a fixed settle interval for
//! the firmware to service it, then read and decode the fixed-size
//! response. One exchange spans two bus transactions with a sleep in
//! between, which is why the driver takes `&mut self` everywhere -
//! exclusive ownership is what keeps concurrent callers from
//! interleaving into a half-finished exchange.
//!
//! Nothing is retried here. A peer that answers
//! [`CommandError::BufferNotReady`](gephyra_protocol::CommandError)
//! wants the whole operation re-issued by the caller.

use embedded_hal::delay::DelayNs;
use gephyra_hal::controller::BusController;
use gephyra_protocol::{
    decode_ack, decode_analog, decode_digital, AnalogReference, BitOrder, Command, CommandError,
    FrameError, PinMode, PinValue, MAX_RESPONSE_SIZE,
};
use heapless::Vec;

use crate::bus::{BusDevice, BusError};

/// Companion driver configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CompanionConfig {
    /// Fixed wait between writing a command and reading its response,
    /// in milliseconds
    ///
    /// This is a sleep, not a poll: firmware slower than this will be
    /// misread, firmware faster just costs latency.
    pub settle_delay_ms: u32,
}

impl Default for CompanionConfig {
    fn default() -> Self {
        Self {
            settle_delay_ms: 100,
        }
    }
}

/// Errors surfaced by companion operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CompanionError {
    /// Transport failure; fatal to the in-flight operation
    Bus(BusError),
    /// Host-side frame construction failure
    Frame(FrameError),
    /// Non-success status reported by the peer
    Command(CommandError),
}

impl From<BusError> for CompanionError {
    fn from(err: BusError) -> Self {
        CompanionError::Bus(err)
    }
}

impl From<FrameError> for CompanionError {
    fn from(err: FrameError) -> Self {
        CompanionError::Frame(err)
    }
}

impl From<CommandError> for CompanionError {
    fn from(err: CommandError) -> Self {
        CompanionError::Command(err)
    }
}

/// Driver for a companion microcontroller reachable over the bus
///
/// Exposes the built-in command set (pin modes, digital and analog I/O,
/// tone and pulse generation, LED breathing, interrupt control) plus
/// [`Companion::custom_command`] for application-defined opcodes.
pub struct Companion<C: BusController, D> {
    device: BusDevice<C>,
    delay: D,
    config: CompanionConfig,
}

impl<C, D> Companion<C, D>
where
    C: BusController,
    D: DelayNs,
{
    /// Wrap a transport with the default 100 ms settle delay
    pub fn new(device: BusDevice<C>, delay: D) -> Self {
        Self::with_config(device, delay, CompanionConfig::default())
    }

    /// Wrap a transport with an explicit configuration
    pub fn with_config(device: BusDevice<C>, delay: D, config: CompanionConfig) -> Self {
        Self {
            device,
            delay,
            config,
        }
    }

    /// The underlying transport
    pub fn device(&self) -> &BusDevice<C> {
        &self.device
    }

    /// The underlying transport, mutably
    pub fn device_mut(&mut self) -> &mut BusDevice<C> {
        &mut self.device
    }

    /// Initialize the underlying transport
    pub fn initialize(&mut self) -> Result<(), BusError> {
        self.device.initialize()
    }

    /// Release the underlying transport
    pub fn dispose(&mut self) {
        self.device.dispose()
    }

    /// One full exchange: write the frame, settle, read the response
    fn exchange(
        &mut self,
        command: &Command<'_>,
        response_len: usize,
    ) -> Result<Vec<u8, MAX_RESPONSE_SIZE>, CompanionError> {
        if response_len > MAX_RESPONSE_SIZE {
            return Err(FrameError::ResponseTooLarge.into());
        }

        let frame = command.encode()?;
        self.device.write(&frame)?;

        // The firmware needs this long to service the command before the
        // response is valid; the protocol has no ready flag to poll.
        self.delay.delay_ms(self.config.settle_delay_ms);

        let mut response = Vec::new();
        let _ = response.resize_default(response_len);
        self.device.read(&mut response)?;
        Ok(response)
    }

    fn execute(&mut self, command: &Command<'_>) -> Result<Vec<u8, MAX_RESPONSE_SIZE>, CompanionError> {
        self.exchange(command, command.response_len())
    }

    /// Configure a pin as input, output, or input with pull-up
    pub fn set_pin_mode(&mut self, pin: u8, mode: PinMode) -> Result<(), CompanionError> {
        let response = self.execute(&Command::PinMode { pin, mode })?;
        Ok(decode_ack(&response)?)
    }

    /// Drive a digital pin high or low
    pub fn digital_write(&mut self, pin: u8, value: PinValue) -> Result<(), CompanionError> {
        let response = self.execute(&Command::DigitalWrite { pin, value })?;
        Ok(decode_ack(&response)?)
    }

    /// Sample a digital pin
    pub fn digital_read(&mut self, pin: u8) -> Result<PinValue, CompanionError> {
        let response = self.execute(&Command::DigitalRead { pin })?;
        Ok(decode_digital(&response)?)
    }

    /// Set a PWM duty cycle on a pin
    pub fn analog_write(&mut self, pin: u8, value: u8) -> Result<(), CompanionError> {
        let response = self.execute(&Command::AnalogWrite { pin, value })?;
        Ok(decode_ack(&response)?)
    }

    /// Sample an analog channel
    pub fn analog_read(&mut self, pin: u8) -> Result<u16, CompanionError> {
        let response = self.execute(&Command::AnalogRead { pin })?;
        Ok(decode_analog(&response)?)
    }

    /// Select the analog reference voltage
    pub fn set_analog_reference(
        &mut self,
        reference: AnalogReference,
    ) -> Result<(), CompanionError> {
        let response = self.execute(&Command::AnalogReference { reference })?;
        Ok(decode_ack(&response)?)
    }

    /// Start a square wave on a pin
    pub fn tone(&mut self, pin: u8, frequency_hz: u16) -> Result<(), CompanionError> {
        let response = self.execute(&Command::Tone { pin, frequency_hz })?;
        Ok(decode_ack(&response)?)
    }

    /// Start a square wave that stops itself after `duration_ms`
    pub fn tone_for(
        &mut self,
        pin: u8,
        frequency_hz: u16,
        duration_ms: u32,
    ) -> Result<(), CompanionError> {
        let response = self.execute(&Command::ToneFor {
            pin,
            frequency_hz,
            duration_ms,
        })?;
        Ok(decode_ack(&response)?)
    }

    /// Stop a square wave
    pub fn no_tone(&mut self, pin: u8) -> Result<(), CompanionError> {
        let response = self.execute(&Command::NoTone { pin })?;
        Ok(decode_ack(&response)?)
    }

    /// Clock a byte out serially over a data/clock pin pair
    pub fn shift_out(
        &mut self,
        data_pin: u8,
        clock_pin: u8,
        bit_order: BitOrder,
        value: u8,
    ) -> Result<(), CompanionError> {
        let response = self.execute(&Command::ShiftOut {
            data_pin,
            clock_pin,
            bit_order,
            value,
        })?;
        Ok(decode_ack(&response)?)
    }

    /// Enable interrupt dispatch on the peer
    pub fn enable_interrupts(&mut self) -> Result<(), CompanionError> {
        let response = self.execute(&Command::EnableInterrupts)?;
        Ok(decode_ack(&response)?)
    }

    /// Disable interrupt dispatch on the peer
    pub fn disable_interrupts(&mut self) -> Result<(), CompanionError> {
        let response = self.execute(&Command::DisableInterrupts)?;
        Ok(decode_ack(&response)?)
    }

    /// Start a breathing (fade in/out) effect on an LED pin
    pub fn breathe_led(
        &mut self,
        pin: u8,
        rate: u8,
        step: u8,
        off_value: u8,
    ) -> Result<(), CompanionError> {
        let response = self.execute(&Command::BreatheLed {
            pin,
            rate,
            step,
            off_value,
        })?;
        Ok(decode_ack(&response)?)
    }

    /// Stop a breathing effect
    pub fn no_breathe_led(&mut self, pin: u8) -> Result<(), CompanionError> {
        let response = self.execute(&Command::NoBreatheLed { pin })?;
        Ok(decode_ack(&response)?)
    }

    /// Start a timed on/off pulse train on a pin
    pub fn pulse_pin(
        &mut self,
        pin: u8,
        off_value: PinValue,
        on_ms: u32,
        off_ms: u32,
    ) -> Result<(), CompanionError> {
        let response = self.execute(&Command::PulsePin {
            pin,
            off_value,
            on_ms,
            off_ms,
        })?;
        Ok(decode_ack(&response)?)
    }

    /// Stop a pulse train
    pub fn no_pulse_pin(&mut self, pin: u8) -> Result<(), CompanionError> {
        let response = self.execute(&Command::NoPulsePin { pin })?;
        Ok(decode_ack(&response)?)
    }

    /// Issue an application-defined command
    ///
    /// The frame is built exactly like a built-in command, but the
    /// response comes back undecoded, leading status byte included;
    /// interpreting it is the caller's contract with its firmware.
    /// [`gephyra_protocol::status_ok`] shares the built-in status
    /// decode for callers that want it.
    pub fn custom_command(
        &mut self,
        register: u8,
        payload: &[u8],
        response_len: usize,
    ) -> Result<Vec<u8, MAX_RESPONSE_SIZE>, CompanionError> {
        self.exchange(&Command::Custom { register, payload }, response_len)
    }
}
