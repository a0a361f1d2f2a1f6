//! Output pins and timed pulses.

use embedded_hal::blocking::delay::DelayMs;
use embedded_hal::digital::v2::OutputPin;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::clock::Millis;
use crate::config::OutputConfig;
use crate::error::Error;
use crate::level::{Level, PinSense};

/// The shape of a pulse produced by
/// [`PulseOutput::output_pulse()`](PulseOutput#method.output_pulse).
///
/// The pin is driven to the `rest` level, held there for `lead_ms`,
/// driven to the opposite level for `width_ms`, returned to `rest` for
/// `hang_ms`, and finally restored to whatever it was before.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OutputPulse {
    /// Time spent at the active level.
    pub width_ms: Millis,
    /// Time spent at the rest level after the pulse.
    pub hang_ms: Millis,
    /// Time spent at the rest level before the pulse.
    pub lead_ms: Millis,
    /// The level either side of the pulse.
    pub rest: Level,
}

impl OutputPulse {
    /// A positive-going pulse of `width_ms` with no lead or hang time.
    pub const fn new(width_ms: Millis) -> Self {
        OutputPulse {
            width_ms,
            hang_ms: 0,
            lead_ms: 0,
            rest: Level::Low,
        }
    }

    /// Set the hang time.
    pub const fn hang(mut self, hang_ms: Millis) -> Self {
        self.hang_ms = hang_ms;
        self
    }

    /// Set the lead time.
    pub const fn lead(mut self, lead_ms: Millis) -> Self {
        self.lead_ms = lead_ms;
        self
    }

    /// Set the rest level.  The pulse itself is the complement.
    pub const fn rest(mut self, rest: Level) -> Self {
        self.rest = rest;
        self
    }

    /// Total time spent blocking.
    pub const fn total_ms(&self) -> Millis {
        self.lead_ms
            .saturating_add(self.width_ms)
            .saturating_add(self.hang_ms)
    }
}

/// A digital output pin with an inversion policy and pulse generation.
///
/// While suspended every write is silently ignored.
pub struct PulseOutput<Pin> {
    pin: Pin,
    config: OutputConfig,
    sense: PinSense,
    enabled: bool,
}

impl<Pin: OutputPin> PulseOutput<Pin> {
    /// Wrap an output pin.
    ///
    /// The stored state starts at the configured initial level, but
    /// nothing is written until [`initialize()`](#method.initialize).
    pub fn new(pin: Pin, config: OutputConfig) -> Self {
        PulseOutput {
            pin,
            config,
            sense: PinSense::new(config.initial, config.inverted),
            enabled: true,
        }
    }

    /// Drive the stored state onto the hardware.
    pub fn initialize(&mut self) -> Result<(), Error<Pin::Error>> {
        self.drive(self.sense.physical())
    }

    /// Give back the underlying pin.
    pub fn release(self) -> Pin {
        self.pin
    }

    /// The board pin number.
    #[inline]
    pub fn pin_number(&self) -> u8 {
        self.config.pin
    }

    /// The configuration this pin was built with.
    #[inline]
    pub fn config(&self) -> &OutputConfig {
        &self.config
    }

    /// The stored physical level.
    #[inline]
    pub fn state(&self) -> Level {
        self.sense.physical()
    }

    /// The stored logical level.
    #[inline]
    pub fn logical_state(&self) -> Level {
        self.sense.logical()
    }

    /// Is the pin accepting writes?
    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Update the stored physical level without driving the pin.
    pub fn set_state(&mut self, level: Level) {
        if self.enabled {
            self.sense.set_physical(level);
        }
    }

    /// Update the stored logical level without driving the pin.
    pub fn set_logical_state(&mut self, level: Level) {
        if self.enabled {
            self.sense.set_logical(level);
        }
    }

    /// Drive the stored physical level onto the pin.
    pub fn write_state(&mut self) -> Result<(), Error<Pin::Error>> {
        if !self.enabled {
            return Ok(());
        }
        self.drive(self.sense.physical())
    }

    /// Set the physical level and drive it.
    pub fn write_value(&mut self, level: Level) -> Result<(), Error<Pin::Error>> {
        if !self.enabled {
            return Ok(());
        }
        self.sense.set_physical(level);
        self.drive(level)
    }

    /// Set the logical level and drive the matching physical level.
    pub fn write_logical_value(&mut self, level: Level) -> Result<(), Error<Pin::Error>> {
        if !self.enabled {
            return Ok(());
        }
        self.sense.set_logical(level);
        self.drive(self.sense.physical())
    }

    /// Emit one pulse, blocking for its whole length, then restore the
    /// pin to its prior level.
    ///
    /// The restore is attempted even if an earlier write fails, in
    /// which case the first error is returned.  Nothing else is sampled
    /// while this runs.
    pub fn output_pulse<D>(&mut self, delay: &mut D, pulse: OutputPulse) -> Result<(), Error<Pin::Error>>
    where
        D: DelayMs<u32>,
    {
        if !self.enabled {
            return Ok(());
        }

        let saved = self.sense.physical();

        #[cfg(feature = "defmt")]
        defmt::trace!("pin {=u8}: pulse {}", self.config.pin, pulse);

        let sequence = self.pulse_sequence(delay, &pulse);
        let restore = self.write_value(saved);

        sequence.and(restore)
    }

    fn pulse_sequence<D>(&mut self, delay: &mut D, pulse: &OutputPulse) -> Result<(), Error<Pin::Error>>
    where
        D: DelayMs<u32>,
    {
        self.write_value(pulse.rest)?;
        if pulse.lead_ms > 0 {
            delay.delay_ms(pulse.lead_ms);
        }

        self.write_value(!pulse.rest)?;
        if pulse.width_ms > 0 {
            delay.delay_ms(pulse.width_ms);
        }

        self.write_value(pulse.rest)?;
        if pulse.hang_ms > 0 {
            delay.delay_ms(pulse.hang_ms);
        }

        Ok(())
    }

    /// Drive the initial level and stop accepting writes.
    ///
    /// Calling this on a suspended pin does nothing.
    pub fn suspend(&mut self) -> Result<(), Error<Pin::Error>> {
        if !self.enabled {
            return Ok(());
        }
        let result = self.write_value(self.config.initial);
        self.enabled = false;
        result
    }

    /// Accept writes again.
    pub fn resume(&mut self) {
        self.enabled = true;
    }

    #[inline(always)]
    fn drive(&mut self, level: Level) -> Result<(), Error<Pin::Error>> {
        let result = match level {
            Level::High => self.pin.set_high(),
            Level::Low => self.pin.set_low(),
        };
        result.map_err(Error::Pin)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    use embedded_hal_mock::pin;
    use std::vec::Vec;

    #[derive(Default)]
    struct RecordingDelay {
        calls: Vec<u32>,
    }

    impl DelayMs<u32> for RecordingDelay {
        fn delay_ms(&mut self, ms: u32) {
            self.calls.push(ms);
        }
    }

    fn set(state: pin::State) -> pin::Transaction {
        pin::Transaction::set(state)
    }

    #[test]
    fn write_value_and_logical_value() {
        let expectations = [
            set(pin::State::High),
            set(pin::State::Low),
            set(pin::State::High),
        ];
        let pin = pin::Mock::new(&expectations);

        let mut out = PulseOutput::new(pin, OutputConfig::new(3).inverted(true));
        assert_eq!(Level::Low, out.state());
        assert_eq!(Level::High, out.logical_state());

        out.write_value(Level::High).unwrap();
        assert_eq!(Level::Low, out.logical_state());

        out.write_logical_value(Level::High).unwrap();
        assert_eq!(Level::Low, out.state());

        out.set_logical_state(Level::Low);
        out.write_state().unwrap();
        assert_eq!(Level::High, out.state());

        out.release().done();
    }

    #[test]
    fn initialize_writes_initial_level() {
        let expectations = [set(pin::State::High)];
        let pin = pin::Mock::new(&expectations);

        let mut out = PulseOutput::new(pin, OutputConfig::new(7).initial(Level::High));
        out.initialize().unwrap();
        assert_eq!(7, out.pin_number());

        out.release().done();
    }

    #[test]
    fn pulse_restores_low() {
        let expectations = [
            set(pin::State::Low),
            set(pin::State::High),
            set(pin::State::Low),
            set(pin::State::Low),
        ];
        let pin = pin::Mock::new(&expectations);
        let mut delay = RecordingDelay::default();

        let mut out = PulseOutput::new(pin, OutputConfig::new(5));
        out.output_pulse(&mut delay, OutputPulse::new(10)).unwrap();

        assert_eq!(Level::Low, out.state());
        assert_eq!(vec![10], delay.calls);

        out.release().done();
    }

    #[test]
    fn pulse_restores_high() {
        let expectations = [
            set(pin::State::Low),
            set(pin::State::High),
            set(pin::State::Low),
            set(pin::State::High),
        ];
        let pin = pin::Mock::new(&expectations);
        let mut delay = RecordingDelay::default();

        let mut out = PulseOutput::new(pin, OutputConfig::new(5).initial(Level::High));
        out.output_pulse(&mut delay, OutputPulse::new(10)).unwrap();

        assert_eq!(Level::High, out.state());
        out.release().done();
    }

    #[test]
    fn pulse_with_lead_hang_and_high_rest() {
        let expectations = [
            set(pin::State::High),
            set(pin::State::Low),
            set(pin::State::High),
            set(pin::State::Low),
        ];
        let pin = pin::Mock::new(&expectations);
        let mut delay = RecordingDelay::default();

        let shape = OutputPulse::new(25).lead(5).hang(40).rest(Level::High);
        assert_eq!(70, shape.total_ms());

        let mut out = PulseOutput::new(pin, OutputConfig::new(5));
        out.output_pulse(&mut delay, shape).unwrap();

        assert_eq!(vec![5, 25, 40], delay.calls);
        assert_eq!(Level::Low, out.state());
        out.release().done();
    }

    #[test]
    fn zero_width_pulse_does_not_delay() {
        let expectations = [
            set(pin::State::Low),
            set(pin::State::High),
            set(pin::State::Low),
            set(pin::State::Low),
        ];
        let pin = pin::Mock::new(&expectations);
        let mut delay = RecordingDelay::default();

        let mut out = PulseOutput::new(pin, OutputConfig::new(5));
        out.output_pulse(&mut delay, OutputPulse::new(0)).unwrap();

        assert!(delay.calls.is_empty());
        out.release().done();
    }

    #[test]
    fn suspend_writes_initial_and_ignores_writes() {
        let expectations = [set(pin::State::High), set(pin::State::Low)];
        let pin = pin::Mock::new(&expectations);
        let mut delay = RecordingDelay::default();

        let mut out = PulseOutput::new(pin, OutputConfig::new(9));
        out.write_value(Level::High).unwrap();

        out.suspend().unwrap();
        assert!(!out.is_enabled());
        assert_eq!(Level::Low, out.state());

        out.suspend().unwrap();
        out.write_value(Level::High).unwrap();
        out.write_logical_value(Level::High).unwrap();
        out.output_pulse(&mut delay, OutputPulse::new(10)).unwrap();
        out.set_state(Level::High);
        assert_eq!(Level::Low, out.state());
        assert!(delay.calls.is_empty());

        out.resume();
        assert!(out.is_enabled());
        out.release().done();
    }
}
