//! Debounced input pins with pulse capture and press classification.

use embedded_hal::digital::v2::{InputPin, OutputPin};

use crate::clock::{Clock, Millis};
use crate::config::{InputConfig, Thresholds};
use crate::error::Error;
use crate::level::{Level, PinSense};
use crate::mode::PulseMode;
use crate::output::PulseOutput;
use crate::pulse::Pulse;
use crate::sink::{NoSink, PulseSink};

/// A debounced input pin.
///
/// Call [`sample()`](#method.sample) or
/// [`read_pulse_mode()`](#method.read_pulse_mode) once per pass of your
/// control loop, several times within the short-press threshold.  Each
/// call reads the clock and the raw pin, accepts a new level once it has
/// held steady for longer than the debounce threshold, and records the
/// boundaries of logical-high pulses.
///
/// While suspended, sampling and every command are silent no-ops.
pub struct DebouncedInput<Pin, Clk, Sink = NoSink> {
    pin: Pin,
    clock: Clk,
    sink: Sink,
    config: InputConfig,
    sense: PinSense,
    last_reading: Level,
    last_read_time: Millis,
    changed: bool,
    pulse: Pulse,
    mode: PulseMode,
    enabled: bool,
}

impl<Pin: InputPin, Clk: Clock> DebouncedInput<Pin, Clk> {
    /// Wrap a raw input pin.
    ///
    /// The pin starts at the configured initial level in `Idle` mode.
    /// The first reading is compared against that initial level, so a
    /// pin resting where expected fires no transition at startup.
    pub fn new(pin: Pin, clock: Clk, config: InputConfig) -> Self {
        DebouncedInput {
            pin,
            clock,
            sink: NoSink,
            config,
            sense: PinSense::new(config.initial, config.inverted),
            last_reading: config.initial,
            last_read_time: 0,
            changed: false,
            pulse: Pulse::new(),
            mode: PulseMode::Idle,
            enabled: true,
        }
    }
}

impl<Pin: InputPin, Clk: Clock, Sink: PulseSink> DebouncedInput<Pin, Clk, Sink> {
    /// Send completed pulses to `sink`.
    ///
    /// Pulses are only delivered if the pin was configured with
    /// `write_pulses` and the sink itself is accepting them.
    pub fn with_sink<S: PulseSink>(self, sink: S) -> DebouncedInput<Pin, Clk, S> {
        DebouncedInput {
            pin: self.pin,
            clock: self.clock,
            sink,
            config: self.config,
            sense: self.sense,
            last_reading: self.last_reading,
            last_read_time: self.last_read_time,
            changed: self.changed,
            pulse: self.pulse,
            mode: self.mode,
            enabled: self.enabled,
        }
    }

    /// Give back the raw pin, the clock and the sink.
    pub fn release(self) -> (Pin, Clk, Sink) {
        (self.pin, self.clock, self.sink)
    }

    /// Sample the raw pin and update the debounced state.
    ///
    /// Returns `true` if the physical state changed on this sample.  A
    /// rising logical edge opens a pulse and a falling one closes it.
    ///
    /// If reading the pin fails, the error is returned and no state is
    /// touched.
    pub fn sample(&mut self) -> Result<bool, Error<Pin::Error>> {
        if !self.enabled {
            return Ok(false);
        }

        let prior = self.sense.physical();
        let t = self.clock.now();
        let reading = Level::from(self.pin.is_high().map_err(Error::Pin)?);

        if self.config.debounce_ms == 0 {
            self.sense.set_physical(reading);
        } else if reading != self.last_reading {
            // Raw level moved; restart the stability window.
            self.last_read_time = t;
        } else if t.wrapping_sub(self.last_read_time) > self.config.debounce_ms {
            // Wrapping age so a window spanning the counter rollover still closes.
            self.sense.set_physical(reading);
        }

        self.last_reading = reading;
        self.process_state(t, prior);

        Ok(self.changed)
    }

    /// Force the logical state as if it had just been read.
    ///
    /// The raw pin is not touched, but pulse capture runs as usual using
    /// the current time.  Useful for injected or simulated input.
    pub fn force_logical_state(&mut self, level: Level) {
        if !self.enabled {
            return;
        }

        let prior = self.sense.physical();
        let t = self.clock.now();
        self.sense.set_logical(level);
        self.process_state(t, prior);
    }

    /// Sample the pin and classify any pulse that just completed.
    ///
    /// Returns `true` if the mode changed.  The mode only ever moves
    /// when a pulse ends; invalid pulses count as zero length.
    pub fn read_pulse_mode(&mut self) -> Result<bool, Error<Pin::Error>> {
        if !self.sample()? || self.sense.logical().is_high() {
            return Ok(false);
        }

        let prior = self.mode;
        self.mode = prior.next(self.pulse.effective_duration(), &self.config.thresholds);

        if self.mode == prior {
            return Ok(false);
        }

        #[cfg(feature = "defmt")]
        defmt::debug!("pin {=u8}: mode {} -> {}", self.config.pin, prior, self.mode);

        Ok(true)
    }

    fn process_state(&mut self, t: Millis, prior: Level) {
        self.changed = self.sense.physical() != prior;
        if !self.changed {
            return;
        }

        if self.sense.logical().is_high() {
            self.pulse.set_start(t);

            #[cfg(feature = "defmt")]
            defmt::trace!("pin {=u8}: pulse start at {=u32}", self.config.pin, t);
        } else {
            self.pulse.set_end(t);

            #[cfg(feature = "defmt")]
            defmt::trace!("pin {=u8}: pulse {}", self.config.pin, self.pulse);

            if self.config.write_pulses && self.pulse.is_valid() {
                self.sink.write_pulse(&self.pulse);
            }
        }
    }

    /// Stop sampling and return to the resting state.
    ///
    /// The physical state goes back to the initial level, the mode to
    /// `Idle`, and the pulse record is cleared.  Suspending twice is
    /// the same as suspending once.
    pub fn suspend(&mut self) {
        self.enabled = false;
        self.sense.set_physical(self.config.initial);
        self.mode = PulseMode::Idle;
        self.pulse.reset();
        self.changed = false;
    }

    /// Start sampling again.
    ///
    /// The debounce bookkeeping is left as it was, so the next reading
    /// only starts a fresh stability window if it differs from the last
    /// reading taken before the suspend.
    pub fn resume(&mut self) {
        self.enabled = true;
    }

    /// Set the mode directly.
    ///
    /// Also clears the pulse record and drives the logical state low, so
    /// the next press is measured from scratch.  `Unknown` is stored as
    /// `Idle`.
    pub fn set_mode(&mut self, mode: PulseMode) {
        if !self.enabled {
            return;
        }

        self.mode = match mode {
            PulseMode::Unknown => PulseMode::Idle,
            other => other,
        };
        self.pulse.reset();
        self.sense.set_logical(Level::Low);
    }

    /// Overwrite the physical state, without pulse capture.
    pub fn set_state(&mut self, level: Level) {
        if self.enabled {
            self.sense.set_physical(level);
        }
    }

    /// Overwrite the logical state, without pulse capture.
    pub fn set_logical_state(&mut self, level: Level) {
        if self.enabled {
            self.sense.set_logical(level);
        }
    }

    /// Mirror this pin's logical state onto an output pin.
    ///
    /// Only acts when the last sample changed state.
    pub fn indicate<P: OutputPin>(&self, output: &mut PulseOutput<P>) -> Result<(), Error<P::Error>> {
        if !(self.enabled && self.changed) {
            return Ok(());
        }
        output.write_logical_value(self.sense.logical())
    }

    /// Mirror the complement of this pin's logical state onto an output
    /// pin.
    ///
    /// Only acts when the last sample changed state.
    pub fn indicate_inverse<P: OutputPin>(
        &self,
        output: &mut PulseOutput<P>,
    ) -> Result<(), Error<P::Error>> {
        if !(self.enabled && self.changed) {
            return Ok(());
        }
        output.write_logical_value(!self.sense.logical())
    }

    /// The debounced physical level.
    #[inline]
    pub fn state(&self) -> Level {
        self.sense.physical()
    }

    /// The debounced logical level.
    #[inline]
    pub fn logical_state(&self) -> Level {
        self.sense.logical()
    }

    /// Did the last sample change the state?
    #[inline]
    pub fn has_changed(&self) -> bool {
        self.changed
    }

    /// The current press classification.
    #[inline]
    pub fn mode(&self) -> PulseMode {
        self.mode
    }

    /// The most recent pulse, open or closed.
    #[inline]
    pub fn last_pulse(&self) -> Pulse {
        self.pulse
    }

    /// Is the pin sampling?
    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// The board pin number.
    #[inline]
    pub fn pin_number(&self) -> u8 {
        self.config.pin
    }

    /// The classification thresholds in use.
    #[inline]
    pub fn thresholds(&self) -> &Thresholds {
        &self.config.thresholds
    }

    /// The configuration this pin was built with.
    #[inline]
    pub fn config(&self) -> &InputConfig {
        &self.config
    }
}
