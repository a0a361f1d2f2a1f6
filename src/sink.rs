//! Diagnostic sinks for completed pulses.
//!
//! An input pin hands each valid completed pulse to its sink, provided
//! the pin was configured with
//! [`write_pulses`](crate::InputConfig#structfield.write_pulses).  The
//! sink applies its own enable flag on top, so one switch silences every
//! pin sharing it.  Delivery is best-effort and never affects pin state.

use core::cell::{Cell, RefCell};
use core::fmt::Write;

use crate::pulse::Pulse;

/// Receives completed pulses.
pub trait PulseSink {
    /// Record a pulse.  Must not fail; errors are swallowed.
    fn write_pulse(&self, pulse: &Pulse);
}

impl<S: PulseSink + ?Sized> PulseSink for &S {
    #[inline]
    fn write_pulse(&self, pulse: &Pulse) {
        (**self).write_pulse(pulse)
    }
}

/// A sink that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSink;

impl PulseSink for NoSink {
    #[inline(always)]
    fn write_pulse(&self, _pulse: &Pulse) {}
}

/// Writes one pulse description per line to a [`core::fmt::Write`].
///
/// Typically wraps a serial port.  Share it between pins by reference:
///
/// ```
/// use pulsepin::{LineSink, Pulse, PulseSink};
///
/// let sink = LineSink::new(String::new());
/// let mut pulse = Pulse::new();
/// pulse.set_start(10);
/// pulse.set_end(250);
///
/// (&sink).write_pulse(&pulse);
/// sink.set_enabled(false);
/// (&sink).write_pulse(&pulse);
///
/// assert_eq!("10|250\n", sink.into_inner());
/// ```
#[derive(Debug)]
pub struct LineSink<W> {
    writer: RefCell<W>,
    enabled: Cell<bool>,
}

impl<W: Write> LineSink<W> {
    /// Wrap a writer.  The sink starts enabled.
    pub const fn new(writer: W) -> Self {
        LineSink {
            writer: RefCell::new(writer),
            enabled: Cell::new(true),
        }
    }

    /// Turn pulse output on or off for every pin using this sink.
    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.set(enabled);
    }

    /// Is pulse output on?
    pub fn is_enabled(&self) -> bool {
        self.enabled.get()
    }

    /// Recover the writer.
    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }
}

impl<W: Write> PulseSink for LineSink<W> {
    fn write_pulse(&self, pulse: &Pulse) {
        if !self.enabled.get() || !pulse.is_valid() {
            return;
        }

        // Busy means re-entered from inside the writer; drop the line.
        if let Ok(mut writer) = self.writer.try_borrow_mut() {
            let _ = writeln!(writer, "{}", pulse);
        }
    }
}
