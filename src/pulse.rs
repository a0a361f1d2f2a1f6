//! A record of one logical pulse.

use core::fmt::{self, Write};

use heapless::String;

use crate::clock::Millis;

/// Capacity of a pulse description.
pub const DESCRIPTION_MAX: usize = 32;

/// Separates the start and end times in a pulse description.
pub const DESCRIPTION_DELIMITER: char = '|';

// Two u32s and a delimiter.
const _: () = assert!(DESCRIPTION_MAX >= 21);

/// The text produced by [`Pulse::description()`](Pulse#method.description).
pub type PulseDescription = String<DESCRIPTION_MAX>;

/// One pulse: the interval during which a pin was logically high.
///
/// A pulse is opened with [`set_start()`](#method.set_start) and closed
/// with [`set_end()`](#method.set_end).  It is only valid once closed
/// with an end time strictly after its start time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Pulse {
    start: Millis,
    end: Millis,
    duration: Millis,
    valid: bool,
}

impl Pulse {
    /// An empty, invalid pulse.
    pub const fn new() -> Self {
        Pulse {
            start: 0,
            end: 0,
            duration: 0,
            valid: false,
        }
    }

    /// Clear back to the empty state.
    pub fn reset(&mut self) {
        *self = Pulse::new();
    }

    /// Open a new pulse at `t`, discarding anything recorded before.
    pub fn set_start(&mut self, t: Millis) {
        self.valid = false;
        self.duration = 0;
        self.start = t;
        self.end = t;
    }

    /// Close the pulse at `t`.
    ///
    /// If `t` is not after the start time the pulse is marked invalid.
    pub fn set_end(&mut self, t: Millis) {
        self.end = t;
        self.duration = self.end.saturating_sub(self.start);
        self.valid = self.duration > 0;
    }

    /// When the pulse began.
    #[inline]
    pub const fn start(&self) -> Millis {
        self.start
    }

    /// When the pulse ended.  Meaningless unless the pulse is valid.
    #[inline]
    pub const fn end(&self) -> Millis {
        self.end
    }

    /// Length of the pulse.
    #[inline]
    pub const fn duration(&self) -> Millis {
        self.duration
    }

    /// Has the pulse been closed with a positive duration?
    #[inline]
    pub const fn is_valid(&self) -> bool {
        self.valid
    }

    /// The duration if valid, otherwise zero.
    #[inline]
    pub const fn effective_duration(&self) -> Millis {
        if self.valid {
            self.duration
        } else {
            0
        }
    }

    /// Diagnostic text of the form `start|end`.
    ///
    /// Empty if the pulse is not valid.
    pub fn description(&self) -> PulseDescription {
        let mut text = String::new();
        // Cannot overflow; capacity is checked above.
        let _ = write!(text, "{}", self);
        text
    }
}

impl fmt::Display for Pulse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.valid {
            return Ok(());
        }
        write!(f, "{}{}{}", self.start, DESCRIPTION_DELIMITER, self.end)
    }
}
