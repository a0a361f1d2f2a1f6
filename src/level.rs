//! Pin levels and the physical/logical state pair.

use core::ops::Not;

use embedded_hal::digital::v2::PinState;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A digital logic level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Level {
    /// Logic 0.
    #[default]
    Low,
    /// Logic 1.
    High,
}

impl Level {
    /// Is this level `High`?
    #[inline]
    pub const fn is_high(self) -> bool {
        matches!(self, Level::High)
    }

    /// Is this level `Low`?
    #[inline]
    pub const fn is_low(self) -> bool {
        matches!(self, Level::Low)
    }
}

impl Not for Level {
    type Output = Level;

    #[inline]
    fn not(self) -> Level {
        match self {
            Level::Low => Level::High,
            Level::High => Level::Low,
        }
    }
}

impl From<bool> for Level {
    #[inline]
    fn from(high: bool) -> Level {
        if high {
            Level::High
        } else {
            Level::Low
        }
    }
}

impl From<Level> for bool {
    #[inline]
    fn from(level: Level) -> bool {
        level.is_high()
    }
}

impl From<PinState> for Level {
    #[inline]
    fn from(state: PinState) -> Level {
        match state {
            PinState::Low => Level::Low,
            PinState::High => Level::High,
        }
    }
}

impl From<Level> for PinState {
    #[inline]
    fn from(level: Level) -> PinState {
        match level {
            Level::Low => PinState::Low,
            Level::High => PinState::High,
        }
    }
}

/// The physical level of a pin together with its logical meaning.
///
/// The logical level is the physical level passed through the pin's
/// inversion policy, which is fixed at construction.  Writing either
/// side recomputes the other, so the two can never disagree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinSense {
    physical: Level,
    logical: Level,
    inverted: bool,
}

impl PinSense {
    /// Create a state pair starting at the given physical level.
    pub const fn new(physical: Level, inverted: bool) -> Self {
        PinSense {
            physical,
            logical: Self::apply(physical, inverted),
            inverted,
        }
    }

    #[inline(always)]
    const fn apply(level: Level, inverted: bool) -> Level {
        match (level, inverted) {
            (Level::Low, false) | (Level::High, true) => Level::Low,
            (Level::High, false) | (Level::Low, true) => Level::High,
        }
    }

    /// The raw electrical level.
    #[inline]
    pub const fn physical(&self) -> Level {
        self.physical
    }

    /// The level after applying the inversion policy.
    #[inline]
    pub const fn logical(&self) -> Level {
        self.logical
    }

    /// Whether the logical level is the complement of the physical.
    #[inline]
    pub const fn is_inverted(&self) -> bool {
        self.inverted
    }

    /// Set the physical level; the logical level follows.
    #[inline]
    pub fn set_physical(&mut self, level: Level) {
        self.physical = level;
        self.logical = Self::apply(level, self.inverted);
    }

    /// Set the logical level; the physical level follows.
    #[inline]
    pub fn set_logical(&mut self, level: Level) {
        self.logical = level;
        self.physical = Self::apply(level, self.inverted);
    }
}
