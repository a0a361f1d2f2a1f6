//! Pin configuration.
//!
//! Every pin is built from a small `Copy` configuration struct, so a
//! board's pin map can live in `const` items (or be deserialized, with
//! the `serde` feature).

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::clock::Millis;
use crate::error::ConfigError;
use crate::level::Level;

/// Duration thresholds used to classify completed pulses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawThresholds"))]
pub struct Thresholds {
    short_ms: Millis,
    long_ms: Millis,
}

impl Thresholds {
    /// 100ms short press, 1s long press.
    pub const STANDARD: Thresholds = Thresholds {
        short_ms: 100,
        long_ms: 1000,
    };

    /// 50ms short press, 1s long press.  Suits a light tactile switch
    /// that is polled quickly.
    pub const QUICK: Thresholds = Thresholds {
        short_ms: 50,
        long_ms: 1000,
    };

    /// Create a set of thresholds.
    ///
    /// Returns an error unless `short_ms < long_ms`.
    pub const fn new(short_ms: Millis, long_ms: Millis) -> Result<Self, ConfigError> {
        if short_ms >= long_ms {
            return Err(ConfigError::ThresholdOrder);
        }
        Ok(Thresholds { short_ms, long_ms })
    }

    /// Minimum duration of a short press.
    #[inline]
    pub const fn short_ms(&self) -> Millis {
        self.short_ms
    }

    /// Minimum duration of a long press.
    #[inline]
    pub const fn long_ms(&self) -> Millis {
        self.long_ms
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Thresholds::STANDARD
    }
}

/// Unchecked wire form; deserialized thresholds go through `Thresholds::new`.
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct RawThresholds {
    short_ms: Millis,
    long_ms: Millis,
}

#[cfg(feature = "serde")]
impl TryFrom<RawThresholds> for Thresholds {
    type Error = ConfigError;

    fn try_from(raw: RawThresholds) -> Result<Self, Self::Error> {
        Thresholds::new(raw.short_ms, raw.long_ms)
    }
}

/// Configuration of a debounced input pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct InputConfig {
    /// Board pin number, used for identification only.
    pub pin: u8,
    /// How long a raw level must hold before it is accepted.  Zero
    /// disables debouncing.
    pub debounce_ms: Millis,
    /// Physical level at construction, restored on suspend.
    pub initial: Level,
    /// Pin is active-low: logical level is the complement of physical.
    pub inverted: bool,
    /// Send completed pulses to the pin's sink.
    pub write_pulses: bool,
    /// Press classification thresholds.
    pub thresholds: Thresholds,
}

impl InputConfig {
    /// Active-high input, resting low, no debouncing.
    pub const fn new(pin: u8) -> Self {
        InputConfig {
            pin,
            debounce_ms: 0,
            initial: Level::Low,
            inverted: false,
            write_pulses: false,
            thresholds: Thresholds::STANDARD,
        }
    }

    /// A push button to ground with a pull-up: active-low, resting
    /// high, 20ms debounce.
    pub const fn button(pin: u8) -> Self {
        InputConfig {
            pin,
            debounce_ms: 20,
            initial: Level::High,
            inverted: true,
            write_pulses: false,
            thresholds: Thresholds::STANDARD,
        }
    }

    /// Set the debounce threshold.
    pub const fn debounce(mut self, debounce_ms: Millis) -> Self {
        self.debounce_ms = debounce_ms;
        self
    }

    /// Set the initial physical level.
    pub const fn initial(mut self, initial: Level) -> Self {
        self.initial = initial;
        self
    }

    /// Set whether the pin is inverted.
    pub const fn inverted(mut self, inverted: bool) -> Self {
        self.inverted = inverted;
        self
    }

    /// Enable or disable writing pulses to the sink.
    pub const fn write_pulses(mut self, write_pulses: bool) -> Self {
        self.write_pulses = write_pulses;
        self
    }

    /// Set the classification thresholds.
    pub const fn thresholds(mut self, thresholds: Thresholds) -> Self {
        self.thresholds = thresholds;
        self
    }
}

/// Configuration of an output pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OutputConfig {
    /// Board pin number, used for identification only.
    pub pin: u8,
    /// Physical level at construction, restored on suspend.
    pub initial: Level,
    /// Pin is active-low: logical level is the complement of physical.
    pub inverted: bool,
}

impl OutputConfig {
    /// Non-inverted output, resting low.
    pub const fn new(pin: u8) -> Self {
        OutputConfig {
            pin,
            initial: Level::Low,
            inverted: false,
        }
    }

    /// Set the initial physical level.
    pub const fn initial(mut self, initial: Level) -> Self {
        self.initial = initial;
        self
    }

    /// Set whether the pin is inverted.
    pub const fn inverted(mut self, inverted: bool) -> Self {
        self.inverted = inverted;
        self
    }
}
