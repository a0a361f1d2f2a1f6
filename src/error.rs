//! Error types.

use core::fmt;

/// An error touching the underlying hardware pin.
///
/// Timing problems are never errors: a malformed pulse is simply
/// recorded as invalid.  The only failures come from the pin itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<PinError> {
    /// An error reading or writing the underlying pin.
    Pin(PinError),
}

impl<PinError: fmt::Debug> fmt::Display for Error<PinError> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Pin(e) => write!(f, "pin error: {:?}", e),
        }
    }
}

/// An invalid configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// The short-press threshold must be below the long-press threshold.
    ThresholdOrder,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ThresholdOrder => {
                f.write_str("short threshold must be less than long threshold")
            }
        }
    }
}
