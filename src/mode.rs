//! Press classification.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::clock::Millis;
use crate::config::Thresholds;

/// Classification of the most recently completed pulse.
///
/// A pin starts `Idle`.  From `Idle`, a pulse of at least the short
/// threshold moves it to `ShortPulse`, and one of at least the long
/// threshold moves it to `LongPulse`.  From any other mode, the next
/// pulse of at least the short threshold returns it to `Idle`.  Each
/// press therefore produces one mode pulse, like a click, rather than a
/// toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PulseMode {
    /// Not a mode a pin enters on its own.
    Unknown,
    /// No press pending.
    #[default]
    Idle,
    /// A short press completed.
    ShortPulse,
    /// A long press completed.
    LongPulse,
}

impl PulseMode {
    /// The mode after a pulse of `duration` completes.
    pub const fn next(self, duration: Millis, thresholds: &Thresholds) -> PulseMode {
        let short = duration >= thresholds.short_ms();
        let long = duration >= thresholds.long_ms();

        match self {
            PulseMode::Idle if long => PulseMode::LongPulse,
            PulseMode::Idle if short => PulseMode::ShortPulse,
            PulseMode::Idle => PulseMode::Idle,
            _ if short => PulseMode::Idle,
            other => other,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const T: Thresholds = Thresholds::STANDARD;

    #[test]
    fn from_idle() {
        assert_eq!(PulseMode::Idle, PulseMode::Idle.next(0, &T));
        assert_eq!(PulseMode::Idle, PulseMode::Idle.next(50, &T));
        assert_eq!(PulseMode::Idle, PulseMode::Idle.next(99, &T));
        assert_eq!(PulseMode::ShortPulse, PulseMode::Idle.next(100, &T));
        assert_eq!(PulseMode::ShortPulse, PulseMode::Idle.next(150, &T));
        assert_eq!(PulseMode::ShortPulse, PulseMode::Idle.next(999, &T));
        assert_eq!(PulseMode::LongPulse, PulseMode::Idle.next(1000, &T));
        assert_eq!(PulseMode::LongPulse, PulseMode::Idle.next(1500, &T));
    }

    #[test]
    fn back_to_idle() {
        for mode in [PulseMode::ShortPulse, PulseMode::LongPulse, PulseMode::Unknown] {
            assert_eq!(mode, mode.next(0, &T));
            assert_eq!(mode, mode.next(99, &T));
            assert_eq!(PulseMode::Idle, mode.next(100, &T));
            assert_eq!(PulseMode::Idle, mode.next(1500, &T));
        }
    }

    #[test]
    fn custom_thresholds() {
        let t = Thresholds::QUICK;
        assert_eq!(PulseMode::ShortPulse, PulseMode::Idle.next(60, &t));
        assert_eq!(PulseMode::Idle, PulseMode::LongPulse.next(60, &t));
    }
}
