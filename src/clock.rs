//! Time sources.
//!
//! Debouncing and pulse measurement only need a monotonically
//! non-decreasing millisecond counter.  Bring your own by implementing
//! [`Clock`](Clock), or wrap a function with [`FnClock`](FnClock).

use core::cell::Cell;

/// Milliseconds since some fixed point, usually system start.
pub type Millis = u32;

/// A millisecond time source.
///
/// The counter must never go backwards.  Its resolution should be no
/// coarser than the debounce thresholds in use.
pub trait Clock {
    /// The current time.
    fn now(&self) -> Millis;
}

impl<C: Clock + ?Sized> Clock for &C {
    #[inline]
    fn now(&self) -> Millis {
        (**self).now()
    }
}

/// Adapts any `Fn() -> Millis` into a [`Clock`](Clock).
///
/// ```
/// use pulsepin::{Clock, FnClock};
///
/// let clock = FnClock(|| 42);
/// assert_eq!(42, clock.now());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct FnClock<F>(pub F);

impl<F: Fn() -> Millis> Clock for FnClock<F> {
    #[inline]
    fn now(&self) -> Millis {
        (self.0)()
    }
}

/// A clock that only moves when told to.
///
/// Useful for simulated input and for driving pins from a host-side
/// harness.  Share it with pins by reference.
///
/// ```
/// use pulsepin::{Clock, ManualClock};
///
/// let clock = ManualClock::new(10);
/// clock.advance(5);
/// assert_eq!(15, (&clock).now());
/// ```
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<Millis>,
}

impl ManualClock {
    /// Create a clock reading `start`.
    pub const fn new(start: Millis) -> Self {
        ManualClock {
            now: Cell::new(start),
        }
    }

    /// Jump to an absolute time.
    pub fn set(&self, now: Millis) {
        self.now.set(now);
    }

    /// Move forward by `ms`.
    pub fn advance(&self, ms: Millis) {
        self.now.set(self.now.get().wrapping_add(ms));
    }
}

impl Clock for ManualClock {
    #[inline]
    fn now(&self) -> Millis {
        self.now.get()
    }
}
