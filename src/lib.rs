//! Debounce digital inputs, measure and classify their pulses, and
//! generate timed output pulses.
//!
//! Even digital input signals can be noisy.  The contacts of a physical
//! button or switch flap for a few milliseconds each time they close,
//! and application code usually wants more than a clean level anyway:
//! it wants to know whether the user tapped the button or held it down.
//!
//! This crate wraps any [`embedded-hal`][0] `InputPin` in a
//! [`DebouncedInput`](DebouncedInput) that:
//!
//! - accepts a new raw level only after it has held steady for longer
//!   than a configurable debounce threshold,
//! - records the start and end of each logical-high pulse in a
//!   [`Pulse`](Pulse),
//! - classifies each completed pulse as a short or long press with
//!   [`PulseMode`](PulseMode).
//!
//! It also wraps any `OutputPin` in a [`PulseOutput`](PulseOutput) that
//! can emit a timed pulse and put the pin back the way it found it.
//! Both pin types share the same physical/logical level model: an
//! inverted pin's logical level is the complement of its physical one.
//!
//! # Usage
//!
//! You need to bring just a few things:
//!
//! - An [`InputPin`][1], perhaps provided by a hardware abstraction
//!   layer (HAL) for your chip.
//! - A millisecond [`Clock`](Clock).
//! - An [`InputConfig`](InputConfig) describing the pin.
//! - Some way to regularly call [`read_pulse_mode()`](DebouncedInput#method.read_pulse_mode)
//!   (or just [`sample()`](DebouncedInput#method.sample)), several times
//!   within the short-press threshold.  A spin-delayed main loop is fine.
//!
//! ```toml
//! [dependencies]
//! pulsepin = "0.1"
//! ```
//!
//! ## Create the pin.
//!
//! ```
//! # struct PinType;
//! # impl embedded_hal::digital::v2::InputPin for PinType {
//! #     type Error = core::convert::Infallible;
//! #     fn is_high(&self) -> Result<bool, Self::Error> {
//! #         Ok(true)
//! #     }
//! #     fn is_low(&self) -> Result<bool, Self::Error> {
//! #         Ok(false)
//! #     }
//! # }
//! # fn millis() -> u32 { 0 }
//! use pulsepin::{DebouncedInput, FnClock, InputConfig};
//!
//! const MODE_BUTTON: InputConfig = InputConfig::button(2);
//!
//! let button = DebouncedInput::new(PinType, FnClock(millis), MODE_BUTTON);
//! assert_eq!(2, button.pin_number());
//! ```
//!
//! ## Poll the pin.
//!
//! ```
//! # struct PinType;
//! # impl embedded_hal::digital::v2::InputPin for PinType {
//! #     type Error = core::convert::Infallible;
//! #     fn is_high(&self) -> Result<bool, Self::Error> {
//! #         Ok(true)
//! #     }
//! #     fn is_low(&self) -> Result<bool, Self::Error> {
//! #         Ok(false)
//! #     }
//! # }
//! # use pulsepin::{DebouncedInput, ManualClock, InputConfig};
//! use pulsepin::PulseMode;
//!
//! # let clock = ManualClock::new(0);
//! # let mut button = DebouncedInput::new(PinType, &clock, InputConfig::button(2));
//! if button.read_pulse_mode().unwrap() {
//!     match button.mode() {
//!         PulseMode::ShortPulse => { /* next menu item */ }
//!         PulseMode::LongPulse => { /* enter the menu */ }
//!         _ => {}
//!     }
//! }
//! ```
//!
//! ## Pulse an output.
//!
//! ```
//! # struct PinType;
//! # impl embedded_hal::digital::v2::OutputPin for PinType {
//! #     type Error = core::convert::Infallible;
//! #     fn set_high(&mut self) -> Result<(), Self::Error> {
//! #         Ok(())
//! #     }
//! #     fn set_low(&mut self) -> Result<(), Self::Error> {
//! #         Ok(())
//! #     }
//! # }
//! # struct Delay;
//! # impl embedded_hal::blocking::delay::DelayMs<u32> for Delay {
//! #     fn delay_ms(&mut self, _ms: u32) {}
//! # }
//! use pulsepin::{Level, OutputConfig, OutputPulse, PulseOutput};
//!
//! let mut strobe = PulseOutput::new(PinType, OutputConfig::new(13));
//! strobe.initialize().unwrap();
//!
//! // 10ms high, then 5ms low, then back to where it was.
//! strobe.output_pulse(&mut Delay, OutputPulse::new(10).hang(5)).unwrap();
//! assert_eq!(Level::Low, strobe.state());
//! ```
//!
//! `output_pulse()` blocks for the whole pulse, and nothing else is
//! sampled meanwhile.  Keep it out of paths that must stay responsive.
//!
//! # Pulse diagnostics
//!
//! A pin configured with `write_pulses` hands each completed pulse to
//! its [`PulseSink`](PulseSink).  A [`LineSink`](LineSink) around a
//! serial port prints them as `start|end` lines, and can be switched
//! off for every pin at once.
//!
//! # Features
//!
//! - `defmt`: derive `defmt::Format` for public types and trace state
//!   transitions.
//! - `serde`: derive `Serialize` and `Deserialize` for configuration.
//!
//! [0]: https://github.com/rust-embedded/embedded-hal
//! [1]: https://docs.rs/embedded-hal/0.2.7/embedded_hal/digital/v2/trait.InputPin.html

#![cfg_attr(not(test), no_std)]
#![deny(missing_docs)]
#![deny(unsafe_code)]
#![doc(html_root_url = "https://docs.rs/pulsepin/0.1.0")]

pub mod clock;
pub mod config;
pub mod error;
pub mod input;
pub mod level;
pub mod mode;
pub mod output;
pub mod pulse;
pub mod sink;

pub use clock::{Clock, FnClock, ManualClock, Millis};
pub use config::{InputConfig, OutputConfig, Thresholds};
pub use error::{ConfigError, Error};
pub use input::DebouncedInput;
pub use level::{Level, PinSense};
pub use mode::PulseMode;
pub use output::{OutputPulse, PulseOutput};
pub use pulse::{Pulse, PulseDescription};
pub use sink::{LineSink, NoSink, PulseSink};
