use core::convert::Infallible;

use embedded_hal::digital::v2::InputPin;
use pulsepin::{
    DebouncedInput, InputConfig, LineSink, ManualClock, Millis, OutputConfig, OutputPulse,
    PulseMode, PulseOutput,
};

/// A raw pin whose level is a function of the shared clock.
struct ScriptedPin<'a> {
    clock: &'a ManualClock,
    script: fn(Millis) -> bool,
}

impl<'a> InputPin for ScriptedPin<'a> {
    type Error = Infallible;

    fn is_high(&self) -> Result<bool, Self::Error> {
        Ok((self.script)(pulsepin::Clock::now(self.clock)))
    }

    fn is_low(&self) -> Result<bool, Self::Error> {
        self.is_high().map(|high| !high)
    }
}

fn press_20_to_170(t: Millis) -> bool {
    (20..=170).contains(&t)
}

#[test]
fn debounced_short_press() {
    let clock = ManualClock::new(0);
    let pin = ScriptedPin {
        clock: &clock,
        script: press_20_to_170,
    };
    let mut input = DebouncedInput::new(pin, &clock, InputConfig::new(4).debounce(20));

    let mut rising = None;
    let mut falling = None;
    let mut mode_changes = 0;

    for t in 0..400 {
        clock.set(t);
        if input.read_pulse_mode().unwrap() {
            mode_changes += 1;
        }
        if input.has_changed() {
            if input.logical_state().is_high() {
                assert!(rising.is_none());
                rising = Some(t);
            } else {
                assert!(falling.is_none());
                falling = Some(t);
            }
        }
        if t < 20 {
            assert!(!input.has_changed());
        }
    }

    assert_eq!(Some(41), rising);
    assert_eq!(Some(192), falling);
    assert_eq!(1, mode_changes);

    let pulse = input.last_pulse();
    assert!(pulse.is_valid());
    assert_eq!(151, pulse.duration());
    assert_eq!(PulseMode::ShortPulse, input.mode());
}

#[test]
fn hold_then_tap_returns_to_idle() {
    fn script(t: Millis) -> bool {
        (100..1300).contains(&t) || (2000..2200).contains(&t)
    }

    let clock = ManualClock::new(0);
    let pin = ScriptedPin {
        clock: &clock,
        script,
    };
    let mut input = DebouncedInput::new(pin, &clock, InputConfig::new(4).debounce(10));

    let mut modes = Vec::new();
    for t in (0..3000).step_by(5) {
        clock.set(t);
        if input.read_pulse_mode().unwrap() {
            modes.push(input.mode());
        }
    }

    assert_eq!(vec![PulseMode::LongPulse, PulseMode::Idle], modes);
}

#[test]
fn logged_pulses_through_shared_sink() {
    fn a(t: Millis) -> bool {
        (10..130).contains(&t)
    }
    fn b(t: Millis) -> bool {
        (50..70).contains(&t)
    }

    let clock = ManualClock::new(0);
    let sink = LineSink::new(String::new());

    let config = InputConfig::new(0).write_pulses(true);
    let mut first = DebouncedInput::new(ScriptedPin { clock: &clock, script: a }, &clock, config)
        .with_sink(&sink);
    let mut second = DebouncedInput::new(ScriptedPin { clock: &clock, script: b }, &clock, config)
        .with_sink(&sink);

    for t in 0..200 {
        clock.set(t);
        first.sample().unwrap();
        second.sample().unwrap();
    }

    drop(first);
    drop(second);
    assert_eq!("50|70\n10|130\n", sink.into_inner());
}

#[test]
fn indicator_led_follows_button_and_blinks() {
    use embedded_hal::blocking::delay::DelayMs;
    use embedded_hal_mock::pin::{Mock, State, Transaction};

    struct Spin;
    impl DelayMs<u32> for Spin {
        fn delay_ms(&mut self, _ms: u32) {}
    }

    fn script(t: Millis) -> bool {
        (5..50).contains(&t)
    }

    let clock = ManualClock::new(0);
    let mut button = DebouncedInput::new(ScriptedPin { clock: &clock, script }, &clock, InputConfig::new(0));

    let writes = [
        Transaction::set(State::High),
        Transaction::set(State::Low),
        // blink: rest low, pulse high, rest low, restore low
        Transaction::set(State::Low),
        Transaction::set(State::High),
        Transaction::set(State::Low),
        Transaction::set(State::Low),
    ];
    let mut led = PulseOutput::new(Mock::new(&writes), OutputConfig::new(13));

    for t in 0..100 {
        clock.set(t);
        button.sample().unwrap();
        button.indicate(&mut led).unwrap();
    }

    led.output_pulse(&mut Spin, OutputPulse::new(250)).unwrap();
    led.release().done();
}
