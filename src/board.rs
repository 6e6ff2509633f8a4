//! Hardware bundle shared by all components.
//!
//! [`Platform`] names the concrete peripheral types of a board, [`Parts`]
//! carries them into [`Headlamp::new`](crate::Headlamp::new) and [`Board`]
//! owns them afterwards. Components borrow the board for the duration of
//! one poll, so there is exactly one writer of the light at any time.

use embassy_time::{Duration, Instant};
use embedded_hal::{
    delay::DelayNs,
    digital::{InputPin, OutputPin},
    pwm::SetDutyCycle,
};
use embedded_storage::Storage;

use crate::config::HeadlampConfig;
use crate::error::Error;
use crate::event::{Event, EventSender};
use crate::fader::Fader;
use crate::profile::ProfileStore;
use crate::sampler::AnalogSampler;
use crate::status::StatusLeds;
use crate::{AnalogInput, Clock};

/// Concrete peripheral types of a board
pub trait Platform {
    /// Push button, active-low
    type Button: InputPin;
    /// Status LED output
    type Led: OutputPin;
    /// PWM channel of the front light driver
    type Light: SetDutyCycle;
    type Adc: AnalogInput;
    /// Byte-addressable non-volatile memory
    type Storage: Storage;
    type Delay: DelayNs;
    type Clock: Clock;
}

/// Owned peripherals handed to the headlamp
pub struct Parts<P: Platform> {
    pub button: P::Button,
    /// LED1 (75-100%), LED2 (50-75%), LED3 (25-50%)
    pub leds: [P::Led; 3],
    pub light: P::Light,
    pub adc: P::Adc,
    pub storage: P::Storage,
    pub delay: P::Delay,
    pub clock: P::Clock,
}

/// Active-low push button with an internal pull-up
pub struct Button<B> {
    pin: B,
}

impl<B: InputPin> Button<B> {
    pub const fn new(pin: B) -> Self {
        Self { pin }
    }

    pub fn is_pressed(&mut self) -> Result<bool, Error> {
        self.pin.is_low().map_err(Error::gpio)
    }
}

/// Peripherals plus the shared brightness state
pub struct Board<'a, P: Platform> {
    pub button: Button<P::Button>,
    pub leds: StatusLeds<P::Led>,
    pub fader: Fader<P::Light>,
    pub sampler: AnalogSampler<P::Adc>,
    pub profiles: ProfileStore<P::Storage>,
    pub delay: P::Delay,
    pub clock: P::Clock,
    pub events: EventSender<'a>,
}

impl<'a, P: Platform> Board<'a, P> {
    pub fn new(parts: Parts<P>, config: &HeadlampConfig, events: EventSender<'a>) -> Self {
        Self {
            button: Button::new(parts.button),
            leds: StatusLeds::new(parts.leds),
            fader: Fader::new(parts.light, config.timings.fade_step),
            sampler: AnalogSampler::new(parts.adc),
            profiles: ProfileStore::new(parts.storage, config.profiles),
            delay: parts.delay,
            clock: parts.clock,
            events,
        }
    }

    /// Block for `duration`
    pub fn pause(&mut self, duration: Duration) {
        pause(&mut self.delay, duration);
    }

    pub fn now(&self) -> Instant {
        self.clock.now()
    }

    /// Fade the front light to `target`
    pub fn ramp_to(&mut self, target: u8) -> Result<(), Error> {
        self.fader.ramp_to(&mut self.delay, target)
    }

    pub fn emit(&self, event: Event) {
        self.events.emit(event);
    }
}

/// Block on `delay` for a whole number of milliseconds
pub(crate) fn pause<D: DelayNs>(delay: &mut D, duration: Duration) {
    let millis = u32::try_from(duration.as_millis()).unwrap_or(u32::MAX);
    delay.delay_ms(millis);
}
