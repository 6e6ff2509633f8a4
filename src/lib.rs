#![no_std]

#[macro_use]
mod log;

pub mod battery;
pub mod board;
pub mod config;
pub mod controller;
pub mod error;
pub mod event;
pub mod fader;
pub mod headlamp;
pub mod profile;
pub mod sampler;
pub mod state;
pub mod status;
pub mod thermal;

pub use battery::{BatteryBand, BatteryMonitor};
pub use board::{Board, Button, Parts, Platform};
pub use config::{HeadlampConfig, ProfileLayout, Thresholds, Timings};
pub use controller::LightController;
pub use error::Error;
pub use event::{Event, EventChannel, EventReceiver, EventSender};
pub use fader::Fader;
pub use headlamp::{Headlamp, Step};
pub use profile::{PROFILE_COUNT, ProfileStore};
pub use sampler::AnalogSampler;
pub use state::LightState;
pub use status::{LedPattern, StatusLeds};
pub use thermal::{ThermalBand, ThermalMonitor};

pub use embassy_time::{Duration, Instant};

/// Analog input the two monitors sample from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorChannel {
    /// Battery voltage divider
    Battery,
    /// NTC temperature divider next to the LED driver
    Temperature,
}

/// Abstract ADC trait
///
/// Implement this trait on top of the board's ADC driver.
/// A conversion is expected to always succeed; a converter that cannot
/// deliver a sample is a hardware fault outside of this crate.
pub trait AnalogInput {
    /// Perform one raw conversion on the given channel
    fn read(&mut self, channel: SensorChannel) -> u16;
}

/// Monotonic millisecond time source
pub trait Clock {
    /// Current time since boot
    fn now(&self) -> Instant;
}

/// [`Clock`] backed by the embassy time driver
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}
