//! Three status LEDs under the battery gauge.
//!
//! In normal operation they show the charge band. Setup mode and the
//! protection shutoffs reuse them for their own patterns.

use embedded_hal::digital::{OutputPin, PinState};

use crate::error::Error;

/// On/off state of the three status LEDs.
///
/// LED1 marks 75-100% charge, LED2 50-75% and LED3 25-50%.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LedPattern(pub [bool; 3]);

impl LedPattern {
    pub const ALL_ON: Self = Self([true, true, true]);
    pub const ALL_OFF: Self = Self([false, false, false]);

    pub const BATTERY_FULL: Self = Self::ALL_ON;
    pub const BATTERY_MEDIUM: Self = Self([false, true, true]);
    pub const BATTERY_LOW: Self = Self([false, false, true]);

    /// Shown while setup mode starts
    pub const SETUP_INTRO: Self = Self([false, false, true]);

    /// Pattern asking the user to pick profile `index` (1-4)
    pub const fn select(index: u8) -> Self {
        match index {
            1 => Self([false, false, true]),
            2 => Self([false, true, true]),
            3 => Self([true, false, true]),
            _ => Self([true, true, false]),
        }
    }
}

/// Driver for the three status LEDs
pub struct StatusLeds<L> {
    leds: [L; 3],
}

impl<L: OutputPin> StatusLeds<L> {
    pub const fn new(leds: [L; 3]) -> Self {
        Self { leds }
    }

    /// Drive all three LEDs
    pub fn show(&mut self, pattern: LedPattern) -> Result<(), Error> {
        for (led, on) in self.leds.iter_mut().zip(pattern.0) {
            led.set_state(PinState::from(on)).map_err(Error::gpio)?;
        }
        Ok(())
    }

    /// Drive all three LEDs, logging failures instead of returning them.
    ///
    /// A failing LED does not stop the others from being driven. Used by
    /// the shutoff warnings, which must run to the end.
    pub fn signal(&mut self, pattern: LedPattern) {
        for (index, (led, on)) in self.leds.iter_mut().zip(pattern.0).enumerate() {
            if let Err(err) = led.set_state(PinState::from(on)).map_err(Error::gpio) {
                log!("status LED {} failed: {:?}", index + 1, err);
            }
        }
    }

    /// Drive a single LED (0-2), leaving the others untouched
    pub fn set(&mut self, led: usize, on: bool) -> Result<(), Error> {
        match self.leds.get_mut(led) {
            Some(pin) => pin.set_state(PinState::from(on)).map_err(Error::gpio),
            None => Ok(()),
        }
    }
}
