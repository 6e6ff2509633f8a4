//! Driver temperature monitor
//!
//! The sensor is an NTC divider: the reading drops as the driver heats up.
//! A warm driver dims the light; an overheated one runs a warning sequence
//! and then keeps the light off for a cooldown before normal operation
//! resumes.

use embassy_time::Duration;

use crate::board::{Board, Platform};
use crate::config::{THERMAL_FLASH_BRIGHTNESS, THERMAL_WARNING_BRIGHTNESS, Thresholds, Timings};
use crate::error::Error;
use crate::event::Event;
use crate::status::LedPattern;
use crate::SensorChannel;

/// Temperature band of the averaged reading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ThermalBand {
    Normal,
    /// Hot: the light is dimmed
    Warning,
    /// Overheated: the light is cut for a cooldown
    Shutoff,
}

impl ThermalBand {
    /// Band of a raw reading. Both thresholds are inclusive upper bounds.
    pub const fn classify(reading: u16, thresholds: &Thresholds) -> Self {
        if reading <= thresholds.temperature_shutoff {
            Self::Shutoff
        } else if reading <= thresholds.temperature_high {
            Self::Warning
        } else {
            Self::Normal
        }
    }
}

/// Thermal monitor state
pub struct ThermalMonitor {
    thresholds: Thresholds,
    warning_phase: Duration,
    warning_cycles: u8,
    cooldown: Duration,
    last_band: ThermalBand,
}

impl ThermalMonitor {
    pub const fn new(thresholds: Thresholds, timings: &Timings) -> Self {
        Self {
            thresholds,
            warning_phase: timings.warning_phase,
            warning_cycles: timings.warning_cycles,
            cooldown: timings.thermal_cooldown,
            last_band: ThermalBand::Normal,
        }
    }

    /// Sample the temperature and protect the driver if needed.
    ///
    /// A shutoff blocks for the whole warning sequence and cooldown, then
    /// returns normally.
    pub fn poll<P: Platform>(&mut self, board: &mut Board<'_, P>) -> Result<ThermalBand, Error> {
        let reading = board
            .sampler
            .average(SensorChannel::Temperature, self.thresholds.samples);
        let band = ThermalBand::classify(reading, &self.thresholds);

        match band {
            ThermalBand::Normal => {}
            ThermalBand::Warning => {
                if self.last_band != ThermalBand::Warning {
                    log!("temperature high (adc {}), dimming", reading);
                    board.emit(Event::ThermalWarning);
                }
                board.ramp_to(THERMAL_WARNING_BRIGHTNESS)?;
            }
            ThermalBand::Shutoff => {
                log!("temperature critical (adc {}), shutting off", reading);
                board.emit(Event::ThermalShutoff);
                self.shutoff(board)?;
            }
        }
        self.last_band = band;
        Ok(band)
    }

    fn shutoff<P: Platform>(&mut self, board: &mut Board<'_, P>) -> Result<(), Error> {
        let flashed = self.flash(board);

        // Off and cooled down even when a flash failed
        board.fader.force_off()?;
        board.pause(self.cooldown);
        flashed
    }

    fn flash<P: Platform>(&mut self, board: &mut Board<'_, P>) -> Result<(), Error> {
        for _ in 0..self.warning_cycles {
            board.ramp_to(THERMAL_FLASH_BRIGHTNESS)?;
            board.leds.signal(LedPattern::ALL_ON);
            board.pause(self.warning_phase);

            board.fader.force_off()?;
            board.leds.signal(LedPattern::ALL_OFF);
            board.pause(self.warning_phase);
        }
        Ok(())
    }
}
