//! Battery voltage monitor
//!
//! Shows the charge band on the status LEDs and cuts the light when the
//! pack is depleted. The undervoltage shutoff is terminal: after the
//! warning sequence the control loop halts until the next power cycle.

use embassy_time::{Duration, Instant};

use crate::board::{Board, Platform};
use crate::config::{Thresholds, Timings};
use crate::error::Error;
use crate::event::Event;
use crate::status::LedPattern;
use crate::SensorChannel;

/// Index of the status LED that blinks in the critical band
const LOW_BAND_LED: usize = 2;

/// Charge band of the averaged battery reading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BatteryBand {
    /// 75-100%
    Full,
    /// 50-75%
    Medium,
    /// 25-50%
    Low,
    /// Below 25% but above the shutoff limit
    Critical,
    /// Below the shutoff limit
    Shutoff,
}

impl BatteryBand {
    /// Band of a raw reading. Lower bounds are inclusive.
    pub const fn classify(reading: u16, thresholds: &Thresholds) -> Self {
        if reading >= thresholds.battery_75 {
            Self::Full
        } else if reading >= thresholds.battery_50 {
            Self::Medium
        } else if reading >= thresholds.battery_25 {
            Self::Low
        } else if reading >= thresholds.battery_shutoff {
            Self::Critical
        } else {
            Self::Shutoff
        }
    }
}

/// Battery monitor state
pub struct BatteryMonitor {
    thresholds: Thresholds,
    blink_interval: Duration,
    warning_phase: Duration,
    warning_cycles: u8,
    /// State of the blinking LED in the critical band
    blink_on: bool,
    last_toggle: Instant,
    last_band: Option<BatteryBand>,
}

impl BatteryMonitor {
    pub const fn new(thresholds: Thresholds, timings: &Timings) -> Self {
        Self {
            thresholds,
            blink_interval: timings.battery_blink,
            warning_phase: timings.warning_phase,
            warning_cycles: timings.warning_cycles,
            blink_on: false,
            last_toggle: Instant::from_ticks(0),
            last_band: None,
        }
    }

    /// Sample the battery and update the status LEDs.
    ///
    /// Returns [`BatteryBand::Shutoff`] after the undervoltage warning has
    /// run, even if a peripheral failed during it; the caller must then stop
    /// the control loop for good.
    pub fn poll<P: Platform>(&mut self, board: &mut Board<'_, P>) -> Result<BatteryBand, Error> {
        let reading = board
            .sampler
            .average(SensorChannel::Battery, self.thresholds.samples);
        let band = BatteryBand::classify(reading, &self.thresholds);

        if self.last_band != Some(band) {
            log!("battery {:?} (adc {})", band, reading);
            self.last_band = Some(band);
            board.emit(Event::BatteryBand(band));
        }

        match band {
            BatteryBand::Full => board.leds.show(LedPattern::BATTERY_FULL)?,
            BatteryBand::Medium => board.leds.show(LedPattern::BATTERY_MEDIUM)?,
            BatteryBand::Low => board.leds.show(LedPattern::BATTERY_LOW)?,
            // LED1 and LED2 keep whatever they showed before
            BatteryBand::Critical => self.blink(board)?,
            BatteryBand::Shutoff => self.shutoff(board),
        }
        Ok(band)
    }

    fn blink<P: Platform>(&mut self, board: &mut Board<'_, P>) -> Result<(), Error> {
        let now = board.now();
        if now.saturating_duration_since(self.last_toggle) > self.blink_interval {
            self.last_toggle = now;
            self.blink_on = !self.blink_on;
            board.leds.set(LOW_BAND_LED, self.blink_on)?;
        }
        Ok(())
    }

    /// Undervoltage warning. Never fails: peripheral errors are logged so
    /// the caller always sees [`BatteryBand::Shutoff`].
    fn shutoff<P: Platform>(&mut self, board: &mut Board<'_, P>) {
        log!("battery undervoltage, shutting off");
        if let Err(err) = board.fader.force_off() {
            log!("failed to switch the light off: {:?}", err);
        }
        board.emit(Event::UndervoltageShutoff);

        for _ in 0..self.warning_cycles {
            board.leds.signal(LedPattern::ALL_ON);
            board.pause(self.warning_phase);
            board.leds.signal(LedPattern::ALL_OFF);
            board.pause(self.warning_phase);
        }
    }
}
