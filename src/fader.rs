//! Front light brightness fader
//!
//! Moves the PWM duty cycle one step at a time so brightness changes are a
//! visible fade instead of a jump. Switching off is the exception: it always
//! happens immediately.

use embassy_time::Duration;
use embedded_hal::{delay::DelayNs, pwm::SetDutyCycle};

use crate::board::pause;
use crate::error::Error;

/// Owner of the front light PWM channel and its current brightness
pub struct Fader<P> {
    pwm: P,
    /// Brightness currently applied to the PWM (0-255)
    level: u8,
    step: Duration,
}

impl<P: SetDutyCycle> Fader<P> {
    /// Create a new fader
    ///
    /// The light is assumed to be off; nothing is written to the PWM yet.
    pub const fn new(pwm: P, step: Duration) -> Self {
        Self {
            pwm,
            level: 0,
            step,
        }
    }

    /// Current brightness
    pub const fn level(&self) -> u8 {
        self.level
    }

    /// Fade to `target`, blocking until it is reached.
    ///
    /// Every value between the current level and `target` (both included) is
    /// written in order, with one fade step pause between two writes.
    /// A target of 0 switches the light off immediately.
    pub fn ramp_to<D: DelayNs>(&mut self, delay: &mut D, target: u8) -> Result<(), Error> {
        if target == 0 {
            return self.force_off();
        }

        while self.level != target {
            self.write(self.level)?;
            pause(delay, self.step);
            if target > self.level {
                self.level += 1;
            } else {
                self.level -= 1;
            }
        }
        self.write(target)
    }

    /// Switch the light off without fading
    pub fn force_off(&mut self) -> Result<(), Error> {
        self.apply(0)
    }

    /// Set the brightness without fading
    pub fn apply(&mut self, level: u8) -> Result<(), Error> {
        self.level = level;
        self.write(level)
    }

    fn write(&mut self, level: u8) -> Result<(), Error> {
        self.pwm
            .set_duty_cycle_fraction(u16::from(level), u16::from(u8::MAX))
            .map_err(Error::pwm)
    }
}
