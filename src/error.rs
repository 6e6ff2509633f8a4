//! Hardware error type shared by all components.

use core::fmt;

use embedded_hal::{digital, pwm};

/// Failure reported by one of the board peripherals.
///
/// Protection shutoffs are not errors; they are reported through
/// [`BatteryBand`](crate::BatteryBand) and [`ThermalBand`](crate::ThermalBand).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Button or status LED pin failed
    Gpio(digital::ErrorKind),
    /// Front light PWM channel failed
    Pwm(pwm::ErrorKind),
    /// Non-volatile storage read or write failed
    Storage,
    /// Profile index outside of 1-4 (0 is readable only)
    InvalidProfile(u8),
}

impl Error {
    pub(crate) fn gpio<E: digital::Error>(err: E) -> Self {
        Self::Gpio(err.kind())
    }

    pub(crate) fn pwm<E: pwm::Error>(err: E) -> Self {
        Self::Pwm(err.kind())
    }

    pub(crate) fn storage<E>(_err: E) -> Self {
        Self::Storage
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gpio(kind) => write!(f, "GPIO error: {kind}"),
            Self::Pwm(kind) => write!(f, "PWM error: {kind}"),
            Self::Storage => f.write_str("non-volatile storage error"),
            Self::InvalidProfile(index) => write!(f, "invalid profile index {index}"),
        }
    }
}

impl core::error::Error for Error {}
