//! Averaging front end for the ADC.

use crate::{AnalogInput, SensorChannel};

/// Averages consecutive raw conversions into one stable measurement
pub struct AnalogSampler<A> {
    adc: A,
}

impl<A: AnalogInput> AnalogSampler<A> {
    pub const fn new(adc: A) -> Self {
        Self { adc }
    }

    /// Mean of `samples` consecutive reads, rounded down.
    ///
    /// A sample count of 0 is treated as 1.
    #[allow(clippy::cast_possible_truncation)]
    pub fn average(&mut self, channel: SensorChannel, samples: u8) -> u16 {
        let samples = samples.max(1);
        let sum: u32 = (0..samples)
            .map(|_| u32::from(self.adc.read(channel)))
            .sum();

        // The mean of u16 values always fits into u16
        (sum / u32::from(samples)) as u16
    }
}
