//! Threshold and timing tables.
//!
//! Every safety threshold and timing constant lives here so the protection
//! behavior can be audited in one place. The `REFERENCE` tables reproduce the
//! values of the stock firmware and are what [`HeadlampConfig::default`] uses.

use embassy_time::Duration;

/// Raw ADC thresholds for the two monitors.
///
/// All values are ADC counts at the converter's native resolution, not volts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Thresholds {
    /// Lower bound of the 75-100% charge band
    pub battery_75: u16,
    /// Lower bound of the 50-75% charge band
    pub battery_50: u16,
    /// Lower bound of the 25-50% charge band
    pub battery_25: u16,
    /// Readings below this trigger the undervoltage shutoff
    pub battery_shutoff: u16,
    /// Readings at or below this (and above shutoff) dim the light.
    ///
    /// The sensor is an NTC divider, so a lower reading means a hotter driver.
    pub temperature_high: u16,
    /// Readings at or below this trigger the thermal shutoff
    pub temperature_shutoff: u16,
    /// Number of raw reads averaged per measurement
    pub samples: u8,
}

impl Thresholds {
    pub const REFERENCE: Self = Self {
        battery_75: 236,
        battery_50: 220,
        battery_25: 203,
        battery_shutoff: 187,
        temperature_high: 258,
        temperature_shutoff: 224,
        samples: 8,
    };
}

impl Default for Thresholds {
    fn default() -> Self {
        Self::REFERENCE
    }
}

/// Timing of every blocking sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timings {
    /// Pause between two single-step brightness changes
    pub fade_step: Duration,
    /// Settle delay after a button press is detected
    pub debounce: Duration,
    /// Settle delay after the first press that leaves standby
    pub standby_debounce: Duration,
    /// Hold time that turns a press into a setup request
    pub long_press: Duration,
    /// How long the setup intro pattern is shown
    pub setup_intro: Duration,
    /// Delay between a press on a selection pattern and the hold check
    pub select_confirm: Duration,
    /// Pause between two brightness steps while teaching a profile
    pub teach_step: Duration,
    /// Pause after a profile has been taught or skipped
    pub teach_settle: Duration,
    /// Half period of the low battery blink
    pub battery_blink: Duration,
    /// Duration of each on and off phase of a shutoff warning
    pub warning_phase: Duration,
    /// Number of on/off cycles in a shutoff warning
    pub warning_cycles: u8,
    /// Cooldown after a thermal shutoff
    pub thermal_cooldown: Duration,
    /// Sampling interval while waiting on the button
    pub button_poll: Duration,
}

impl Timings {
    pub const REFERENCE: Self = Self {
        fade_step: Duration::from_millis(5),
        debounce: Duration::from_millis(150),
        standby_debounce: Duration::from_millis(100),
        long_press: Duration::from_millis(3000),
        setup_intro: Duration::from_millis(1000),
        select_confirm: Duration::from_millis(200),
        teach_step: Duration::from_millis(25),
        teach_settle: Duration::from_millis(500),
        battery_blink: Duration::from_millis(500),
        warning_phase: Duration::from_millis(500),
        warning_cycles: 10,
        thermal_cooldown: Duration::from_millis(5000),
        button_poll: Duration::from_millis(1),
    };
}

impl Default for Timings {
    fn default() -> Self {
        Self::REFERENCE
    }
}

/// Where the profiles are stored and what a blank device starts with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProfileLayout {
    /// Storage offset of profile 1; profiles 2-4 follow byte by byte
    pub base_address: u32,
    /// Factory brightness of profiles 1-4
    pub defaults: [u8; 4],
}

impl ProfileLayout {
    pub const REFERENCE: Self = Self {
        base_address: 0x10,
        defaults: [2, 64, 128, 255],
    };
}

impl Default for ProfileLayout {
    fn default() -> Self {
        Self::REFERENCE
    }
}

/// Brightness used by the thermal monitor to dim the light
pub const THERMAL_WARNING_BRIGHTNESS: u8 = 10;

/// Brightness of the front light flashes during a thermal shutoff
pub const THERMAL_FLASH_BRIGHTNESS: u8 = 2;

/// Configuration for the headlamp
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeadlampConfig {
    pub thresholds: Thresholds,
    pub timings: Timings,
    pub profiles: ProfileLayout,
}
