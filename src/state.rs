//! Light controller states.

use crate::profile::PROFILE_COUNT;

/// Current state of the light controller.
///
/// `Off` and `Profile(1..=4)` form the normal cycle. The setup states are
/// only visited while the user re-teaches the profile brightness.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LightState {
    #[default]
    Off,
    /// Lit with the brightness stored for profile 1-4
    Profile(u8),
    /// Long press detected, setup intro is showing
    SetupEntry,
    /// Teaching the brightness of profile 1-4
    SetupProfile(u8),
    /// Setup walk finished, returning to `Off`
    SetupExit,
}

impl LightState {
    /// Next state of the short press cycle.
    ///
    /// `Off -> P1 -> P2 -> P3 -> P4 -> Off`. Setup states fall back to `Off`.
    pub const fn next(self) -> Self {
        match self {
            Self::Off => Self::Profile(1),
            Self::Profile(index) if index < PROFILE_COUNT => Self::Profile(index + 1),
            _ => Self::Off,
        }
    }

    /// Profile index whose brightness this state shows, 0 for off
    pub const fn profile_index(self) -> u8 {
        match self {
            Self::Profile(index) | Self::SetupProfile(index) => index,
            _ => 0,
        }
    }

    /// Whether the state belongs to the normal short press cycle
    pub const fn is_normal(self) -> bool {
        matches!(self, Self::Off | Self::Profile(_))
    }
}
