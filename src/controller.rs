//! Light controller
//!
//! Interprets the push button: a short press cycles
//! `Off -> P1 -> P2 -> P3 -> P4 -> Off`, holding the button past the long
//! press threshold enters setup mode, where each profile's brightness can be
//! re-taught.
//!
//! # Setup walk
//!
//! 1. The light goes off and the intro pattern is shown.
//! 2. For each profile 1-4 the selection pattern is shown until the button
//!    is pressed. If it is still held after the confirmation delay, the
//!    brightness counts up from 0 (wrapping) until the button is released
//!    and the reached value is persisted. A tap skips the profile.
//! 3. The light goes off and the controller returns to `Off`.
//!
//! Button handling blocks for as long as the button is held; the monitors
//! do not run meanwhile.

use crate::board::{Board, Platform};
use crate::config::Timings;
use crate::error::Error;
use crate::event::Event;
use crate::profile::PROFILE_COUNT;
use crate::state::LightState;
use crate::status::LedPattern;

/// Button driven light state machine
pub struct LightController {
    state: LightState,
    timings: Timings,
    /// Button level seen by the previous poll
    was_pressed: bool,
}

impl LightController {
    pub const fn new(timings: Timings) -> Self {
        Self {
            state: LightState::Off,
            timings,
            was_pressed: false,
        }
    }

    pub const fn state(&self) -> LightState {
        self.state
    }

    /// Force the state without touching the light
    pub fn reset(&mut self) {
        self.state = LightState::Off;
    }

    /// Handle the button once.
    ///
    /// Does nothing unless the button went from released to pressed since the
    /// last poll. Otherwise advances the cycle and blocks until the button is
    /// released, running the setup walk if it is held long enough.
    pub fn poll<P: Platform>(&mut self, board: &mut Board<'_, P>) -> Result<LightState, Error> {
        let pressed = board.button.is_pressed()?;
        let edge = pressed && !self.was_pressed;
        self.was_pressed = pressed;
        if !edge {
            return Ok(self.state);
        }

        let pressed_at = board.now();
        board.pause(self.timings.debounce);
        self.advance(board)?;

        loop {
            let held = board.now().saturating_duration_since(pressed_at);
            if held >= self.timings.long_press && self.state.is_normal() {
                self.run_setup(board)?;
                break;
            }
            if !board.button.is_pressed()? {
                break;
            }
            board.pause(self.timings.button_poll);
        }

        self.was_pressed = board.button.is_pressed()?;
        Ok(self.state)
    }

    /// Move to the next state of the cycle and fade to its brightness
    fn advance<P: Platform>(&mut self, board: &mut Board<'_, P>) -> Result<(), Error> {
        self.transition(board, self.state.next());
        let brightness = board.profiles.get(self.state.profile_index())?;
        board.ramp_to(brightness)
    }

    fn run_setup<P: Platform>(&mut self, board: &mut Board<'_, P>) -> Result<(), Error> {
        self.transition(board, LightState::SetupEntry);
        board.fader.force_off()?;
        board.leds.show(LedPattern::SETUP_INTRO)?;
        board.pause(self.timings.setup_intro);

        for index in 1..=PROFILE_COUNT {
            board.leds.show(LedPattern::select(index))?;
            // The press that entered setup must be released first
            self.wait_for(board, false)?;
            self.wait_for(board, true)?;

            board.pause(self.timings.select_confirm);
            if board.button.is_pressed()? {
                self.transition(board, LightState::SetupProfile(index));
                let brightness = self.teach(board)?;
                board.profiles.set(index, brightness)?;
                log!("profile {} set to {}", index, brightness);
                board.emit(Event::ProfileSaved { index, brightness });
            }
            board.pause(self.timings.teach_settle);
            board.fader.force_off()?;
        }

        self.transition(board, LightState::SetupExit);
        board.fader.force_off()?;
        self.transition(board, LightState::Off);
        Ok(())
    }

    /// Count the brightness up while the button is held.
    ///
    /// Returns the last value written to the light.
    fn teach<P: Platform>(&mut self, board: &mut Board<'_, P>) -> Result<u8, Error> {
        let mut brightness = 0u8;
        while board.button.is_pressed()? {
            brightness = brightness.wrapping_add(1);
            board.fader.apply(brightness)?;
            board.pause(self.timings.teach_step);
        }
        Ok(brightness)
    }

    /// Block until the button reads `pressed`
    fn wait_for<P: Platform>(&mut self, board: &mut Board<'_, P>, pressed: bool) -> Result<(), Error> {
        while board.button.is_pressed()? != pressed {
            board.pause(self.timings.button_poll);
        }
        Ok(())
    }

    fn transition<P: Platform>(&mut self, board: &mut Board<'_, P>, state: LightState) {
        log!("light state {:?}", state);
        self.state = state;
        board.emit(Event::StateChanged(state));
    }
}
