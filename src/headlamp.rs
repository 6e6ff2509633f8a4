//! Top-level control loop.
//!
//! [`Headlamp`] owns the board and the three components and runs them in a
//! fixed order: light controller, battery monitor, thermal monitor.
//!
//! # Usage
//!
//! ```ignore
//! static EVENTS: EventChannel = EventChannel::new();
//!
//! let parts = Parts::<MyBoard> { /* peripherals */ };
//! let headlamp = Headlamp::new(parts, &HeadlampConfig::default(), EVENTS.sender());
//! headlamp.run();
//! ```

use embassy_time::Duration;

use crate::battery::{BatteryBand, BatteryMonitor};
use crate::board::{Board, Parts, Platform};
use crate::config::HeadlampConfig;
use crate::controller::LightController;
use crate::error::Error;
use crate::event::{Event, EventSender};
use crate::state::LightState;
use crate::thermal::ThermalMonitor;

/// Outcome of one control loop iteration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Step {
    /// Keep looping
    Continue,
    /// The battery is depleted; nothing may run until a power cycle
    Halt,
}

/// The headlamp - owner of all runtime state
pub struct Headlamp<'a, P: Platform> {
    board: Board<'a, P>,
    light: LightController,
    battery: BatteryMonitor,
    thermal: ThermalMonitor,
    standby_debounce: Duration,
    /// Set once the battery is depleted, never cleared
    halted: bool,
}

impl<'a, P: Platform> Headlamp<'a, P> {
    pub fn new(parts: Parts<P>, config: &HeadlampConfig, events: EventSender<'a>) -> Self {
        Self {
            board: Board::new(parts, config, events),
            light: LightController::new(config.timings),
            battery: BatteryMonitor::new(config.thresholds, &config.timings),
            thermal: ThermalMonitor::new(config.thresholds, &config.timings),
            standby_debounce: config.timings.standby_debounce,
            halted: false,
        }
    }

    /// Power-on sequence.
    ///
    /// Initializes blank profile storage, then waits in standby with the
    /// light off. Only the monitors run in standby so the charge LEDs stay
    /// live. Returns once the button is pressed, or with [`Step::Halt`] if
    /// the battery is already depleted.
    pub fn start(&mut self) -> Result<Step, Error> {
        if self.halted {
            return Ok(Step::Halt);
        }
        if self.board.profiles.ensure_defaults()? {
            self.board.emit(Event::DefaultsWritten);
        }
        self.light.reset();
        self.board.fader.force_off()?;
        log!("headlamp ready, state {:?}", self.light.state());

        while !self.board.button.is_pressed()? {
            if self.check_monitors()? == Step::Halt {
                return Ok(Step::Halt);
            }
        }
        self.board.pause(self.standby_debounce);
        Ok(Step::Continue)
    }

    /// One control loop iteration.
    ///
    /// Once a step returned [`Step::Halt`] every further call does nothing
    /// and halts again.
    pub fn step(&mut self) -> Result<Step, Error> {
        if self.halted {
            return Ok(Step::Halt);
        }
        self.light.poll(&mut self.board)?;
        self.check_monitors()
    }

    /// Run forever.
    ///
    /// Peripheral errors are logged and the loop keeps going. After an
    /// undervoltage shutoff the CPU is parked until the power is cycled.
    pub fn run(mut self) -> ! {
        match self.start() {
            Ok(Step::Halt) => halt(),
            Ok(Step::Continue) => {}
            Err(err) => log!("startup failed: {:?}", err),
        }

        loop {
            match self.step() {
                Ok(Step::Continue) => {}
                Ok(Step::Halt) => halt(),
                Err(err) => log!("control loop error: {:?}", err),
            }
        }
    }

    pub fn state(&self) -> LightState {
        self.light.state()
    }

    /// Current front light brightness
    pub fn brightness(&self) -> u8 {
        self.board.fader.level()
    }

    /// Whether the undervoltage shutoff has stopped the lamp
    pub const fn is_halted(&self) -> bool {
        self.halted
    }

    /// Get a mutable reference to the board.
    pub fn board_mut(&mut self) -> &mut Board<'a, P> {
        &mut self.board
    }

    fn check_monitors(&mut self) -> Result<Step, Error> {
        if self.battery.poll(&mut self.board)? == BatteryBand::Shutoff {
            self.halted = true;
            return Ok(Step::Halt);
        }
        self.thermal.poll(&mut self.board)?;
        Ok(Step::Continue)
    }
}

fn halt() -> ! {
    loop {
        core::hint::spin_loop();
    }
}
