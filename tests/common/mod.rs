//! Simulated headlamp board.
//!
//! Time only moves when the firmware waits: delays advance the virtual clock
//! by their full length and every ADC conversion takes 100 µs. Button
//! presses are scripted as intervals on that clock.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::convert::Infallible;
use std::rc::Rc;

use embassy_time::Instant;
use embedded_hal::{delay::DelayNs, digital, pwm};
use embedded_storage::{ReadStorage, Storage};
use headlamp_core::{
    AnalogInput, Board, Clock, Event, EventChannel, Headlamp, HeadlampConfig, Parts, Platform,
    SensorChannel,
};

pub const NANOS_PER_MILLI: u64 = 1_000_000;
pub const ADC_CONVERSION_NANOS: u64 = 100_000;
pub const EEPROM_SIZE: usize = 256;

/// Battery reading inside the 75-100% band
pub const BATTERY_FULL: u16 = 240;
/// Temperature reading of a cool driver
pub const TEMPERATURE_COOL: u16 = 300;

pub struct Sim {
    pub now_ns: u64,
    /// Pressed intervals `[start, end)` in nanoseconds
    pub presses: Vec<(u64, u64)>,
    pub battery: u16,
    pub temperature: u16,
    /// Readings served before falling back to `battery`
    pub battery_queue: VecDeque<u16>,
    pub temperature_queue: VecDeque<u16>,
    pub adc_reads: usize,
    pub leds: [bool; 3],
    /// Number of off-to-on transitions per LED
    pub led_rises: [usize; 3],
    /// LEDs whose pin fails on every write
    pub led_faults: [bool; 3],
    pub pwm_log: Vec<u16>,
    pub eeprom: [u8; EEPROM_SIZE],
    pub eeprom_writes: usize,
}

impl Sim {
    pub fn now_ms(&self) -> u64 {
        self.now_ns / NANOS_PER_MILLI
    }

    pub fn is_pressed(&self) -> bool {
        self.presses
            .iter()
            .any(|&(start, end)| start <= self.now_ns && self.now_ns < end)
    }

    pub fn duty(&self) -> u16 {
        self.pwm_log.last().copied().unwrap_or(0)
    }
}

pub type Shared = Rc<RefCell<Sim>>;

pub fn new_sim() -> Shared {
    Rc::new(RefCell::new(Sim {
        now_ns: 0,
        presses: Vec::new(),
        battery: BATTERY_FULL,
        temperature: TEMPERATURE_COOL,
        battery_queue: VecDeque::new(),
        temperature_queue: VecDeque::new(),
        adc_reads: 0,
        leds: [false; 3],
        led_rises: [0; 3],
        led_faults: [false; 3],
        pwm_log: Vec::new(),
        eeprom: [0xFF; EEPROM_SIZE],
        eeprom_writes: 0,
    }))
}

/// Schedule a press `offset_ms` from now, held for `duration_ms`
pub fn press_after(sim: &Shared, offset_ms: u64, duration_ms: u64) {
    let mut sim = sim.borrow_mut();
    let start = sim.now_ns + offset_ms * NANOS_PER_MILLI;
    sim.presses.push((start, start + duration_ms * NANOS_PER_MILLI));
}

pub fn advance(sim: &Shared, ms: u64) {
    sim.borrow_mut().now_ns += ms * NANOS_PER_MILLI;
}

pub fn elapsed_ms_since(sim: &Shared, start_ns: u64) -> f64 {
    (sim.borrow().now_ns - start_ns) as f64 / NANOS_PER_MILLI as f64
}

pub struct SimButton(Shared);

impl digital::ErrorType for SimButton {
    type Error = Infallible;
}

impl digital::InputPin for SimButton {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.0.borrow().is_pressed())
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(self.0.borrow().is_pressed())
    }
}

/// Error of a status LED pin marked as faulty
#[derive(Debug)]
pub struct PinFault;

impl digital::Error for PinFault {
    fn kind(&self) -> digital::ErrorKind {
        digital::ErrorKind::Other
    }
}

pub struct SimLed(Shared, usize);

impl digital::ErrorType for SimLed {
    type Error = PinFault;
}

impl digital::OutputPin for SimLed {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        let mut sim = self.0.borrow_mut();
        if sim.led_faults[self.1] {
            return Err(PinFault);
        }
        sim.leds[self.1] = false;
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        let mut sim = self.0.borrow_mut();
        if sim.led_faults[self.1] {
            return Err(PinFault);
        }
        if !sim.leds[self.1] {
            sim.led_rises[self.1] += 1;
        }
        sim.leds[self.1] = true;
        Ok(())
    }
}

pub struct SimLight(Shared);

impl pwm::ErrorType for SimLight {
    type Error = Infallible;
}

impl pwm::SetDutyCycle for SimLight {
    fn max_duty_cycle(&self) -> u16 {
        255
    }

    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Self::Error> {
        self.0.borrow_mut().pwm_log.push(duty);
        Ok(())
    }
}

pub struct SimAdc(Shared);

impl AnalogInput for SimAdc {
    fn read(&mut self, channel: SensorChannel) -> u16 {
        let mut sim = self.0.borrow_mut();
        sim.now_ns += ADC_CONVERSION_NANOS;
        sim.adc_reads += 1;
        match channel {
            SensorChannel::Battery => {
                let fallback = sim.battery;
                sim.battery_queue.pop_front().unwrap_or(fallback)
            }
            SensorChannel::Temperature => {
                let fallback = sim.temperature;
                sim.temperature_queue.pop_front().unwrap_or(fallback)
            }
        }
    }
}

pub struct SimEeprom(Shared);

impl ReadStorage for SimEeprom {
    type Error = Infallible;

    fn read(&mut self, offset: u32, bytes: &mut [u8]) -> Result<(), Self::Error> {
        let offset = offset as usize;
        bytes.copy_from_slice(&self.0.borrow().eeprom[offset..offset + bytes.len()]);
        Ok(())
    }

    fn capacity(&self) -> usize {
        EEPROM_SIZE
    }
}

impl Storage for SimEeprom {
    fn write(&mut self, offset: u32, bytes: &[u8]) -> Result<(), Self::Error> {
        let offset = offset as usize;
        let mut sim = self.0.borrow_mut();
        sim.eeprom[offset..offset + bytes.len()].copy_from_slice(bytes);
        sim.eeprom_writes += 1;
        Ok(())
    }
}

pub struct SimDelay(Shared);

impl DelayNs for SimDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.0.borrow_mut().now_ns += u64::from(ns);
    }

    fn delay_us(&mut self, us: u32) {
        self.0.borrow_mut().now_ns += u64::from(us) * 1_000;
    }

    fn delay_ms(&mut self, ms: u32) {
        self.0.borrow_mut().now_ns += u64::from(ms) * NANOS_PER_MILLI;
    }
}

pub struct SimClock(Shared);

impl Clock for SimClock {
    fn now(&self) -> Instant {
        Instant::from_millis(self.0.borrow().now_ms())
    }
}

pub struct SimPlatform;

impl Platform for SimPlatform {
    type Button = SimButton;
    type Led = SimLed;
    type Light = SimLight;
    type Adc = SimAdc;
    type Storage = SimEeprom;
    type Delay = SimDelay;
    type Clock = SimClock;
}

pub fn parts(sim: &Shared) -> Parts<SimPlatform> {
    Parts {
        button: SimButton(sim.clone()),
        leds: [
            SimLed(sim.clone(), 0),
            SimLed(sim.clone(), 1),
            SimLed(sim.clone(), 2),
        ],
        light: SimLight(sim.clone()),
        adc: SimAdc(sim.clone()),
        storage: SimEeprom(sim.clone()),
        delay: SimDelay(sim.clone()),
        clock: SimClock(sim.clone()),
    }
}

pub fn board<'a>(sim: &Shared, events: &'a EventChannel) -> Board<'a, SimPlatform> {
    Board::new(parts(sim), &HeadlampConfig::default(), events.sender())
}

pub fn headlamp<'a>(sim: &Shared, events: &'a EventChannel) -> Headlamp<'a, SimPlatform> {
    Headlamp::new(parts(sim), &HeadlampConfig::default(), events.sender())
}

/// Headlamp with factory profiles written, past standby
pub fn ready_headlamp<'a>(sim: &Shared, events: &'a EventChannel) -> Headlamp<'a, SimPlatform> {
    let mut headlamp = headlamp(sim, events);
    headlamp
        .board_mut()
        .profiles
        .ensure_defaults()
        .expect("profiles");
    headlamp
}

/// Step the control loop until the virtual clock reaches `until_ms`
pub fn run_until(headlamp: &mut Headlamp<'_, SimPlatform>, sim: &Shared, until_ms: u64) {
    while sim.borrow().now_ms() < until_ms {
        headlamp.step().expect("step");
    }
}

pub fn drain(events: &EventChannel) -> Vec<Event> {
    let receiver = events.receiver();
    std::iter::from_fn(|| receiver.try_receive().ok()).collect()
}
