//! Diagnostic event queue for `no_std` environments.
//!
//! A bounded channel built on `critical-section` and `heapless::Deque`.
//! The control loop pushes [`Event`]s into it without ever blocking; board
//! code drains it whenever it has a way to report them (serial, RTT, ...).

use core::cell::RefCell;

use critical_section::Mutex;
use heapless::Deque;

use crate::battery::BatteryBand;
use crate::state::LightState;

/// Number of events buffered before new ones are dropped
pub const EVENT_QUEUE_SIZE: usize = 16;

/// Something observable happened inside the control loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// The light controller moved to a new state
    StateChanged(LightState),
    /// A profile brightness was taught and persisted
    ProfileSaved { index: u8, brightness: u8 },
    /// Blank storage was initialized with factory profiles
    DefaultsWritten,
    /// The battery entered a different charge band
    BatteryBand(BatteryBand),
    /// The driver got hot and the light was dimmed
    ThermalWarning,
    /// The driver overheated; the light was shut off for a cooldown
    ThermalShutoff,
    /// The battery is depleted; the lamp is halting
    UndervoltageShutoff,
}

/// Error returned when trying to send to a full channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrySendError<T>(pub T);

/// Error returned when trying to receive from an empty channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TryReceiveError;

/// A bounded, interrupt safe channel.
pub struct Channel<T, const SIZE: usize> {
    inner: Mutex<RefCell<Deque<T, SIZE>>>,
}

impl<T, const SIZE: usize> Channel<T, SIZE> {
    /// Create a new empty channel.
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(Deque::new())),
        }
    }

    /// Get a sender handle for this channel.
    pub const fn sender(&self) -> Sender<'_, T, SIZE> {
        Sender { channel: self }
    }

    /// Get a receiver handle for this channel.
    pub const fn receiver(&self) -> Receiver<'_, T, SIZE> {
        Receiver { channel: self }
    }

    /// Try to send a value into the channel.
    ///
    /// Returns `Err(TrySendError(value))` if the channel is full.
    pub fn try_send(&self, value: T) -> Result<(), TrySendError<T>> {
        critical_section::with(|cs| {
            let mut queue = self.inner.borrow(cs).borrow_mut();
            queue.push_back(value).map_err(TrySendError)
        })
    }

    /// Try to receive a value from the channel.
    ///
    /// Returns `Err(TryReceiveError)` if the channel is empty.
    pub fn try_receive(&self) -> Result<T, TryReceiveError> {
        critical_section::with(|cs| {
            let mut queue = self.inner.borrow(cs).borrow_mut();
            queue.pop_front().ok_or(TryReceiveError)
        })
    }

    /// Number of queued values
    pub fn len(&self) -> usize {
        critical_section::with(|cs| self.inner.borrow(cs).borrow().len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T, const SIZE: usize> Default for Channel<T, SIZE> {
    fn default() -> Self {
        Self::new()
    }
}

/// A sender handle for a [`Channel`].
#[derive(Clone, Copy)]
pub struct Sender<'a, T, const SIZE: usize> {
    channel: &'a Channel<T, SIZE>,
}

impl<T, const SIZE: usize> Sender<'_, T, SIZE> {
    /// Try to send a value into the channel.
    ///
    /// Returns `Err(TrySendError(value))` if the channel is full.
    pub fn try_send(&self, value: T) -> Result<(), TrySendError<T>> {
        self.channel.try_send(value)
    }
}

impl<const SIZE: usize> Sender<'_, Event, SIZE> {
    /// Queue an event, dropping it when the queue is full
    pub fn emit(&self, event: Event) {
        if self.try_send(event).is_err() {
            log!("event queue full, dropping {:?}", event);
        }
    }
}

/// A receiver handle for a [`Channel`].
#[derive(Clone, Copy)]
pub struct Receiver<'a, T, const SIZE: usize> {
    channel: &'a Channel<T, SIZE>,
}

impl<T, const SIZE: usize> Receiver<'_, T, SIZE> {
    /// Try to receive a value from the channel.
    ///
    /// Returns `Err(TryReceiveError)` if the channel is empty.
    pub fn try_receive(&self) -> Result<T, TryReceiveError> {
        self.channel.try_receive()
    }
}

/// Type alias for the event channel
pub type EventChannel = Channel<Event, EVENT_QUEUE_SIZE>;

/// Type alias for event sender
pub type EventSender<'a> = Sender<'a, Event, EVENT_QUEUE_SIZE>;

/// Type alias for event receiver
pub type EventReceiver<'a> = Receiver<'a, Event, EVENT_QUEUE_SIZE>;
