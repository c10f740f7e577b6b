//! Change-notification queue toward the transport layer.
//!
//! After a committed write the accessory raises the changed
//! characteristic here; the protocol transport drains the queue on its
//! own dispatch context and forwards each entry to subscribed
//! controllers. Built on `critical-section` and a fixed-size
//! `heapless::Deque`, so raising is safe from any context.

use core::cell::RefCell;

use critical_section::Mutex;
use heapless::Deque;

use crate::command::Characteristic;

/// Capacity of the notification queue.
pub const EVENT_QUEUE_DEPTH: usize = 8;

/// Error returned when raising an event onto a full queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventOverflow;

/// Bounded queue of pending change notifications.
pub struct EventQueue {
    inner: Mutex<RefCell<Deque<Characteristic, EVENT_QUEUE_DEPTH>>>,
}

impl EventQueue {
    /// Create a new empty queue.
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(Deque::new())),
        }
    }

    /// Get the accessory-side handle for raising notifications.
    pub const fn sender(&self) -> EventSender<'_> {
        EventSender { queue: self }
    }

    /// Get the transport-side handle for draining notifications.
    pub const fn receiver(&self) -> EventReceiver<'_> {
        EventReceiver { queue: self }
    }
}

impl Default for EventQueue {
    fn default() -> Self {
        Self::new()
    }
}

/// Accessory-side handle of an [`EventQueue`].
#[derive(Clone, Copy)]
pub struct EventSender<'a> {
    queue: &'a EventQueue,
}

impl EventSender<'_> {
    /// Queue a change notification for the transport layer.
    ///
    /// Returns `Err(EventOverflow)` when the queue is full; the state
    /// change itself is unaffected and the transport picks it up on its
    /// next read.
    pub fn raise(&self, characteristic: Characteristic) -> Result<(), EventOverflow> {
        critical_section::with(|cs| {
            self.queue
                .inner
                .borrow(cs)
                .borrow_mut()
                .push_back(characteristic)
                .map_err(|_| EventOverflow)
        })
    }
}

/// Transport-side handle of an [`EventQueue`].
#[derive(Clone, Copy)]
pub struct EventReceiver<'a> {
    queue: &'a EventQueue,
}

impl EventReceiver<'_> {
    /// Take the oldest pending notification, if any.
    pub fn next(&self) -> Option<Characteristic> {
        critical_section::with(|cs| self.queue.inner.borrow(cs).borrow_mut().pop_front())
    }
}
