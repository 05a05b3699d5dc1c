//! Bounded mailbox shared between the transport and the tick loop.
//!
//! Built on `critical-section` and `heapless::Deque`, so it can be posted to
//! from an interrupt or another task while the tick loop drains it. Posting
//! never blocks; a full mailbox hands the value back.

use core::cell::RefCell;

use critical_section::Mutex;
use heapless::Deque;

/// Error returned when posting to a full mailbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MailboxFull<T>(pub T);

/// A bounded, interrupt-safe FIFO.
pub struct Mailbox<T, const SIZE: usize> {
    queue: Mutex<RefCell<Deque<T, SIZE>>>,
}

impl<T, const SIZE: usize> Mailbox<T, SIZE> {
    /// Create an empty mailbox.
    pub const fn new() -> Self {
        Self {
            queue: Mutex::new(RefCell::new(Deque::new())),
        }
    }

    /// Get a posting handle for the transport side.
    pub const fn poster(&self) -> Poster<'_, T, SIZE> {
        Poster { mailbox: self }
    }

    /// Append a value.
    ///
    /// Returns `Err(MailboxFull(value))` if there is no free slot.
    pub fn try_post(&self, value: T) -> Result<(), MailboxFull<T>> {
        critical_section::with(|cs| {
            self.queue
                .borrow_ref_mut(cs)
                .push_back(value)
                .map_err(MailboxFull)
        })
    }

    /// Take the oldest value, if any.
    pub fn try_take(&self) -> Option<T> {
        critical_section::with(|cs| self.queue.borrow_ref_mut(cs).pop_front())
    }

    /// Number of values waiting.
    pub fn len(&self) -> usize {
        critical_section::with(|cs| self.queue.borrow_ref(cs).len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T, const SIZE: usize> Default for Mailbox<T, SIZE> {
    fn default() -> Self {
        Self::new()
    }
}

/// Posting handle for a [`Mailbox`].
///
/// Cheap to copy; hand one to every callback that produces values.
#[derive(Clone, Copy)]
pub struct Poster<'a, T, const SIZE: usize> {
    mailbox: &'a Mailbox<T, SIZE>,
}

impl<T, const SIZE: usize> Poster<'_, T, SIZE> {
    /// Append a value, see [`Mailbox::try_post`].
    pub fn try_post(&self, value: T) -> Result<(), MailboxFull<T>> {
        self.mailbox.try_post(value)
    }
}
