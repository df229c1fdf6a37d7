//! Cancelable delays keyed by generation tickets.
//!
//! The platform timer only carries a [`DelayTicket`] back; whether the
//! delayed action still runs is decided here, so the logic is testable
//! without a browser event loop.

/// Handle returned by [`CancelableDelay::arm`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DelayTicket(u64);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CancelableDelay {
    generation: u64,
    pending: bool,
}

impl CancelableDelay {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            generation: 0,
            pending: false,
        }
    }

    /// Start (or restart) the delay. Tickets from earlier arms go stale.
    pub const fn arm(&mut self) -> DelayTicket {
        self.generation = self.generation.wrapping_add(1);
        self.pending = true;
        DelayTicket(self.generation)
    }

    pub const fn cancel(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.pending = false;
    }

    /// Consume an elapsed timer. Returns `true` when `ticket` is still the
    /// current one, i.e. the delayed action should run.
    pub fn fire(&mut self, ticket: DelayTicket) -> bool {
        if self.pending && ticket.0 == self.generation {
            self.pending = false;
            true
        } else {
            false
        }
    }

    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rearm_invalidates_previous_ticket() {
        let mut delay = CancelableDelay::new();
        let first = delay.arm();
        let second = delay.arm();
        assert!(!delay.fire(first));
        assert!(delay.is_pending());
        assert!(delay.fire(second));
        assert!(!delay.is_pending());
        assert!(!delay.fire(second), "a ticket fires once");
    }

    #[test]
    fn cancel_invalidates_current_ticket() {
        let mut delay = CancelableDelay::default();
        let ticket = delay.arm();
        delay.cancel();
        assert!(!delay.is_pending());
        assert!(!delay.fire(ticket));
    }
}
