use std::time::Duration;

use tokio::time::Instant;

/// Identifies one scheduled tick so it can be canceled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TickHandle(pub u64);

/// Deferred-tick primitives the controller relies on. Whoever owns the event
/// loop delivers a due tick by calling `SessionController::on_tick`.
pub trait TickScheduler {
    fn schedule_tick(&mut self, delay: Duration) -> TickHandle;
    fn cancel_scheduled_tick(&mut self, handle: TickHandle);
}

/// Holds at most one pending deadline; the async driver sleeps until it.
#[derive(Debug, Default)]
pub struct DeadlineScheduler {
    next_handle: u64,
    pending: Option<(TickHandle, Instant)>,
}

impl DeadlineScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.map(|(_, at)| at)
    }

    /// Clears the pending tick if its deadline has passed, returning it.
    pub fn take_due(&mut self, now: Instant) -> Option<TickHandle> {
        match self.pending {
            Some((handle, at)) if at <= now => {
                self.pending = None;
                Some(handle)
            }
            _ => None,
        }
    }
}

impl TickScheduler for DeadlineScheduler {
    fn schedule_tick(&mut self, delay: Duration) -> TickHandle {
        self.next_handle += 1;
        let handle = TickHandle(self.next_handle);
        self.pending = Some((handle, Instant::now() + delay));
        handle
    }

    fn cancel_scheduled_tick(&mut self, handle: TickHandle) {
        if matches!(self.pending, Some((pending, _)) if pending == handle) {
            self.pending = None;
        }
    }
}
