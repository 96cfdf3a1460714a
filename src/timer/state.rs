use crate::error::{SessionError, SessionResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimerStatus {
    #[default]
    Idle,
    Running,
    Canceled,
    Expired,
}

/// What a processed tick asks of the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Still running: paint a cell and schedule the next tick.
    Continue { remaining: u64 },
    /// `remaining` reached zero.
    Expired,
}

/// One-second countdown for a single session. A stopped clock is never
/// restarted; the controller builds a fresh one for every session.
#[derive(Debug, Clone, Default)]
pub struct SessionClock {
    status: TimerStatus,
    total_secs: u64,
    remaining_secs: u64,
}

impl SessionClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self, total_secs: u64) -> SessionResult<()> {
        self.expect_status("start", TimerStatus::Idle)?;
        if total_secs == 0 {
            return Err(SessionError::Configuration(
                "duration must be greater than zero seconds".into(),
            ));
        }

        self.status = TimerStatus::Running;
        self.total_secs = total_secs;
        self.remaining_secs = total_secs;
        Ok(())
    }

    pub fn tick(&mut self) -> SessionResult<TickOutcome> {
        self.expect_status("tick", TimerStatus::Running)?;

        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs == 0 {
            self.status = TimerStatus::Expired;
            return Ok(TickOutcome::Expired);
        }
        Ok(TickOutcome::Continue {
            remaining: self.remaining_secs,
        })
    }

    pub fn cancel(&mut self) -> SessionResult<()> {
        self.expect_status("cancel", TimerStatus::Running)?;
        self.status = TimerStatus::Canceled;
        Ok(())
    }

    pub fn status(&self) -> TimerStatus {
        self.status
    }

    pub fn total_secs(&self) -> u64 {
        self.total_secs
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.total_secs - self.remaining_secs
    }

    fn expect_status(&self, operation: &'static str, expected: TimerStatus) -> SessionResult<()> {
        if self.status != expected {
            return Err(SessionError::InvalidState {
                operation,
                status: self.status,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expires_on_final_tick_only() {
        for total in [1u64, 2, 11, 90] {
            let mut clock = SessionClock::new();
            clock.start(total).unwrap();

            for tick in 1..total {
                assert_eq!(
                    clock.tick().unwrap(),
                    TickOutcome::Continue {
                        remaining: total - tick
                    }
                );
                assert_eq!(clock.elapsed_secs(), tick);
            }

            assert_eq!(clock.tick().unwrap(), TickOutcome::Expired);
            assert_eq!(clock.remaining_secs(), 0);
            assert_eq!(clock.status(), TimerStatus::Expired);
        }
    }

    #[test]
    fn test_start_rejects_zero_duration() {
        let mut clock = SessionClock::new();
        let err = clock.start(0).unwrap_err();
        assert!(matches!(err, SessionError::Configuration(_)));
        assert_eq!(clock.status(), TimerStatus::Idle);
    }

    #[test]
    fn test_operations_outside_running_are_invalid() {
        let mut clock = SessionClock::new();
        assert!(matches!(
            clock.tick(),
            Err(SessionError::InvalidState {
                operation: "tick",
                status: TimerStatus::Idle
            })
        ));
        assert!(matches!(
            clock.cancel(),
            Err(SessionError::InvalidState { .. })
        ));

        clock.start(5).unwrap();
        assert!(matches!(
            clock.start(5),
            Err(SessionError::InvalidState {
                operation: "start",
                status: TimerStatus::Running
            })
        ));

        clock.cancel().unwrap();
        assert_eq!(clock.status(), TimerStatus::Canceled);
        assert!(matches!(
            clock.tick(),
            Err(SessionError::InvalidState {
                status: TimerStatus::Canceled,
                ..
            })
        ));
        assert!(matches!(
            clock.start(5),
            Err(SessionError::InvalidState { .. })
        ));
    }
}
