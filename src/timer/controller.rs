use std::time::Duration;

use chrono::Local;
use rand::{rngs::StdRng, SeedableRng};

use crate::{
    canvas::Canvas,
    error::{SessionError, SessionResult},
    log_error, log_info,
    models::{SessionRecord, DEFAULT_DESC, DEFAULT_TAG},
    store::SessionStore,
};

use super::{
    policy::{self, Outcome, Phase},
    SessionClock, SessionDuration, TickHandle, TickOutcome, TickScheduler, TimerStatus,
};

const ENABLE_LOGS: bool = true;

pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Title shown while no session is running.
pub const IDLE_TITLE: &str = "Καμβάς";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEvent {
    SessionStarted,
    SessionCommitted,
    SessionAborted,
    SessionExpired,
}

/// The UI side of a session: draws the canvas and plays cues.
pub trait SessionFrontend {
    fn render(&mut self, canvas: &Canvas, snapshot: &TimerSnapshot);
    fn play_sound(&mut self, event: SoundEvent);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerSnapshot {
    pub status: TimerStatus,
    pub total_secs: u64,
    pub remaining_secs: u64,
}

impl TimerSnapshot {
    pub fn is_running(&self) -> bool {
        self.status == TimerStatus::Running
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.total_secs.saturating_sub(self.remaining_secs)
    }

    pub fn phase(&self) -> Option<Phase> {
        self.is_running()
            .then(|| policy::phase(self.total_secs, self.elapsed_secs()))
    }

    pub fn button_label(&self) -> String {
        policy::display_label(self.phase(), self.elapsed_secs())
    }

    pub fn title(&self) -> String {
        if self.is_running() {
            policy::format_countdown(self.remaining_secs)
        } else {
            IDLE_TITLE.to_string()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ending {
    /// The action button was pressed mid-session.
    Canceled,
    /// The countdown reached zero.
    Expired,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    Started {
        total_secs: u64,
    },
    Ticked {
        remaining_secs: u64,
    },
    Concluded {
        outcome: Outcome,
        ending: Ending,
        record: Option<SessionRecord>,
    },
}

/// Owns everything one painting session touches. The frontend and the event
/// loop talk only to this type.
pub struct SessionController<S: TickScheduler, F: SessionFrontend> {
    canvas: Canvas,
    clock: Option<SessionClock>,
    store: SessionStore,
    scheduler: S,
    frontend: F,
    rng: StdRng,
    duration: SessionDuration,
    tag: String,
    desc: String,
    tick_interval: Duration,
    pending_tick: Option<TickHandle>,
}

impl<S: TickScheduler, F: SessionFrontend> SessionController<S, F> {
    pub fn new(store: SessionStore, scheduler: S, frontend: F) -> Self {
        Self {
            canvas: Canvas::new(),
            clock: None,
            store,
            scheduler,
            frontend,
            rng: StdRng::from_entropy(),
            duration: SessionDuration::default(),
            tag: DEFAULT_TAG.to_string(),
            desc: DEFAULT_DESC.to_string(),
            tick_interval: TICK_INTERVAL,
            pending_tick: None,
        }
    }

    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    pub fn with_tick_interval(mut self, interval: Duration) -> Self {
        self.tick_interval = interval;
        self
    }

    /// Takes effect at the next session start.
    pub fn set_duration(&mut self, duration: SessionDuration) {
        self.duration = duration;
    }

    pub fn duration(&self) -> SessionDuration {
        self.duration
    }

    pub fn set_tag(&mut self, tag: impl Into<String>) {
        self.tag = tag.into();
    }

    pub fn set_desc(&mut self, desc: impl Into<String>) {
        self.desc = desc.into();
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    pub fn frontend(&self) -> &F {
        &self.frontend
    }

    pub fn frontend_mut(&mut self) -> &mut F {
        &mut self.frontend
    }

    pub fn is_running(&self) -> bool {
        self.clock.is_some()
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        match &self.clock {
            Some(clock) => TimerSnapshot {
                status: clock.status(),
                total_secs: clock.total_secs(),
                remaining_secs: clock.remaining_secs(),
            },
            None => TimerSnapshot {
                status: TimerStatus::Idle,
                total_secs: self.duration.as_secs(),
                remaining_secs: 0,
            },
        }
    }

    /// Redraws the current state, e.g. once when the frontend attaches.
    pub fn refresh(&mut self) {
        self.render();
    }

    /// Starts a session when idle; otherwise cancels or gives up depending on
    /// how far the running session got.
    pub fn on_action_button_pressed(&mut self) -> SessionResult<Transition> {
        if self.clock.is_none() {
            self.start_session()
        } else {
            self.cancel_session()
        }
    }

    /// Delivered by the event loop when the scheduled tick comes due.
    pub fn on_tick(&mut self) -> SessionResult<Transition> {
        self.pending_tick = None;

        let ticked = match self.clock.as_mut() {
            Some(clock) => clock.tick(),
            None => Err(SessionError::InvalidState {
                operation: "tick",
                status: TimerStatus::Idle,
            }),
        };

        match ticked {
            Ok(TickOutcome::Continue { remaining }) => {
                self.canvas.paint_random_cell(&mut self.rng);
                self.schedule_next_tick();
                self.render();
                Ok(Transition::Ticked {
                    remaining_secs: remaining,
                })
            }
            Ok(TickOutcome::Expired) => {
                self.conclude(policy::resolve_natural_expiry(), Ending::Expired)
            }
            Err(err) => Err(self.fail_session(err)),
        }
    }

    fn start_session(&mut self) -> SessionResult<Transition> {
        let total_secs = self.duration.as_secs();
        let mut clock = SessionClock::new();
        clock.start(total_secs)?;

        self.canvas.reset();
        self.clock = Some(clock);
        self.schedule_next_tick();

        log_info!("Session started: {} seconds", total_secs);
        self.frontend.play_sound(SoundEvent::SessionStarted);
        self.render();
        Ok(Transition::Started { total_secs })
    }

    fn cancel_session(&mut self) -> SessionResult<Transition> {
        let canceled = match self.clock.as_mut() {
            Some(clock) => clock
                .cancel()
                .map(|()| policy::resolve_cancellation(clock.total_secs(), clock.elapsed_secs())),
            None => Err(SessionError::InvalidState {
                operation: "cancel",
                status: TimerStatus::Idle,
            }),
        };

        match canceled {
            Ok(outcome) => self.conclude(outcome, Ending::Canceled),
            Err(err) => Err(self.fail_session(err)),
        }
    }

    /// Single exit path of a session. The canvas is reset exactly once, after
    /// the committed state has been rendered and saved.
    fn conclude(&mut self, outcome: Outcome, ending: Ending) -> SessionResult<Transition> {
        self.cancel_pending_tick();

        let (total_secs, elapsed_secs) = self
            .clock
            .as_ref()
            .map(|clock| (clock.total_secs(), clock.elapsed_secs()))
            .unwrap_or_default();

        let saved = match outcome {
            Outcome::Committed => {
                self.canvas.stain_dark();
                // The stained frame keeps the countdown it ended on.
                let ending_frame = TimerSnapshot {
                    status: TimerStatus::Running,
                    total_secs,
                    remaining_secs: total_secs.saturating_sub(elapsed_secs),
                };
                self.frontend.render(&self.canvas, &ending_frame);

                let record = SessionRecord::new(&Local::now(), total_secs, &self.tag, &self.desc);
                let saved = self
                    .store
                    .append(&record, &self.canvas.thumbnail())
                    .map(|()| Some(record));

                self.frontend.play_sound(match ending {
                    Ending::Expired => SoundEvent::SessionExpired,
                    Ending::Canceled => SoundEvent::SessionCommitted,
                });
                saved
            }
            Outcome::Aborted => {
                self.frontend.play_sound(SoundEvent::SessionAborted);
                Ok(None)
            }
        };

        self.clock = None;
        self.canvas.reset();
        self.render();

        log_info!(
            "Session concluded: {:?} via {:?} after {}/{} seconds",
            outcome,
            ending,
            elapsed_secs,
            total_secs
        );

        let record = saved.map_err(SessionError::from)?;
        Ok(Transition::Concluded {
            outcome,
            ending,
            record,
        })
    }

    /// Tears the session down after a contract violation and hands the error
    /// back for propagation.
    fn fail_session(&mut self, err: SessionError) -> SessionError {
        log_error!("Aborting session: {}", err);
        self.cancel_pending_tick();
        self.clock = None;
        self.canvas.reset();
        self.render();
        err
    }

    fn schedule_next_tick(&mut self) {
        self.pending_tick = Some(self.scheduler.schedule_tick(self.tick_interval));
    }

    fn cancel_pending_tick(&mut self) {
        if let Some(handle) = self.pending_tick.take() {
            self.scheduler.cancel_scheduled_tick(handle);
        }
    }

    fn render(&mut self) {
        let snapshot = self.snapshot();
        self.frontend.render(&self.canvas, &snapshot);
    }
}
