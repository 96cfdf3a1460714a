pub mod controller;
pub mod duration;
pub mod policy;
pub mod scheduler;
pub mod state;

pub use controller::{
    Ending, SessionController, SessionFrontend, SoundEvent, TimerSnapshot, Transition,
};
pub use duration::{DurationSlider, SessionDuration};
pub use policy::{Outcome, Phase, GRACE_SECONDS};
pub use scheduler::{DeadlineScheduler, TickHandle, TickScheduler};
pub use state::{SessionClock, TickOutcome, TimerStatus};
