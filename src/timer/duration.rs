use crate::error::{SessionError, SessionResult};

pub const MIN_MINUTES: u64 = 25;
pub const MAX_MINUTES: u64 = 240;
pub const STEP_MINUTES: u64 = 5;

/// A validated, non-zero session length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionDuration {
    secs: u64,
}

impl SessionDuration {
    /// Accepts only values the duration slider offers.
    pub fn from_minutes(minutes: u64) -> SessionResult<Self> {
        if !(MIN_MINUTES..=MAX_MINUTES).contains(&minutes) || minutes % STEP_MINUTES != 0 {
            return Err(SessionError::Configuration(format!(
                "{minutes} minutes is not one of {MIN_MINUTES}..={MAX_MINUTES} in steps of {STEP_MINUTES}"
            )));
        }
        Ok(Self { secs: minutes * 60 })
    }

    /// Raw seconds, for previews and tests. Only zero is rejected.
    pub fn from_secs(secs: u64) -> SessionResult<Self> {
        if secs == 0 {
            return Err(SessionError::Configuration(
                "duration resolves to zero seconds".into(),
            ));
        }
        Ok(Self { secs })
    }

    pub fn as_secs(&self) -> u64 {
        self.secs
    }

    pub fn whole_minutes(&self) -> u64 {
        self.secs / 60
    }
}

impl Default for SessionDuration {
    fn default() -> Self {
        Self {
            secs: MIN_MINUTES * 60,
        }
    }
}

/// Discrete duration control: always holds a legal minute value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DurationSlider {
    minutes: u64,
}

impl Default for DurationSlider {
    fn default() -> Self {
        Self {
            minutes: MIN_MINUTES,
        }
    }
}

impl DurationSlider {
    /// Clamps into range and snaps to the nearest step.
    pub fn new(minutes: u64) -> Self {
        let clamped = minutes.clamp(MIN_MINUTES, MAX_MINUTES);
        let offset = clamped - MIN_MINUTES;
        let snapped = MIN_MINUTES + (offset + STEP_MINUTES / 2) / STEP_MINUTES * STEP_MINUTES;
        Self {
            minutes: snapped.min(MAX_MINUTES),
        }
    }

    pub fn minutes(&self) -> u64 {
        self.minutes
    }

    pub fn increment(&mut self) {
        self.minutes = (self.minutes + STEP_MINUTES).min(MAX_MINUTES);
    }

    pub fn decrement(&mut self) {
        self.minutes = self.minutes.saturating_sub(STEP_MINUTES).max(MIN_MINUTES);
    }

    pub fn duration(&self) -> SessionDuration {
        SessionDuration {
            secs: self.minutes * 60,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_minutes_accepts_slider_values() {
        assert_eq!(SessionDuration::from_minutes(25).unwrap().as_secs(), 1500);
        assert_eq!(SessionDuration::from_minutes(240).unwrap().as_secs(), 14400);
        assert_eq!(SessionDuration::from_minutes(95).unwrap().whole_minutes(), 95);
    }

    #[test]
    fn test_from_minutes_rejects_other_values() {
        for minutes in [0, 20, 26, 241, 245] {
            assert!(
                matches!(
                    SessionDuration::from_minutes(minutes),
                    Err(SessionError::Configuration(_))
                ),
                "{minutes} should be rejected"
            );
        }
    }

    #[test]
    fn test_from_secs_rejects_zero() {
        assert!(matches!(
            SessionDuration::from_secs(0),
            Err(SessionError::Configuration(_))
        ));
        assert_eq!(SessionDuration::from_secs(7).unwrap().whole_minutes(), 0);
    }

    #[test]
    fn test_slider_snaps_and_clamps() {
        assert_eq!(DurationSlider::new(0).minutes(), 25);
        assert_eq!(DurationSlider::new(27).minutes(), 25);
        assert_eq!(DurationSlider::new(28).minutes(), 30);
        assert_eq!(DurationSlider::new(500).minutes(), 240);

        let mut slider = DurationSlider::new(235);
        slider.increment();
        slider.increment();
        assert_eq!(slider.minutes(), 240);

        let mut slider = DurationSlider::default();
        slider.decrement();
        assert_eq!(slider.minutes(), 25);
        assert_eq!(slider.duration().as_secs(), 1500);
    }
}
