use rodio::Source;
use std::f32::consts::PI;
use std::time::Duration;

use crate::timer::SoundEvent;

/// Short decaying sine tone, used when no sound file is available for a cue.
pub struct Chime {
    freq: f32,
    sample_rate: u32,
    num_sample: usize,
    total_samples: usize,
}

impl Chime {
    pub fn new(freq: f32, duration: Duration) -> Self {
        let sample_rate = 44100;
        Self {
            freq,
            sample_rate,
            num_sample: 0,
            total_samples: duration.as_millis() as usize * sample_rate as usize / 1000,
        }
    }

    /// Low tone for giving up, high tones for starting and finishing.
    pub fn for_event(event: SoundEvent) -> Self {
        match event {
            SoundEvent::SessionStarted => Self::new(660.0, Duration::from_millis(350)),
            SoundEvent::SessionCommitted => Self::new(196.0, Duration::from_millis(700)),
            SoundEvent::SessionAborted => Self::new(440.0, Duration::from_millis(120)),
            SoundEvent::SessionExpired => Self::new(880.0, Duration::from_millis(1200)),
        }
    }
}

impl Iterator for Chime {
    type Item = f32;

    fn next(&mut self) -> Option<Self::Item> {
        if self.num_sample >= self.total_samples {
            return None;
        }
        self.num_sample += 1;

        let t = self.num_sample as f32 / self.sample_rate as f32;
        let envelope = (-4.0 * t).exp();

        Some((2.0 * PI * self.freq * t).sin() * envelope * 0.2)
    }
}

impl Source for Chime {
    fn current_frame_len(&self) -> Option<usize> {
        Some(self.total_samples - self.num_sample)
    }

    fn channels(&self) -> u16 {
        1 // Mono
    }

    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn total_duration(&self) -> Option<Duration> {
        Some(Duration::from_secs_f32(
            self.total_samples as f32 / self.sample_rate as f32,
        ))
    }
}
