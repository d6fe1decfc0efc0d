//! Audio output seam. The simulation decides *what* to play (which meow,
//! pitch, volume) and hands the cue to a sink; the sink decides how to
//! make noise. The default sink just traces cues, which keeps the
//! simulation deterministic and testable.

/// Number of distinct meow recordings a sink is expected to carry.
pub const MEOW_COUNT: usize = 5;

/// One affection meow, fully described by the simulation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeowCue {
    /// Which recording to play.
    pub index: usize,
    /// Playback rate multiplier (raises or lowers pitch).
    pub rate: f32,
    /// Linear volume, 0..1.
    pub volume: f32,
}

impl MeowCue {
    /// Random meow: any recording, rate 0.75..2.25, volume 0.4..0.8.
    pub fn random(rng: &mut fastrand::Rng) -> Self {
        Self {
            index: rng.usize(0..MEOW_COUNT),
            rate: rng.f32() * 1.5 + 0.75,
            volume: rng.f32() * 0.4 + 0.4,
        }
    }
}

/// Fire-and-forget sound output. Implementations must not block the frame.
pub trait AudioSink {
    fn play_meow(&mut self, cue: MeowCue);
    /// Start the looping background track.
    fn start_music(&mut self, volume: f32);
}

/// Default sink with no audio backend. Traces every cue.
pub struct LogAudio;

impl AudioSink for LogAudio {
    fn play_meow(&mut self, cue: MeowCue) {
        log::debug!(
            "meow #{} rate {:.2} volume {:.2}",
            cue.index,
            cue.rate,
            cue.volume
        );
    }

    fn start_music(&mut self, volume: f32) {
        log::debug!("background music started at volume {volume:.2}");
    }
}

/// Test sink that records every cue it is handed.
#[cfg(test)]
#[derive(Default)]
pub struct RecordingAudio {
    pub meows: Vec<MeowCue>,
    pub music_volume: Option<f32>,
}

#[cfg(test)]
impl AudioSink for RecordingAudio {
    fn play_meow(&mut self, cue: MeowCue) {
        self.meows.push(cue);
    }

    fn start_music(&mut self, volume: f32) {
        self.music_volume = Some(volume);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_cues_stay_in_range() {
        let mut rng = fastrand::Rng::with_seed(42);
        for _ in 0..200 {
            let cue = MeowCue::random(&mut rng);
            assert!(cue.index < MEOW_COUNT);
            assert!(cue.rate >= 0.75 && cue.rate < 2.25);
            assert!(cue.volume >= 0.4 && cue.volume < 0.8);
        }
    }
}
