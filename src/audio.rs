//! Audio cues
//!
//! The simulation only emits discrete cues. Turning them into sound is the job
//! of an [`AudioSink`]; each cue carries a [`Tone`] descriptor so a simple
//! oscillator-based synthesizer can voice it without extra tables.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Sound cue types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AudioCue {
    /// Player fired
    Shoot,
    /// An adversary was destroyed
    AdversaryExplosion,
    /// The player was hit
    PlayerDeath,
    /// The bonus flyer was destroyed
    FlyerExplosion,
    /// Bonus flyer entered the playfield
    FlyerSirenStart,
    /// Bonus flyer left or was destroyed
    FlyerSirenStop,
    /// Formation step, one of four beats in rotation
    MarchBeat(u8),
}

/// Oscillator shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Square,
    Sawtooth,
    Triangle,
    Noise,
}

/// How a synthesizer should voice a cue
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub waveform: Waveform,
    /// Start frequency (Hz)
    pub freq_hz: f32,
    /// End frequency for a sweep; equal to `freq_hz` for a steady tone
    pub end_freq_hz: f32,
    /// Duration (seconds); `None` sustains until the matching stop cue
    pub duration_s: Option<f32>,
    /// Relative gain (0.0 - 1.0)
    pub gain: f32,
}

/// Four descending march-beat pitches
const MARCH_FREQS: [f32; 4] = [110.0, 98.0, 87.0, 82.0];

impl AudioCue {
    pub fn tone(self) -> Tone {
        let (waveform, freq_hz, end_freq_hz, duration_s, gain) = match self {
            AudioCue::Shoot => (Waveform::Square, 880.0, 220.0, Some(0.12), 0.3),
            AudioCue::AdversaryExplosion => (Waveform::Noise, 400.0, 60.0, Some(0.25), 0.5),
            AudioCue::PlayerDeath => (Waveform::Sawtooth, 300.0, 40.0, Some(0.8), 0.7),
            AudioCue::FlyerExplosion => (Waveform::Noise, 600.0, 80.0, Some(0.5), 0.6),
            AudioCue::FlyerSirenStart => (Waveform::Triangle, 700.0, 900.0, None, 0.25),
            AudioCue::FlyerSirenStop => (Waveform::Triangle, 700.0, 700.0, Some(0.0), 0.0),
            AudioCue::MarchBeat(n) => {
                let freq = MARCH_FREQS[n as usize % MARCH_FREQS.len()];
                (Waveform::Square, freq, freq, Some(0.1), 0.4)
            }
        };
        Tone {
            waveform,
            freq_hz,
            end_freq_hz,
            duration_s,
            gain,
        }
    }
}

#[derive(Debug, Error)]
pub enum AudioError {
    #[error("audio device unavailable: {0}")]
    Unavailable(String),
}

/// Playback collaborator
pub trait AudioSink {
    fn play(&mut self, cue: AudioCue, tone: Tone, volume: f32) -> Result<(), AudioError>;
}

/// Sink that only logs cues, for headless runs
#[derive(Debug, Default)]
pub struct LogSink;

impl AudioSink for LogSink {
    fn play(&mut self, cue: AudioCue, tone: Tone, volume: f32) -> Result<(), AudioError> {
        log::trace!("cue {cue:?} ({:?} {} Hz, vol {volume:.2})", tone.waveform, tone.freq_hz);
        Ok(())
    }
}

/// Audio manager for the game
pub struct AudioManager {
    sink: Option<Box<dyn AudioSink>>,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new(None)
    }
}

impl AudioManager {
    pub fn new(sink: Option<Box<dyn AudioSink>>) -> Self {
        if sink.is_none() {
            log::warn!("No audio sink - audio disabled");
        }
        Self {
            sink,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Get effective volume
    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Play a cue. Fire-and-forget: sink failures are logged, never returned.
    pub fn play(&mut self, cue: AudioCue) {
        let vol = self.effective_volume();
        // Stop cues must go through even when silent, or a siren could hang
        if vol <= 0.0 && cue != AudioCue::FlyerSirenStop {
            return;
        }
        let Some(sink) = self.sink.as_mut() else {
            return;
        };
        if let Err(err) = sink.play(cue, cue.tone(), vol) {
            log::warn!("Dropped audio cue {cue:?}: {err}");
        }
    }

    /// Play every cue drained from the simulation this tick
    pub fn play_all(&mut self, cues: impl IntoIterator<Item = AudioCue>) {
        for cue in cues {
            self.play(cue);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Recorder(Rc<RefCell<Vec<(AudioCue, f32)>>>);

    impl AudioSink for Recorder {
        fn play(&mut self, cue: AudioCue, _tone: Tone, volume: f32) -> Result<(), AudioError> {
            self.0.borrow_mut().push((cue, volume));
            Ok(())
        }
    }

    struct Broken;

    impl AudioSink for Broken {
        fn play(&mut self, _: AudioCue, _: Tone, _: f32) -> Result<(), AudioError> {
            Err(AudioError::Unavailable("unplugged".into()))
        }
    }

    #[test]
    fn test_volume_scales_and_mute_silences() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut audio = AudioManager::new(Some(Box::new(Recorder(log.clone()))));
        audio.set_master_volume(0.5);
        audio.set_sfx_volume(0.5);
        audio.play(AudioCue::Shoot);
        audio.set_muted(true);
        audio.play(AudioCue::Shoot);
        audio.play(AudioCue::FlyerSirenStop);

        let played = log.borrow();
        assert_eq!(played.len(), 2);
        assert_eq!(played[0], (AudioCue::Shoot, 0.25));
        assert_eq!(played[1].0, AudioCue::FlyerSirenStop);
    }

    #[test]
    fn test_failing_sink_is_swallowed() {
        let mut audio = AudioManager::new(Some(Box::new(Broken)));
        audio.play_all([AudioCue::Shoot, AudioCue::PlayerDeath]);
    }

    #[test]
    fn test_march_beats_descend() {
        let freqs: Vec<f32> = (0..4)
            .map(|n| AudioCue::MarchBeat(n).tone().freq_hz)
            .collect();
        assert!(freqs.windows(2).all(|w| w[0] > w[1]));
        assert_eq!(AudioCue::MarchBeat(4).tone(), AudioCue::MarchBeat(0).tone());
    }
}
