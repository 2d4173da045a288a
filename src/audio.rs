//! Sound playback boundary
//!
//! The simulation never plays audio itself. It queues `SoundCue`s, the host
//! drains them after each tick and hands them to an `AudioManager`, which
//! swallows backend failures so a broken sound device never stalls a tick.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoundCue {
    /// Coin collected
    Collect,
    /// Lives ran out
    GameOver,
}

/// Backend failure
#[derive(Debug, Error)]
pub enum AudioError {
    #[error("Audio device unavailable: {0}")]
    Unavailable(String),

    #[error("Playback failed: {0}")]
    Playback(String),
}

/// A playback backend
pub trait SoundSink {
    /// Fire a one-shot effect at the given volume (0.0 - 1.0)
    fn play(&mut self, cue: SoundCue, volume: f32) -> Result<(), AudioError>;

    /// Start or stop the looping background track
    fn set_music(&mut self, playing: bool, volume: f32) -> Result<(), AudioError>;

    /// Free every handle held by the backend
    fn release(&mut self);
}

/// Discards everything
#[derive(Debug, Default)]
pub struct NullSink;

impl SoundSink for NullSink {
    fn play(&mut self, _cue: SoundCue, _volume: f32) -> Result<(), AudioError> {
        Ok(())
    }

    fn set_music(&mut self, _playing: bool, _volume: f32) -> Result<(), AudioError> {
        Ok(())
    }

    fn release(&mut self) {}
}

/// Logs cues instead of playing them (headless runs)
#[derive(Debug, Default)]
pub struct LogSink;

impl SoundSink for LogSink {
    fn play(&mut self, cue: SoundCue, volume: f32) -> Result<(), AudioError> {
        log::debug!("sound {:?} at volume {:.2}", cue, volume);
        Ok(())
    }

    fn set_music(&mut self, playing: bool, volume: f32) -> Result<(), AudioError> {
        log::debug!("music playing={} volume={:.2}", playing, volume);
        Ok(())
    }

    fn release(&mut self) {
        log::debug!("audio released");
    }
}

/// Audio manager for the game
pub struct AudioManager {
    sink: Box<dyn SoundSink>,
    master_volume: f32,
    sfx_volume: f32,
    music_volume: f32,
    muted: bool,
    music_playing: bool,
    released: bool,
    /// Failures swallowed so far
    failures: u32,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new(Box::new(NullSink))
    }
}

impl AudioManager {
    pub fn new(sink: Box<dyn SoundSink>) -> Self {
        Self {
            sink,
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            muted: false,
            music_playing: false,
            released: false,
            failures: 0,
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

    /// Set music volume (0.0 - 1.0)
    pub fn set_music_volume(&mut self, vol: f32) {
        self.music_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn failures(&self) -> u32 {
        self.failures
    }

    pub fn music_playing(&self) -> bool {
        self.music_playing
    }

    fn effective_volume(&self, channel: f32) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * channel
        }
    }

    /// Play a sound effect. Errors are logged, never returned.
    pub fn play(&mut self, cue: SoundCue) {
        let vol = self.effective_volume(self.sfx_volume);
        if vol <= 0.0 {
            return;
        }
        if let Err(e) = self.sink.play(cue, vol) {
            self.failures += 1;
            log::warn!("Failed to play {:?}: {}", cue, e);
        }
    }

    /// Play every cue drained from the simulation
    pub fn play_all(&mut self, cues: impl IntoIterator<Item = SoundCue>) {
        for cue in cues {
            self.play(cue);
        }
    }

    /// Start the background track (session start)
    pub fn start_music(&mut self) {
        if self.music_playing {
            return;
        }
        self.released = false;
        let vol = self.effective_volume(self.music_volume);
        match self.sink.set_music(true, vol) {
            Ok(()) => self.music_playing = true,
            Err(e) => {
                self.failures += 1;
                log::warn!("Failed to start music: {}", e);
            }
        }
    }

    /// Stop music and free backend handles (session end)
    pub fn release(&mut self) {
        if self.released {
            return;
        }
        if self.music_playing {
            if let Err(e) = self.sink.set_music(false, 0.0) {
                log::warn!("Failed to stop music: {}", e);
            }
            self.music_playing = false;
        }
        self.sink.release();
        self.released = true;
    }
}

impl Drop for AudioManager {
    fn drop(&mut self) {
        self.release();
    }
}
