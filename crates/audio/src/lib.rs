//! Backing track playback owned by the game lifecycle.

use common::{GameError, GameResult, Millis};
use serde::Deserialize;

/// Playback settings for the backing track.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    /// Length of the backing track.
    pub track_length_ms: Millis,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            track_length_ms: 180_000,
        }
    }
}

/// Lifecycle of an [`AudioManager`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AudioLifecycle {
    /// Built but not yet bound to an output.
    Created,
    /// Ready to play.
    Attached,
    /// Released; every playback call fails.
    Disposed,
}

impl AudioLifecycle {
    fn name(self) -> &'static str {
        match self {
            AudioLifecycle::Created => "not attached",
            AudioLifecycle::Attached => "attached",
            AudioLifecycle::Disposed => "disposed",
        }
    }
}

/// Notifications produced while the track advances.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrackEvent {
    /// Playback reached the end of the track.
    Ended,
}

/// Audio manager tracking the backing track position.
#[derive(Debug)]
pub struct AudioManager {
    lifecycle: AudioLifecycle,
    length: Millis,
    position: Millis,
    playing: bool,
}

impl AudioManager {
    /// Creates a new manager in the [`AudioLifecycle::Created`] state.
    pub fn new(config: AudioConfig) -> Self {
        Self {
            lifecycle: AudioLifecycle::Created,
            length: config.track_length_ms,
            position: 0,
            playing: false,
        }
    }

    /// Binds the manager to its output.
    pub fn attach(&mut self) -> GameResult<()> {
        match self.lifecycle {
            AudioLifecycle::Created => {
                self.lifecycle = AudioLifecycle::Attached;
                tracing::debug!("audio attached");
                Ok(())
            }
            AudioLifecycle::Attached => Ok(()),
            AudioLifecycle::Disposed => Err(GameError::AudioUnavailable(self.lifecycle.name())),
        }
    }

    /// Stops playback and releases the manager for good.
    pub fn dispose(&mut self) {
        self.playing = false;
        self.position = 0;
        self.lifecycle = AudioLifecycle::Disposed;
        tracing::debug!("audio disposed");
    }

    pub fn lifecycle(&self) -> AudioLifecycle {
        self.lifecycle
    }

    fn ensure_attached(&self) -> GameResult<()> {
        if self.lifecycle == AudioLifecycle::Attached {
            Ok(())
        } else {
            Err(GameError::AudioUnavailable(self.lifecycle.name()))
        }
    }

    /// Returns `true` while the backing track is audible.
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Playback position within the track.
    pub fn position(&self) -> Millis {
        self.position
    }

    /// Time left until the track ends, or `None` while it is not playing.
    pub fn remaining(&self) -> Option<Millis> {
        if self.playing && self.lifecycle == AudioLifecycle::Attached {
            Some(self.length.saturating_sub(self.position))
        } else {
            None
        }
    }

    /// Resumes the track from its current position.
    pub fn play(&mut self) -> GameResult<()> {
        self.ensure_attached()?;
        self.playing = true;
        Ok(())
    }

    /// Pauses the track, keeping its position.
    pub fn pause(&mut self) -> GameResult<()> {
        self.ensure_attached()?;
        self.playing = false;
        Ok(())
    }

    /// Rewinds to the start and plays.
    pub fn restart(&mut self) -> GameResult<()> {
        self.ensure_attached()?;
        self.position = 0;
        self.playing = true;
        Ok(())
    }

    /// Advances playback by `elapsed` milliseconds.
    ///
    /// Reports [`TrackEvent::Ended`] once when the end is reached; the track
    /// then stays stopped at its end until restarted.
    pub fn advance(&mut self, elapsed: Millis) -> Option<TrackEvent> {
        if !self.playing || self.lifecycle != AudioLifecycle::Attached {
            return None;
        }
        self.position = (self.position + elapsed).min(self.length);
        if self.position >= self.length {
            self.playing = false;
            tracing::info!("backing track ended");
            return Some(TrackEvent::Ended);
        }
        None
    }
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new(AudioConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attached(length: Millis) -> AudioManager {
        let mut m = AudioManager::new(AudioConfig {
            track_length_ms: length,
        });
        m.attach().unwrap();
        m
    }

    #[test]
    fn remaining_only_while_playing() {
        let mut m = attached(1_000);
        assert_eq!(m.remaining(), None);
        m.play().unwrap();
        m.advance(300);
        assert_eq!(m.remaining(), Some(700));
        m.pause().unwrap();
        assert_eq!(m.remaining(), None);
        m.play().unwrap();
        m.dispose();
        assert_eq!(m.remaining(), None);
    }

    #[test]
    fn play_requires_attach() {
        let mut m = AudioManager::default();
        assert!(matches!(m.play(), Err(GameError::AudioUnavailable(_))));
        m.attach().unwrap();
        assert!(m.play().is_ok());
        assert!(m.is_playing());
    }

    #[test]
    fn disposed_manager_rejects_everything() {
        let mut m = attached(1_000);
        m.play().unwrap();
        m.dispose();
        assert!(!m.is_playing());
        assert!(m.play().is_err());
        assert!(m.restart().is_err());
        assert!(m.attach().is_err());
        assert_eq!(m.advance(5_000), None);
    }

    #[test]
    fn track_ends_once() {
        let mut m = attached(1_000);
        m.play().unwrap();
        assert_eq!(m.advance(999), None);
        assert_eq!(m.advance(1), Some(TrackEvent::Ended));
        assert!(!m.is_playing());
        assert_eq!(m.advance(1_000), None);
    }

    #[test]
    fn paused_track_does_not_advance() {
        let mut m = attached(1_000);
        m.play().unwrap();
        m.advance(400);
        m.pause().unwrap();
        m.advance(5_000);
        assert_eq!(m.position(), 400);
    }

    #[test]
    fn restart_rewinds() {
        let mut m = attached(1_000);
        m.play().unwrap();
        m.advance(1_000);
        m.restart().unwrap();
        assert_eq!(m.position(), 0);
        assert!(m.is_playing());
    }
}
