use std::error::Error;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

use crate::error::SlideshowError;
use crate::resources::ResourceBundle;

pub mod mock;
pub mod music;

/// A loaded, playable unit of audio.
pub trait Track {
    /// Starts playback from position 0.
    fn play(&mut self);

    /// Suspends playback, keeping the current position.
    fn pause(&mut self);

    /// Continues a paused or stopped track from its current position.
    fn resume(&mut self);

    /// Halts playback and rewinds to position 0.
    fn stop(&mut self);

    fn is_playing(&self) -> bool;

    /// Called once per frame. Streams refill their buffers here and stop
    /// themselves when they reach the end.
    fn update(&mut self) {}

    fn position(&self) -> Duration;

    fn duration(&self) -> Duration;
}

/// Opens tracks from files on disk.
pub trait TrackSource {
    type Track: Track;

    fn open(&self, path: &Path) -> Result<Self::Track, Box<dyn Error>>;
}

/// Owns the single live playback handle.
///
/// Every call happens on the render loop thread, so the "at most one track"
/// rule is kept by stopping the held track before a new one takes its place.
pub struct AudioPlaybackController<S: TrackSource> {
    bundle: ResourceBundle,
    source: S,
    current: Option<S::Track>,
}

impl<S: TrackSource> AudioPlaybackController<S> {
    pub fn new(bundle: ResourceBundle, source: S) -> Self {
        Self { bundle, source, current: None }
    }

    /// Resolves `audio_id` in the bundle and opens it with the backend.
    pub fn load(&self, audio_id: &str) -> Result<S::Track, SlideshowError> {
        let path = self.bundle.resolve_audio(audio_id)?;
        let track = self.source.open(&path).map_err(|e| SlideshowError::PlaybackInit {
            id: audio_id.to_string(),
            reason: e.to_string(),
        })?;
        debug!(id = audio_id, path = ?path, "Loaded audio track.");
        Ok(track)
    }

    /// Plays `track` from the start, stopping whatever was held before.
    pub fn play(&mut self, mut track: S::Track) {
        self.release();
        track.play();
        info!(duration = ?track.duration(), "Playing track.");
        self.current = Some(track);
    }

    pub fn pause(&mut self) {
        if let Some(track) = self.current.as_mut() {
            track.pause();
        }
    }

    pub fn resume(&mut self) {
        if let Some(track) = self.current.as_mut() {
            if !track.is_playing() {
                track.resume();
            }
        }
    }

    pub fn stop(&mut self) {
        if let Some(track) = self.current.as_mut() {
            track.stop();
        }
    }

    /// Stops and drops the held track.
    pub fn release(&mut self) {
        if let Some(mut track) = self.current.take() {
            track.stop();
        }
    }

    pub fn is_playing(&self) -> bool {
        self.current.as_ref().is_some_and(|track| track.is_playing())
    }

    pub fn is_loaded(&self) -> bool {
        self.current.is_some()
    }

    pub fn update(&mut self) {
        if let Some(track) = self.current.as_mut() {
            track.update();
        }
    }

    /// Position and length of the held track.
    pub fn progress(&self) -> Option<(Duration, Duration)> {
        self.current.as_ref().map(|track| (track.position(), track.duration()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::mock::MockSource;
    use crate::error::ResourceKind;
    use std::fs::File;

    fn controller(files: &[&str]) -> (tempfile::TempDir, MockSource, AudioPlaybackController<MockSource>) {
        let dir = tempfile::tempdir().unwrap();
        for name in files {
            File::create(dir.path().join(name)).unwrap();
        }
        let source = MockSource::default();
        let controller = AudioPlaybackController::new(ResourceBundle::new(dir.path(), "mp3"), source.clone());
        (dir, source, controller)
    }

    #[test]
    fn missing_resource_is_not_found() {
        let (_dir, source, controller) = controller(&[]);
        assert!(matches!(
            controller.load("nope"),
            Err(SlideshowError::ResourceNotFound { kind: ResourceKind::Audio, .. })
        ));
        assert_eq!(source.opened(), 0);
    }

    #[test]
    fn backend_failure_is_playback_init() {
        let (_dir, source, controller) = controller(&["broken.mp3"]);
        source.fail_on("broken.mp3");
        assert!(matches!(controller.load("broken"), Err(SlideshowError::PlaybackInit { .. })));
    }

    #[test]
    fn play_replaces_the_previous_track() {
        let (_dir, source, mut controller) = controller(&["a.mp3", "b.mp3"]);
        let a = controller.load("a").unwrap();
        controller.play(a);
        assert!(controller.is_playing());
        let b = controller.load("b").unwrap();
        controller.play(b);
        assert!(controller.is_playing());
        assert_eq!(source.active(), 1);
        assert_eq!(source.plays(), 2);
    }

    #[test]
    fn update_ends_track_once() {
        let (_dir, source, mut controller) = controller(&["a.mp3"]);
        let a = controller.load("a").unwrap();
        controller.play(a);
        controller.update();
        assert!(controller.is_playing());

        source.finish_current();
        controller.update();
        assert!(!controller.is_playing());
        assert!(controller.is_loaded());
        assert_eq!(controller.progress().map(|(pos, _)| pos), Some(Duration::ZERO));

        controller.update();
        assert!(!controller.is_playing());
        assert_eq!(source.active(), 0);
    }

    #[test]
    fn pause_stop_resume() {
        let (_dir, source, mut controller) = controller(&["a.mp3"]);

        // Nothing loaded: all no-ops
        controller.pause();
        controller.stop();
        controller.resume();
        assert!(!controller.is_loaded());

        let a = controller.load("a").unwrap();
        controller.play(a);
        controller.pause();
        assert!(!controller.is_playing());
        assert_eq!(source.active(), 0);

        controller.resume();
        assert!(controller.is_playing());

        controller.stop();
        assert!(!controller.is_playing());
        assert!(controller.is_loaded());
        assert_eq!(controller.progress().map(|(pos, _)| pos), Some(Duration::ZERO));

        controller.release();
        assert!(!controller.is_loaded());
        assert_eq!(source.active(), 0);
    }
}
