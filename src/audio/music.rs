use std::error::Error;
use std::path::Path;
use std::time::Duration;
use raylib::core::audio::{Music, RaylibAudio};
use tracing::debug;

use crate::audio::{Track, TrackSource};

/// Opens narration tracks as raylib music streams on the live audio device.
pub struct MusicSource<'aud> {
    audio: &'aud RaylibAudio,
}

impl<'aud> MusicSource<'aud> {
    pub fn new(audio: &'aud RaylibAudio) -> Self {
        Self { audio }
    }
}

impl<'aud> TrackSource for MusicSource<'aud> {
    type Track = MusicTrack<'aud>;

    fn open(&self, path: &Path) -> Result<MusicTrack<'aud>, Box<dyn Error>> {
        let file = path.to_str().ok_or("audio path is not valid UTF-8")?;
        let mut music = self.audio.new_music(file).map_err(|e| e.to_string())?;
        // Narration plays once; raylib stops the stream itself at the end
        music.looping = false;
        Ok(MusicTrack { music })
    }
}

pub struct MusicTrack<'aud> {
    music: Music<'aud>,
}

fn seconds(value: f32) -> Duration {
    Duration::try_from_secs_f32(value.max(0.0)).unwrap_or_default()
}

impl Track for MusicTrack<'_> {
    fn play(&mut self) {
        self.music.stop_stream();
        self.music.play_stream();
    }

    fn pause(&mut self) {
        self.music.pause_stream();
    }

    fn resume(&mut self) {
        // A stopped stream has to be restarted rather than resumed
        if self.music.get_time_played() <= 0.0 {
            self.music.play_stream();
        } else {
            self.music.resume_stream();
        }
    }

    fn stop(&mut self) {
        self.music.stop_stream();
    }

    fn is_playing(&self) -> bool {
        self.music.is_stream_playing()
    }

    fn update(&mut self) {
        if !self.music.is_stream_playing() {
            return;
        }
        self.music.update_stream();
        if !self.music.is_stream_playing() {
            debug!(length = self.music.get_time_length(), "Track finished.");
        }
    }

    fn position(&self) -> Duration {
        seconds(self.music.get_time_played())
    }

    fn duration(&self) -> Duration {
        seconds(self.music.get_time_length())
    }
}
