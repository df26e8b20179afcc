use std::cell::RefCell;
use std::collections::HashSet;
use std::error::Error;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::time::{Duration, Instant};
use tracing::{debug, info};

use crate::audio::{Track, TrackSource};

#[derive(Default)]
struct Counters {
    opened: usize,
    plays: usize,
    active: usize,
    max_active: usize,
    failing: HashSet<String>,
    finish_pending: bool,
}

/// A silent backend. Tracks keep time but never touch an audio device.
///
/// Used when audio is muted or no output device is available, and by tests
/// to observe how many tracks were opened and are playing.
#[derive(Clone, Default)]
pub struct MockSource {
    counters: Rc<RefCell<Counters>>,
}

impl MockSource {
    /// Makes `open` fail for files with this name.
    #[cfg(test)]
    pub fn fail_on(&self, file_name: &str) {
        self.counters.borrow_mut().failing.insert(file_name.to_string());
    }

    #[cfg(test)]
    pub fn opened(&self) -> usize {
        self.counters.borrow().opened
    }

    #[cfg(test)]
    pub fn plays(&self) -> usize {
        self.counters.borrow().plays
    }

    /// Makes the playing track reach its end on its next `update`.
    #[cfg(test)]
    pub fn finish_current(&self) {
        self.counters.borrow_mut().finish_pending = true;
    }

    /// Tracks currently playing.
    #[cfg(test)]
    pub fn active(&self) -> usize {
        self.counters.borrow().active
    }

    /// Highest number of tracks ever playing at once.
    #[cfg(test)]
    pub fn max_active(&self) -> usize {
        self.counters.borrow().max_active
    }
}

impl TrackSource for MockSource {
    type Track = MockTrack;

    fn open(&self, path: &Path) -> Result<MockTrack, Box<dyn Error>> {
        let name = path.file_name().and_then(|s| s.to_str()).unwrap_or_default();
        let mut counters = self.counters.borrow_mut();
        if counters.failing.contains(name) {
            return Err(format!("cannot decode {}", name).into());
        }
        counters.opened += 1;
        Ok(MockTrack {
            path: path.to_path_buf(),
            counters: self.counters.clone(),
            started: None,
            elapsed: Duration::ZERO,
        })
    }
}

pub struct MockTrack {
    path: PathBuf,
    counters: Rc<RefCell<Counters>>,
    started: Option<Instant>,
    elapsed: Duration,
}

impl MockTrack {
    fn set_playing(&mut self, playing: bool) {
        if playing == self.started.is_some() {
            return;
        }
        let mut counters = self.counters.borrow_mut();
        if playing {
            self.started = Some(Instant::now());
            counters.active += 1;
            counters.max_active = counters.max_active.max(counters.active);
        } else {
            if let Some(started) = self.started.take() {
                self.elapsed += started.elapsed();
            }
            counters.active -= 1;
        }
    }
}

impl Track for MockTrack {
    fn play(&mut self) {
        self.set_playing(false);
        self.elapsed = Duration::ZERO;
        self.counters.borrow_mut().plays += 1;
        info!(path = ?self.path, "Playing track (mock).");
        self.set_playing(true);
    }

    fn pause(&mut self) {
        self.set_playing(false);
    }

    fn resume(&mut self) {
        self.set_playing(true);
    }

    fn stop(&mut self) {
        self.set_playing(false);
        self.elapsed = Duration::ZERO;
    }

    fn is_playing(&self) -> bool {
        self.started.is_some()
    }

    /// Ends like a non-looping stream: stopped and rewound to 0.
    fn update(&mut self) {
        if self.started.is_none() {
            return;
        }
        let finished = std::mem::take(&mut self.counters.borrow_mut().finish_pending);
        if finished {
            self.stop();
            debug!(path = ?self.path, "Track finished (mock).");
        }
    }

    fn position(&self) -> Duration {
        self.elapsed + self.started.map(|s| s.elapsed()).unwrap_or_default()
    }

    /// Silent tracks have no known length.
    fn duration(&self) -> Duration {
        Duration::ZERO
    }
}

impl Drop for MockTrack {
    fn drop(&mut self) {
        self.set_playing(false);
    }
}
