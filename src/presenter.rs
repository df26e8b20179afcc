use std::time::Duration;
use tracing::{debug, info, warn};

use crate::audio::{AudioPlaybackController, TrackSource};
use crate::catalog::SlideCatalog;
use crate::tracker::PageTracker;

/// Formats whole seconds as `MM:SS`, e.g. 65 seconds is `01:05`.
pub fn format_time(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// Keeps the visible slide, its narration and the indicator label in step.
pub struct SlideshowPresenter<S: TrackSource> {
    catalog: SlideCatalog,
    tracker: PageTracker,
    audio: AudioPlaybackController<S>,
    label: String,
    appeared: bool,
}

impl<S: TrackSource> SlideshowPresenter<S> {
    pub fn new(catalog: SlideCatalog, audio: AudioPlaybackController<S>) -> Self {
        let label = catalog.label(0);
        Self {
            catalog,
            tracker: PageTracker::new(),
            audio,
            label,
            appeared: false,
        }
    }

    pub fn catalog(&self) -> &SlideCatalog {
        &self.catalog
    }

    pub fn current_index(&self) -> usize {
        self.tracker.current()
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_playing(&self) -> bool {
        self.audio.is_playing()
    }

    /// Starts the first slide's narration. Only the first call does anything.
    pub fn appear(&mut self) {
        if self.appeared {
            return;
        }
        self.appeared = true;
        self.label = self.catalog.label(self.current_index());
        self.play_current_slide();
    }

    /// Handles a settle event at `new_index`. Returns true when the visible
    /// slide changed.
    pub fn on_page_settled(&mut self, new_index: usize) -> bool {
        let count = self.catalog.count();
        if new_index == self.tracker.current() {
            return false;
        }
        if !self.tracker.set_current(new_index, count) {
            warn!(index = new_index, count, "Ignoring settle event outside the catalog.");
            return false;
        }
        info!(slide = new_index, "Slide changed.");
        self.play_current_slide();
        self.label = self.catalog.label(new_index);
        true
    }

    /// Handles a settle event given as the paging surface's resting offset.
    pub fn on_scroll_settled(&mut self, viewport_width: f32, content_offset_x: f32) -> bool {
        match self.tracker.settle(viewport_width, content_offset_x, self.catalog.count()) {
            Some(page) => self.on_page_settled(page),
            None => {
                debug!(viewport_width, content_offset_x, "Settled outside any page, ignored.");
                false
            }
        }
    }

    pub fn play_pressed(&mut self) {
        if self.audio.is_loaded() {
            self.audio.resume();
        } else {
            self.play_current_slide();
        }
    }

    pub fn pause_pressed(&mut self) {
        self.audio.pause();
    }

    pub fn stop_pressed(&mut self) {
        self.audio.stop();
    }

    pub fn toggle_playback(&mut self) {
        if self.audio.is_playing() {
            self.pause_pressed();
        } else {
            self.play_pressed();
        }
    }

    pub fn update(&mut self) {
        self.audio.update();
    }

    /// Elapsed and total time of the loaded track, e.g. `00:12 / 01:30`.
    pub fn playback_status(&self) -> Option<String> {
        self.audio.progress().map(|(position, duration)| {
            if duration == Duration::ZERO {
                format_time(position.as_secs())
            } else {
                format!("{} / {}", format_time(position.as_secs()), format_time(duration.as_secs()))
            }
        })
    }

    // Drops whatever is playing and starts the current slide's narration, if any
    fn play_current_slide(&mut self) {
        self.audio.release();
        let index = self.tracker.current();
        let record = match self.catalog.record_at(index) {
            Ok(record) => record,
            Err(e) => {
                warn!(err = %e, "No slide to play.");
                return;
            }
        };
        let Some(audio_id) = record.audio_id.as_deref() else {
            debug!(slide = index, "Slide has no narration.");
            return;
        };
        match self.audio.load(audio_id) {
            Ok(track) => self.audio.play(track),
            Err(e) => warn!(slide = index, err = %e, "Narration unavailable, slide stays silent."),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::mock::MockSource;
    use crate::catalog::SlideRecord;
    use crate::resources::ResourceBundle;
    use std::fs::File;

    struct Fixture {
        _dir: tempfile::TempDir,
        source: MockSource,
        presenter: SlideshowPresenter<MockSource>,
    }

    fn fixture(records: Vec<SlideRecord>, audio_files: &[&str]) -> Fixture {
        let _ = tracing_subscriber::fmt::try_init();
        let dir = tempfile::tempdir().unwrap();
        for name in audio_files {
            File::create(dir.path().join(name)).unwrap();
        }
        let source = MockSource::default();
        let audio = AudioPlaybackController::new(ResourceBundle::new(dir.path(), "mp3"), source.clone());
        let presenter = SlideshowPresenter::new(SlideCatalog::new(records), audio);
        Fixture { _dir: dir, source, presenter }
    }

    fn three_slides() -> Fixture {
        fixture(
            vec![
                SlideRecord::new("img1", Some("a1")),
                SlideRecord::new("img2", None),
                SlideRecord::new("img3", Some("a3")),
            ],
            &["a1.mp3", "a3.mp3"],
        )
    }

    #[test]
    fn time_formatting() {
        assert_eq!(format_time(0), "00:00");
        assert_eq!(format_time(65), "01:05");
        assert_eq!(format_time(3600), "60:00");
    }

    #[test]
    fn appear_plays_first_slide_once() {
        let mut f = three_slides();
        assert_eq!(f.presenter.label(), "Slide 1 of 3");
        f.presenter.appear();
        f.presenter.appear();
        assert_eq!(f.source.opened(), 1);
        assert_eq!(f.source.plays(), 1);
        assert!(f.presenter.is_playing());
    }

    #[test]
    fn slide_without_audio_is_silent() {
        let mut f = three_slides();
        f.presenter.appear();
        assert!(f.presenter.on_page_settled(1));
        assert_eq!(f.source.opened(), 1);
        assert_eq!(f.source.active(), 0);
        assert!(!f.presenter.is_playing());
        assert_eq!(f.presenter.label(), "Slide 2 of 3");
    }

    #[test]
    fn changing_slide_switches_track() {
        let mut f = three_slides();
        f.presenter.appear();
        assert!(f.presenter.on_page_settled(2));
        assert_eq!(f.source.opened(), 2);
        assert_eq!(f.source.active(), 1);
        assert_eq!(f.source.max_active(), 1);
        assert_eq!(f.presenter.label(), "Slide 3 of 3");
    }

    #[test]
    fn repeated_settle_is_idempotent() {
        let mut f = three_slides();
        f.presenter.appear();
        assert!(f.presenter.on_page_settled(2));
        assert!(!f.presenter.on_page_settled(2));
        assert_eq!(f.source.opened(), 2);
        assert_eq!(f.source.plays(), 2);

        // Same through the scroll path
        assert!(!f.presenter.on_scroll_settled(100.0, 200.0));
        assert_eq!(f.source.plays(), 2);
    }

    #[test]
    fn out_of_range_index_is_rejected() {
        let mut f = three_slides();
        f.presenter.appear();
        assert!(!f.presenter.on_page_settled(5));
        assert_eq!(f.presenter.current_index(), 0);
        assert_eq!(f.presenter.label(), "Slide 1 of 3");
        assert_eq!(f.source.plays(), 1);
        assert!(f.presenter.is_playing());
    }

    #[test]
    fn scroll_overshoot_is_ignored() {
        let mut f = three_slides();
        f.presenter.appear();
        assert!(!f.presenter.on_scroll_settled(100.0, 260.0));
        assert!(!f.presenter.on_scroll_settled(100.0, -60.0));
        assert!(f.presenter.on_scroll_settled(100.0, 98.0));
        assert_eq!(f.presenter.current_index(), 1);
    }

    #[test]
    fn missing_audio_keeps_slide_silent() {
        let mut f = fixture(
            vec![SlideRecord::new("img1", Some("a1")), SlideRecord::new("img2", Some("gone"))],
            &["a1.mp3"],
        );
        f.presenter.appear();
        assert!(f.presenter.on_page_settled(1));
        assert_eq!(f.presenter.label(), "Slide 2 of 2");
        assert!(!f.presenter.is_playing());
        assert_eq!(f.source.active(), 0);
        assert_eq!(f.presenter.playback_status(), None);
    }

    #[test]
    fn undecodable_audio_keeps_slide_silent() {
        let mut f = fixture(vec![SlideRecord::new("img1", Some("bad"))], &["bad.mp3"]);
        f.source.fail_on("bad.mp3");
        f.presenter.appear();
        assert!(!f.presenter.is_playing());
        assert_eq!(f.source.opened(), 0);
    }

    #[test]
    fn play_on_silent_slide_does_nothing() {
        let mut f = three_slides();
        f.presenter.appear();
        f.presenter.on_page_settled(1);
        f.presenter.on_page_settled(2);
        assert_eq!(f.source.opened(), 2);

        // Nothing loaded for a silent slide
        f.presenter.on_page_settled(1);
        f.presenter.play_pressed();
        assert!(!f.presenter.is_playing());

        f.presenter.on_page_settled(0);
        f.presenter.stop_pressed();
        f.presenter.pause_pressed();
        assert_eq!(f.source.opened(), 3);
        assert!(!f.presenter.is_playing());
    }

    #[test]
    fn finished_track_stays_finished_until_play() {
        let mut f = three_slides();
        f.presenter.appear();
        f.source.finish_current();
        f.presenter.update();
        assert!(!f.presenter.is_playing());
        assert_eq!(f.source.active(), 0);

        // Nothing starts over on its own
        for _ in 0..5 {
            f.presenter.update();
        }
        assert!(!f.presenter.is_playing());
        assert_eq!(f.presenter.playback_status().as_deref(), Some("00:00"));

        // Play restarts the same track from the beginning
        f.presenter.play_pressed();
        assert!(f.presenter.is_playing());
        assert_eq!(f.source.opened(), 1);
        assert_eq!(f.source.plays(), 1);
        assert_eq!(f.presenter.playback_status().as_deref(), Some("00:00"));
    }

    #[test]
    fn play_resumes_loaded_track() {
        let mut f = three_slides();
        f.presenter.appear();
        f.presenter.pause_pressed();
        assert!(!f.presenter.is_playing());
        f.presenter.play_pressed();
        assert!(f.presenter.is_playing());
        f.presenter.stop_pressed();
        f.presenter.play_pressed();
        assert!(f.presenter.is_playing());
        assert_eq!(f.source.opened(), 1);
        assert_eq!(f.presenter.playback_status().as_deref(), Some("00:00"));
    }

    #[test]
    fn play_pressed_before_any_track_loads_one() {
        let mut f = fixture(vec![SlideRecord::new("img1", Some("a1"))], &[]);
        f.presenter.appear();
        assert_eq!(f.source.opened(), 0);

        File::create(f._dir.path().join("a1.mp3")).unwrap();
        f.presenter.play_pressed();
        assert_eq!(f.source.opened(), 1);
        assert!(f.presenter.is_playing());
    }

    #[test]
    fn toggle_switches_between_play_and_pause() {
        let mut f = three_slides();
        f.presenter.appear();
        f.presenter.toggle_playback();
        assert!(!f.presenter.is_playing());
        f.presenter.toggle_playback();
        assert!(f.presenter.is_playing());
    }

    #[test]
    fn at_most_one_track_plays() {
        let mut f = three_slides();
        f.presenter.appear();
        for index in [2, 0, 1, 2, 2, 0, 5, 1, 0] {
            f.presenter.on_page_settled(index);
            f.presenter.play_pressed();
            assert!(f.source.active() <= 1);
        }
        assert_eq!(f.source.max_active(), 1);
    }
}
