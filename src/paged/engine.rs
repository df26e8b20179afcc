use raylib::prelude::*;
use tracing::{info, warn};

use crate::audio::TrackSource;
use crate::constants::*;
use crate::pager::Pager;
use crate::paged::controls::{Control, ControlBar};
use crate::presenter::SlideshowPresenter;
use crate::resources::{load_texture_with_exif_rotation, ResourceBundle};
use crate::slide::Slide;
use crate::state::PagerState;

#[derive(Debug, PartialEq, Clone, Copy)]
enum Drag {
    Page,  // Dragging moves between slides
    Image, // Dragging pans the zoomed image
}

/// Horizontally paged slideshow with a control bar on top.
pub struct PagedEngine<S: TrackSource> {
    presenter: SlideshowPresenter<S>,
    bundle: ResourceBundle,
    slides: Vec<Slide>,
    pager: Pager,
    drag: Option<Drag>,
}

impl<S: TrackSource> PagedEngine<S> {
    pub fn new(presenter: SlideshowPresenter<S>, bundle: ResourceBundle) -> Self {
        let count = presenter.catalog().count();
        Self {
            presenter,
            bundle,
            slides: (0..count).map(|_| Slide::new()).collect(),
            pager: Pager::new(WINDOW_WIDTH as f32, count),
            drag: None,
        }
    }

    fn viewport(screen_width: f32, screen_height: f32) -> Rectangle {
        Rectangle::new(0.0, CONTROL_BAR_HEIGHT, screen_width, (screen_height - CONTROL_BAR_HEIGHT).max(1.0))
    }

    fn cell(&self, index: usize, viewport: Rectangle) -> Rectangle {
        Rectangle::new(
            viewport.x + index as f32 * viewport.width - self.pager.offset(),
            viewport.y,
            viewport.width,
            viewport.height,
        )
    }

    fn press(&mut self, control: Control) {
        match control {
            Control::Play => self.presenter.play_pressed(),
            Control::Pause => self.presenter.pause_pressed(),
            Control::Stop => self.presenter.stop_pressed(),
        }
    }

    fn handle_pointer(&mut self, rl: &RaylibHandle, dt: f32, viewport: Rectangle) {
        let mouse = rl.get_mouse_position();
        let current = self.presenter.current_index();
        let cell = self.cell(current, viewport);

        if rl.is_mouse_button_pressed(MouseButton::MOUSE_BUTTON_LEFT) {
            if let Some(control) = ControlBar::hit(mouse) {
                self.press(control);
            } else if !ControlBar::contains(mouse, viewport.width) && viewport.check_collision_point_rec(mouse) {
                let zoomed = self.pager.state() == PagerState::Idle && self.slides[current].is_zoomed();
                self.drag = if zoomed {
                    Some(Drag::Image)
                } else {
                    self.pager.begin_drag();
                    Some(Drag::Page)
                };
            }
        }

        if rl.is_mouse_button_down(MouseButton::MOUSE_BUTTON_LEFT) {
            let delta = rl.get_mouse_delta();
            match self.drag {
                Some(Drag::Page) => self.pager.drag_by(delta.x, dt),
                Some(Drag::Image) => self.slides[current].pan_by(delta, cell),
                None => {}
            }
        }

        if rl.is_mouse_button_released(MouseButton::MOUSE_BUTTON_LEFT) {
            if self.drag.take() == Some(Drag::Page) {
                self.pager.end_drag();
            }
        }

        // Only the resting slide zooms
        let wheel = rl.get_mouse_wheel_move();
        if wheel != 0.0 && self.pager.state() == PagerState::Idle && cell.check_collision_point_rec(mouse) {
            self.slides[current].zoom_at(WHEEL_ZOOM_STEP.powf(wheel), mouse, cell);
        }
    }

    fn handle_keys(&mut self, rl: &RaylibHandle, viewport: Rectangle) {
        let current = self.presenter.current_index();
        let cell = self.cell(current, viewport);
        let centre = Vector2::new(cell.x + cell.width / 2.0, cell.y + cell.height / 2.0);

        // Arrow keys step from where the pager is heading, so repeated
        // presses during a settle add up
        let page = self.pager.target_page();
        if rl.is_key_pressed(KeyboardKey::KEY_RIGHT) && self.drag.is_none() {
            self.pager.scroll_to_page(page + 1);
        }
        if rl.is_key_pressed(KeyboardKey::KEY_LEFT) && self.drag.is_none() {
            self.pager.scroll_to_page(page.saturating_sub(1));
        }
        if rl.is_key_pressed(KeyboardKey::KEY_SPACE) {
            self.presenter.toggle_playback();
        }
        if rl.is_key_pressed(KeyboardKey::KEY_S) {
            self.press(Control::Stop);
        }
        if rl.is_key_pressed(KeyboardKey::KEY_EQUAL) || rl.is_key_pressed(KeyboardKey::KEY_KP_ADD) {
            self.slides[current].zoom_at(2.0, centre, cell);
        }
        if rl.is_key_pressed(KeyboardKey::KEY_MINUS) || rl.is_key_pressed(KeyboardKey::KEY_KP_SUBTRACT) {
            self.slides[current].zoom_at(0.5, centre, cell);
        }
        if rl.is_key_pressed(KeyboardKey::KEY_R) {
            self.slides[current].reset_zoom();
        }
    }
}

impl<S: TrackSource> crate::engine::Engine for PagedEngine<S> {
    fn initialize(&mut self, rl: &mut RaylibHandle, thread: &RaylibThread) -> bool {
        for (record, slide) in self.presenter.catalog().iter().zip(self.slides.iter_mut()) {
            let texture = self.bundle
                .resolve_image(&record.image_id)
                .and_then(|path| load_texture_with_exif_rotation(rl, thread, &path));
            match texture {
                Ok(texture) => slide.set_image(Some(texture)),
                Err(e) => {
                    warn!(image = %record.image_id, err = %e, "Showing placeholder.");
                    slide.set_image(None);
                }
            }
        }
        let loaded = self.slides.iter().filter(|slide| slide.has_image()).count();
        info!(slides = self.slides.len(), loaded, "Slideshow ready.");

        self.pager.resize(rl.get_screen_width() as f32);
        !self.slides.is_empty()
    }

    fn render_frame(&mut self, dt: f32, rl: &mut RaylibHandle, thread: &RaylibThread) -> bool {
        self.presenter.appear();

        let screen_width = rl.get_screen_width() as f32;
        let screen_height = rl.get_screen_height() as f32;
        let viewport = Self::viewport(screen_width, screen_height);
        self.pager.resize(viewport.width);

        self.handle_pointer(rl, dt, viewport);
        self.handle_keys(rl, viewport);

        if let Some(offset) = self.pager.update(dt) {
            if self.presenter.on_scroll_settled(self.pager.page_width(), offset) {
                let current = self.presenter.current_index();
                for (i, slide) in self.slides.iter_mut().enumerate() {
                    if i != current {
                        slide.reset_zoom();
                    }
                }
            }
        }
        self.presenter.update();

        let mouse = rl.get_mouse_position();
        let mut d = rl.begin_drawing(thread);
        d.clear_background(Color::WHITE);

        for (i, slide) in self.slides.iter().enumerate() {
            let cell = self.cell(i, viewport);
            // Skip cells entirely off screen
            if cell.x + cell.width <= 0.0 || cell.x >= screen_width {
                continue;
            }
            slide.draw(&mut d, cell);
        }

        let zoom = self.slides[self.presenter.current_index()].zoom_scale();
        let status = match (self.presenter.playback_status(), zoom > MIN_ZOOM) {
            (Some(time), true) => Some(format!("{:.1}x  {}", zoom, time)),
            (None, true) => Some(format!("{:.1}x", zoom)),
            (time, false) => time,
        };
        ControlBar::draw(
            &mut d,
            screen_width,
            self.presenter.label(),
            status.as_deref(),
            self.presenter.is_playing(),
            mouse,
        );

        true
    }
}
