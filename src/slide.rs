use raylib::prelude::*;
use raylib::core::text::measure_text;
use crate::zoom::{fit_size, ZoomState};

const PLACEHOLDER_TEXT: &str = "image unavailable";
const PLACEHOLDER_FONT_SIZE: i32 = 20;

/// A zoomable image cell. One per slide.
pub struct Slide {
    image: Option<Texture2D>,
    zoom: ZoomState,
}

impl Slide {
    pub fn new() -> Self {
        Self { image: None, zoom: ZoomState::default() }
    }

    /// Assigns the displayed image. `None` shows a placeholder.
    pub fn set_image(&mut self, image: Option<Texture2D>) {
        self.image = image;
        self.zoom.reset();
    }

    pub fn has_image(&self) -> bool {
        self.image.is_some()
    }

    pub fn is_zoomed(&self) -> bool {
        self.zoom.is_zoomed()
    }

    pub fn zoom_scale(&self) -> f32 {
        self.zoom.scale()
    }

    pub fn reset_zoom(&mut self) {
        self.zoom.reset();
    }

    fn fit(&self, cell: Rectangle) -> Option<Vector2> {
        self.image.as_ref().map(|image| {
            fit_size(
                Vector2::new(image.width() as f32, image.height() as f32),
                Vector2::new(cell.width, cell.height),
            )
        })
    }

    /// Zooms around a screen point inside `cell`.
    pub fn zoom_at(&mut self, factor: f32, point: Vector2, cell: Rectangle) {
        if let Some(fit) = self.fit(cell) {
            let focus = Vector2::new(
                point.x - (cell.x + cell.width / 2.0),
                point.y - (cell.y + cell.height / 2.0),
            );
            self.zoom.zoom_by(factor, focus, fit, Vector2::new(cell.width, cell.height));
        }
    }

    pub fn pan_by(&mut self, delta: Vector2, cell: Rectangle) {
        if let Some(fit) = self.fit(cell) {
            self.zoom.pan_by(delta, fit, Vector2::new(cell.width, cell.height));
        }
    }

    pub fn draw(&self, d: &mut RaylibDrawHandle, cell: Rectangle) {
        match (&self.image, self.fit(cell)) {
            (Some(image), Some(fit)) => {
                let tex_width = image.width() as f32;
                let tex_height = image.height() as f32;
                d.draw_texture_pro(
                    image,
                    Rectangle::new(0.0, 0.0, tex_width, tex_height),
                    self.zoom.dest_rect(fit, cell),
                    Vector2::new(0.0, 0.0),
                    0.0,
                    Color::WHITE,
                );
            }
            _ => {
                d.draw_rectangle_rec(cell, Color::DARKGRAY);
                let text_width = measure_text(PLACEHOLDER_TEXT, PLACEHOLDER_FONT_SIZE);
                d.draw_text(
                    PLACEHOLDER_TEXT,
                    (cell.x + (cell.width - text_width as f32) / 2.0) as i32,
                    (cell.y + (cell.height - PLACEHOLDER_FONT_SIZE as f32) / 2.0) as i32,
                    PLACEHOLDER_FONT_SIZE,
                    Color::LIGHTGRAY,
                );
            }
        }
    }
}
