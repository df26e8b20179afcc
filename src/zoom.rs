use raylib::prelude::*;
use crate::constants::*;

/// Largest size with the image's aspect ratio that fits inside `cell`.
pub fn fit_size(image: Vector2, cell: Vector2) -> Vector2 {
    if image.x <= 0.0 || image.y <= 0.0 {
        return Vector2::new(0.0, 0.0);
    }
    let scale = (cell.x / image.x).min(cell.y / image.y);
    Vector2::new(image.x * scale, image.y * scale)
}

/// Zoom scale and pan of one image inside its cell.
///
/// `pan` is the offset of the image centre from the cell centre, in screen
/// pixels. Focus points passed to `zoom_by` use the same origin.
#[derive(Debug, Clone, Copy)]
pub struct ZoomState {
    scale: f32,
    pan: Vector2,
}

impl Default for ZoomState {
    fn default() -> Self {
        Self { scale: MIN_ZOOM, pan: Vector2::new(0.0, 0.0) }
    }
}

impl ZoomState {
    pub fn scale(&self) -> f32 {
        self.scale
    }

    #[cfg(test)]
    pub fn pan(&self) -> Vector2 {
        self.pan
    }

    pub fn is_zoomed(&self) -> bool {
        self.scale > MIN_ZOOM + f32::EPSILON
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Multiplies the scale by `factor`, keeping the image point under
    /// `focus` where it is.
    pub fn zoom_by(&mut self, factor: f32, focus: Vector2, fit: Vector2, cell: Vector2) {
        if !factor.is_finite() || factor <= 0.0 {
            return;
        }
        let scale = (self.scale * factor).clamp(MIN_ZOOM, MAX_ZOOM);
        let ratio = scale / self.scale;
        self.pan = Vector2::new(
            focus.x - (focus.x - self.pan.x) * ratio,
            focus.y - (focus.y - self.pan.y) * ratio,
        );
        self.scale = scale;
        self.clamp_pan(fit, cell);
    }

    pub fn pan_by(&mut self, delta: Vector2, fit: Vector2, cell: Vector2) {
        self.pan = Vector2::new(self.pan.x + delta.x, self.pan.y + delta.y);
        self.clamp_pan(fit, cell);
    }

    // The zoomed image may move only as far as it overflows the cell
    fn clamp_pan(&mut self, fit: Vector2, cell: Vector2) {
        let limit_x = ((fit.x * self.scale - cell.x) / 2.0).max(0.0);
        let limit_y = ((fit.y * self.scale - cell.y) / 2.0).max(0.0);
        self.pan = Vector2::new(self.pan.x.clamp(-limit_x, limit_x), self.pan.y.clamp(-limit_y, limit_y));
    }

    /// Where the image lands on screen for a cell at `cell`.
    pub fn dest_rect(&self, fit: Vector2, cell: Rectangle) -> Rectangle {
        let width = fit.x * self.scale;
        let height = fit.y * self.scale;
        Rectangle::new(
            cell.x + cell.width / 2.0 + self.pan.x - width / 2.0,
            cell.y + cell.height / 2.0 + self.pan.y - height / 2.0,
            width,
            height,
        )
    }
}
