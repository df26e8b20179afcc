use raylib::prelude::*;
use raylib::core::text::measure_text;
use crate::constants::*;

const BAR_COLOR: Color = Color { r: 242, g: 242, b: 247, a: 255 };
const SHADOW_COLOR: Color = Color { r: 0, g: 0, b: 0, a: 50 };
const ICON_COLOR: Color = Color { r: 0, g: 122, b: 255, a: 255 };
const HOVER_COLOR: Color = Color { r: 220, g: 220, b: 228, a: 255 };
const ACTIVE_COLOR: Color = Color { r: 205, g: 225, b: 250, a: 255 };

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Control {
    Play,
    Pause,
    Stop,
}

const CONTROLS: [Control; 3] = [Control::Play, Control::Pause, Control::Stop];

/// The fixed-height bar with the playback buttons and the slide indicator.
pub struct ControlBar;

impl ControlBar {
    /// Button rectangles, laid out left to right.
    pub fn buttons() -> [(Control, Rectangle); 3] {
        let y = (CONTROL_BAR_HEIGHT - BUTTON_SIZE) / 2.0;
        CONTROLS.map(|control| {
            let slot = control as usize as f32;
            let x = BUTTON_SPACING + slot * (BUTTON_SIZE + BUTTON_SPACING);
            (control, Rectangle::new(x, y, BUTTON_SIZE, BUTTON_SIZE))
        })
    }

    pub fn hit(point: Vector2) -> Option<Control> {
        Self::buttons()
            .into_iter()
            .find(|(_, rect)| rect.check_collision_point_rec(point))
            .map(|(control, _)| control)
    }

    pub fn contains(point: Vector2, screen_width: f32) -> bool {
        Rectangle::new(0.0, 0.0, screen_width, CONTROL_BAR_HEIGHT).check_collision_point_rec(point)
    }

    /// Draws the bar. The play button is highlighted while narration plays.
    pub fn draw(
        d: &mut RaylibDrawHandle,
        screen_width: f32,
        label: &str,
        status: Option<&str>,
        playing: bool,
        mouse: Vector2,
    ) {
        d.draw_rectangle(0, CONTROL_BAR_HEIGHT as i32, screen_width as i32, 3, SHADOW_COLOR);
        d.draw_rectangle(0, 0, screen_width as i32, CONTROL_BAR_HEIGHT as i32, BAR_COLOR);

        for (control, rect) in Self::buttons() {
            if playing && control == Control::Play {
                d.draw_rectangle_rec(rect, ACTIVE_COLOR);
            } else if rect.check_collision_point_rec(mouse) {
                d.draw_rectangle_rec(rect, HOVER_COLOR);
            }
            draw_icon(d, control, rect);
        }

        // Label right-aligned, playback time just left of it
        let label_width = measure_text(label, LABEL_FONT_SIZE);
        let text_y = ((CONTROL_BAR_HEIGHT - LABEL_FONT_SIZE as f32) / 2.0) as i32;
        let label_x = screen_width as i32 - BUTTON_SPACING as i32 - label_width;
        d.draw_text(label, label_x, text_y, LABEL_FONT_SIZE, Color::BLACK);

        if let Some(status) = status {
            let status_width = measure_text(status, LABEL_FONT_SIZE);
            let status_x = label_x - BUTTON_SPACING as i32 - status_width;
            let buttons_end = (BUTTON_SPACING + 3.0 * (BUTTON_SIZE + BUTTON_SPACING)) as i32;
            if status_x >= buttons_end {
                d.draw_text(status, status_x, text_y, LABEL_FONT_SIZE, Color::GRAY);
            }
        }
    }
}

fn draw_icon(d: &mut RaylibDrawHandle, control: Control, rect: Rectangle) {
    let inset = rect.width * 0.3;
    let (left, top) = (rect.x + inset, rect.y + inset);
    let (right, bottom) = (rect.x + rect.width - inset, rect.y + rect.height - inset);
    match control {
        Control::Play => {
            // Counter-clockwise, as raylib requires
            d.draw_triangle(
                Vector2::new(left, top),
                Vector2::new(left, bottom),
                Vector2::new(right, (top + bottom) / 2.0),
                ICON_COLOR,
            );
        }
        Control::Pause => {
            let bar = (right - left) / 3.0;
            d.draw_rectangle_rec(Rectangle::new(left, top, bar, bottom - top), ICON_COLOR);
            d.draw_rectangle_rec(Rectangle::new(right - bar, top, bar, bottom - top), ICON_COLOR);
        }
        Control::Stop => {
            d.draw_rectangle_rec(Rectangle::new(left, top, right - left, bottom - top), ICON_COLOR);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buttons_are_laid_out_left_to_right() {
        let buttons = ControlBar::buttons();
        assert_eq!(buttons[0].1.x, 20.0);
        assert_eq!(buttons[1].1.x, 84.0);
        assert_eq!(buttons[2].1.x, 148.0);
        assert!(buttons.iter().all(|(_, r)| r.y == 3.0 && r.width == 44.0));
    }

    #[test]
    fn hit_testing() {
        assert_eq!(ControlBar::hit(Vector2::new(30.0, 25.0)), Some(Control::Play));
        assert_eq!(ControlBar::hit(Vector2::new(100.0, 25.0)), Some(Control::Pause));
        assert_eq!(ControlBar::hit(Vector2::new(170.0, 25.0)), Some(Control::Stop));
        assert_eq!(ControlBar::hit(Vector2::new(70.0, 25.0)), None);
        assert_eq!(ControlBar::hit(Vector2::new(30.0, 200.0)), None);
        assert!(ControlBar::contains(Vector2::new(500.0, 10.0), 600.0));
        assert!(!ControlBar::contains(Vector2::new(500.0, 60.0), 600.0));
    }
}
