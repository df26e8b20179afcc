pub const WINDOW_WIDTH: i32 = 960;            // Initial window width
pub const WINDOW_HEIGHT: i32 = 720;           // Initial window height
pub const FPS: u32 = 60;                      // Frames per second

pub const CONTROL_BAR_HEIGHT: f32 = 50.0;     // Fixed height of the player control bar
pub const BUTTON_SIZE: f32 = 44.0;            // Play / pause / stop buttons are square
pub const BUTTON_SPACING: f32 = 20.0;         // Gap between buttons and bar edges
pub const LABEL_FONT_SIZE: i32 = 14;

pub const MIN_ZOOM: f32 = 1.0;
pub const MAX_ZOOM: f32 = 6.0;
pub const WHEEL_ZOOM_STEP: f32 = 1.1;         // Scale factor per mouse wheel notch

pub const FLICK_VELOCITY: f32 = 600.0;        // Pixels per second needed to flick to the next page
pub const SNAP_SPEED: f32 = 12.0;             // Exponential approach rate while settling
pub const SETTLE_EPSILON: f32 = 0.5;          // Pixels from target at which the pager rests
pub const MAX_OVERSHOOT: f32 = 0.25;          // Fraction of a page the pager may be dragged past either end

pub const DEFAULT_AUDIO_EXTENSION: &str = "mp3";
pub const MANIFEST_FILE_NAME: &str = "slides.yaml";
pub const IMAGE_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "bmp", "gif"];
