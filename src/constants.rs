// Front-end constants: asset locations, DOM ids and drawing parameters.

// Assets (1-based file names)
pub const SAMPLE_PATH_PREFIX: &str = "assets/audio/Sound";
pub const SAMPLE_PATH_SUFFIX: &str = ".wav";
pub const IMAGE_PATH_PREFIX: &str = "assets/images/image";
pub const IMAGE_PATH_SUFFIX: &str = ".png";
pub const BACKGROUND_VIDEO_PATH: &str = "assets/video/background.mp4";

// DOM
pub const CANVAS_ID: &str = "app-canvas";
pub const START_OVERLAY_ID: &str = "start-overlay";
pub const START_BUTTON_ID: &str = "start-audio";

// Drawing
pub const DIM_OVERLAY_ALPHA: f64 = 150.0 / 255.0; // darkens the video behind the pads
pub const PAD_INSET: f64 = 5.0;
pub const PAD_CORNER_RADIUS: f64 = 15.0;
pub const PLACEHOLDER_FILL: &str = "rgb(120, 120, 120)";
pub const ACTIVE_INSET: f64 = 3.0;
pub const ACTIVE_STROKE: &str = "rgba(255, 255, 255, 0.78)";
pub const ACTIVE_LINE_WIDTH: f64 = 3.0;
pub const GLOW_BLUR_SCALE: f64 = 0.5; // shadow blur per unit of glow
pub const HINT_TEXT: &str = "Move pads horizontally to blend Reverb \u{2194} Delay";
pub const HINT_FONT: &str = "16px system-ui, sans-serif";
pub const HINT_BOTTOM_OFFSET: f64 = 40.0;
pub const PROMPT_TEXT: &str = "Tap Start Audio to begin";
pub const PROMPT_FONT: &str = "22px system-ui, sans-serif";

// Audio graph
pub const OUTPUT_GAIN: f32 = 0.8;
pub const REVERB_SECONDS: f32 = 3.0;
pub const REVERB_DECAY_TAU: f32 = 1.2;
pub const DELAY_MAX_SECONDS: f64 = 1.0;
pub const DELAY_TONE_HZ: f32 = 2400.0;

#[inline]
pub fn sample_path(index: usize) -> String {
    format!("{SAMPLE_PATH_PREFIX}{}{SAMPLE_PATH_SUFFIX}", index + 1)
}

#[inline]
pub fn image_path(index: usize) -> String {
    format!("{IMAGE_PATH_PREFIX}{}{IMAGE_PATH_SUFFIX}", index + 1)
}
