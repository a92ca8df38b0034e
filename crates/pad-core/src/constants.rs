use std::time::Duration;

// Shared tuning constants for the pad grid. `SessionConfig::default()` is
// built from these; the front-end may override any of them.

// Grid
pub const GRID_COLS: usize = 6;
pub const GRID_ROWS: usize = 2;
pub const PAD_SIZE_WIDTH_DIVISOR: f32 = 8.0; // pad_size = min(W / 8, H / 6)
pub const PAD_SIZE_HEIGHT_DIVISOR: f32 = 6.0;
pub const GRID_SPACING: f32 = 1.5; // cell pitch as a multiple of pad size
pub const GRID_MARGIN_X: f32 = 60.0;
pub const GRID_MARGIN_Y: f32 = 100.0;

// Physics
pub const FRICTION: f32 = 0.95; // velocity multiplier per frame
pub const BOUNCE: f32 = 0.8; // restitution applied to exchanged velocities
pub const GLOW_MAX: f32 = 255.0;
pub const GLOW_DECAY_PER_FRAME: f32 = 10.0;
pub const GLOW_COLLISION: f32 = 180.0;

// Interaction
pub const TAP_THRESHOLD: Duration = Duration::from_millis(200);
pub const DRAG_TIMEOUT: Duration = Duration::from_millis(400);

// Effect mapping ranges
pub const DELAY_TIME_MAX_SEC: f32 = 0.5;
pub const DELAY_FEEDBACK_MAX: f32 = 0.6;
