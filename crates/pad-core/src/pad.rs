//! Pad bodies, the viewport they live in and the grid they start from.

use crate::config::GridParams;
use crate::constants::{
    GLOW_MAX, GRID_MARGIN_X, GRID_MARGIN_Y, GRID_SPACING, PAD_SIZE_HEIGHT_DIVISOR,
    PAD_SIZE_WIDTH_DIVISOR,
};
use glam::Vec2;
use std::time::Duration;

/// Drawable area in CSS pixels, origin at the top-left.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Whether a pointer coordinate lies on screen. Anything else hits no pad.
    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        p.is_finite() && p.x >= 0.0 && p.y >= 0.0 && p.x <= self.width && p.y <= self.height
    }

    /// Clamp a top-left corner so a box of `size` stays fully on screen.
    /// A box larger than the viewport is pinned to the origin.
    #[inline]
    pub fn clamp_position(&self, position: Vec2, size: Vec2) -> Vec2 {
        let max = (Vec2::new(self.width, self.height) - size).max(Vec2::ZERO);
        position.clamp(Vec2::ZERO, max)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum InteractionState {
    #[default]
    Idle,
    Clicked,
    Dragging,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Pad {
    pub position: Vec2,
    pub size: Vec2,
    pub velocity: Vec2,
    pub state: InteractionState,
    /// Press highlight; lives from pointer-down until pointer-up.
    pub active: bool,
    pub drag_offset: Vec2,
    pub click_time: Duration,
    pub last_drag_time: Duration,
    pub glow: f32,
}

impl Pad {
    pub fn new(position: Vec2, size: Vec2) -> Self {
        Self {
            position,
            size,
            velocity: Vec2::ZERO,
            state: InteractionState::Idle,
            active: false,
            drag_offset: Vec2::ZERO,
            click_time: Duration::ZERO,
            last_drag_time: Duration::ZERO,
            glow: 0.0,
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.position + self.size * 0.5
    }

    /// Strict containment, edges excluded.
    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        let max = self.position + self.size;
        p.x > self.position.x && p.x < max.x && p.y > self.position.y && p.y < max.y
    }

    #[inline]
    pub fn is_dragging(&self) -> bool {
        self.state == InteractionState::Dragging
    }

    #[inline]
    pub fn set_glow(&mut self, glow: f32) {
        self.glow = glow.clamp(0.0, GLOW_MAX);
    }

    pub(crate) fn press(&mut self, pointer: Vec2, now: Duration) {
        self.state = InteractionState::Clicked;
        self.active = true;
        self.drag_offset = pointer - self.position;
        self.click_time = now;
    }

    pub(crate) fn begin_drag(&mut self, now: Duration) {
        self.state = InteractionState::Dragging;
        self.last_drag_time = now;
    }

    /// Return to idle; true when the release completes a tap.
    pub(crate) fn release(&mut self, now: Duration, tap_threshold: Duration) -> bool {
        let tapped = self.state == InteractionState::Clicked
            && now.saturating_sub(self.click_time) < tap_threshold;
        self.state = InteractionState::Idle;
        self.active = false;
        tapped
    }
}

/// Read-only per-pad view handed to the renderer each frame.
#[derive(Clone, Copy, Debug)]
pub struct PadSnapshot<'a, I> {
    pub index: usize,
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    pub glow: f32,
    pub active: bool,
    pub image: Option<&'a I>,
}

/// Edge length of a square pad for the given viewport.
#[inline]
pub fn pad_size_for(viewport: Viewport) -> f32 {
    (viewport.width / PAD_SIZE_WIDTH_DIVISOR).min(viewport.height / PAD_SIZE_HEIGHT_DIVISOR)
}

/// Lay pads out row-major on a spaced grid, clamped into the viewport.
pub fn grid_layout(viewport: Viewport, grid: GridParams) -> Vec<Pad> {
    let size = pad_size_for(viewport).max(0.0);
    let cols = grid.cols.max(1);
    let pitch = size * GRID_SPACING;
    (0..grid.pad_count())
        .map(|i| {
            let (r, c) = (i / cols, i % cols);
            let raw = Vec2::new(
                c as f32 * pitch + GRID_MARGIN_X,
                r as f32 * pitch + GRID_MARGIN_Y,
            );
            let extent = Vec2::splat(size);
            Pad::new(viewport.clamp_position(raw, extent), extent)
        })
        .collect()
}
