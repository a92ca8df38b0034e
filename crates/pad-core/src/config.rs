//! Tunable parameters for a pad session.
//!
//! Every struct here defaults to the values in [`crate::constants`], so a
//! front-end only has to override what it wants to change.

use crate::constants::*;
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhysicsParams {
    pub friction: f32,
    pub bounce: f32,
    /// Glow held while a pad is being dragged.
    pub glow_drag: f32,
    pub glow_decay: f32,
    pub glow_collision: f32,
    pub drag_timeout: Duration,
}

impl Default for PhysicsParams {
    fn default() -> Self {
        Self {
            friction: FRICTION,
            bounce: BOUNCE,
            glow_drag: GLOW_MAX,
            glow_decay: GLOW_DECAY_PER_FRAME,
            glow_collision: GLOW_COLLISION,
            drag_timeout: DRAG_TIMEOUT,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InteractionParams {
    /// A release sooner than this after the press counts as a tap.
    pub tap_threshold: Duration,
}

impl Default for InteractionParams {
    fn default() -> Self {
        Self {
            tap_threshold: TAP_THRESHOLD,
        }
    }
}

/// What a tap does when the pad's sample is still sounding.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RetriggerPolicy {
    /// Stop the running instance and play again from the start.
    #[default]
    Restart,
    /// Ignore the tap until the sample has finished.
    Skip,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridParams {
    pub cols: usize,
    pub rows: usize,
}

impl GridParams {
    /// One pad per grid cell.
    #[inline]
    pub fn pad_count(&self) -> usize {
        self.cols * self.rows
    }
}

impl Default for GridParams {
    fn default() -> Self {
        Self {
            cols: GRID_COLS,
            rows: GRID_ROWS,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SessionConfig {
    pub grid: GridParams,
    pub physics: PhysicsParams,
    pub interaction: InteractionParams,
    pub retrigger: RetriggerPolicy,
}
