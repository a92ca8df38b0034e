//! Pointer classification: idle → clicked → (dragging | tap) → idle.
//!
//! Mouse, touch and pen input all arrive as one [`PointerEvent`] shape; the
//! front-end adapts device events before they reach [`handle_pointer`].

use crate::config::InteractionParams;
use crate::pad::{InteractionState, Pad, Viewport};
use glam::Vec2;
use smallvec::SmallVec;
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerKind {
    Down,
    Move,
    Up,
    /// The platform took the pointer away (scroll, system gesture).
    Cancel,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub position: Vec2,
}

impl PointerEvent {
    pub fn down(x: f32, y: f32) -> Self {
        Self {
            kind: PointerKind::Down,
            position: Vec2::new(x, y),
        }
    }

    pub fn moved(x: f32, y: f32) -> Self {
        Self {
            kind: PointerKind::Move,
            position: Vec2::new(x, y),
        }
    }

    pub fn up(x: f32, y: f32) -> Self {
        Self {
            kind: PointerKind::Up,
            position: Vec2::new(x, y),
        }
    }

    pub fn cancel(x: f32, y: f32) -> Self {
        Self {
            kind: PointerKind::Cancel,
            position: Vec2::new(x, y),
        }
    }
}

/// Pad indices tapped by one event. A single pointer claims at most one pad.
pub type Triggers = SmallVec<[usize; 1]>;

pub fn handle_pointer(
    pads: &mut [Pad],
    event: PointerEvent,
    viewport: Viewport,
    params: &InteractionParams,
    now: Duration,
) -> Triggers {
    let mut triggers = Triggers::new();
    match event.kind {
        PointerKind::Down => {
            if let Some(i) = hit_test(pads, event.position, viewport) {
                pads[i].press(event.position, now);
                log::debug!("[pointer] press pad {}", i);
            }
        }
        PointerKind::Move => {
            for (i, pad) in pads.iter_mut().enumerate() {
                match pad.state {
                    InteractionState::Clicked => {
                        pad.begin_drag(now);
                        log::debug!("[pointer] begin drag on pad {}", i);
                    }
                    InteractionState::Dragging => pad.last_drag_time = now,
                    InteractionState::Idle => {}
                }
            }
        }
        PointerKind::Up => {
            for (i, pad) in pads.iter_mut().enumerate() {
                if pad.release(now, params.tap_threshold) {
                    log::debug!("[pointer] tap on pad {}", i);
                    triggers.push(i);
                }
            }
        }
        PointerKind::Cancel => release_all(pads),
    }
    triggers
}

/// Return every pad to idle without firing any tap.
pub fn release_all(pads: &mut [Pad]) {
    for pad in pads.iter_mut() {
        pad.state = InteractionState::Idle;
        pad.active = false;
    }
}

/// First pad, in index order, whose box contains `p`.
pub fn hit_test(pads: &[Pad], p: Vec2, viewport: Viewport) -> Option<usize> {
    if !viewport.contains(p) {
        return None;
    }
    pads.iter().position(|pad| pad.contains(p))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn overlapping_pads() -> Vec<Pad> {
        vec![
            Pad::new(Vec2::new(0.0, 0.0), Vec2::splat(100.0)),
            Pad::new(Vec2::new(50.0, 50.0), Vec2::splat(100.0)),
        ]
    }

    #[test]
    fn down_claims_lowest_index_only() {
        let vp = Viewport::new(800.0, 600.0);
        let mut pads = overlapping_pads();
        let params = InteractionParams::default();
        handle_pointer(
            &mut pads,
            PointerEvent::down(75.0, 75.0),
            vp,
            &params,
            Duration::ZERO,
        );
        assert_eq!(pads[0].state, InteractionState::Clicked);
        assert_eq!(pads[1].state, InteractionState::Idle);
        assert_eq!(pads[0].drag_offset, Vec2::new(75.0, 75.0));
    }

    #[test]
    fn down_outside_viewport_hits_nothing() {
        let vp = Viewport::new(80.0, 80.0);
        let pads = overlapping_pads();
        assert_eq!(hit_test(&pads, Vec2::new(90.0, 60.0), vp), None);
        assert_eq!(hit_test(&pads, Vec2::new(f32::NAN, 10.0), vp), None);
    }

    #[test]
    fn move_while_idle_changes_nothing() {
        let vp = Viewport::new(800.0, 600.0);
        let mut pads = overlapping_pads();
        let before = pads.clone();
        let params = InteractionParams::default();
        handle_pointer(
            &mut pads,
            PointerEvent::moved(10.0, 10.0),
            vp,
            &params,
            Duration::ZERO,
        );
        assert_eq!(pads, before);
    }
}
