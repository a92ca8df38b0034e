//! Per-frame integrator for pad bodies.
//!
//! One call to [`step`] advances every pad by one display frame: drag
//! follow, inertial drift with friction, viewport clamping, the drag-timeout
//! safety release and a single pass of pairwise collision resolution.

use crate::config::PhysicsParams;
use crate::pad::{InteractionState, Pad, Viewport};
use glam::Vec2;
use std::time::Duration;

/// Advance all pads by one frame.
///
/// `pointer` is the live pointer position while a press is held. A dragging
/// pad without one holds still and lets its drag timer run out.
pub fn step(
    pads: &mut [Pad],
    pointer: Option<Vec2>,
    viewport: Viewport,
    params: &PhysicsParams,
    now: Duration,
) {
    for pad in pads.iter_mut() {
        if pad.is_dragging() {
            if let Some(p) = pointer {
                follow_pointer(pad, p, viewport, params, now);
            }
        } else {
            drift(pad, params);
        }

        pad.position = viewport.clamp_position(pad.position, pad.size);

        if pad.is_dragging() && now.saturating_sub(pad.last_drag_time) > params.drag_timeout {
            log::debug!("[physics] drag timed out, releasing pad");
            pad.state = InteractionState::Idle;
        }
    }

    resolve_collisions(pads, params);
    clamp_to_viewport(pads, viewport);
}

fn follow_pointer(
    pad: &mut Pad,
    pointer: Vec2,
    viewport: Viewport,
    params: &PhysicsParams,
    now: Duration,
) {
    let target = viewport.clamp_position(pointer - pad.drag_offset, pad.size);
    pad.velocity = target - pad.position;
    pad.position = target;
    pad.set_glow(params.glow_drag);
    pad.last_drag_time = now;
}

fn drift(pad: &mut Pad, params: &PhysicsParams) {
    pad.position += pad.velocity;
    pad.velocity *= params.friction;
    pad.set_glow(pad.glow - params.glow_decay);
}

pub fn clamp_to_viewport(pads: &mut [Pad], viewport: Viewport) {
    for pad in pads.iter_mut() {
        pad.position = viewport.clamp_position(pad.position, pad.size);
    }
}

/// Single index-ascending pass over every unordered pair.
///
/// Pads are treated as circles of diameter `w`. Overlapping pairs are pushed
/// apart by half the overlap each and exchange velocities scaled by
/// `bounce`. Heavy pile-ups may still overlap after one pass.
pub fn resolve_collisions(pads: &mut [Pad], params: &PhysicsParams) {
    let n = pads.len();
    for i in 0..n {
        for j in (i + 1)..n {
            let (head, tail) = pads.split_at_mut(j);
            collide_pair(&mut head[i], &mut tail[0], params);
        }
    }
}

fn collide_pair(a: &mut Pad, b: &mut Pad, params: &PhysicsParams) -> bool {
    let delta = a.center() - b.center();
    let distance = delta.length();
    let min_dist = (a.size.x + b.size.x) * 0.5;
    if distance >= min_dist {
        return false;
    }

    // Coincident centres separate along +X.
    let normal = if distance > f32::EPSILON {
        delta / distance
    } else {
        Vec2::X
    };
    let push = normal * (min_dist - distance) * 0.5;
    a.position += push;
    b.position -= push;

    let va = a.velocity;
    a.velocity = b.velocity * params.bounce;
    b.velocity = va * params.bounce;

    a.set_glow(params.glow_collision);
    b.set_glow(params.glow_collision);
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pad_at(x: f32, y: f32) -> Pad {
        Pad::new(Vec2::new(x, y), Vec2::splat(100.0))
    }

    #[test]
    fn coincident_pads_separate_horizontally() {
        let params = PhysicsParams::default();
        let mut pads = vec![pad_at(200.0, 200.0), pad_at(200.0, 200.0)];
        resolve_collisions(&mut pads, &params);
        assert!(pads[0].position.x > pads[1].position.x);
        assert_eq!(pads[0].position.y, pads[1].position.y);
        let gap = pads[0].center().distance(pads[1].center());
        assert!((gap - 100.0).abs() < 1e-3);
    }

    #[test]
    fn distant_pads_are_untouched() {
        let params = PhysicsParams::default();
        let mut a = pad_at(0.0, 0.0);
        let mut b = pad_at(300.0, 0.0);
        a.velocity = Vec2::new(1.0, 0.0);
        assert!(!collide_pair(&mut a, &mut b, &params));
        assert_eq!(a.velocity, Vec2::new(1.0, 0.0));
        assert_eq!(b.glow, 0.0);
    }

    #[test]
    fn drift_applies_friction_and_glow_decay() {
        let params = PhysicsParams::default();
        let mut pad = pad_at(10.0, 10.0);
        pad.velocity = Vec2::new(4.0, -2.0);
        pad.glow = 5.0;
        drift(&mut pad, &params);
        assert_eq!(pad.position, Vec2::new(14.0, 8.0));
        assert!((pad.velocity.x - 3.8).abs() < 1e-5);
        assert_eq!(pad.glow, 0.0);
    }
}
