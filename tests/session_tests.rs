// Host-side scenario tests driving a full session: pointer events in,
// playback and pad snapshots out.

mod common;

use common::{Call, MemorySource, RecordingBackend};
use glam::Vec2;
use pad_core::{
    AssetBank, ImageBank, InteractionState, Pad, PointerEvent, SampleBank, Session,
    SessionConfig, Viewport,
};
use std::time::Duration;

const VP: Viewport = Viewport {
    width: 1280.0,
    height: 720.0,
};

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

fn source() -> MemorySource {
    MemorySource {
        missing_samples: vec![11],
        missing_images: vec![4],
    }
}

fn started_session() -> Session<RecordingBackend> {
    let (samples, _) = SampleBank::load_samples(&mut source(), 12);
    let mut s = Session::new(
        SessionConfig::default(),
        VP,
        RecordingBackend::default(),
        samples,
    );
    s.start();
    s
}

#[test]
fn tap_on_pad_zero_plays_sample_zero_once() {
    let mut s = started_session();
    assert_eq!(s.pads().len(), 12);
    let c = s.pads()[0].center();

    let t = s.handle_pointer(PointerEvent::down(c.x, c.y), ms(0));
    assert!(t.is_empty());
    s.frame(ms(16));
    s.frame(ms(33));
    let t = s.handle_pointer(PointerEvent::up(c.x, c.y), ms(50));
    assert_eq!(t.as_slice(), &[0]);
    assert_eq!(s.router().backend().plays_of(0), 1);
    assert_eq!(s.pads()[0].state, InteractionState::Idle);
}

#[test]
fn input_is_ignored_until_started() {
    let (samples, _) = SampleBank::load_samples(&mut source(), 12);
    let mut s = Session::new(
        SessionConfig::default(),
        VP,
        RecordingBackend::default(),
        samples,
    );
    let c = s.pads()[0].center();
    s.handle_pointer(PointerEvent::down(c.x, c.y), ms(0));
    let t = s.handle_pointer(PointerEvent::up(c.x, c.y), ms(10));
    assert!(t.is_empty());
    s.frame(ms(16));
    assert!(s.router().backend().calls.is_empty());
    assert!(!s.is_started());
}

#[test]
fn drag_moves_pad_and_shifts_effects() {
    let mut s = started_session();
    s.frame(ms(0));
    let before = s.effect_params();
    let pad0 = s.pads()[0].clone();
    let grab = pad0.position + Vec2::new(10.0, 10.0);

    s.handle_pointer(PointerEvent::down(grab.x, grab.y), ms(0));
    // Down into the empty band below the grid so nothing collides
    s.handle_pointer(PointerEvent::moved(grab.x + 600.0, grab.y + 450.0), ms(8));
    s.frame(ms(16));
    assert!(s.pads()[0].is_dragging());
    let expected = pad0.position + Vec2::new(600.0, 450.0);
    assert!((s.pads()[0].position - expected).length() < 1e-3);
    assert_eq!(s.pads()[0].glow, 255.0);

    let t = s.handle_pointer(PointerEvent::up(grab.x + 600.0, grab.y + 450.0), ms(24));
    assert!(t.is_empty());
    assert_eq!(s.router().backend().plays_of(0), 0);

    s.frame(ms(32));
    let after = s.effect_params();
    assert!(after.wet_dry < before.wet_dry);
    assert!(after.delay_time > before.delay_time);
}

#[test]
fn frame_pushes_effect_parameters_every_tick() {
    let mut s = started_session();
    s.frame(ms(0));
    s.frame(ms(16));
    let wet_dry_writes = s
        .router()
        .backend()
        .calls
        .iter()
        .filter(|c| matches!(c, Call::WetDry(_)))
        .count();
    assert_eq!(wet_dry_writes, 2);
}

#[test]
fn pad_with_failed_sample_is_silent_but_draggable() {
    let mut s = started_session();
    let c = s.pads()[11].center();
    s.handle_pointer(PointerEvent::down(c.x, c.y), ms(0));
    let t = s.handle_pointer(PointerEvent::up(c.x, c.y), ms(20));
    assert_eq!(t.as_slice(), &[11]);
    assert!(s.router().backend().calls.is_empty());

    s.handle_pointer(PointerEvent::down(c.x, c.y), ms(100));
    s.handle_pointer(PointerEvent::moved(c.x, c.y + 50.0), ms(110));
    s.frame(ms(116));
    assert!(s.pads()[11].is_dragging());
}

#[test]
fn snapshots_expose_images_and_placeholders() {
    let s = started_session();
    let (images, failures): (ImageBank<String>, _) =
        AssetBank::load_images(&mut source(), 12);
    assert_eq!(failures.len(), 1);
    let snaps: Vec<_> = s.snapshots(&images).collect();
    assert_eq!(snaps.len(), 12);
    assert_eq!(snaps[0].image.map(String::as_str), Some("image1"));
    assert!(snaps[4].image.is_none());
    assert_eq!(snaps[2].index, 2);
    assert_eq!(snaps[2].w, s.pads()[2].size.x);
}

#[test]
fn resize_pulls_pads_back_on_screen() {
    let mut s = started_session();
    let small = Viewport::new(400.0, 300.0);
    s.resize(small);
    for pad in s.pads() {
        assert!(pad.position.x <= small.width - pad.size.x);
        assert!(pad.position.y <= small.height - pad.size.y);
    }
    assert_eq!(s.viewport(), small);
}

#[test]
fn pushed_together_pads_separate_on_next_frame() {
    let (samples, _) = SampleBank::load_samples(&mut source(), 2);
    let pads = vec![
        Pad::new(Vec2::new(300.0, 300.0), Vec2::splat(120.0)),
        Pad::new(Vec2::new(340.0, 300.0), Vec2::splat(120.0)),
    ];
    let mut s = Session::with_pads(
        SessionConfig::default(),
        VP,
        RecordingBackend::default(),
        samples,
        pads,
    );
    s.start();
    s.frame(ms(0));
    let d = s.pads()[0].center().distance(s.pads()[1].center());
    assert!(d >= 120.0 - 1e-3);
    assert!(s.pads().iter().all(|p| p.glow == 180.0));
}

#[test]
fn cancelled_touch_plays_nothing() {
    let mut s = started_session();
    let c = s.pads()[0].center();
    s.handle_pointer(PointerEvent::down(c.x, c.y), ms(0));
    let t = s.handle_pointer(PointerEvent::cancel(c.x, c.y), ms(30));
    assert!(t.is_empty());
    assert_eq!(s.router().backend().plays_of(0), 0);
    assert!(!s.pads()[0].active);
}
