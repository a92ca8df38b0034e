//! The context object owned by the frame-loop driver.
//!
//! A `Session` holds the pad list, the effect router, the viewport and the
//! pointer, and exposes the two entry points a host calls: one per pointer
//! event and one per display frame.

use crate::assets::{ImageBank, SampleBank};
use crate::config::SessionConfig;
use crate::effects::{AudioBackend, EffectParams, EffectRouter};
use crate::interaction::{self, PointerEvent, PointerKind, Triggers};
use crate::pad::{grid_layout, Pad, PadSnapshot, Viewport};
use crate::physics;
use glam::Vec2;
use std::time::Duration;

pub struct Session<B: AudioBackend> {
    pads: Vec<Pad>,
    viewport: Viewport,
    config: SessionConfig,
    router: EffectRouter<B>,
    /// Live pointer position while a press is held.
    pointer: Option<Vec2>,
    started: bool,
}

impl<B: AudioBackend> Session<B> {
    pub fn new(
        config: SessionConfig,
        viewport: Viewport,
        backend: B,
        samples: SampleBank<B::Sample>,
    ) -> Self {
        let pads = grid_layout(viewport, config.grid);
        Self::with_pads(config, viewport, backend, samples, pads)
    }

    /// Start from an explicit pad list instead of the default grid.
    pub fn with_pads(
        config: SessionConfig,
        viewport: Viewport,
        backend: B,
        samples: SampleBank<B::Sample>,
        pads: Vec<Pad>,
    ) -> Self {
        Self {
            pads,
            viewport,
            config,
            router: EffectRouter::new(backend, samples, config.retrigger),
            pointer: None,
            started: false,
        }
    }

    /// Unlock input and the frame loop. Called from the user gesture that
    /// also resumes the audio context.
    pub fn start(&mut self) {
        if !self.started {
            log::info!("[session] started with {} pads", self.pads.len());
        }
        self.started = true;
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Feed one pointer event; taps are played immediately and returned.
    pub fn handle_pointer(&mut self, event: PointerEvent, now: Duration) -> Triggers {
        if !self.started {
            return Triggers::new();
        }
        self.pointer = match event.kind {
            PointerKind::Down | PointerKind::Move => Some(event.position),
            PointerKind::Up | PointerKind::Cancel => None,
        };
        let triggers = interaction::handle_pointer(
            &mut self.pads,
            event,
            self.viewport,
            &self.config.interaction,
            now,
        );
        for &i in &triggers {
            self.router.trigger(i);
        }
        triggers
    }

    /// One display frame: physics, then effect parameters.
    pub fn frame(&mut self, now: Duration) {
        if !self.started {
            return;
        }
        physics::step(
            &mut self.pads,
            self.pointer,
            self.viewport,
            &self.config.physics,
            now,
        );
        self.router.update(&self.pads, self.viewport.width);
    }

    /// Adopt a new viewport; pads are pulled back on screen right away.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        physics::clamp_to_viewport(&mut self.pads, viewport);
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn pads(&self) -> &[Pad] {
        &self.pads
    }

    pub fn effect_params(&self) -> EffectParams {
        self.router.params()
    }

    pub fn router(&self) -> &EffectRouter<B> {
        &self.router
    }

    pub fn snapshots<'a, I>(
        &'a self,
        images: &'a ImageBank<I>,
    ) -> impl Iterator<Item = PadSnapshot<'a, I>> + 'a {
        self.pads.iter().enumerate().map(move |(index, pad)| PadSnapshot {
            index,
            x: pad.position.x,
            y: pad.position.y,
            w: pad.size.x,
            h: pad.size.y,
            glow: pad.glow,
            active: pad.active,
            image: images.get(index),
        })
    }
}
