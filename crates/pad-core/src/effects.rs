//! Shared reverb → delay chain and the sample trigger that feeds it.
//!
//! The chain parameters follow the horizontal centre of mass of the pads:
//! a grid pushed to the left is drenched in reverb, one pushed to the right
//! picks up longer, denser echoes. All pads share one chain instance.

use crate::assets::SampleBank;
use crate::config::RetriggerPolicy;
use crate::constants::{DELAY_FEEDBACK_MAX, DELAY_TIME_MAX_SEC};
use crate::pad::Pad;

/// Endpoint in the effect graph.
#[derive(Debug)]
pub enum Node<'a, S> {
    Sample(&'a S),
    Reverb,
    Delay,
    Output,
}

/// Playback and routing surface provided by the platform audio layer.
pub trait AudioBackend {
    type Sample;

    fn play(&mut self, sample: &Self::Sample);
    fn stop(&mut self, sample: &Self::Sample);
    fn is_playing(&self, sample: &Self::Sample) -> bool;

    /// Idempotent: re-establishing an existing edge is harmless.
    fn connect(&mut self, src: Node<'_, Self::Sample>, dst: Node<'_, Self::Sample>);
    /// Drop every outgoing edge of `sample`.
    fn disconnect(&mut self, sample: &Self::Sample);

    fn set_wet_dry(&mut self, wet_dry: f32);
    fn set_delay_time(&mut self, seconds: f32);
    fn set_delay_feedback(&mut self, feedback: f32);
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct EffectParams {
    /// 1.0 is fully wet reverb.
    pub wet_dry: f32,
    pub delay_time: f32,
    pub delay_feedback: f32,
}

impl EffectParams {
    pub fn from_mean_x(avg_x: f32, viewport_width: f32) -> Self {
        let (reverb, delay) = if viewport_width > 0.0 && avg_x.is_finite() {
            (
                map_range(avg_x, 0.0, viewport_width, 1.0, 0.0),
                map_range(avg_x, 0.0, viewport_width, 0.0, 1.0),
            )
        } else {
            (1.0, 0.0)
        };
        Self {
            wet_dry: reverb,
            delay_time: map_range(delay, 0.0, 1.0, 0.0, DELAY_TIME_MAX_SEC),
            delay_feedback: map_range(delay, 0.0, 1.0, 0.0, DELAY_FEEDBACK_MAX),
        }
    }
}

/// Unclamped linear remap.
#[inline]
pub fn map_range(v: f32, in_lo: f32, in_hi: f32, out_lo: f32, out_hi: f32) -> f32 {
    out_lo + (v - in_lo) * (out_hi - out_lo) / (in_hi - in_lo)
}

pub fn compute_effect_params(pads: &[Pad], viewport_width: f32) -> EffectParams {
    let avg_x = if pads.is_empty() {
        0.0
    } else {
        pads.iter().map(|p| p.position.x).sum::<f32>() / pads.len() as f32
    };
    EffectParams::from_mean_x(avg_x, viewport_width)
}

/// The single shared reverb → delay → output chain.
#[derive(Clone, Debug, Default)]
pub struct EffectChain {
    params: EffectParams,
}

impl EffectChain {
    pub fn params(&self) -> EffectParams {
        self.params
    }

    /// Last write wins; pushed every frame whether or not anything plays.
    pub fn set_params<B: AudioBackend>(&mut self, backend: &mut B, params: EffectParams) {
        backend.set_wet_dry(params.wet_dry);
        backend.set_delay_time(params.delay_time);
        backend.set_delay_feedback(params.delay_feedback);
        self.params = params;
    }

    /// Route `sample` through the chain, replacing any previous destination.
    pub fn apply<B: AudioBackend>(&self, backend: &mut B, sample: &B::Sample) {
        backend.disconnect(sample);
        backend.connect(Node::Sample(sample), Node::Reverb);
        backend.connect(Node::Reverb, Node::Delay);
        backend.connect(Node::Delay, Node::Output);
    }
}

pub struct EffectRouter<B: AudioBackend> {
    backend: B,
    chain: EffectChain,
    samples: SampleBank<B::Sample>,
    retrigger: RetriggerPolicy,
}

impl<B: AudioBackend> EffectRouter<B> {
    pub fn new(backend: B, samples: SampleBank<B::Sample>, retrigger: RetriggerPolicy) -> Self {
        Self {
            backend,
            chain: EffectChain::default(),
            samples,
            retrigger,
        }
    }

    /// Recompute the chain parameters from pad positions and push them.
    pub fn update(&mut self, pads: &[Pad], viewport_width: f32) -> EffectParams {
        let params = compute_effect_params(pads, viewport_width);
        self.chain.set_params(&mut self.backend, params);
        params
    }

    /// Play the sample bound to `index`. Returns whether playback started.
    pub fn trigger(&mut self, index: usize) -> bool {
        let Some(sample) = self.samples.get(index) else {
            log::debug!("[fx] pad {} has no sample", index);
            return false;
        };
        if self.backend.is_playing(sample) {
            match self.retrigger {
                RetriggerPolicy::Skip => return false,
                RetriggerPolicy::Restart => self.backend.stop(sample),
            }
        }
        self.chain.apply(&mut self.backend, sample);
        self.backend.play(sample);
        log::debug!("[fx] trigger pad {}", index);
        true
    }

    pub fn params(&self) -> EffectParams {
        self.chain.params()
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_range_inverts_and_extrapolates() {
        assert_eq!(map_range(0.0, 0.0, 10.0, 1.0, 0.0), 1.0);
        assert_eq!(map_range(5.0, 0.0, 10.0, 1.0, 0.0), 0.5);
        assert_eq!(map_range(20.0, 0.0, 10.0, 0.0, 1.0), 2.0);
    }

    #[test]
    fn degenerate_width_falls_back_to_left_edge() {
        let p = EffectParams::from_mean_x(100.0, 0.0);
        assert_eq!(p.wet_dry, 1.0);
        assert_eq!(p.delay_time, 0.0);
        assert_eq!(p.delay_feedback, 0.0);
    }

    #[test]
    fn empty_pad_set_reads_as_left_edge() {
        let p = compute_effect_params(&[], 800.0);
        assert_eq!(p, EffectParams::from_mean_x(0.0, 800.0));
    }
}
