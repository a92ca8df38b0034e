//! WebAudio implementation of the pad audio backend.
//!
//! Graph: per-pad output gain → reverb stage (convolver wet + dry) → delay
//! stage (feedback loop with a lowpass tone, wet + dry) → master → speakers.

use crate::constants::{
    DELAY_MAX_SECONDS, DELAY_TONE_HZ, OUTPUT_GAIN, REVERB_DECAY_TAU, REVERB_SECONDS,
};
use anyhow::anyhow;
use pad_core::{AudioBackend, Node};
use web_sys as web;

/// Decoded sample bound to one pad.
pub struct SampleHandle {
    pub index: usize,
    pub buffer: web::AudioBuffer,
}

pub struct FxChain {
    pub reverb_in: web::GainNode,
    pub reverb_wet: web::GainNode,
    pub reverb_dry: web::GainNode,
    pub reverb_out: web::GainNode,
    pub delay_in: web::GainNode,
    pub delay: web::DelayNode,
    pub delay_feedback: web::GainNode,
    pub delay_out: web::GainNode,
    pub master: web::GainNode,
}

fn create_gain(
    audio_ctx: &web::AudioContext,
    value: f32,
    label: &str,
) -> anyhow::Result<web::GainNode> {
    let g = web::GainNode::new(audio_ctx).map_err(|e| {
        log::error!("{} GainNode error: {:?}", label, e);
        anyhow!("{label} GainNode: {e:?}")
    })?;
    g.gain().set_value(value);
    Ok(g)
}

// Stereo noise burst with an exponential tail; xorshift32 keeps it
// deterministic across loads.
fn build_impulse_response(audio_ctx: &web::AudioContext) -> Option<web::AudioBuffer> {
    let sr = audio_ctx.sample_rate();
    let len = (sr * REVERB_SECONDS) as u32;
    let ir = audio_ctx.create_buffer(2, len, sr).ok()?;
    let dt = 1.0_f32 / sr;
    for (ch, seed) in [0x1234ABCD_u32, 0x7890FEDC].into_iter().enumerate() {
        let mut s = seed;
        let mut buf: Vec<f32> = (0..len as usize)
            .map(|i| {
                s ^= s << 13;
                s ^= s >> 17;
                s ^= s << 5;
                let n = (s as f32 / u32::MAX as f32) * 2.0 - 1.0;
                let t = i as f32 * dt;
                n * (-t / REVERB_DECAY_TAU).exp()
            })
            .collect();
        _ = ir.copy_to_channel(&mut buf, ch as i32);
    }
    Some(ir)
}

pub fn build_fx_chain(audio_ctx: &web::AudioContext) -> anyhow::Result<FxChain> {
    let master = create_gain(audio_ctx, OUTPUT_GAIN, "Master")?;
    _ = master.connect_with_audio_node(&audio_ctx.destination());

    // Reverb stage: in → [dry, convolver → wet] → out
    let reverb_in = create_gain(audio_ctx, 1.0, "Reverb in")?;
    let convolver = web::ConvolverNode::new(audio_ctx).map_err(|e| {
        log::error!("ConvolverNode error: {:?}", e);
        anyhow!("ConvolverNode: {e:?}")
    })?;
    convolver.set_normalize(true);
    match build_impulse_response(audio_ctx) {
        Some(ir) => convolver.set_buffer(Some(&ir)),
        None => log::warn!("[audio] impulse response unavailable, reverb will be silent"),
    }
    let reverb_wet = create_gain(audio_ctx, 1.0, "Reverb wet")?;
    let reverb_dry = create_gain(audio_ctx, 0.0, "Reverb dry")?;
    let reverb_out = create_gain(audio_ctx, 1.0, "Reverb out")?;
    _ = reverb_in.connect_with_audio_node(&convolver);
    _ = convolver.connect_with_audio_node(&reverb_wet);
    _ = reverb_wet.connect_with_audio_node(&reverb_out);
    _ = reverb_in.connect_with_audio_node(&reverb_dry);
    _ = reverb_dry.connect_with_audio_node(&reverb_out);

    // Delay stage with feedback loop and lowpass tone
    let delay_in = create_gain(audio_ctx, 1.0, "Delay in")?;
    let delay = audio_ctx
        .create_delay_with_max_delay_time(DELAY_MAX_SECONDS)
        .map_err(|e| {
            log::error!("DelayNode error: {:?}", e);
            anyhow!("DelayNode: {e:?}")
        })?;
    delay.delay_time().set_value(0.0);
    let delay_tone = web::BiquadFilterNode::new(audio_ctx).map_err(|e| {
        log::error!("BiquadFilterNode error: {:?}", e);
        anyhow!("BiquadFilterNode: {e:?}")
    })?;
    delay_tone.set_type(web::BiquadFilterType::Lowpass);
    delay_tone.frequency().set_value(DELAY_TONE_HZ);
    let delay_feedback = create_gain(audio_ctx, 0.0, "Delay feedback")?;
    let delay_out = create_gain(audio_ctx, 1.0, "Delay out")?;
    _ = delay_in.connect_with_audio_node(&delay_out);
    _ = delay_in.connect_with_audio_node(&delay);
    _ = delay.connect_with_audio_node(&delay_tone);
    _ = delay_tone.connect_with_audio_node(&delay_feedback);
    _ = delay_feedback.connect_with_audio_node(&delay);
    _ = delay_tone.connect_with_audio_node(&delay_out);

    Ok(FxChain {
        reverb_in,
        reverb_wet,
        reverb_dry,
        reverb_out,
        delay_in,
        delay,
        delay_feedback,
        delay_out,
        master,
    })
}

struct Playing {
    source: web::AudioBufferSourceNode,
    ends_at: f64,
}

pub struct WebAudioBackend {
    ctx: web::AudioContext,
    fx: FxChain,
    outputs: Vec<web::GainNode>,
    playing: Vec<Option<Playing>>,
}

impl WebAudioBackend {
    pub fn new(ctx: web::AudioContext, fx: FxChain, pad_count: usize) -> anyhow::Result<Self> {
        let outputs = (0..pad_count)
            .map(|_| create_gain(&ctx, 1.0, "Pad out"))
            .collect::<anyhow::Result<Vec<_>>>()?;
        Ok(Self {
            ctx,
            fx,
            outputs,
            playing: (0..pad_count).map(|_| None).collect(),
        })
    }

    pub fn context(&self) -> &web::AudioContext {
        &self.ctx
    }

    fn source_of(&self, node: &Node<'_, SampleHandle>) -> Option<web::AudioNode> {
        match node {
            Node::Sample(s) => self.outputs.get(s.index).cloned().map(Into::into),
            Node::Reverb => Some(self.fx.reverb_out.clone().into()),
            Node::Delay => Some(self.fx.delay_out.clone().into()),
            Node::Output => None,
        }
    }

    fn sink_of(&self, node: &Node<'_, SampleHandle>) -> Option<web::AudioNode> {
        match node {
            Node::Sample(_) => None,
            Node::Reverb => Some(self.fx.reverb_in.clone().into()),
            Node::Delay => Some(self.fx.delay_in.clone().into()),
            Node::Output => Some(self.fx.master.clone().into()),
        }
    }
}

impl AudioBackend for WebAudioBackend {
    type Sample = SampleHandle;

    fn play(&mut self, sample: &SampleHandle) {
        let (Some(out), Some(slot)) = (
            self.outputs.get(sample.index),
            self.playing.get_mut(sample.index),
        ) else {
            return;
        };
        let source = match web::AudioBufferSourceNode::new(&self.ctx) {
            Ok(s) => s,
            Err(e) => {
                log::error!("AudioBufferSourceNode error: {:?}", e);
                return;
            }
        };
        source.set_buffer(Some(&sample.buffer));
        _ = source.connect_with_audio_node(out);
        if let Err(e) = source.start() {
            log::warn!("[audio] sample {} failed to start: {:?}", sample.index, e);
            return;
        }
        *slot = Some(Playing {
            source,
            ends_at: self.ctx.current_time() + sample.buffer.duration(),
        });
    }

    fn stop(&mut self, sample: &SampleHandle) {
        if let Some(p) = self.playing.get_mut(sample.index).and_then(Option::take) {
            _ = p.source.stop();
            _ = p.source.disconnect();
        }
    }

    fn is_playing(&self, sample: &SampleHandle) -> bool {
        match self.playing.get(sample.index) {
            Some(Some(p)) => self.ctx.current_time() < p.ends_at,
            _ => false,
        }
    }

    fn connect(&mut self, src: Node<'_, SampleHandle>, dst: Node<'_, SampleHandle>) {
        match (self.source_of(&src), self.sink_of(&dst)) {
            (Some(s), Some(d)) => {
                if let Err(e) = s.connect_with_audio_node(&d) {
                    log::warn!("[audio] connect failed: {:?}", e);
                }
            }
            _ => log::warn!("[audio] ignoring edge without an audio node"),
        }
    }

    fn disconnect(&mut self, sample: &SampleHandle) {
        if let Some(out) = self.outputs.get(sample.index) {
            _ = out.disconnect();
        }
    }

    fn set_wet_dry(&mut self, wet_dry: f32) {
        let wet = wet_dry.clamp(0.0, 1.0);
        self.fx.reverb_wet.gain().set_value(wet);
        self.fx.reverb_dry.gain().set_value(1.0 - wet);
    }

    fn set_delay_time(&mut self, seconds: f32) {
        self.fx.delay.delay_time().set_value(seconds.max(0.0));
    }

    fn set_delay_feedback(&mut self, feedback: f32) {
        self.fx.delay_feedback.gain().set_value(feedback.clamp(0.0, 0.95));
    }
}
