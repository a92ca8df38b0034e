// Test doubles shared by the host-side integration tests.

#![allow(dead_code)]

use pad_core::{AssetSource, AudioBackend, LoadError, Node};
use std::collections::HashSet;

#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    Play(usize),
    Stop(usize),
    Disconnect(usize),
    Connect(String, String),
    WetDry(f32),
    DelayTime(f32),
    DelayFeedback(f32),
}

/// Records every call; a sample counts as playing from `play` until `stop`
/// or `finish`.
#[derive(Default)]
pub struct RecordingBackend {
    pub calls: Vec<Call>,
    pub playing: HashSet<usize>,
}

impl RecordingBackend {
    pub fn finish(&mut self, sample: usize) {
        self.playing.remove(&sample);
    }

    pub fn plays_of(&self, sample: usize) -> usize {
        self.calls
            .iter()
            .filter(|c| **c == Call::Play(sample))
            .count()
    }

    pub fn routing_calls(&self) -> Vec<Call> {
        self.calls
            .iter()
            .filter(|c| matches!(c, Call::Connect(..) | Call::Disconnect(_)))
            .cloned()
            .collect()
    }
}

fn node_name(node: &Node<'_, usize>) -> String {
    match node {
        Node::Sample(s) => format!("sample{s}"),
        Node::Reverb => "reverb".into(),
        Node::Delay => "delay".into(),
        Node::Output => "output".into(),
    }
}

impl AudioBackend for RecordingBackend {
    type Sample = usize;

    fn play(&mut self, sample: &usize) {
        self.playing.insert(*sample);
        self.calls.push(Call::Play(*sample));
    }

    fn stop(&mut self, sample: &usize) {
        self.playing.remove(sample);
        self.calls.push(Call::Stop(*sample));
    }

    fn is_playing(&self, sample: &usize) -> bool {
        self.playing.contains(sample)
    }

    fn connect(&mut self, src: Node<'_, usize>, dst: Node<'_, usize>) {
        self.calls.push(Call::Connect(node_name(&src), node_name(&dst)));
    }

    fn disconnect(&mut self, sample: &usize) {
        self.calls.push(Call::Disconnect(*sample));
    }

    fn set_wet_dry(&mut self, wet_dry: f32) {
        self.calls.push(Call::WetDry(wet_dry));
    }

    fn set_delay_time(&mut self, seconds: f32) {
        self.calls.push(Call::DelayTime(seconds));
    }

    fn set_delay_feedback(&mut self, feedback: f32) {
        self.calls.push(Call::DelayFeedback(feedback));
    }
}

/// In-memory assets: sample handle `i` is just the index; listed indices fail.
pub struct MemorySource {
    pub missing_samples: Vec<usize>,
    pub missing_images: Vec<usize>,
}

impl AssetSource for MemorySource {
    type Sample = usize;
    type Image = String;

    fn load_sample(&mut self, index: usize) -> Result<usize, LoadError> {
        if self.missing_samples.contains(&index) {
            return Err(LoadError::Missing {
                index,
                path: format!("assets/audio/Sound{}.wav", index + 1),
            });
        }
        Ok(index)
    }

    fn load_image(&mut self, index: usize) -> Result<String, LoadError> {
        if self.missing_images.contains(&index) {
            return Err(LoadError::Decode {
                index,
                reason: "truncated png".into(),
            });
        }
        Ok(format!("image{}", index + 1))
    }
}
