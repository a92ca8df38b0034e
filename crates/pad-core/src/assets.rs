//! Per-pad sample and image slots, filled once before interaction starts.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LoadError {
    #[error("asset {index} not found at {path}")]
    Missing { index: usize, path: String },
    #[error("asset {index} could not be decoded: {reason}")]
    Decode { index: usize, reason: String },
}

impl LoadError {
    pub fn index(&self) -> usize {
        match self {
            LoadError::Missing { index, .. } | LoadError::Decode { index, .. } => *index,
        }
    }
}

/// Synchronous asset provider. Front-ends that load asynchronously collect
/// their results and use [`AssetBank::from_results`] instead.
pub trait AssetSource {
    type Sample;
    type Image;

    fn load_sample(&mut self, index: usize) -> Result<Self::Sample, LoadError>;
    fn load_image(&mut self, index: usize) -> Result<Self::Image, LoadError>;
}

/// Immutable pad index → asset mapping. A failed load leaves an empty slot.
#[derive(Clone, Debug)]
pub struct AssetBank<T> {
    slots: Vec<Option<T>>,
}

pub type SampleBank<S> = AssetBank<S>;
pub type ImageBank<I> = AssetBank<I>;

impl<T> Default for AssetBank<T> {
    fn default() -> Self {
        Self { slots: Vec::new() }
    }
}

impl<T> AssetBank<T> {
    /// Build a bank from per-index results, in index order. Failures are
    /// returned alongside so the caller can report them once.
    pub fn from_results<It>(results: It) -> (Self, Vec<LoadError>)
    where
        It: IntoIterator<Item = Result<T, LoadError>>,
    {
        let mut failures = Vec::new();
        let slots = results
            .into_iter()
            .map(|r| r.map_err(|e| failures.push(e)).ok())
            .collect();
        (Self { slots }, failures)
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn loaded_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }
}

impl<S> AssetBank<S> {
    pub fn load_samples<A>(source: &mut A, count: usize) -> (Self, Vec<LoadError>)
    where
        A: AssetSource<Sample = S>,
    {
        let (bank, failures) = Self::from_results((0..count).map(|i| source.load_sample(i)));
        for e in &failures {
            log::error!("[assets] sample load failed, pad stays silent: {}", e);
        }
        (bank, failures)
    }

    pub fn load_images<A>(source: &mut A, count: usize) -> (Self, Vec<LoadError>)
    where
        A: AssetSource<Image = S>,
    {
        let (bank, failures) = Self::from_results((0..count).map(|i| source.load_image(i)));
        for e in &failures {
            log::warn!("[assets] image load failed, drawing placeholder: {}", e);
        }
        (bank, failures)
    }
}
