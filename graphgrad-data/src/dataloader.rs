//! Batch loading over a [`Dataset`].
//!
//! A loader owns an index set (every `stride`-th sample of the dataset),
//! visits it in the order its [`Sampler`] chooses and stacks the samples of
//! each batch along a new leading axis.

use crate::datasets::Dataset;
use crate::samplers::{RandomSampler, Sampler, SequentialSampler};
use graphgrad_core::{GraphGradError, NdArray};
use ndarray::{ArrayView, Axis, IxDyn};

/// One collated batch: data and labels, both with the batch on axis 0.
pub type Batch = (NdArray, NdArray);

pub struct DataLoader<D: Dataset> {
    dataset: D,
    batch_size: usize,
    shuffle: bool,
    stride: usize,
    sampler: Box<dyn Sampler>,
    indices: Vec<usize>,
    cursor: usize,
}

impl<D: Dataset> DataLoader<D> {
    /// # Errors
    ///
    /// `InvalidConfiguration` if `batch_size` is zero.
    pub fn new(dataset: D, batch_size: usize, shuffle: bool) -> Result<Self, GraphGradError> {
        if batch_size == 0 {
            return Err(GraphGradError::InvalidConfiguration(
                "DataLoader batch_size must be positive".to_string(),
            ));
        }
        let sampler: Box<dyn Sampler> = if shuffle {
            Box::new(RandomSampler::new())
        } else {
            Box::new(SequentialSampler::new())
        };
        let mut loader = DataLoader {
            dataset,
            batch_size,
            shuffle,
            stride: 1,
            sampler,
            indices: Vec::new(),
            cursor: 0,
        };
        loader.reset();
        Ok(loader)
    }

    /// Keeps only every `stride`-th sample.
    ///
    /// # Errors
    ///
    /// `InvalidConfiguration` if `stride` is zero or does not divide the
    /// dataset size.
    pub fn with_stride(mut self, stride: usize) -> Result<Self, GraphGradError> {
        if stride == 0 || self.dataset.len() % stride != 0 {
            return Err(GraphGradError::InvalidConfiguration(format!(
                "DataLoader stride {} must be positive and divide the dataset size {}",
                stride,
                self.dataset.len()
            )));
        }
        self.stride = stride;
        self.reset();
        Ok(self)
    }

    /// Makes the shuffled order reproducible. No effect without shuffling.
    pub fn with_seed(mut self, seed: u64) -> Self {
        if self.shuffle {
            self.sampler = Box::new(RandomSampler::with_seed(seed));
            self.reset();
        }
        self
    }

    /// Replaces the index order strategy.
    pub fn with_sampler(mut self, sampler: impl Sampler + 'static) -> Self {
        self.sampler = Box::new(sampler);
        self.reset();
        self
    }

    /// Rebuilds the index set for a new pass and rewinds the iterator.
    pub fn reset(&mut self) {
        let base: Vec<usize> = (0..self.dataset.len()).step_by(self.stride).collect();
        self.indices = self.sampler.iter(base.len()).map(|pos| base[pos]).collect();
        self.cursor = 0;
        log::debug!(
            "DataLoader reset: {} indices, batch_size {}, stride {}",
            self.indices.len(),
            self.batch_size,
            self.stride
        );
    }

    pub fn dataset(&self) -> &D {
        &self.dataset
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Dataset indices of the current pass, in visiting order.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Batches per pass. The last one may be shorter than `batch_size`.
    pub fn max_iteration(&self) -> usize {
        (self.indices.len() + self.batch_size - 1) / self.batch_size
    }

    /// Collates batch `i` of the current pass.
    ///
    /// Fetching the last batch starts a new pass, so a shuffling loader
    /// produces a fresh order for the next epoch.
    pub fn batch_at(&mut self, i: usize) -> Result<Batch, GraphGradError> {
        let max_iteration = self.max_iteration();
        if i >= max_iteration {
            return Err(GraphGradError::IndexOutOfBounds {
                index: vec![i],
                shape: vec![max_iteration],
            });
        }
        let start = i * self.batch_size;
        let end = (start + self.batch_size).min(self.indices.len());
        let samples = self.indices[start..end]
            .iter()
            .map(|&index| self.dataset.get(index))
            .collect::<Result<Vec<_>, _>>()?;

        let data: Vec<&NdArray> = samples.iter().map(|(x, _)| x).collect();
        let label: Vec<&NdArray> = samples.iter().map(|(_, t)| t).collect();
        let batch = (collate(&data)?, collate(&label)?);

        if i + 1 == max_iteration {
            self.reset();
        }
        Ok(batch)
    }
}

/// Stacks same-shaped arrays along a new leading axis.
fn collate(items: &[&NdArray]) -> Result<NdArray, GraphGradError> {
    let views: Vec<ArrayView<'_, f64, IxDyn>> = items.iter().map(|a| a.view()).collect();
    ndarray::stack(Axis(0), &views).map_err(|_| GraphGradError::ShapeMismatch {
        expected: items.first().map(|a| a.shape().to_vec()).unwrap_or_default(),
        actual: items
            .iter()
            .map(|a| a.shape())
            .find(|shape| Some(*shape) != items.first().map(|a| a.shape()))
            .map(|shape| shape.to_vec())
            .unwrap_or_default(),
        operation: "DataLoader collate".to_string(),
    })
}

/// Yields the batches of one pass, then `None` once. The following call
/// starts the next pass, so `loader.by_ref()` can be looped over per epoch.
impl<D: Dataset> Iterator for DataLoader<D> {
    type Item = Result<Batch, GraphGradError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor >= self.max_iteration() {
            self.cursor = 0;
            return None;
        }
        let i = self.cursor;
        let batch = self.batch_at(i);
        self.cursor = i + 1;
        Some(batch)
    }
}

#[cfg(test)]
#[path = "dataloader_test.rs"]
mod tests;
