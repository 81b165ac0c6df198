//! In-memory datasets, index samplers and a batching loader for GraphGrad.

pub mod dataloader;
pub mod datasets;
pub mod samplers;

// Re-export main components
pub use dataloader::DataLoader;
pub use datasets::{ArrayDataset, Dataset, Sample, Spiral};
pub use samplers::{RandomSampler, Sampler, SequentialSampler};
