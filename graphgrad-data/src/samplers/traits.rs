use std::fmt::Debug;

/// Defines the order in which a loader visits the positions of its index set.
pub trait Sampler: Debug {
    /// Returns one pass over `0..dataset_len`, each position exactly once.
    ///
    /// Takes `&mut self` so stateful samplers can advance their generator
    /// between passes.
    fn iter(&mut self, dataset_len: usize) -> Box<dyn Iterator<Item = usize>>;

    /// Number of positions a single pass yields.
    fn len(&self, dataset_len: usize) -> usize;
}
