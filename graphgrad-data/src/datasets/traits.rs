use graphgrad_core::{GraphGradError, NdArray};

/// One `(data, label)` pair.
pub type Sample = (NdArray, NdArray);

/// Represents a dataset that can be accessed by index.
pub trait Dataset {
    /// Returns the sample at the given index.
    ///
    /// # Errors
    ///
    /// Returns `GraphGradError::IndexOutOfBounds` if `index >= len()`.
    fn get(&self, index: usize) -> Result<Sample, GraphGradError>;

    /// Returns the total number of samples in the dataset.
    fn len(&self) -> usize;

    /// Checks if the dataset is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
