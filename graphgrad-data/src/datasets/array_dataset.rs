use super::traits::{Dataset, Sample};
use graphgrad_core::{GraphGradError, NdArray};
use ndarray::Axis;
use std::fmt;

/// A function applied to one sample's data or label on access.
pub type Transform = Box<dyn Fn(NdArray) -> NdArray>;

/// A dataset backed by two arrays whose first axis indexes the samples.
///
/// Transforms run in insertion order on every `get`; the stored arrays are
/// never modified.
pub struct ArrayDataset {
    data: NdArray,
    label: NdArray,
    data_transforms: Vec<Transform>,
    label_transforms: Vec<Transform>,
}

impl ArrayDataset {
    /// # Errors
    ///
    /// `RankMismatch` if either array is rank 0, `ShapeMismatch` if the first
    /// dimensions differ.
    pub fn new(data: NdArray, label: NdArray) -> Result<Self, GraphGradError> {
        for array in [&data, &label] {
            if array.ndim() == 0 {
                return Err(GraphGradError::RankMismatch {
                    operation: "ArrayDataset".to_string(),
                    expected: 1,
                    actual: 0,
                });
            }
        }
        if data.shape()[0] != label.shape()[0] {
            return Err(GraphGradError::ShapeMismatch {
                expected: vec![data.shape()[0]],
                actual: vec![label.shape()[0]],
                operation: "ArrayDataset".to_string(),
            });
        }
        Ok(ArrayDataset {
            data,
            label,
            data_transforms: Vec::new(),
            label_transforms: Vec::new(),
        })
    }

    pub fn with_data_transform(mut self, transform: impl Fn(NdArray) -> NdArray + 'static) -> Self {
        self.data_transforms.push(Box::new(transform));
        self
    }

    pub fn with_label_transform(mut self, transform: impl Fn(NdArray) -> NdArray + 'static) -> Self {
        self.label_transforms.push(Box::new(transform));
        self
    }

    pub fn data(&self) -> &NdArray {
        &self.data
    }

    pub fn label(&self) -> &NdArray {
        &self.label
    }
}

impl Dataset for ArrayDataset {
    fn get(&self, index: usize) -> Result<Sample, GraphGradError> {
        if index >= self.len() {
            return Err(GraphGradError::IndexOutOfBounds {
                index: vec![index],
                shape: self.data.shape().to_vec(),
            });
        }
        let data = self
            .data_transforms
            .iter()
            .fold(self.data.index_axis(Axis(0), index).to_owned(), |x, f| f(x));
        let label = self
            .label_transforms
            .iter()
            .fold(self.label.index_axis(Axis(0), index).to_owned(), |t, f| f(t));
        Ok((data, label))
    }

    fn len(&self) -> usize {
        self.data.shape()[0]
    }
}

impl fmt::Debug for ArrayDataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArrayDataset")
            .field("data_shape", &self.data.shape())
            .field("label_shape", &self.label.shape())
            .field("data_transforms", &self.data_transforms.len())
            .field("label_transforms", &self.label_transforms.len())
            .finish()
    }
}

#[cfg(test)]
#[path = "array_dataset_test.rs"]
mod tests;
