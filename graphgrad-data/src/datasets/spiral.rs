use super::array_dataset::ArrayDataset;
use super::traits::{Dataset, Sample};
use graphgrad_core::{GraphGradError, NdArray};
use ndarray::{Array1, Array2};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;

const TRAIN_SEED: u64 = 1984;
const TEST_SEED: u64 = 2020;

/// Three interleaved 2-D spirals, 100 points per class, labelled by class index.
///
/// Generation is deterministic: the training split and the test split each
/// use a fixed seed, and the samples are shuffled once after generation.
#[derive(Debug)]
pub struct Spiral {
    inner: ArrayDataset,
}

impl Spiral {
    pub const IN_SIZE: usize = 2;
    pub const CLASS_SIZE: usize = 3;
    pub const DATA_SIZE_PER_CLASS: usize = 100;

    pub fn new(train: bool) -> Result<Self, GraphGradError> {
        let seed = if train { TRAIN_SEED } else { TEST_SEED };
        let (data, label) = spiral_arrays(&mut StdRng::seed_from_u64(seed));
        Ok(Spiral {
            inner: ArrayDataset::new(data, label)?,
        })
    }

    /// Wraps the generated arrays so transforms can be attached.
    pub fn into_dataset(self) -> ArrayDataset {
        self.inner
    }

    pub fn data(&self) -> &NdArray {
        self.inner.data()
    }

    pub fn label(&self) -> &NdArray {
        self.inner.label()
    }
}

impl Dataset for Spiral {
    fn get(&self, index: usize) -> Result<Sample, GraphGradError> {
        self.inner.get(index)
    }

    fn len(&self) -> usize {
        self.inner.len()
    }
}

/// Point `i` of class `c`: radius `i / 100`, angle `4c + 4r + 0.2 * noise`.
fn spiral_arrays<R: Rng>(rng: &mut R) -> (NdArray, NdArray) {
    let per_class = Spiral::DATA_SIZE_PER_CLASS;
    let total = Spiral::CLASS_SIZE * per_class;
    let mut data = Array2::<f64>::zeros((total, Spiral::IN_SIZE));
    let mut label = Array1::<f64>::zeros(total);

    for class in 0..Spiral::CLASS_SIZE {
        for i in 0..per_class {
            let radius = i as f64 / per_class as f64;
            let noise: f64 = rng.sample(StandardNormal);
            let theta = 4.0 * class as f64 + 4.0 * radius + 0.2 * noise;
            let row = class * per_class + i;
            data[[row, 0]] = radius * theta.cos();
            data[[row, 1]] = radius * theta.sin();
            label[row] = class as f64;
        }
    }

    let mut order: Vec<usize> = (0..total).collect();
    order.shuffle(rng);
    let data = data.select(ndarray::Axis(0), &order).into_dyn();
    let label = label.select(ndarray::Axis(0), &order).into_dyn();
    (data, label)
}

#[cfg(test)]
#[path = "spiral_test.rs"]
mod tests;
