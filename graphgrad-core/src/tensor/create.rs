// src/tensor/create.rs

use crate::tensor::Tensor;
use crate::types::NdArray;
use ndarray::IxDyn;
use rand::Rng;
use rand_distr::StandardNormal;

/// Creates a new leaf tensor filled with zeros with the specified shape.
pub fn zeros(shape: &[usize]) -> Tensor {
    Tensor::new(NdArray::zeros(IxDyn(shape)))
}

/// Creates a new leaf tensor filled with ones with the specified shape.
pub fn ones(shape: &[usize]) -> Tensor {
    Tensor::new(NdArray::ones(IxDyn(shape)))
}

/// Creates a new leaf tensor filled with `value`.
pub fn full(shape: &[usize], value: f64) -> Tensor {
    Tensor::new(NdArray::from_elem(IxDyn(shape), value))
}

/// Creates a zero-filled leaf tensor with the same shape as `tensor`.
pub fn zeros_like(tensor: &Tensor) -> Tensor {
    zeros(&tensor.shape())
}

/// Creates a one-filled leaf tensor with the same shape as `tensor`.
pub fn ones_like(tensor: &Tensor) -> Tensor {
    ones(&tensor.shape())
}

/// Creates a leaf tensor with elements drawn from the standard normal distribution.
pub fn randn<R: Rng + ?Sized>(shape: &[usize], rng: &mut R) -> Tensor {
    Tensor::new(randn_array(shape, rng))
}

pub(crate) fn randn_array<R: Rng + ?Sized>(shape: &[usize], rng: &mut R) -> NdArray {
    NdArray::from_shape_simple_fn(IxDyn(shape), || rng.sample::<f64, _>(StandardNormal))
}

#[cfg(test)]
#[path = "create_test.rs"]
mod tests;
