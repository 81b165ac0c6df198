// src/tensor/op_methods.rs

use crate::error::GraphGradError;
use crate::ops::activation::{relu_op, sigmoid_op};
use crate::ops::arithmetic::{add_op, div_op, mul_op, neg_op, pow_op, square_op, sub_op};
use crate::ops::linalg::{linear_op, matmul_op, transpose_axes_op, transpose_op};
use crate::ops::loss::{mean_squared_error, softmax_cross_entropy};
use crate::ops::math_elem::exp_op;
use crate::ops::reduction::{sum_axes_op, sum_op};
use crate::ops::view::{broadcast_to_op, get_item_op, reshape_op, sum_to_op};
use crate::tensor::Tensor;

/// Method forms of the built-in operations. Every call records a node when
/// graph mode is enabled.
impl Tensor {
    pub fn add(&self, other: &Tensor) -> Result<Tensor, GraphGradError> {
        add_op(self, other)
    }

    pub fn sub(&self, other: &Tensor) -> Result<Tensor, GraphGradError> {
        sub_op(self, other)
    }

    pub fn mul(&self, other: &Tensor) -> Result<Tensor, GraphGradError> {
        mul_op(self, other)
    }

    pub fn div(&self, other: &Tensor) -> Result<Tensor, GraphGradError> {
        div_op(self, other)
    }

    pub fn neg(&self) -> Result<Tensor, GraphGradError> {
        neg_op(self)
    }

    pub fn pow(&self, exponent: i32) -> Result<Tensor, GraphGradError> {
        pow_op(self, exponent)
    }

    pub fn square(&self) -> Result<Tensor, GraphGradError> {
        square_op(self)
    }

    pub fn exp(&self) -> Result<Tensor, GraphGradError> {
        exp_op(self)
    }

    /// Adds a constant. The scalar becomes a rank-0 leaf and broadcasts.
    pub fn add_scalar(&self, scalar: f64) -> Result<Tensor, GraphGradError> {
        add_op(self, &Tensor::scalar(scalar))
    }

    pub fn mul_scalar(&self, scalar: f64) -> Result<Tensor, GraphGradError> {
        mul_op(self, &Tensor::scalar(scalar))
    }

    pub fn matmul(&self, other: &Tensor) -> Result<Tensor, GraphGradError> {
        matmul_op(self, other)
    }

    /// `self · weight + bias`.
    pub fn linear(&self, weight: &Tensor, bias: &Tensor) -> Result<Tensor, GraphGradError> {
        linear_op(self, weight, bias)
    }

    pub fn reshape(&self, shape: Vec<usize>) -> Result<Tensor, GraphGradError> {
        reshape_op(self, shape)
    }

    /// Reverses the axes.
    pub fn transpose(&self) -> Result<Tensor, GraphGradError> {
        transpose_op(self)
    }

    pub fn transpose_axes(&self, axes: Vec<usize>) -> Result<Tensor, GraphGradError> {
        transpose_axes_op(self, axes)
    }

    pub fn broadcast_to(&self, shape: Vec<usize>) -> Result<Tensor, GraphGradError> {
        broadcast_to_op(self, shape)
    }

    pub fn sum_to(&self, shape: Vec<usize>) -> Result<Tensor, GraphGradError> {
        sum_to_op(self, shape)
    }

    /// Sums every element into a rank-0 tensor.
    pub fn sum(&self) -> Result<Tensor, GraphGradError> {
        sum_op(self)
    }

    pub fn sum_axes(&self, axes: &[usize], keep_dims: bool) -> Result<Tensor, GraphGradError> {
        sum_axes_op(self, axes, keep_dims)
    }

    pub fn sigmoid(&self) -> Result<Tensor, GraphGradError> {
        sigmoid_op(self)
    }

    pub fn relu(&self) -> Result<Tensor, GraphGradError> {
        relu_op(self)
    }

    /// Selects rows along the first axis.
    pub fn get_item(&self, indices: Vec<usize>) -> Result<Tensor, GraphGradError> {
        get_item_op(self, indices)
    }

    pub fn mse(&self, target: &Tensor) -> Result<Tensor, GraphGradError> {
        mean_squared_error(self, target)
    }

    pub fn softmax_cross_entropy(&self, label: &Tensor) -> Result<Tensor, GraphGradError> {
        softmax_cross_entropy(self, label)
    }
}
