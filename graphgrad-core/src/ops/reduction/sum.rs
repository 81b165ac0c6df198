use crate::error::GraphGradError;
use crate::ops::view::reshape_array;
use crate::ops::{apply_op, BackwardContext, Op};
use crate::tensor::broadcast_utils::{broadcast_array, sum_axes};
use crate::tensor::Tensor;
use crate::types::NdArray;

/// Sum over `axes` (every axis when `None`).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SumOp {
    pub axes: Option<Vec<usize>>,
    pub keep_dims: bool,
}

impl SumOp {
    pub fn new(axes: Option<Vec<usize>>, keep_dims: bool) -> Self {
        SumOp { axes, keep_dims }
    }

    pub fn forward(&self, x: &NdArray) -> Result<NdArray, GraphGradError> {
        sum_axes(x, self.axes.as_deref(), self.keep_dims)
    }

    /// Reinserts the reduced axes with size 1, then broadcasts back to the input shape.
    pub fn backward(&self, ctx: &BackwardContext<'_>) -> Result<Vec<NdArray>, GraphGradError> {
        let x_shape = ctx.x(0).shape();
        let gy = ctx.gy();
        let kept_shape: Vec<usize> = match &self.axes {
            None => vec![1; x_shape.len()],
            Some(axes) => x_shape
                .iter()
                .enumerate()
                .map(|(axis, &dim)| if axes.contains(&axis) { 1 } else { dim })
                .collect(),
        };
        let gy = reshape_array(gy, &kept_shape)?;
        Ok(vec![broadcast_array(&gy, x_shape)?])
    }
}

/// Sums every element of `x` into a rank-0 tensor.
pub fn sum_op(x: &Tensor) -> Result<Tensor, GraphGradError> {
    apply_op(Op::Sum(SumOp::default()), &[x])
}

pub fn sum_axes_op(x: &Tensor, axes: &[usize], keep_dims: bool) -> Result<Tensor, GraphGradError> {
    apply_op(Op::Sum(SumOp::new(Some(axes.to_vec()), keep_dims)), &[x])
}

#[cfg(test)]
#[path = "sum_test.rs"]
mod tests;
