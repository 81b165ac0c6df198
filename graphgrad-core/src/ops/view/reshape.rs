use super::reshape_array;
use crate::error::GraphGradError;
use crate::ops::{apply_op, BackwardContext, Op};
use crate::tensor::Tensor;
use crate::types::NdArray;

#[derive(Debug, Clone, PartialEq)]
pub struct ReshapeOp {
    pub shape: Vec<usize>,
}

impl ReshapeOp {
    pub fn new(shape: Vec<usize>) -> Self {
        ReshapeOp { shape }
    }

    pub fn forward(&self, x: &NdArray) -> Result<NdArray, GraphGradError> {
        reshape_array(x, &self.shape)
    }

    pub fn backward(&self, ctx: &BackwardContext<'_>) -> Result<Vec<NdArray>, GraphGradError> {
        Ok(vec![reshape_array(ctx.gy(), ctx.x(0).shape())?])
    }
}

/// Reshapes `x` to `shape` (row-major order, same element count).
pub fn reshape_op(x: &Tensor, shape: Vec<usize>) -> Result<Tensor, GraphGradError> {
    apply_op(Op::Reshape(ReshapeOp::new(shape)), &[x])
}

#[cfg(test)]
#[path = "reshape_test.rs"]
mod tests;
