use crate::error::GraphGradError;
use crate::ops::{apply_op, BackwardContext, Op};
use crate::tensor::broadcast_utils::{broadcast_array, sum_to};
use crate::tensor::Tensor;
use crate::types::NdArray;

/// Sums a tensor down to a shape it could have been broadcast from.
#[derive(Debug, Clone, PartialEq)]
pub struct SumToOp {
    pub shape: Vec<usize>,
}

impl SumToOp {
    pub fn new(shape: Vec<usize>) -> Self {
        SumToOp { shape }
    }

    pub fn forward(&self, x: &NdArray) -> Result<NdArray, GraphGradError> {
        sum_to(x, &self.shape)
    }

    pub fn backward(&self, ctx: &BackwardContext<'_>) -> Result<Vec<NdArray>, GraphGradError> {
        Ok(vec![broadcast_array(ctx.gy(), ctx.x(0).shape())?])
    }
}

pub fn sum_to_op(x: &Tensor, shape: Vec<usize>) -> Result<Tensor, GraphGradError> {
    apply_op(Op::SumTo(SumToOp::new(shape)), &[x])
}

#[cfg(test)]
#[path = "sum_to_test.rs"]
mod tests;
