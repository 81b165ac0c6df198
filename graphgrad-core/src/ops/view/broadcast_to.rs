use crate::error::GraphGradError;
use crate::ops::{apply_op, BackwardContext, Op};
use crate::tensor::broadcast_utils::{broadcast_array, sum_to};
use crate::tensor::Tensor;
use crate::types::NdArray;

/// Explicit broadcast. Its gradient is the inverse reduction.
#[derive(Debug, Clone, PartialEq)]
pub struct BroadcastToOp {
    pub shape: Vec<usize>,
}

impl BroadcastToOp {
    pub fn new(shape: Vec<usize>) -> Self {
        BroadcastToOp { shape }
    }

    pub fn forward(&self, x: &NdArray) -> Result<NdArray, GraphGradError> {
        broadcast_array(x, &self.shape)
    }

    pub fn backward(&self, ctx: &BackwardContext<'_>) -> Result<Vec<NdArray>, GraphGradError> {
        Ok(vec![sum_to(ctx.gy(), ctx.x(0).shape())?])
    }
}

pub fn broadcast_to_op(x: &Tensor, shape: Vec<usize>) -> Result<Tensor, GraphGradError> {
    apply_op(Op::BroadcastTo(BroadcastToOp::new(shape)), &[x])
}

#[cfg(test)]
#[path = "broadcast_to_test.rs"]
mod tests;
