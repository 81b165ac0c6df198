use super::broadcast_binary;
use crate::error::GraphGradError;
use crate::ops::{apply_op, BackwardContext, Op};
use crate::tensor::broadcast_utils::sum_to;
use crate::tensor::Tensor;
use crate::types::NdArray;

/// Elementwise addition with broadcasting.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AddOp;

impl AddOp {
    pub fn forward(&self, a: &NdArray, b: &NdArray) -> Result<NdArray, GraphGradError> {
        broadcast_binary(a, b, |x, y| x + y)
    }

    pub fn backward(&self, ctx: &BackwardContext<'_>) -> Result<Vec<NdArray>, GraphGradError> {
        let gy = ctx.gy();
        Ok(vec![
            sum_to(gy, ctx.x(0).shape())?,
            sum_to(gy, ctx.x(1).shape())?,
        ])
    }
}

/// Adds two tensors, broadcasting as needed.
pub fn add_op(a: &Tensor, b: &Tensor) -> Result<Tensor, GraphGradError> {
    apply_op(Op::Add(AddOp), &[a, b])
}

#[cfg(test)]
#[path = "add_test.rs"]
mod tests;
