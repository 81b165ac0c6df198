use super::broadcast_binary;
use crate::error::GraphGradError;
use crate::ops::{apply_op, BackwardContext, Op};
use crate::tensor::broadcast_utils::sum_to;
use crate::tensor::Tensor;
use crate::types::NdArray;

/// Elementwise subtraction with broadcasting.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SubOp;

impl SubOp {
    pub fn forward(&self, a: &NdArray, b: &NdArray) -> Result<NdArray, GraphGradError> {
        broadcast_binary(a, b, |x, y| x - y)
    }

    pub fn backward(&self, ctx: &BackwardContext<'_>) -> Result<Vec<NdArray>, GraphGradError> {
        let gy = ctx.gy();
        let neg_gy = gy.mapv(|g| -g);
        Ok(vec![
            sum_to(gy, ctx.x(0).shape())?,
            sum_to(&neg_gy, ctx.x(1).shape())?,
        ])
    }
}

/// Computes `a - b`, broadcasting as needed.
pub fn sub_op(a: &Tensor, b: &Tensor) -> Result<Tensor, GraphGradError> {
    apply_op(Op::Sub(SubOp), &[a, b])
}

#[cfg(test)]
#[path = "sub_test.rs"]
mod tests;
