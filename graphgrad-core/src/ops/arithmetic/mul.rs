use super::broadcast_binary;
use crate::error::GraphGradError;
use crate::ops::{apply_op, BackwardContext, Op};
use crate::tensor::broadcast_utils::sum_to;
use crate::tensor::Tensor;
use crate::types::NdArray;

/// Elementwise multiplication with broadcasting.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MulOp;

impl MulOp {
    pub fn forward(&self, a: &NdArray, b: &NdArray) -> Result<NdArray, GraphGradError> {
        broadcast_binary(a, b, |x, y| x * y)
    }

    /// Each input's gradient is the upstream gradient times the other input.
    pub fn backward(&self, ctx: &BackwardContext<'_>) -> Result<Vec<NdArray>, GraphGradError> {
        let (a, b, gy) = (ctx.x(0), ctx.x(1), ctx.gy());
        let grad_a = broadcast_binary(gy, b, |g, y| g * y)?;
        let grad_b = broadcast_binary(gy, a, |g, x| g * x)?;
        Ok(vec![sum_to(&grad_a, a.shape())?, sum_to(&grad_b, b.shape())?])
    }
}

/// Multiplies two tensors elementwise, broadcasting as needed.
pub fn mul_op(a: &Tensor, b: &Tensor) -> Result<Tensor, GraphGradError> {
    apply_op(Op::Mul(MulOp), &[a, b])
}

#[cfg(test)]
#[path = "mul_test.rs"]
mod tests;
