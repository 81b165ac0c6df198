use super::broadcast_binary;
use crate::error::GraphGradError;
use crate::ops::{apply_op, BackwardContext, Op};
use crate::tensor::broadcast_utils::sum_to;
use crate::tensor::Tensor;
use crate::types::NdArray;

/// Elementwise division with broadcasting.
///
/// Division by zero follows IEEE semantics (`inf` or `NaN`).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DivOp;

impl DivOp {
    pub fn forward(&self, a: &NdArray, b: &NdArray) -> Result<NdArray, GraphGradError> {
        broadcast_binary(a, b, |x, y| x / y)
    }

    /// `d(a/b)/da = 1/b`, `d(a/b)/db = -a/b²`.
    pub fn backward(&self, ctx: &BackwardContext<'_>) -> Result<Vec<NdArray>, GraphGradError> {
        let (a, b, gy) = (ctx.x(0), ctx.x(1), ctx.gy());
        let grad_a = broadcast_binary(gy, b, |g, y| g / y)?;
        let a_over_b2 = broadcast_binary(a, b, |x, y| x / (y * y))?;
        let grad_b = broadcast_binary(gy, &a_over_b2, |g, q| -g * q)?;
        Ok(vec![sum_to(&grad_a, a.shape())?, sum_to(&grad_b, b.shape())?])
    }
}

/// Computes `a / b`, broadcasting as needed.
pub fn div_op(a: &Tensor, b: &Tensor) -> Result<Tensor, GraphGradError> {
    apply_op(Op::Div(DivOp), &[a, b])
}

#[cfg(test)]
#[path = "div_test.rs"]
mod tests;
