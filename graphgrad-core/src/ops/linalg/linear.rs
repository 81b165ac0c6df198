use super::{matrix_product, matrix_product_grads};
use crate::error::GraphGradError;
use crate::ops::arithmetic::broadcast_binary;
use crate::ops::{apply_op, BackwardContext, Op};
use crate::tensor::broadcast_utils::sum_to;
use crate::tensor::Tensor;
use crate::types::NdArray;

/// Fused affine map `x · W + b`, with `b` broadcast over the rows.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LinearOp;

impl LinearOp {
    pub fn forward(&self, x: &NdArray, w: &NdArray, b: &NdArray) -> Result<NdArray, GraphGradError> {
        let xw = matrix_product(x, w, "Linear")?;
        broadcast_binary(&xw, b, |v, bias| v + bias)
    }

    pub fn backward(&self, ctx: &BackwardContext<'_>) -> Result<Vec<NdArray>, GraphGradError> {
        let gy = ctx.gy();
        let (gx, gw) = matrix_product_grads(ctx.x(0), ctx.x(1), gy, "Linear")?;
        let gb = sum_to(gy, ctx.x(2).shape())?;
        Ok(vec![gx, gw, gb])
    }
}

/// Computes `x · w + b`.
pub fn linear_op(x: &Tensor, w: &Tensor, b: &Tensor) -> Result<Tensor, GraphGradError> {
    apply_op(Op::Linear(LinearOp), &[x, w, b])
}

#[cfg(test)]
#[path = "linear_test.rs"]
mod tests;
