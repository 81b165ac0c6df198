use super::{matrix_product, matrix_product_grads};
use crate::error::GraphGradError;
use crate::ops::{apply_op, BackwardContext, Op};
use crate::tensor::Tensor;
use crate::types::NdArray;

/// Matrix product of two rank-2 tensors.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MatmulOp;

impl MatmulOp {
    pub fn forward(&self, x: &NdArray, w: &NdArray) -> Result<NdArray, GraphGradError> {
        matrix_product(x, w, "Matmul")
    }

    /// `gx = gy · wᵀ`, `gw = xᵀ · gy`.
    pub fn backward(&self, ctx: &BackwardContext<'_>) -> Result<Vec<NdArray>, GraphGradError> {
        let (gx, gw) = matrix_product_grads(ctx.x(0), ctx.x(1), ctx.gy(), "Matmul")?;
        Ok(vec![gx, gw])
    }
}

/// Computes `x · w` for `[n, k] x [k, m]` tensors.
pub fn matmul_op(x: &Tensor, w: &Tensor) -> Result<Tensor, GraphGradError> {
    apply_op(Op::Matmul(MatmulOp), &[x, w])
}

#[cfg(test)]
#[path = "matmul_test.rs"]
mod tests;
