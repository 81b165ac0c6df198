use crate::error::GraphGradError;
use crate::ops::{apply_op, BackwardContext, Op};
use crate::tensor::Tensor;
use crate::types::NdArray;
use ndarray::Zip;

/// Elementwise natural exponential.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExpOp;

impl ExpOp {
    pub fn forward(&self, x: &NdArray) -> NdArray {
        x.mapv(f64::exp)
    }

    /// Reuses the forward output: `d(e^x)/dx = e^x`.
    pub fn backward(&self, ctx: &BackwardContext<'_>) -> Result<Vec<NdArray>, GraphGradError> {
        let grad = Zip::from(ctx.gy()).and(ctx.y()).map_collect(|&g, &y| g * y);
        Ok(vec![grad])
    }
}

pub fn exp_op(x: &Tensor) -> Result<Tensor, GraphGradError> {
    apply_op(Op::Exp(ExpOp), &[x])
}

#[cfg(test)]
#[path = "exp_test.rs"]
mod tests;
