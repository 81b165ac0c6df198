use crate::error::GraphGradError;
use crate::ops::{apply_op, BackwardContext, Op};
use crate::tensor::Tensor;
use crate::types::NdArray;
use ndarray::Zip;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SquareOp;

impl SquareOp {
    pub fn forward(&self, x: &NdArray) -> NdArray {
        x.mapv(|v| v * v)
    }

    pub fn backward(&self, ctx: &BackwardContext<'_>) -> Result<Vec<NdArray>, GraphGradError> {
        let grad = Zip::from(ctx.gy())
            .and(ctx.x(0))
            .map_collect(|&g, &v| 2.0 * v * g);
        Ok(vec![grad])
    }
}

/// Squares a tensor elementwise.
pub fn square_op(x: &Tensor) -> Result<Tensor, GraphGradError> {
    apply_op(Op::Square(SquareOp), &[x])
}

#[cfg(test)]
#[path = "square_test.rs"]
mod tests;
