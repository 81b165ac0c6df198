use crate::error::GraphGradError;
use crate::ops::{apply_op, BackwardContext, Op};
use crate::tensor::Tensor;
use crate::types::NdArray;
use ndarray::Zip;

/// Rectified linear unit, `max(0, x)`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ReluOp;

impl ReluOp {
    pub fn forward(&self, x: &NdArray) -> NdArray {
        x.mapv(|v| v.max(0.0))
    }

    /// The gradient at exactly zero is taken as 0.
    pub fn backward(&self, ctx: &BackwardContext<'_>) -> Result<Vec<NdArray>, GraphGradError> {
        let gx = Zip::from(ctx.gy())
            .and(ctx.x(0))
            .map_collect(|&g, &x| if x > 0.0 { g } else { 0.0 });
        Ok(vec![gx])
    }
}

pub fn relu_op(x: &Tensor) -> Result<Tensor, GraphGradError> {
    apply_op(Op::Relu(ReluOp), &[x])
}

#[cfg(test)]
#[path = "relu_test.rs"]
mod tests;
