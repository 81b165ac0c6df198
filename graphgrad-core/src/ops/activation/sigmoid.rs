use crate::error::GraphGradError;
use crate::ops::{apply_op, BackwardContext, Op};
use crate::tensor::Tensor;
use crate::types::NdArray;
use ndarray::Zip;

/// Logistic sigmoid, computed as `0.5 * tanh(0.5 * x) + 0.5` so large inputs do not overflow.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SigmoidOp;

impl SigmoidOp {
    pub fn forward(&self, x: &NdArray) -> NdArray {
        x.mapv(|v| 0.5 * (0.5 * v).tanh() + 0.5)
    }

    pub fn backward(&self, ctx: &BackwardContext<'_>) -> Result<Vec<NdArray>, GraphGradError> {
        let gx = Zip::from(ctx.gy())
            .and(ctx.y())
            .map_collect(|&g, &y| g * y * (1.0 - y));
        Ok(vec![gx])
    }
}

pub fn sigmoid_op(x: &Tensor) -> Result<Tensor, GraphGradError> {
    apply_op(Op::Sigmoid(SigmoidOp), &[x])
}

#[cfg(test)]
#[path = "sigmoid_test.rs"]
mod tests;
