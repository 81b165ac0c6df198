use super::batch_size;
use crate::error::GraphGradError;
use crate::ops::arithmetic::broadcast_binary;
use crate::ops::{apply_op, scalar_of, BackwardContext, Op};
use crate::tensor::broadcast_utils::sum_to;
use crate::tensor::Tensor;
use crate::types::NdArray;

/// `sum((x0 - x1)^2) / N`, where `N` is the leading dimension of the difference.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MeanSquaredErrorOp;

impl MeanSquaredErrorOp {
    pub fn forward(&self, x0: &NdArray, x1: &NdArray) -> Result<NdArray, GraphGradError> {
        let diff = broadcast_binary(x0, x1, |a, b| a - b)?;
        let n = batch_size(&diff) as f64;
        let total = diff.iter().map(|d| d * d).sum::<f64>();
        Ok(NdArray::from_elem(Vec::<usize>::new(), total / n))
    }

    pub fn backward(&self, ctx: &BackwardContext<'_>) -> Result<Vec<NdArray>, GraphGradError> {
        let (x0, x1) = (ctx.x(0), ctx.x(1));
        let g = scalar_of(ctx.gy(), "MeanSquaredError backward")?;
        let diff = broadcast_binary(x0, x1, |a, b| a - b)?;
        let scale = 2.0 * g / batch_size(&diff) as f64;
        let gx0 = diff.mapv(|d| d * scale);
        let gx1 = gx0.mapv(|d| -d);
        Ok(vec![sum_to(&gx0, x0.shape())?, sum_to(&gx1, x1.shape())?])
    }
}

/// Mean squared error between a prediction and a target.
pub fn mean_squared_error(x0: &Tensor, x1: &Tensor) -> Result<Tensor, GraphGradError> {
    apply_op(Op::MeanSquaredError(MeanSquaredErrorOp), &[x0, x1])
}

#[cfg(test)]
#[path = "mse_test.rs"]
mod tests;
