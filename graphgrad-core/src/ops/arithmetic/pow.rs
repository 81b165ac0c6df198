use crate::error::GraphGradError;
use crate::ops::{apply_op, BackwardContext, Op};
use crate::tensor::Tensor;
use crate::types::NdArray;
use ndarray::Zip;

/// Raises every element to an integer power.
#[derive(Debug, Clone, PartialEq)]
pub struct PowOp {
    pub exponent: i32,
}

impl PowOp {
    pub fn new(exponent: i32) -> Self {
        PowOp { exponent }
    }

    pub fn forward(&self, x: &NdArray) -> NdArray {
        let c = self.exponent;
        x.mapv(|v| v.powi(c))
    }

    /// `c * x^(c-1) * gy`.
    pub fn backward(&self, ctx: &BackwardContext<'_>) -> Result<Vec<NdArray>, GraphGradError> {
        let c = self.exponent;
        let grad = Zip::from(ctx.gy())
            .and(ctx.x(0))
            .map_collect(|&g, &v| g * f64::from(c) * v.powi(c - 1));
        Ok(vec![grad])
    }
}

/// Computes `x^exponent` elementwise.
pub fn pow_op(x: &Tensor, exponent: i32) -> Result<Tensor, GraphGradError> {
    apply_op(Op::Pow(PowOp::new(exponent)), &[x])
}

#[cfg(test)]
#[path = "pow_test.rs"]
mod tests;
