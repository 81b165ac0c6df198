use crate::error::GraphGradError;
use crate::ops::{apply_op, BackwardContext, Op};
use crate::tensor::Tensor;
use crate::types::NdArray;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct NegOp;

impl NegOp {
    pub fn forward(&self, x: &NdArray) -> NdArray {
        x.mapv(|v| -v)
    }

    pub fn backward(&self, ctx: &BackwardContext<'_>) -> Result<Vec<NdArray>, GraphGradError> {
        Ok(vec![ctx.gy().mapv(|g| -g)])
    }
}

/// Negates a tensor.
pub fn neg_op(x: &Tensor) -> Result<Tensor, GraphGradError> {
    apply_op(Op::Neg(NegOp), &[x])
}

#[cfg(test)]
#[path = "neg_test.rs"]
mod tests;
