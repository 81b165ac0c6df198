use crate::error::GraphGradError;
use crate::ops::{apply_op, BackwardContext, Op};
use crate::tensor::Tensor;
use crate::types::NdArray;
use ndarray::IxDyn;

/// Permutes the axes of a tensor. Without explicit axes the order is reversed.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TransposeOp {
    pub axes: Option<Vec<usize>>,
}

impl TransposeOp {
    pub fn new(axes: Option<Vec<usize>>) -> Self {
        TransposeOp { axes }
    }

    fn permutation(&self, rank: usize) -> Result<Vec<usize>, GraphGradError> {
        let axes = match &self.axes {
            Some(axes) => axes.clone(),
            None => (0..rank).rev().collect(),
        };
        if axes.len() != rank {
            return Err(GraphGradError::RankMismatch {
                operation: "Transpose".to_string(),
                expected: rank,
                actual: axes.len(),
            });
        }
        let mut seen = vec![false; rank];
        for &axis in &axes {
            if axis >= rank || seen[axis] {
                return Err(GraphGradError::InvalidAxis { axis, rank });
            }
            seen[axis] = true;
        }
        Ok(axes)
    }

    pub fn forward(&self, x: &NdArray) -> Result<NdArray, GraphGradError> {
        let axes = self.permutation(x.ndim())?;
        Ok(x.view().permuted_axes(IxDyn(&axes)).to_owned())
    }

    /// Applies the inverse permutation to the gradient.
    pub fn backward(&self, ctx: &BackwardContext<'_>) -> Result<Vec<NdArray>, GraphGradError> {
        let axes = self.permutation(ctx.x(0).ndim())?;
        let mut inverse = vec![0; axes.len()];
        for (i, &axis) in axes.iter().enumerate() {
            inverse[axis] = i;
        }
        Ok(vec![ctx.gy().view().permuted_axes(IxDyn(&inverse)).to_owned()])
    }
}

/// Reverses the axes of `x` (a matrix transpose for rank 2).
pub fn transpose_op(x: &Tensor) -> Result<Tensor, GraphGradError> {
    apply_op(Op::Transpose(TransposeOp::new(None)), &[x])
}

/// Permutes the axes of `x` by `axes`.
pub fn transpose_axes_op(x: &Tensor, axes: Vec<usize>) -> Result<Tensor, GraphGradError> {
    apply_op(Op::Transpose(TransposeOp::new(Some(axes))), &[x])
}

#[cfg(test)]
#[path = "transpose_test.rs"]
mod tests;
