use crate::error::GraphGradError;
use crate::ops::{apply_op, BackwardContext, Op};
use crate::tensor::Tensor;
use crate::types::NdArray;
use ndarray::Axis;

/// Gathers rows along axis 0. Indices may repeat.
#[derive(Debug, Clone, PartialEq)]
pub struct GetItemOp {
    pub indices: Vec<usize>,
}

impl GetItemOp {
    pub fn new(indices: Vec<usize>) -> Self {
        GetItemOp { indices }
    }

    fn validate(&self, x: &NdArray) -> Result<(), GraphGradError> {
        if x.ndim() == 0 {
            return Err(GraphGradError::RankMismatch {
                operation: "GetItem".to_string(),
                expected: 1,
                actual: 0,
            });
        }
        let rows = x.shape()[0];
        if let Some(&bad) = self.indices.iter().find(|&&index| index >= rows) {
            return Err(GraphGradError::IndexOutOfBounds {
                index: vec![bad],
                shape: x.shape().to_vec(),
            });
        }
        Ok(())
    }

    pub fn forward(&self, x: &NdArray) -> Result<NdArray, GraphGradError> {
        self.validate(x)?;
        Ok(x.select(Axis(0), &self.indices))
    }

    /// Scatter-adds the gradient rows back, so repeated indices accumulate.
    pub fn backward(&self, ctx: &BackwardContext<'_>) -> Result<Vec<NdArray>, GraphGradError> {
        let x = ctx.x(0);
        self.validate(x)?;
        let gy = ctx.gy();
        let mut gx = NdArray::zeros(x.raw_dim());
        for (i, &index) in self.indices.iter().enumerate() {
            let mut row = gx.index_axis_mut(Axis(0), index);
            row += &gy.index_axis(Axis(0), i);
        }
        Ok(vec![gx])
    }
}

/// Selects rows `indices` of `x` along its first axis.
pub fn get_item_op(x: &Tensor, indices: Vec<usize>) -> Result<Tensor, GraphGradError> {
    apply_op(Op::GetItem(GetItemOp::new(indices)), &[x])
}

#[cfg(test)]
#[path = "get_item_test.rs"]
mod tests;
