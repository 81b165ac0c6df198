// Shape-changing operations.
pub mod broadcast_to;
pub mod get_item;
pub mod reshape;
pub mod sum_to;

pub use broadcast_to::{broadcast_to_op, BroadcastToOp};
pub use get_item::{get_item_op, GetItemOp};
pub use reshape::{reshape_op, ReshapeOp};
pub use sum_to::{sum_to_op, SumToOp};

use crate::error::GraphGradError;
use crate::types::NdArray;
use ndarray::IxDyn;

/// Row-major reshape that works for any memory layout.
pub(crate) fn reshape_array(value: &NdArray, shape: &[usize]) -> Result<NdArray, GraphGradError> {
    if value.shape() == shape {
        return Ok(value.clone());
    }
    let numel: usize = shape.iter().product();
    if numel != value.len() {
        return Err(GraphGradError::ShapeMismatch {
            expected: shape.to_vec(),
            actual: value.shape().to_vec(),
            operation: "Reshape".to_string(),
        });
    }
    NdArray::from_shape_vec(IxDyn(shape), value.iter().copied().collect()).map_err(|_| {
        GraphGradError::TensorCreationError {
            data_len: value.len(),
            shape: shape.to_vec(),
        }
    })
}
