//! Loss functions. Both reduce to a rank-0 tensor averaged over the batch axis.

pub mod mse;
pub mod softmax_cross_entropy;

pub use mse::{mean_squared_error, MeanSquaredErrorOp};
pub use softmax_cross_entropy::{softmax, softmax_cross_entropy, SoftmaxCrossEntropyOp};

use crate::types::NdArray;

/// Batch size used for averaging: the leading dimension, or 1 for scalars.
pub(crate) fn batch_size(value: &NdArray) -> usize {
    value.shape().first().copied().unwrap_or(1)
}
