// Foundational elementwise arithmetic, with numpy-style broadcasting for the
// binary operations.
pub mod add;
pub mod div;
pub mod mul;
pub mod neg;
pub mod pow;
pub mod square;
pub mod sub;

pub use add::{add_op, AddOp};
pub use div::{div_op, DivOp};
pub use mul::{mul_op, MulOp};
pub use neg::{neg_op, NegOp};
pub use pow::{pow_op, PowOp};
pub use square::{square_op, SquareOp};
pub use sub::{sub_op, SubOp};

use crate::error::GraphGradError;
use crate::tensor::broadcast_utils::broadcast_shapes;
use crate::types::NdArray;
use ndarray::{IxDyn, Zip};

/// Applies `f` elementwise over `a` and `b` broadcast against each other.
pub(crate) fn broadcast_binary(
    a: &NdArray,
    b: &NdArray,
    f: impl Fn(f64, f64) -> f64,
) -> Result<NdArray, GraphGradError> {
    let shape = broadcast_shapes(a.shape(), b.shape())?;
    let broadcast_error = || GraphGradError::BroadcastError {
        shape1: a.shape().to_vec(),
        shape2: b.shape().to_vec(),
    };
    let a_view = a.broadcast(IxDyn(&shape)).ok_or_else(broadcast_error)?;
    let b_view = b.broadcast(IxDyn(&shape)).ok_or_else(broadcast_error)?;
    Ok(Zip::from(&a_view).and(&b_view).map_collect(|&x, &y| f(x, y)))
}
