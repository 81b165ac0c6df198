pub mod linear;
pub mod matmul;
pub mod transpose;

pub use linear::{linear_op, LinearOp};
pub use matmul::{matmul_op, MatmulOp};
pub use transpose::{transpose_axes_op, transpose_op, TransposeOp};

use crate::error::GraphGradError;
use crate::types::NdArray;
use ndarray::{ArrayView2, Ix2};

/// Views a value as a matrix, failing with a rank error otherwise.
pub(crate) fn as_matrix<'a>(
    value: &'a NdArray,
    operation: &str,
) -> Result<ArrayView2<'a, f64>, GraphGradError> {
    value
        .view()
        .into_dimensionality::<Ix2>()
        .map_err(|_| GraphGradError::RankMismatch {
            operation: operation.to_string(),
            expected: 2,
            actual: value.ndim(),
        })
}

/// `a · b` for matrices, checking the inner dimension first.
pub(crate) fn matrix_product(
    a: &NdArray,
    b: &NdArray,
    operation: &str,
) -> Result<NdArray, GraphGradError> {
    let a2 = as_matrix(a, operation)?;
    let b2 = as_matrix(b, operation)?;
    if a2.ncols() != b2.nrows() {
        return Err(GraphGradError::ShapeMismatch {
            expected: vec![a2.ncols(), b2.ncols()],
            actual: b.shape().to_vec(),
            operation: operation.to_string(),
        });
    }
    Ok(a2.dot(&b2).into_dyn())
}

/// The two matrix-product gradients: `gy · bᵀ` and `aᵀ · gy`.
pub(crate) fn matrix_product_grads(
    a: &NdArray,
    b: &NdArray,
    gy: &NdArray,
    operation: &str,
) -> Result<(NdArray, NdArray), GraphGradError> {
    let a2 = as_matrix(a, operation)?;
    let b2 = as_matrix(b, operation)?;
    let gy2 = as_matrix(gy, operation)?;
    Ok((gy2.dot(&b2.t()).into_dyn(), a2.t().dot(&gy2).into_dyn()))
}
