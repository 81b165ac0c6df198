use super::*;
use crate::autograd::grad_check::{check_grad, GradCheckError, DEFAULT_EPSILON};
use crate::error::GraphGradError;
use crate::tensor::Tensor;
use crate::utils::testing::{check_array_near, check_tensor_near};

#[test]
fn test_add_forward() -> Result<(), GraphGradError> {
    let a = Tensor::from_vec(vec![1.0, 2.0, 3.0], vec![3])?;
    let b = Tensor::from_vec(vec![10.0, 20.0, 30.0], vec![3])?;
    let c = add_op(&a, &b)?;
    check_tensor_near(&c, &[3], &[11.0, 22.0, 33.0], 1e-12);
    assert_eq!(c.generation(), 1);
    Ok(())
}

#[test]
fn test_add_shape_mismatch() -> Result<(), GraphGradError> {
    let a = Tensor::from_vec(vec![1.0, 2.0], vec![2])?;
    let b = Tensor::from_vec(vec![1.0, 2.0, 3.0], vec![3])?;
    let result = add_op(&a, &b);
    assert!(matches!(result, Err(GraphGradError::BroadcastError { .. })));
    // Fail fast: nothing was linked.
    assert!(a.is_leaf() && !a.has_grad());
    Ok(())
}

#[test]
fn test_add_backward_broadcast_row() -> Result<(), GraphGradError> {
    let a = Tensor::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], vec![3, 2])?;
    let b = Tensor::from_vec(vec![10.0, 20.0], vec![1, 2])?;
    let c = add_op(&a, &b)?;
    c.backward()?;
    check_array_near(&a.grad()?, &[3, 2], &[1.0; 6], 1e-12);
    // Gradient comes back in the operand's own shape, summed over axis 0.
    check_array_near(&b.grad()?, &[1, 2], &[3.0, 3.0], 1e-12);
    Ok(())
}

#[test]
fn test_add_grad_check() -> Result<(), GradCheckError> {
    let a = Tensor::from_vec(vec![0.5, -1.0, 2.0, 0.1], vec![2, 2])?;
    let b = Tensor::from_vec(vec![3.0, -2.0], vec![2])?;
    let output_grad = Tensor::from_vec(vec![1.0, 2.0, -1.0, 0.5], vec![2, 2])?.value();
    check_grad(
        |inputs| add_op(&inputs[0], &inputs[1]),
        &[a, b],
        &output_grad,
        DEFAULT_EPSILON,
        1e-6,
    )
}
