use super::*;
use crate::autograd::grad_check::{check_grad, GradCheckError, DEFAULT_EPSILON};
use crate::error::GraphGradError;
use crate::tensor::{ones, Tensor};
use crate::utils::testing::{check_array_near, check_tensor_near};

#[test]
fn test_square_forward_backward() -> Result<(), GraphGradError> {
    let x = Tensor::from_vec(vec![3.0, -0.5], vec![2])?;
    let y = square_op(&x)?;
    check_tensor_near(&y, &[2], &[9.0, 0.25], 1e-12);
    y.backward()?;
    check_array_near(&x.grad()?, &[2], &[6.0, -1.0], 1e-12);
    Ok(())
}

#[test]
fn test_square_grad_check() -> Result<(), GradCheckError> {
    let x = Tensor::from_vec(vec![0.3, -1.1, 2.5], vec![3])?;
    check_grad(|inputs| square_op(&inputs[0]), &[x], &ones(&[3]).value(), DEFAULT_EPSILON, 1e-6)
}
