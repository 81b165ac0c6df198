use super::*;
use crate::autograd::grad_check::{check_grad, GradCheckError, DEFAULT_EPSILON};
use crate::error::GraphGradError;
use crate::tensor::{ones, Tensor};
use crate::utils::testing::{check_array_near, check_tensor_near};
use std::f64::consts::E;

#[test]
fn test_exp_forward_backward() -> Result<(), GraphGradError> {
    let x = Tensor::from_vec(vec![0.0, 1.0], vec![2])?;
    let y = exp_op(&x)?;
    check_tensor_near(&y, &[2], &[1.0, E], 1e-12);
    y.backward()?;
    check_array_near(&x.grad()?, &[2], &[1.0, E], 1e-12);
    Ok(())
}

#[test]
fn test_exp_grad_check() -> Result<(), GradCheckError> {
    let x = Tensor::from_vec(vec![-1.0, 0.5, 2.0, 0.0], vec![2, 2])?;
    check_grad(|inputs| exp_op(&inputs[0]), &[x], &ones(&[2, 2]).value(), DEFAULT_EPSILON, 1e-6)
}
