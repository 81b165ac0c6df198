use super::*;
use crate::autograd::grad_check::{check_grad, GradCheckError, DEFAULT_EPSILON};
use crate::tensor::Tensor;
use crate::utils::testing::{check_array_near, check_tensor_near};

#[test]
fn test_sum_to_rows() -> Result<(), GraphGradError> {
    let x = Tensor::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], vec![2, 3])?;
    let y = sum_to_op(&x, vec![1, 3])?;
    check_tensor_near(&y, &[1, 3], &[5.0, 7.0, 9.0], 1e-12);

    let z = sum_to_op(&x, vec![3])?;
    check_tensor_near(&z, &[3], &[5.0, 7.0, 9.0], 1e-12);
    Ok(())
}

#[test]
fn test_sum_to_backward_broadcasts() -> Result<(), GraphGradError> {
    let x = Tensor::from_vec(vec![1.0, 2.0, 3.0, 4.0], vec![2, 2])?;
    let y = sum_to_op(&x, vec![2, 1])?;
    y.set_grad(Tensor::from_vec(vec![10.0, 20.0], vec![2, 1])?.value())?;
    y.backward()?;
    check_array_near(&x.grad()?, &[2, 2], &[10.0, 10.0, 20.0, 20.0], 1e-12);
    Ok(())
}

#[test]
fn test_sum_to_grad_check() -> Result<(), GradCheckError> {
    let x = Tensor::from_vec(vec![0.1, 0.2, 0.3, 0.4, 0.5, 0.6], vec![3, 2])?;
    let output_grad = Tensor::from_vec(vec![2.0, -1.0], vec![2])?.value();
    check_grad(
        |inputs| sum_to_op(&inputs[0], vec![2]),
        &[x],
        &output_grad,
        DEFAULT_EPSILON,
        1e-6,
    )
}
