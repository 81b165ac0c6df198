use super::*;
use crate::autograd::grad_check::{check_grad, GradCheckError, DEFAULT_EPSILON};
use crate::tensor::{ones, Tensor};
use crate::utils::testing::{check_array_near, check_tensor_near};

#[test]
fn test_get_item_selects_rows() -> Result<(), GraphGradError> {
    let x = Tensor::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], vec![3, 2])?;
    let y = get_item_op(&x, vec![2, 0])?;
    check_tensor_near(&y, &[2, 2], &[5.0, 6.0, 1.0, 2.0], 1e-12);
    Ok(())
}

#[test]
fn test_get_item_repeated_indices_accumulate() -> Result<(), GraphGradError> {
    let x = Tensor::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], vec![3, 2])?;
    let y = get_item_op(&x, vec![0, 0, 2])?;
    y.backward()?;
    check_array_near(&x.grad()?, &[3, 2], &[2.0, 2.0, 0.0, 0.0, 1.0, 1.0], 1e-12);
    Ok(())
}

#[test]
fn test_get_item_rank_one() -> Result<(), GraphGradError> {
    let x = Tensor::from_vec(vec![1.0, 2.0, 3.0], vec![3])?;
    let y = get_item_op(&x, vec![1, 1])?;
    check_tensor_near(&y, &[2], &[2.0, 2.0], 1e-12);
    y.backward()?;
    check_array_near(&x.grad()?, &[3], &[0.0, 2.0, 0.0], 1e-12);
    Ok(())
}

#[test]
fn test_get_item_out_of_bounds() -> Result<(), GraphGradError> {
    let x = Tensor::from_vec(vec![1.0, 2.0, 3.0], vec![3])?;
    assert!(matches!(
        get_item_op(&x, vec![3]),
        Err(GraphGradError::IndexOutOfBounds { .. })
    ));
    assert!(matches!(
        get_item_op(&Tensor::scalar(1.0), vec![0]),
        Err(GraphGradError::RankMismatch { .. })
    ));
    Ok(())
}

#[test]
fn test_get_item_grad_check() -> Result<(), GradCheckError> {
    let x = Tensor::from_vec(vec![0.3, -0.7, 1.2, 0.8, -0.1, 0.5], vec![3, 2])?;
    check_grad(
        |inputs| get_item_op(&inputs[0], vec![1, 2, 1]),
        &[x],
        &ones(&[3, 2]).value(),
        DEFAULT_EPSILON,
        1e-6,
    )
}
