use super::*;
use crate::autograd::function::FunctionData;
use crate::autograd::graph_mode::no_grad;
use crate::ops::arithmetic::NegOp;
use crate::ops::Op;
use crate::utils::testing::check_array_near;
use approx::assert_relative_eq;
use std::cell::RefCell;
use std::rc::Rc;

#[test]
fn test_backward_seeds_ones() -> Result<(), GraphGradError> {
    let x = Tensor::from_vec(vec![0.0, 1.0], vec![2])?;
    let y = x.exp()?;
    y.backward()?;
    check_array_near(&x.grad()?, &[2], &[1.0, 1.0f64.exp()], 1e-12);
    Ok(())
}

#[test]
fn test_backward_on_leaf_only_seeds() -> Result<(), GraphGradError> {
    let x = Tensor::from_vec(vec![1.0, 2.0, 3.0], vec![3])?;
    x.backward()?;
    check_array_near(&x.grad()?, &[3], &[1.0, 1.0, 1.0], 1e-12);
    Ok(())
}

#[test]
fn test_shared_intermediate() -> Result<(), GraphGradError> {
    // y = a^2 + a^2 with a = x^2, so dy/dx = 8x^3.
    let x = Tensor::scalar(2.0);
    let a = x.square()?;
    let y = a.square()?.add(&a.square()?)?;
    y.backward()?;
    assert_relative_eq!(y.item()?, 32.0);
    assert_relative_eq!(x.grad()?.sum(), 64.0);
    Ok(())
}

#[test]
fn test_generation_order_on_uneven_paths() -> Result<(), GraphGradError> {
    // c = e^x + e^(e^x): the short path into `c` must wait for the long one.
    let x = Tensor::scalar(0.5);
    let a = x.exp()?;
    let b = a.exp()?;
    let c = a.add(&b)?;
    c.backward()?;
    let ex = 0.5f64.exp();
    assert_relative_eq!(x.grad()?.sum(), ex + ex.exp() * ex, epsilon = 1e-12);
    Ok(())
}

#[test]
fn test_gradients_accumulate_across_calls() -> Result<(), GraphGradError> {
    let x = Tensor::scalar(3.0);
    let y = x.mul(&x)?;
    y.backward()?;
    assert_relative_eq!(x.grad()?.sum(), 6.0);
    y.backward()?;
    assert_relative_eq!(x.grad()?.sum(), 12.0);

    x.clear_grad();
    y.backward()?;
    assert_relative_eq!(x.grad()?.sum(), 6.0);
    Ok(())
}

#[test]
fn test_intermediate_grads_cleared_by_default() -> Result<(), GraphGradError> {
    let x = Tensor::scalar(1.0);
    let y = x.exp()?;
    let z = y.mul_scalar(2.0)?;
    z.backward()?;
    assert!(!y.has_grad());
    assert!(!z.has_grad());
    assert!(matches!(y.grad(), Err(GraphGradError::MissingGradient { .. })));
    assert!(x.has_grad());
    Ok(())
}

#[test]
fn test_retain_grad_keeps_intermediates() -> Result<(), GraphGradError> {
    let x = Tensor::scalar(1.0);
    let y = x.exp()?;
    let z = y.mul_scalar(2.0)?;
    z.backward_with(BackwardOptions { retain_grad: true })?;
    assert_relative_eq!(z.grad()?.sum(), 1.0);
    assert_relative_eq!(y.grad()?.sum(), 2.0);
    assert_relative_eq!(x.grad()?.sum(), 2.0 * 1.0f64.exp(), epsilon = 1e-12);
    Ok(())
}

#[test]
fn test_explicit_seed() -> Result<(), GraphGradError> {
    let x = Tensor::from_vec(vec![1.0, 2.0], vec![2])?;
    let y = x.mul_scalar(3.0)?;
    y.set_grad(Tensor::from_vec(vec![10.0, -1.0], vec![2])?.value())?;
    y.backward()?;
    check_array_near(&x.grad()?, &[2], &[30.0, -3.0], 1e-12);

    assert!(matches!(
        y.set_grad(Tensor::scalar(1.0).value()),
        Err(GraphGradError::ShapeMismatch { .. })
    ));
    Ok(())
}

#[test]
fn test_no_grad_result_is_a_leaf() -> Result<(), GraphGradError> {
    let x = Tensor::scalar(2.0);
    let y = no_grad(|| x.square())?;
    y.backward()?;
    assert!(!x.has_grad());
    Ok(())
}

#[test]
fn test_detached_tensor_stops_flow() -> Result<(), GraphGradError> {
    let x = Tensor::scalar(2.0);
    let y = x.square()?.detach();
    let z = y.mul_scalar(5.0)?;
    z.backward()?;
    assert!(!x.has_grad());
    assert_relative_eq!(y.grad()?.sum(), 5.0);
    Ok(())
}

fn attach_producer(terminal: &Tensor, input: Tensor, output: &Tensor) {
    let function = Function {
        inner: Rc::new(RefCell::new(FunctionData {
            op: Op::Neg(NegOp),
            generation: 0,
            inputs: vec![input],
            outputs: vec![output.downgrade()],
        })),
    };
    let mut guard = terminal.write_data();
    guard.producer = Some(function);
    guard.generation = 1;
}

#[test]
fn test_dropped_output_is_internal_error() {
    let x = Tensor::scalar(1.0);
    let terminal = Tensor::scalar(0.0);
    let dropped = Tensor::scalar(0.0);
    attach_producer(&terminal, x, &dropped);
    drop(dropped);
    assert!(matches!(
        terminal.backward(),
        Err(GraphGradError::InternalConsistency { .. })
    ));
}

#[test]
fn test_missing_output_grad_is_internal_error() {
    let x = Tensor::scalar(1.0);
    let terminal = Tensor::scalar(0.0);
    let other = Tensor::scalar(0.0);
    attach_producer(&terminal, x, &other);
    assert!(matches!(
        terminal.backward(),
        Err(GraphGradError::InternalConsistency { .. })
    ));
}
