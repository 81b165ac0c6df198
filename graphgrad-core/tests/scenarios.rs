use approx::assert_abs_diff_eq;
use graphgrad_core::nn::Parameter;
use graphgrad_core::optim::{Optimizer, Sgd};
use graphgrad_core::{no_grad, GraphGradError, NdArray, Tensor};
use ndarray::IxDyn;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

mod common;
use common::{grad_item, init_logger};

#[test]
fn scenario_a_polynomial_gradients() -> Result<(), GraphGradError> {
    init_logger();
    let x0 = Tensor::scalar(1.0);
    let x1 = Tensor::scalar(1.0);
    let squares = x0.square()?.add(&x1.square()?)?.mul_scalar(0.26)?;
    let cross = x0.mul(&x1)?.mul_scalar(0.48)?;
    let y = squares.sub(&cross)?;
    y.backward()?;

    assert_abs_diff_eq!(y.item()?, 0.04, epsilon = 1e-12);
    assert_abs_diff_eq!(grad_item(&x0), 0.04, epsilon = 1e-12);
    assert_abs_diff_eq!(grad_item(&x1), 0.04, epsilon = 1e-12);
    Ok(())
}

#[test]
fn scenario_b_gradient_descent_finds_minimum() -> Result<(), GraphGradError> {
    init_logger();
    let x = Tensor::scalar(2.0);
    let lr = 0.01;
    for _ in 0..200 {
        let y = x.pow(4)?.sub(&x.square()?.mul_scalar(2.0)?)?;
        x.clear_grad();
        y.backward()?;
        let updated = x.value() - x.grad()? * lr;
        x.set_value(updated)?;
    }
    assert_abs_diff_eq!(x.item()?, 1.0, epsilon = 1e-3);
    Ok(())
}

#[test]
fn scenario_c_linear_regression() -> Result<(), GraphGradError> {
    init_logger();
    let mut rng = StdRng::seed_from_u64(0);
    let xs: Vec<f64> = (0..100).map(|_| rng.gen::<f64>()).collect();
    let ys: Vec<f64> = xs
        .iter()
        .map(|&x| 2.0 * x + 5.0 + (rng.gen::<f64>() - 0.5) * 0.2)
        .collect();
    let x = Tensor::from_vec(xs, vec![100, 1])?;
    let y = Tensor::from_vec(ys, vec![100, 1])?;

    let w = Parameter::new(Tensor::new(NdArray::zeros(IxDyn(&[1, 1]))).with_name("W"));
    let b = Parameter::new(Tensor::new(NdArray::zeros(IxDyn(&[1]))).with_name("b"));
    let params = vec![w.clone(), b.clone()];
    let mut optimizer = Sgd::new(0.1);

    let mut first_loss = None;
    let mut last_loss = f64::INFINITY;
    for _ in 0..100 {
        let y_pred = x.linear(&w, &b)?;
        let loss = y_pred.mse(&y)?;
        for param in &params {
            param.clear_grad();
        }
        loss.backward()?;
        optimizer.update(&params)?;
        last_loss = loss.item()?;
        first_loss.get_or_insert(last_loss);
    }

    assert!(last_loss < first_loss.unwrap_or(f64::INFINITY));
    assert_abs_diff_eq!(w.item()?, 2.0, epsilon = 0.15);
    assert_abs_diff_eq!(b.item()?, 5.0, epsilon = 0.15);
    Ok(())
}

#[test]
fn scenario_d_inference_mode_is_a_no_op_for_backward() -> Result<(), GraphGradError> {
    init_logger();
    let x = Tensor::from_vec(vec![1.0, 2.0], vec![2])?;
    let w = Tensor::from_vec(vec![3.0, 4.0], vec![2])?;
    let y = no_grad(|| x.mul(&w)?.sum())?;
    assert!(y.producer().is_none());
    assert_eq!(y.generation(), 0);

    y.backward()?;
    assert!(!x.has_grad());
    assert!(!w.has_grad());

    // Tracking is back on outside the closure.
    let z = x.mul(&w)?;
    assert!(z.producer().is_some());
    Ok(())
}
