use graphgrad_core::autograd::grad_check::{check_grad, GradCheckError, DEFAULT_EPSILON};
use graphgrad_core::autograd::GraphModeGuard;
use graphgrad_core::ops::arithmetic::MulOp;
use graphgrad_core::ops::Op;
use graphgrad_core::tensor::ones;
use graphgrad_core::{set_graph_enabled, Function, GraphContext, GraphGradError, Tensor};

mod common;
use common::{grad_item, init_logger};

/// Checks the generation invariants on every node reachable from `root`.
fn assert_generations(root: &Tensor) {
    let mut stack = vec![root.clone()];
    while let Some(tensor) = stack.pop() {
        match tensor.producer() {
            None => assert_eq!(tensor.generation(), 0),
            Some(function) => {
                assert_eq!(tensor.generation(), function.generation() + 1);
                let inputs = function.inputs();
                let max_input = inputs.iter().map(Tensor::generation).max().unwrap_or(0);
                assert_eq!(function.generation(), max_input);
                stack.extend(inputs);
            }
        }
    }
}

#[test]
fn graph_linkage_resolves_both_ways() -> Result<(), GraphGradError> {
    init_logger();
    let a = Tensor::scalar(2.0).with_name("a");
    let b = Tensor::scalar(3.0).with_name("b");
    let outputs = Function::call(Op::Mul(MulOp), &[a.clone(), b.clone()])?;
    let y = &outputs[0];
    let producer = y.producer().ok_or_else(|| GraphGradError::MissingGradient {
        name: "producer".to_string(),
    })?;

    assert!(y.producer().map_or(false, |p| p.ptr_eq(&producer)));
    let inputs = producer.inputs();
    assert!(inputs[0].ptr_eq(&a) && inputs[1].ptr_eq(&b));
    assert!(matches!(producer.outputs().as_slice(), [Some(out)] if out.ptr_eq(y)));
    Ok(())
}

#[test]
fn generation_invariant_holds_on_a_deep_graph() -> Result<(), GraphGradError> {
    let x = Tensor::from_vec(vec![0.1, 0.2, 0.3], vec![3])?;
    let a = x.exp()?;
    let b = a.square()?.add(&x)?;
    let c = b.mul(&a)?.sigmoid()?;
    let d = c.sub(&x.neg()?)?.sum()?;
    assert_generations(&d);
    Ok(())
}

#[test]
fn gradients_from_two_consumers_add_up() -> Result<(), GraphGradError> {
    // f = 3x, g = x^2, terminal = f + g; at x = 4 the contributions are 3 and 8.
    let x = Tensor::scalar(4.0);
    let f = x.mul_scalar(3.0)?;
    let g = x.square()?;
    f.add(&g)?.backward()?;
    assert_eq!(grad_item(&x), 11.0);
    Ok(())
}

#[test]
fn broadcast_operand_gradient_keeps_its_shape() -> Result<(), GraphGradError> {
    let (h, w) = (3, 4);
    let big = Tensor::new(ones(&[h, w]).value() * 2.0);
    let row = Tensor::from_vec(vec![1.0, 2.0, 3.0, 4.0], vec![1, w])?;
    for op in ["add", "mul", "div"] {
        big.clear_grad();
        row.clear_grad();
        let y = match op {
            "add" => big.add(&row)?,
            "mul" => big.mul(&row)?,
            _ => big.div(&row)?,
        };
        y.backward()?;
        let grad = row.grad()?;
        assert_eq!(grad.shape(), &[1, w], "{} gradient shape", op);

        // The unreduced gradient is constant down each column, so the axis-0
        // sum is h times one row of it.
        let expected: Vec<f64> = row
            .value()
            .iter()
            .map(|&r| match op {
                "add" => h as f64,
                "mul" => h as f64 * 2.0,
                _ => h as f64 * -2.0 / (r * r),
            })
            .collect();
        for (g, e) in grad.iter().zip(expected.iter()) {
            assert!((g - e).abs() < 1e-12, "{}: {} vs {}", op, g, e);
        }
    }
    Ok(())
}

#[test]
fn composite_expression_matches_numerical_gradient() -> Result<(), GradCheckError> {
    let x = Tensor::from_vec(vec![0.2, -0.4, 0.9, 1.3, -0.7, 0.05], vec![2, 3])?;
    let w = Tensor::from_vec(vec![0.5, -0.3, 0.8, 0.1, -0.6, 0.4], vec![3, 2])?;
    let b = Tensor::from_vec(vec![0.1, -0.2], vec![2])?;
    check_grad(
        |inputs| {
            inputs[0]
                .linear(&inputs[1], &inputs[2])?
                .sigmoid()?
                .square()?
                .sum_axes(&[1], false)
        },
        &[x, w, b],
        &ones(&[2]).value(),
        DEFAULT_EPSILON,
        1e-6,
    )
}

#[test]
fn explicit_context_wins_over_thread_mode() -> Result<(), GraphGradError> {
    let _guard: GraphModeGuard = set_graph_enabled(false);
    let x = Tensor::scalar(1.0);
    let tracked = Function::call_with(Op::Mul(MulOp), &[x.clone(), x.clone()], GraphContext::tracking())?;
    let untracked = Function::call(Op::Mul(MulOp), &[x.clone(), x])?;
    assert!(tracked[0].producer().is_some());
    assert!(untracked[0].producer().is_none());
    Ok(())
}
