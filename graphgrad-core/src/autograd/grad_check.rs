use crate::autograd::graph_mode::{no_grad, set_graph_enabled};
use crate::error::GraphGradError;
use crate::tensor::Tensor;
use crate::types::NdArray;
use ndarray::Zip;
use thiserror::Error;

/// Default perturbation for central differences.
pub const DEFAULT_EPSILON: f64 = 1.0e-3;

/// Error type specifically for gradient checking failures.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GradCheckError {
    #[error("Gradient check failed for input tensor at index {input_index}, element index {element_index}: Analytical grad {analytical_grad:?} != Numerical grad {numerical_grad:?}. Difference: {difference:?}")]
    GradientMismatch {
        input_index: usize,
        element_index: usize,
        analytical_grad: f64,
        numerical_grad: f64,
        difference: f64,
    },
    #[error("Forward function execution failed during gradient check: {0}")]
    ForwardPassError(GraphGradError),
    #[error("Backward pass execution failed during gradient check: {0}")]
    BackwardPassError(GraphGradError),
    #[error("Tensor error during intermediate calculation: {0}")]
    TensorError(GraphGradError),
    #[error("Input tensor {input_index} has no gradient after backward pass.")]
    MissingAnalyticalGrad { input_index: usize },
    #[error("Numerical gradient is NaN or infinite for input {input_index}, element {element_index}. Details: Loss+: {loss_plus:?}, Loss-: {loss_minus:?}")]
    NumericalGradNaNOrInfinite {
        input_index: usize,
        element_index: usize,
        loss_plus: f64,
        loss_minus: f64,
    },
    #[error("Gradient check input tensor must be a leaf node (no producer). Input index: {input_index}")]
    InputNotLeaf { input_index: usize },
}

impl From<GraphGradError> for GradCheckError {
    fn from(err: GraphGradError) -> Self {
        GradCheckError::TensorError(err)
    }
}

/// Central-difference derivative of every output element with respect to a
/// shift of the whole input: `(f(x + eps) - f(x - eps)) / 2eps`.
///
/// Matches the analytic gradient of elementwise functions when the upstream
/// gradient is all ones.
pub fn numerical_gradient<F>(func: F, x: &NdArray, epsilon: f64) -> Result<NdArray, GraphGradError>
where
    F: Fn(&NdArray) -> Result<NdArray, GraphGradError>,
{
    let plus = func(&x.mapv(|v| v + epsilon))?;
    let minus = func(&x.mapv(|v| v - epsilon))?;
    if plus.shape() != minus.shape() {
        return Err(GraphGradError::ShapeMismatch {
            expected: plus.shape().to_vec(),
            actual: minus.shape().to_vec(),
            operation: "numerical_gradient".to_string(),
        });
    }
    Ok(Zip::from(&plus)
        .and(&minus)
        .map_collect(|&p, &m| (p - m) / (2.0 * epsilon)))
}

/// Checks analytical gradients against numerical gradients using finite differences.
///
/// `func` builds the graph from `inputs`. The scalar probed numerically is
/// `sum(func(inputs) * output_grad)`, whose gradient is exactly what a
/// backward pass seeded with `output_grad` produces. Each input element is
/// perturbed by `±epsilon` in turn.
pub fn check_grad<F>(
    func: F,
    inputs: &[Tensor],
    output_grad: &NdArray,
    epsilon: f64,
    tolerance: f64,
) -> Result<(), GradCheckError>
where
    F: Fn(&[Tensor]) -> Result<Tensor, GraphGradError>,
{
    for (i, input) in inputs.iter().enumerate() {
        if !input.is_leaf() {
            return Err(GradCheckError::InputNotLeaf { input_index: i });
        }
        input.clear_grad();
    }

    // --- 1. Analytical gradients ---
    let analytical: Vec<NdArray> = {
        let _tracking = set_graph_enabled(true);
        let output = func(inputs).map_err(GradCheckError::ForwardPassError)?;
        output.set_grad(output_grad.clone())?;
        output.backward().map_err(GradCheckError::BackwardPassError)?;
        inputs
            .iter()
            .enumerate()
            .map(|(i, input)| {
                input
                    .grad_opt()
                    .ok_or(GradCheckError::MissingAnalyticalGrad { input_index: i })
            })
            .collect::<Result<_, _>>()?
    };

    // --- 2. Numerical gradients, element by element ---
    let originals: Vec<NdArray> = inputs.iter().map(Tensor::value).collect();
    for (i, analytical_grad) in analytical.iter().enumerate() {
        for (elem_idx, &analytical_value) in analytical_grad.iter().enumerate() {
            let loss_plus = perturbed_loss(&func, &originals, i, elem_idx, epsilon, output_grad)?;
            let loss_minus = perturbed_loss(&func, &originals, i, elem_idx, -epsilon, output_grad)?;
            let numerical_value = (loss_plus - loss_minus) / (2.0 * epsilon);

            if !numerical_value.is_finite() {
                return Err(GradCheckError::NumericalGradNaNOrInfinite {
                    input_index: i,
                    element_index: elem_idx,
                    loss_plus,
                    loss_minus,
                });
            }

            let difference = (analytical_value - numerical_value).abs();
            if difference > tolerance * (1.0 + numerical_value.abs()) {
                return Err(GradCheckError::GradientMismatch {
                    input_index: i,
                    element_index: elem_idx,
                    analytical_grad: analytical_value,
                    numerical_grad: numerical_value,
                    difference,
                });
            }
        }
    }
    Ok(())
}

/// Evaluates `sum(func(inputs') * output_grad)` with one element of one input shifted.
fn perturbed_loss<F>(
    func: &F,
    originals: &[NdArray],
    input_index: usize,
    element_index: usize,
    shift: f64,
    output_grad: &NdArray,
) -> Result<f64, GradCheckError>
where
    F: Fn(&[Tensor]) -> Result<Tensor, GraphGradError>,
{
    let perturbed: Vec<Tensor> = originals
        .iter()
        .enumerate()
        .map(|(j, value)| {
            let mut value = value.clone();
            if j == input_index {
                if let Some(v) = value.iter_mut().nth(element_index) {
                    *v += shift;
                }
            }
            Tensor::new(value)
        })
        .collect();

    let output = no_grad(|| func(&perturbed)).map_err(GradCheckError::ForwardPassError)?;
    let guard = output.read_data();
    if guard.value.shape() != output_grad.shape() {
        return Err(GradCheckError::TensorError(GraphGradError::ShapeMismatch {
            expected: guard.value.shape().to_vec(),
            actual: output_grad.shape().to_vec(),
            operation: "check_grad".to_string(),
        }));
    }
    Ok(Zip::from(&guard.value)
        .and(output_grad)
        .fold(0.0, |acc, &y, &g| acc + y * g))
}

#[cfg(test)]
#[path = "grad_check_test.rs"]
mod tests;
