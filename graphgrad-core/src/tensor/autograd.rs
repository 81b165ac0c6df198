// src/tensor/autograd.rs

use crate::autograd::backward::{run_backward, BackwardOptions};
use crate::error::GraphGradError;
use crate::tensor::Tensor;
use crate::types::NdArray;

impl Tensor {
    /// Returns a copy of the gradient.
    ///
    /// Fails with `MissingGradient` if no backward pass has populated it.
    /// Use [`Tensor::has_grad`] or [`Tensor::grad_opt`] for a checked query.
    pub fn grad(&self) -> Result<NdArray, GraphGradError> {
        self.grad_opt().ok_or_else(|| GraphGradError::MissingGradient {
            name: self.display_name(),
        })
    }

    /// Returns a copy of the gradient, if any.
    pub fn grad_opt(&self) -> Option<NdArray> {
        self.read_data().grad.clone()
    }

    pub fn has_grad(&self) -> bool {
        self.read_data().grad.is_some()
    }

    /// Sets the gradient, replacing any existing one.
    pub fn set_grad(&self, grad: NdArray) -> Result<(), GraphGradError> {
        let mut guard = self.write_data();
        if grad.shape() != guard.value.shape() {
            return Err(GraphGradError::ShapeMismatch {
                expected: guard.shape(),
                actual: grad.shape().to_vec(),
                operation: "set_grad".to_string(),
            });
        }
        guard.grad = Some(grad);
        Ok(())
    }

    /// Resets the gradient of this tensor to None.
    pub fn clear_grad(&self) {
        self.write_data().grad = None;
    }

    /// Adds `grad` to the existing gradient, or installs it if there is none.
    ///
    /// The caller guarantees `grad` has the value's shape.
    pub(crate) fn accumulate_grad(&self, grad: NdArray) {
        let mut guard = self.write_data();
        match guard.grad.as_mut() {
            Some(existing) => *existing += &grad,
            None => guard.grad = Some(grad),
        }
    }

    /// Computes the gradients of this tensor w.r.t. every upstream tensor.
    ///
    /// Seeds the gradient with ones when none is set. Intermediate gradients
    /// are cleared once consumed.
    pub fn backward(&self) -> Result<(), GraphGradError> {
        run_backward(self, BackwardOptions::default())
    }

    pub fn backward_with(&self, options: BackwardOptions) -> Result<(), GraphGradError> {
        run_backward(self, options)
    }

    /// Creates a new leaf holding a copy of the value, detached from the graph.
    pub fn detach(&self) -> Tensor {
        let guard = self.read_data();
        let detached = Tensor::new(guard.value.clone());
        detached.write_data().name = guard.name.clone();
        detached
    }
}
