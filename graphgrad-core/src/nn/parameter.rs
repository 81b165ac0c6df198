use crate::tensor::Tensor;
use std::fmt;
use std::ops::Deref;

/// A wrapper around a leaf Tensor marking it as trainable.
///
/// Graph behavior is identical to a plain Tensor. Optimizers enumerate
/// Parameters, never arbitrary Tensors.
pub struct Parameter(Tensor);

impl Parameter {
    /// Wraps `tensor`. The result is always a leaf: a tensor that already has a
    /// producer is detached first.
    pub fn new(tensor: Tensor) -> Self {
        if tensor.is_leaf() {
            Parameter(tensor)
        } else {
            Parameter(tensor.detach())
        }
    }

    /// Consumes the Parameter and returns the underlying Tensor.
    pub fn into_inner(self) -> Tensor {
        self.0
    }

    pub fn tensor(&self) -> &Tensor {
        &self.0
    }
}

// Allow accessing the underlying Tensor immutably via Deref.
impl Deref for Parameter {
    type Target = Tensor;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl fmt::Debug for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Parameter({:?})", self.0)
    }
}

impl Clone for Parameter {
    /// Shallow clone: both Parameters refer to the same node.
    fn clone(&self) -> Self {
        Parameter(self.0.clone())
    }
}

#[cfg(test)]
#[path = "parameter_test.rs"]
mod tests;
