// src/tensor/mod.rs

use crate::autograd::function::Function;
use crate::error::GraphGradError;
use crate::tensor_data::TensorData;
use crate::types::NdArray;
use ndarray::IxDyn;
use std::cell::{Ref, RefCell, RefMut};
use std::rc::{Rc, Weak};

mod autograd;
pub mod broadcast_utils;
pub mod create;
mod debug;
mod op_methods;

pub use create::{full, ones, ones_like, randn, zeros, zeros_like};

/// A node of the computational graph.
///
/// `Tensor` uses `Rc<RefCell<TensorData>>` internally:
/// 1.  **Shared Ownership:** cloning a `Tensor` produces another handle to the
///     same node, never a copy of the value.
/// 2.  **Interior Mutability:** the gradient, the producer link and the value
///     itself can be modified through a shared handle.
///
/// The graph is single-threaded. A `Tensor` is neither `Send` nor `Sync`.
pub struct Tensor {
    pub(crate) data: Rc<RefCell<TensorData>>,
}

impl Tensor {
    /// Creates a new leaf tensor owning `value`.
    pub fn new(value: NdArray) -> Self {
        Tensor {
            data: Rc::new(RefCell::new(TensorData::new(value))),
        }
    }

    /// Creates a new leaf tensor from row-major data and a shape.
    pub fn from_vec(data_vec: Vec<f64>, shape: Vec<usize>) -> Result<Self, GraphGradError> {
        let data_len = data_vec.len();
        let value = NdArray::from_shape_vec(IxDyn(&shape), data_vec)
            .map_err(|_| GraphGradError::TensorCreationError { data_len, shape })?;
        Ok(Tensor::new(value))
    }

    /// Creates a rank-0 leaf tensor.
    pub fn scalar(value: f64) -> Self {
        Tensor::new(NdArray::from_elem(IxDyn(&[]), value))
    }

    /// Attaches a human-readable name, used in Debug output and error messages.
    pub fn with_name(self, name: impl Into<String>) -> Self {
        self.write_data().name = Some(name.into());
        self
    }

    pub fn name(&self) -> Option<String> {
        self.read_data().name.clone()
    }

    /// Immutably borrows the node.
    ///
    /// Panics if the node is currently mutably borrowed.
    pub fn read_data(&self) -> Ref<'_, TensorData> {
        self.data.borrow()
    }

    /// Mutably borrows the node.
    ///
    /// Panics if the node is currently borrowed.
    pub fn write_data(&self) -> RefMut<'_, TensorData> {
        self.data.borrow_mut()
    }

    /// Returns a copy of the tensor's value.
    pub fn value(&self) -> NdArray {
        self.read_data().value.clone()
    }

    /// Overwrites the value, keeping the gradient and graph links untouched.
    ///
    /// This is how optimizers update parameters.
    pub fn set_value(&self, value: NdArray) -> Result<(), GraphGradError> {
        let mut guard = self.write_data();
        if value.shape() != guard.value.shape() {
            return Err(GraphGradError::ShapeMismatch {
                expected: guard.shape(),
                actual: value.shape().to_vec(),
                operation: "set_value".to_string(),
            });
        }
        guard.value = value;
        Ok(())
    }

    /// Returns a clone of the tensor's shape (`Vec<usize>`).
    pub fn shape(&self) -> Vec<usize> {
        self.read_data().shape()
    }

    pub fn ndim(&self) -> usize {
        self.read_data().value.ndim()
    }

    /// Returns the number of elements in the tensor.
    pub fn numel(&self) -> usize {
        self.read_data().numel()
    }

    /// Returns the single element of a one-element tensor.
    pub fn item(&self) -> Result<f64, GraphGradError> {
        let guard = self.read_data();
        if guard.numel() != 1 {
            return Err(GraphGradError::ShapeMismatch {
                expected: vec![1],
                actual: guard.shape(),
                operation: "item".to_string(),
            });
        }
        guard
            .value
            .iter()
            .next()
            .copied()
            .ok_or_else(|| GraphGradError::IndexOutOfBounds {
                index: vec![0],
                shape: guard.shape(),
            })
    }

    /// Topological depth: 0 for leaves.
    pub fn generation(&self) -> usize {
        self.read_data().generation
    }

    /// Returns the function that produced this tensor, if any.
    pub fn producer(&self) -> Option<Function> {
        self.read_data().producer.clone()
    }

    pub fn is_leaf(&self) -> bool {
        self.read_data().producer.is_none()
    }

    /// True if both handles point to the same graph node.
    pub fn ptr_eq(&self, other: &Tensor) -> bool {
        Rc::ptr_eq(&self.data, &other.data)
    }

    /// A stable identity for the node, valid while it is alive.
    pub fn id(&self) -> usize {
        Rc::as_ptr(&self.data) as usize
    }

    pub(crate) fn downgrade(&self) -> Weak<RefCell<TensorData>> {
        Rc::downgrade(&self.data)
    }

    pub(crate) fn upgrade(weak: &Weak<RefCell<TensorData>>) -> Option<Tensor> {
        weak.upgrade().map(|data| Tensor { data })
    }

    /// Name used in diagnostics.
    pub(crate) fn display_name(&self) -> String {
        self.read_data()
            .name
            .clone()
            .unwrap_or_else(|| format!("<unnamed {:?}>", self.shape()))
    }
}

impl Clone for Tensor {
    /// Shallow clone: another handle to the same node.
    fn clone(&self) -> Self {
        Tensor {
            data: Rc::clone(&self.data),
        }
    }
}

#[cfg(test)]
#[path = "tensor_test.rs"]
mod tests;
