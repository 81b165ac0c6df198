use crate::autograd::function::Function;
use crate::types::NdArray;

/// Holds the state of one graph node.
///
/// `Tensor` wraps this in `Rc<RefCell<..>>`, so several handles share the same
/// node and metadata such as the gradient can change through a shared handle.
#[derive(Debug)]
pub struct TensorData {
    /// The forward value.
    pub value: NdArray,
    /// Accumulated gradient, same shape as `value` once present.
    pub grad: Option<NdArray>,
    /// The function that produced this tensor. `None` for leaves.
    pub producer: Option<Function>,
    /// 0 for leaves, `producer.generation() + 1` otherwise.
    pub generation: usize,
    pub name: Option<String>,
}

impl TensorData {
    /// Creates the data for a fresh leaf.
    pub fn new(value: NdArray) -> Self {
        TensorData {
            value,
            grad: None,
            producer: None,
            generation: 0,
            name: None,
        }
    }

    pub fn shape(&self) -> Vec<usize> {
        self.value.shape().to_vec()
    }

    pub fn numel(&self) -> usize {
        self.value.len()
    }
}
