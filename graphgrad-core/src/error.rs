use thiserror::Error;

/// Custom error type for the GraphGrad framework.
#[derive(Error, Debug, PartialEq, Clone)] // PartialEq for easier testing
pub enum GraphGradError {
    #[error("Arity mismatch in operation {operation}: expected {expected} input(s), got {actual}")]
    ArityMismatch {
        operation: String,
        expected: usize,
        actual: usize,
    },

    #[error("Shape mismatch: expected {expected:?}, got {actual:?} during operation {operation}")]
    ShapeMismatch {
        expected: Vec<usize>,
        actual: Vec<usize>,
        operation: String,
    },

    #[error("Cannot broadcast shapes: {shape1:?} and {shape2:?}")]
    BroadcastError {
        shape1: Vec<usize>,
        shape2: Vec<usize>,
    },

    #[error("Rank mismatch in operation {operation}: expected rank {expected}, got {actual}")]
    RankMismatch {
        operation: String,
        expected: usize,
        actual: usize,
    },

    #[error("Invalid axis {axis} for tensor of rank {rank}")]
    InvalidAxis { axis: usize, rank: usize },

    #[error("Index out of bounds: index {index:?} for shape {shape:?}")]
    IndexOutOfBounds {
        index: Vec<usize>,
        shape: Vec<usize>,
    },

    #[error("Tensor creation error: data length {data_len} does not match shape {shape:?}")]
    TensorCreationError { data_len: usize, shape: Vec<usize> },

    #[error("Gradient of tensor '{name}' was read before any backward pass populated it")]
    MissingGradient { name: String },

    #[error("Internal consistency error in {operation} (generation {generation}): {reason}")]
    InternalConsistency {
        operation: String,
        generation: usize,
        reason: String,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

impl GraphGradError {
    /// True for every variant that reports incompatible shapes.
    pub fn is_shape_error(&self) -> bool {
        matches!(
            self,
            GraphGradError::ShapeMismatch { .. }
                | GraphGradError::BroadcastError { .. }
                | GraphGradError::RankMismatch { .. }
                | GraphGradError::InvalidAxis { .. }
                | GraphGradError::IndexOutOfBounds { .. }
                | GraphGradError::TensorCreationError { .. }
        )
    }
}
