//! A define-by-run reverse-mode automatic differentiation engine.
//!
//! Operations on [`Tensor`]s record a graph as they run. Calling
//! [`Tensor::backward`] on a terminal tensor walks that graph in reverse
//! generation order and accumulates gradients into every upstream tensor.
//! Layers, models and optimizers build on top of the same graph.

pub mod autograd;
pub mod error;
pub mod model;
pub mod nn;
pub mod ops;
pub mod optim;
pub mod tensor;
pub mod tensor_data;
pub mod types;
pub mod utils;

// Re-export the core types so they are reachable as `graphgrad_core::Tensor` etc.
pub use autograd::{no_grad, set_graph_enabled, BackwardOptions, Function, GraphContext};
pub use error::GraphGradError;
pub use tensor::Tensor;
pub use types::NdArray;
