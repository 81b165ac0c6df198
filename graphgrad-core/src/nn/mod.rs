// src/nn/mod.rs
// Layers, their parameters and the shared activations.

pub mod activation;
pub mod init;
pub mod layer;
pub mod layers;
pub mod parameter;

// Re-export common items
pub use activation::Activation;
pub use layer::{Layer, LayerRecord};
pub use layers::linear::{LayerState, Linear};
pub use parameter::Parameter;
