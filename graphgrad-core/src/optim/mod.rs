// graphgrad-core/src/optim/mod.rs

//! Optimizers for training.
//!
//! This module provides the `Optimizer` trait and two strategies: plain
//! gradient descent (`Sgd`) and gradient descent with momentum (`MomentumSgd`).

pub mod momentum_sgd;
pub mod optimizer_trait;
pub mod sgd;

// Re-export key items for easier access
pub use momentum_sgd::MomentumSgd;
pub use optimizer_trait::Optimizer;
pub use sgd::Sgd;
