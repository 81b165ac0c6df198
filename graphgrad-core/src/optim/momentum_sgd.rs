use crate::error::GraphGradError;
use crate::nn::parameter::Parameter;
use crate::optim::optimizer_trait::Optimizer;
use crate::types::NdArray;
use ndarray::Zip;
use std::collections::HashMap;

/// Gradient descent with momentum:
/// `v <- momentum * v - lr * grad`, then `p <- p + v`.
///
/// One velocity per Parameter, keyed by node identity and zero on first use.
///
/// Each entry holds its Parameter, so a node address stays reserved while the
/// optimizer can still look it up.
#[derive(Debug, Clone)]
pub struct MomentumSgd {
    pub lr: f64,
    pub momentum: f64,
    velocities: HashMap<usize, (Parameter, NdArray)>,
}

impl MomentumSgd {
    pub fn new(lr: f64, momentum: f64) -> Self {
        MomentumSgd {
            lr,
            momentum,
            velocities: HashMap::new(),
        }
    }

    /// Current velocity of `param`, if it has been updated at least once.
    pub fn velocity(&self, param: &Parameter) -> Option<&NdArray> {
        self.velocities.get(&param.id()).map(|(_, v)| v)
    }
}

impl Default for MomentumSgd {
    fn default() -> Self {
        MomentumSgd::new(0.01, 0.9)
    }
}

impl Optimizer for MomentumSgd {
    fn update_single_parameter(&mut self, param: &Parameter) -> Result<(), GraphGradError> {
        let grad = param.grad()?;
        let (lr, momentum) = (self.lr, self.momentum);
        let (_, v) = self
            .velocities
            .entry(param.id())
            .or_insert_with(|| (param.clone(), NdArray::zeros(grad.raw_dim())));
        Zip::from(&mut *v)
            .and(&grad)
            .for_each(|v, &g| *v = momentum * *v - lr * g);

        let mut guard = param.write_data();
        guard.value += &*v;
        Ok(())
    }
}

#[cfg(test)]
#[path = "momentum_sgd_test.rs"]
mod tests;
