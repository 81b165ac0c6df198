use crate::error::GraphGradError;
use crate::nn::parameter::Parameter;
use crate::optim::optimizer_trait::Optimizer;
use ndarray::Zip;

/// Implements plain Stochastic Gradient Descent: `p <- p - lr * grad`.
#[derive(Debug, Clone, PartialEq)]
pub struct Sgd {
    pub lr: f64,
}

impl Sgd {
    pub fn new(lr: f64) -> Self {
        Sgd { lr }
    }
}

impl Default for Sgd {
    fn default() -> Self {
        Sgd::new(0.01)
    }
}

impl Optimizer for Sgd {
    fn update_single_parameter(&mut self, param: &Parameter) -> Result<(), GraphGradError> {
        let grad = param.grad()?;
        let lr = self.lr;
        let mut guard = param.write_data();
        Zip::from(&mut guard.value)
            .and(&grad)
            .for_each(|p, &g| *p -= lr * g);
        Ok(())
    }
}

#[cfg(test)]
#[path = "sgd_test.rs"]
mod tests;
