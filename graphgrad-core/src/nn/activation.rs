use crate::error::GraphGradError;
use crate::tensor::Tensor;

/// Activation interleaved between the layers of a model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Activation {
    #[default]
    Sigmoid,
    Relu,
}

impl Activation {
    pub fn apply(&self, x: &Tensor) -> Result<Tensor, GraphGradError> {
        match self {
            Activation::Sigmoid => x.sigmoid(),
            Activation::Relu => x.relu(),
        }
    }
}
