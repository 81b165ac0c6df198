use crate::error::GraphGradError;
use crate::nn::init::xavier_normal;
use crate::nn::layer::{Layer, LayerRecord};
use crate::nn::parameter::Parameter;
use crate::tensor::{zeros, Tensor};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fmt;

/// Parameters of a [`Linear`] layer, created lazily from the first input.
#[derive(Debug, Clone)]
pub enum LayerState {
    Uninitialized,
    Initialized {
        weight: Parameter,
        bias: Option<Parameter>,
    },
}

/// Applies `y = x · W + b` with `W` of shape `[in_size, out_size]`.
///
/// `in_size` may be left open: it is read from the last axis of the first
/// input seen, and the weight is Xavier-initialized at that point.
pub struct Linear {
    out_size: usize,
    use_bias: bool,
    state: LayerState,
    rng: StdRng,
    record: LayerRecord,
}

impl Linear {
    /// A layer with bias whose input size is inferred on the first call.
    pub fn new(out_size: usize) -> Self {
        Linear {
            out_size,
            use_bias: true,
            state: LayerState::Uninitialized,
            rng: StdRng::from_entropy(),
            record: LayerRecord::new(),
        }
    }

    /// Same layer, without the additive bias.
    pub fn without_bias(mut self) -> Self {
        self.use_bias = false;
        if let LayerState::Initialized { bias, .. } = &mut self.state {
            *bias = None;
        }
        self
    }

    /// Seeds the generator used for weight initialization.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Initializes the Parameters eagerly for a known input size.
    pub fn with_in_size(mut self, in_size: usize) -> Self {
        self.initialize(in_size);
        self
    }

    /// Builds the layer from existing weight and bias tensors.
    pub fn from_parameters(weight: Tensor, bias: Option<Tensor>) -> Result<Self, GraphGradError> {
        if weight.ndim() != 2 {
            return Err(GraphGradError::RankMismatch {
                operation: "Linear".to_string(),
                expected: 2,
                actual: weight.ndim(),
            });
        }
        let out_size = weight.shape()[1];
        if let Some(bias) = &bias {
            if bias.shape() != [out_size] {
                return Err(GraphGradError::ShapeMismatch {
                    expected: vec![out_size],
                    actual: bias.shape(),
                    operation: "Linear".to_string(),
                });
            }
        }
        Ok(Linear {
            out_size,
            use_bias: bias.is_some(),
            state: LayerState::Initialized {
                weight: Parameter::new(weight.with_name("W")),
                bias: bias.map(|b| Parameter::new(b.with_name("b"))),
            },
            rng: StdRng::from_entropy(),
            record: LayerRecord::new(),
        })
    }

    pub fn out_size(&self) -> usize {
        self.out_size
    }

    pub fn state(&self) -> &LayerState {
        &self.state
    }

    pub fn weight(&self) -> Option<&Parameter> {
        match &self.state {
            LayerState::Initialized { weight, .. } => Some(weight),
            LayerState::Uninitialized => None,
        }
    }

    pub fn bias(&self) -> Option<&Parameter> {
        match &self.state {
            LayerState::Initialized { bias, .. } => bias.as_ref(),
            LayerState::Uninitialized => None,
        }
    }

    fn initialize(&mut self, in_size: usize) {
        log::debug!(
            "Linear: initializing parameters for input size {} (output size {})",
            in_size,
            self.out_size
        );
        let weight = Tensor::new(xavier_normal(in_size, self.out_size, &mut self.rng)).with_name("W");
        let bias = self
            .use_bias
            .then(|| Parameter::new(zeros(&[self.out_size]).with_name("b")));
        self.state = LayerState::Initialized {
            weight: Parameter::new(weight),
            bias,
        };
    }
}

impl Layer for Linear {
    fn forward(&mut self, inputs: &[Tensor]) -> Result<Vec<Tensor>, GraphGradError> {
        let x = match inputs {
            [x] => x,
            _ => {
                return Err(GraphGradError::ArityMismatch {
                    operation: "Linear".to_string(),
                    expected: 1,
                    actual: inputs.len(),
                })
            }
        };
        if x.ndim() != 2 {
            return Err(GraphGradError::RankMismatch {
                operation: "Linear".to_string(),
                expected: 2,
                actual: x.ndim(),
            });
        }
        if let LayerState::Uninitialized = self.state {
            self.initialize(x.shape()[1]);
        }

        let y = match &self.state {
            LayerState::Initialized {
                weight,
                bias: Some(bias),
            } => x.linear(weight, bias)?,
            LayerState::Initialized { weight, bias: None } => x.matmul(weight)?,
            LayerState::Uninitialized => {
                return Err(GraphGradError::InternalConsistency {
                    operation: "Linear".to_string(),
                    generation: x.generation(),
                    reason: "parameters missing after initialization".to_string(),
                })
            }
        };
        Ok(vec![y])
    }

    fn named_parameters(&self) -> Vec<(String, Parameter)> {
        match &self.state {
            LayerState::Uninitialized => Vec::new(),
            LayerState::Initialized { weight, bias } => {
                let mut params = vec![("W".to_string(), weight.clone())];
                if let Some(bias) = bias {
                    params.push(("b".to_string(), bias.clone()));
                }
                params
            }
        }
    }

    fn record(&self) -> &LayerRecord {
        &self.record
    }

    fn record_mut(&mut self) -> &mut LayerRecord {
        &mut self.record
    }

    fn is_initialized(&self) -> bool {
        matches!(self.state, LayerState::Initialized { .. })
    }
}

impl fmt::Debug for Linear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Linear")
            .field("out_size", &self.out_size)
            .field("use_bias", &self.use_bias)
            .field("state", &self.state)
            .finish()
    }
}

#[cfg(test)]
#[path = "linear_test.rs"]
mod tests;
