use crate::error::GraphGradError;
use crate::nn::activation::Activation;
use crate::nn::layer::Layer;
use crate::nn::layers::linear::Linear;
use crate::nn::parameter::Parameter;
use crate::tensor::Tensor;
use std::cell::RefCell;

/// A fixed sequence of layers with an activation between consecutive layers.
///
/// The output of the last layer is returned as is.
#[derive(Debug)]
pub struct Sequential {
    layers: Vec<Box<dyn Layer>>,
    activation: Activation,
    params_cache: RefCell<Option<Vec<Parameter>>>,
}

impl Sequential {
    pub fn new(layers: Vec<Box<dyn Layer>>, activation: Activation) -> Self {
        Sequential {
            layers,
            activation,
            params_cache: RefCell::new(None),
        }
    }

    /// A multi-layer perceptron: one lazily-sized [`Linear`] per entry of `out_sizes`.
    pub fn mlp(out_sizes: &[usize], activation: Activation) -> Self {
        let layers = out_sizes
            .iter()
            .map(|&size| Box::new(Linear::new(size)) as Box<dyn Layer>)
            .collect();
        Sequential::new(layers, activation)
    }

    /// Same as [`Sequential::mlp`] with deterministic weight initialization.
    pub fn mlp_seeded(out_sizes: &[usize], activation: Activation, seed: u64) -> Self {
        let layers = out_sizes
            .iter()
            .enumerate()
            .map(|(i, &size)| Box::new(Linear::new(size).with_seed(seed + i as u64)) as Box<dyn Layer>)
            .collect();
        Sequential::new(layers, activation)
    }

    pub fn layers(&self) -> &[Box<dyn Layer>] {
        &self.layers
    }

    pub fn activation(&self) -> Activation {
        self.activation
    }

    /// Runs every layer in order.
    pub fn predict(&mut self, x: &Tensor) -> Result<Tensor, GraphGradError> {
        let last = self.layers.len().saturating_sub(1);
        let mut current = x.clone();
        for (i, layer) in self.layers.iter_mut().enumerate() {
            let outputs = layer.call(&[current])?;
            current = outputs
                .into_iter()
                .next()
                .ok_or_else(|| GraphGradError::InternalConsistency {
                    operation: "Sequential".to_string(),
                    generation: 0,
                    reason: format!("layer {} returned no output", i),
                })?;
            if i < last {
                current = self.activation.apply(&current)?;
            }
        }
        Ok(current)
    }

    /// Every layer's Parameters, flattened in layer order.
    ///
    /// The list is cached once every layer has created its Parameters; the
    /// layer list is fixed, so the cache never goes stale.
    pub fn parameters(&self) -> Vec<Parameter> {
        if let Some(cached) = self.params_cache.borrow().as_ref() {
            return cached.clone();
        }
        let params: Vec<Parameter> = self
            .layers
            .iter()
            .flat_map(|layer| layer.parameters())
            .collect();
        if self.layers.iter().all(|layer| layer.is_initialized()) {
            *self.params_cache.borrow_mut() = Some(params.clone());
        }
        params
    }

    pub fn clear_grads(&self) {
        for param in self.parameters() {
            param.clear_grad();
        }
    }
}

#[cfg(test)]
#[path = "sequential_test.rs"]
mod tests;
