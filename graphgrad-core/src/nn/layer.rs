use crate::error::GraphGradError;
use crate::nn::parameter::Parameter;
use crate::tensor::Tensor;
use crate::tensor_data::TensorData;
use std::cell::RefCell;
use std::rc::Weak;

/// Weak references to the inputs and outputs of a layer's most recent call.
///
/// Kept for introspection only, so the record never keeps a graph alive.
#[derive(Debug, Default)]
pub struct LayerRecord {
    inputs: Vec<Weak<RefCell<TensorData>>>,
    outputs: Vec<Weak<RefCell<TensorData>>>,
}

impl LayerRecord {
    pub fn new() -> Self {
        LayerRecord::default()
    }

    pub fn remember(&mut self, inputs: &[Tensor], outputs: &[Tensor]) {
        self.inputs = inputs.iter().map(Tensor::downgrade).collect();
        self.outputs = outputs.iter().map(Tensor::downgrade).collect();
    }

    /// Inputs of the last call that are still alive.
    pub fn last_inputs(&self) -> Vec<Tensor> {
        self.inputs.iter().filter_map(Tensor::upgrade).collect()
    }

    /// Outputs of the last call that are still alive.
    pub fn last_outputs(&self) -> Vec<Tensor> {
        self.outputs.iter().filter_map(Tensor::upgrade).collect()
    }
}

/// The base trait for all layers.
///
/// A layer owns a name to Parameter mapping and builds its output from the
/// built-in operations, so the backward pass needs nothing layer-specific.
pub trait Layer: std::fmt::Debug {
    /// Performs a forward pass of the layer.
    ///
    /// May create the layer's Parameters on first use, once input shapes are known.
    fn forward(&mut self, inputs: &[Tensor]) -> Result<Vec<Tensor>, GraphGradError>;

    /// Returns the layer's Parameters with their names, e.g. `("W", ..)`.
    ///
    /// Empty until the Parameters exist.
    fn named_parameters(&self) -> Vec<(String, Parameter)>;

    fn record(&self) -> &LayerRecord;

    fn record_mut(&mut self) -> &mut LayerRecord;

    /// True once every Parameter has been created.
    fn is_initialized(&self) -> bool {
        true
    }

    /// Runs [`Layer::forward`] and records weak handles to its inputs and outputs.
    fn call(&mut self, inputs: &[Tensor]) -> Result<Vec<Tensor>, GraphGradError> {
        let outputs = self.forward(inputs)?;
        self.record_mut().remember(inputs, &outputs);
        Ok(outputs)
    }

    fn parameters(&self) -> Vec<Parameter> {
        self.named_parameters()
            .into_iter()
            .map(|(_, param)| param)
            .collect()
    }

    /// Clears the gradient of every owned Parameter.
    fn clear_grads(&self) {
        for param in self.parameters() {
            param.clear_grad();
        }
    }
}

#[cfg(test)]
#[path = "layer_test.rs"]
mod tests;
