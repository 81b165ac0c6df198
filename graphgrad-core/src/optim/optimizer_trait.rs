use crate::error::GraphGradError;
use crate::nn::parameter::Parameter;

/// Trait defining the common interface for all optimizers.
///
/// Optimizers update parameter values in place from their accumulated
/// gradients. They never touch the graph.
pub trait Optimizer {
    /// Updates a single parameter. Only called for parameters carrying a gradient.
    fn update_single_parameter(&mut self, param: &Parameter) -> Result<(), GraphGradError>;

    /// Performs a single optimization step over `params`.
    ///
    /// Parameters without a gradient (never used, or freshly cleared) are skipped.
    fn update(&mut self, params: &[Parameter]) -> Result<(), GraphGradError> {
        let with_grad: Vec<&Parameter> = params.iter().filter(|p| p.has_grad()).collect();
        if with_grad.is_empty() && !params.is_empty() {
            log::warn!(
                "Optimizer::update: none of the {} parameter(s) has a gradient; nothing to do",
                params.len()
            );
        }
        for param in with_grad {
            self.update_single_parameter(param)?;
        }
        Ok(())
    }
}
