//! Reverse traversal of the graph.

use crate::autograd::function::Function;
use crate::error::GraphGradError;
use crate::ops::BackwardContext;
use crate::tensor::Tensor;
use crate::types::NdArray;
use std::collections::HashSet;

/// Options for [`Tensor::backward_with`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BackwardOptions {
    /// Keep the gradients of intermediate (non-leaf) tensors.
    pub retain_grad: bool,
}

/// Pending functions, ascending by generation, each enqueued at most once.
struct Worklist {
    pending: Vec<Function>,
    seen: HashSet<usize>,
}

impl Worklist {
    fn new() -> Self {
        Worklist {
            pending: Vec::new(),
            seen: HashSet::new(),
        }
    }

    fn push(&mut self, function: Function) {
        if self.seen.insert(function.id()) {
            self.pending.push(function);
            self.pending.sort_by_key(Function::generation);
        }
    }

    /// Removes the highest-generation function.
    fn pop(&mut self) -> Option<Function> {
        self.pending.pop()
    }
}

pub(crate) fn run_backward(
    terminal: &Tensor,
    options: BackwardOptions,
) -> Result<(), GraphGradError> {
    if !terminal.has_grad() {
        let seed = NdArray::ones(terminal.read_data().value.raw_dim());
        terminal.write_data().grad = Some(seed);
    }

    let producer = match terminal.producer() {
        Some(producer) => producer,
        None => {
            log::debug!("backward() called on a leaf tensor. No operation to perform.");
            return Ok(());
        }
    };

    let mut worklist = Worklist::new();
    worklist.push(producer);

    while let Some(function) = worklist.pop() {
        log::trace!(
            "backward: processing {} (generation {})",
            function.name(),
            function.generation()
        );
        for input in propagate(&function, options)? {
            if let Some(producer) = input.producer() {
                worklist.push(producer);
            }
        }
    }
    Ok(())
}

/// Runs one function's local gradient rule and accumulates the results into
/// its inputs. Returns the inputs so the caller can schedule their producers.
fn propagate(function: &Function, options: BackwardOptions) -> Result<Vec<Tensor>, GraphGradError> {
    let data = function.read_data();
    let consistency_error = |reason: String| GraphGradError::InternalConsistency {
        operation: data.op.name().to_string(),
        generation: data.generation,
        reason,
    };

    let outputs = data
        .outputs
        .iter()
        .enumerate()
        .map(|(i, weak)| {
            Tensor::upgrade(weak)
                .ok_or_else(|| consistency_error(format!("output {} was dropped before backward", i)))
        })
        .collect::<Result<Vec<Tensor>, GraphGradError>>()?;

    let input_grads = {
        let input_guards: Vec<_> = data.inputs.iter().map(Tensor::read_data).collect();
        let output_guards: Vec<_> = outputs.iter().map(Tensor::read_data).collect();
        let gys = output_guards
            .iter()
            .enumerate()
            .map(|(i, guard)| {
                guard.grad.as_ref().ok_or_else(|| {
                    consistency_error(format!("gradient of output {} is missing", i))
                })
            })
            .collect::<Result<Vec<&NdArray>, GraphGradError>>()?;
        let context = BackwardContext {
            xs: input_guards.iter().map(|guard| &guard.value).collect(),
            ys: output_guards.iter().map(|guard| &guard.value).collect(),
            gys,
        };
        data.op.backward(&context)?
    };

    if input_grads.len() != data.inputs.len() {
        return Err(consistency_error(format!(
            "backward returned {} gradient(s) for {} input(s)",
            input_grads.len(),
            data.inputs.len()
        )));
    }

    for (input, grad) in data.inputs.iter().zip(input_grads) {
        if grad.shape() != input.read_data().value.shape() {
            return Err(consistency_error(format!(
                "gradient shape {:?} does not match input shape {:?}",
                grad.shape(),
                input.shape()
            )));
        }
        input.accumulate_grad(grad);
    }

    if !options.retain_grad {
        for output in &outputs {
            output.clear_grad();
        }
    }

    Ok(data.inputs.clone())
}

#[cfg(test)]
#[path = "backward_test.rs"]
mod tests;
