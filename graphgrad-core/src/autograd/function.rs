use crate::autograd::graph_mode::GraphContext;
use crate::error::GraphGradError;
use crate::ops::Op;
use crate::tensor::Tensor;
use crate::tensor_data::TensorData;
use crate::types::NdArray;
use std::cell::{Ref, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

/// One node of computation in the graph.
///
/// Inputs are held strongly. Outputs are held weakly: each output owns its
/// producer, so a strong edge back would form a cycle that is never freed.
#[derive(Clone)]
pub struct Function {
    pub(crate) inner: Rc<RefCell<FunctionData>>,
}

pub struct FunctionData {
    pub op: Op,
    /// Max generation over the inputs.
    pub generation: usize,
    pub inputs: Vec<Tensor>,
    pub outputs: Vec<Weak<RefCell<TensorData>>>,
}

impl Function {
    /// Runs `op` forward on `inputs` and grows the graph if the thread's
    /// graph mode is enabled.
    pub fn call(op: Op, inputs: &[Tensor]) -> Result<Vec<Tensor>, GraphGradError> {
        Function::call_with(op, inputs, GraphContext::current())
    }

    /// Same as [`Function::call`] with an explicit graph context.
    ///
    /// Shape errors surface here, before anything is linked, so a failed call
    /// never leaves a half-grown graph behind.
    pub fn call_with(
        op: Op,
        inputs: &[Tensor],
        context: GraphContext,
    ) -> Result<Vec<Tensor>, GraphGradError> {
        if inputs.len() != op.n_in() {
            return Err(GraphGradError::ArityMismatch {
                operation: op.name().to_string(),
                expected: op.n_in(),
                actual: inputs.len(),
            });
        }

        let values = {
            let guards: Vec<Ref<'_, TensorData>> = inputs.iter().map(Tensor::read_data).collect();
            let xs: Vec<&NdArray> = guards.iter().map(|guard| &guard.value).collect();
            op.forward(&xs)?
        };
        if values.len() != op.n_out() {
            return Err(GraphGradError::InternalConsistency {
                operation: op.name().to_string(),
                generation: 0,
                reason: format!(
                    "forward produced {} value(s) for {} declared output(s)",
                    values.len(),
                    op.n_out()
                ),
            });
        }

        let outputs: Vec<Tensor> = values.into_iter().map(Tensor::new).collect();

        if context.enable_graph {
            let generation = inputs.iter().map(Tensor::generation).max().unwrap_or(0);
            let function = Function {
                inner: Rc::new(RefCell::new(FunctionData {
                    op,
                    generation,
                    inputs: inputs.to_vec(),
                    outputs: outputs.iter().map(Tensor::downgrade).collect(),
                })),
            };
            for output in &outputs {
                let mut guard = output.write_data();
                guard.producer = Some(function.clone());
                guard.generation = generation + 1;
            }
        }

        Ok(outputs)
    }

    pub(crate) fn read_data(&self) -> Ref<'_, FunctionData> {
        self.inner.borrow()
    }

    pub fn generation(&self) -> usize {
        self.read_data().generation
    }

    /// Kind name of the operation, e.g. `"Mul"`.
    pub fn name(&self) -> &'static str {
        self.read_data().op.name()
    }

    pub fn op(&self) -> Op {
        self.read_data().op.clone()
    }

    pub fn n_in(&self) -> usize {
        self.read_data().op.n_in()
    }

    pub fn n_out(&self) -> usize {
        self.read_data().op.n_out()
    }

    /// Strong handles to the inputs, in call order.
    pub fn inputs(&self) -> Vec<Tensor> {
        self.read_data().inputs.clone()
    }

    /// Resolves the weak output references. `None` for outputs already dropped.
    pub fn outputs(&self) -> Vec<Option<Tensor>> {
        self.read_data().outputs.iter().map(Tensor::upgrade).collect()
    }

    pub fn ptr_eq(&self, other: &Function) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// A stable identity for the node, valid while it is alive.
    pub fn id(&self) -> usize {
        Rc::as_ptr(&self.inner) as usize
    }
}

impl fmt::Debug for Function {
    // Inputs are summarized: printing them in full would walk the whole graph.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.inner.try_borrow() {
            Ok(data) => write!(
                f,
                "Function(op={}, generation={}, n_inputs={}, n_outputs={})",
                data.op.name(),
                data.generation,
                data.inputs.len(),
                data.outputs.len()
            ),
            Err(_) => write!(f, "Function(<mutably borrowed>)"),
        }
    }
}

#[cfg(test)]
#[path = "function_test.rs"]
mod tests;
