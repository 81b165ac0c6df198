//! Built-in operations.
//!
//! The operator set is closed, so dispatch goes through the [`Op`] enum. Each
//! variant wraps a per-operation struct in its own file that holds the
//! forward computation and the local gradient rule.

pub mod activation;
pub mod arithmetic;
pub mod linalg;
pub mod loss;
pub mod math_elem;
pub mod reduction;
pub mod view;

use crate::autograd::function::Function;
use crate::error::GraphGradError;
use crate::tensor::Tensor;
use crate::types::NdArray;

use activation::{ReluOp, SigmoidOp};
use arithmetic::{AddOp, DivOp, MulOp, NegOp, PowOp, SquareOp, SubOp};
use linalg::{LinearOp, MatmulOp, TransposeOp};
use loss::{MeanSquaredErrorOp, SoftmaxCrossEntropyOp};
use math_elem::ExpOp;
use reduction::SumOp;
use view::{BroadcastToOp, GetItemOp, ReshapeOp, SumToOp};

/// Values available to a local gradient rule.
pub struct BackwardContext<'a> {
    /// Forward input values, in call order.
    pub xs: Vec<&'a NdArray>,
    /// Forward output values.
    pub ys: Vec<&'a NdArray>,
    /// Gradients flowing into the outputs.
    pub gys: Vec<&'a NdArray>,
}

impl<'a> BackwardContext<'a> {
    pub fn x(&self, i: usize) -> &'a NdArray {
        self.xs[i]
    }

    pub fn y(&self) -> &'a NdArray {
        self.ys[0]
    }

    pub fn gy(&self) -> &'a NdArray {
        self.gys[0]
    }
}

/// The closed set of operation kinds.
#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    Add(AddOp),
    Sub(SubOp),
    Mul(MulOp),
    Div(DivOp),
    Neg(NegOp),
    Pow(PowOp),
    Square(SquareOp),
    Exp(ExpOp),
    Matmul(MatmulOp),
    Linear(LinearOp),
    Reshape(ReshapeOp),
    Transpose(TransposeOp),
    BroadcastTo(BroadcastToOp),
    SumTo(SumToOp),
    Sum(SumOp),
    Sigmoid(SigmoidOp),
    Relu(ReluOp),
    MeanSquaredError(MeanSquaredErrorOp),
    SoftmaxCrossEntropy(SoftmaxCrossEntropyOp),
    GetItem(GetItemOp),
}

impl Op {
    pub fn name(&self) -> &'static str {
        match self {
            Op::Add(_) => "Add",
            Op::Sub(_) => "Sub",
            Op::Mul(_) => "Mul",
            Op::Div(_) => "Div",
            Op::Neg(_) => "Neg",
            Op::Pow(_) => "Pow",
            Op::Square(_) => "Square",
            Op::Exp(_) => "Exp",
            Op::Matmul(_) => "Matmul",
            Op::Linear(_) => "Linear",
            Op::Reshape(_) => "Reshape",
            Op::Transpose(_) => "Transpose",
            Op::BroadcastTo(_) => "BroadcastTo",
            Op::SumTo(_) => "SumTo",
            Op::Sum(_) => "Sum",
            Op::Sigmoid(_) => "Sigmoid",
            Op::Relu(_) => "Relu",
            Op::MeanSquaredError(_) => "MeanSquaredError",
            Op::SoftmaxCrossEntropy(_) => "SoftmaxCrossEntropy",
            Op::GetItem(_) => "GetItem",
        }
    }

    /// Declared input arity.
    pub fn n_in(&self) -> usize {
        match self {
            Op::Add(_)
            | Op::Sub(_)
            | Op::Mul(_)
            | Op::Div(_)
            | Op::Matmul(_)
            | Op::MeanSquaredError(_)
            | Op::SoftmaxCrossEntropy(_) => 2,
            Op::Linear(_) => 3,
            Op::Neg(_)
            | Op::Pow(_)
            | Op::Square(_)
            | Op::Exp(_)
            | Op::Reshape(_)
            | Op::Transpose(_)
            | Op::BroadcastTo(_)
            | Op::SumTo(_)
            | Op::Sum(_)
            | Op::Sigmoid(_)
            | Op::Relu(_)
            | Op::GetItem(_) => 1,
        }
    }

    /// Declared output arity. Every built-in operation has a single output.
    pub fn n_out(&self) -> usize {
        1
    }

    fn check_arity(&self, actual: usize) -> Result<(), GraphGradError> {
        if actual != self.n_in() {
            return Err(GraphGradError::ArityMismatch {
                operation: self.name().to_string(),
                expected: self.n_in(),
                actual,
            });
        }
        Ok(())
    }

    /// Computes the output values from the input values.
    pub fn forward(&self, xs: &[&NdArray]) -> Result<Vec<NdArray>, GraphGradError> {
        self.check_arity(xs.len())?;
        let y = match self {
            Op::Add(op) => op.forward(xs[0], xs[1])?,
            Op::Sub(op) => op.forward(xs[0], xs[1])?,
            Op::Mul(op) => op.forward(xs[0], xs[1])?,
            Op::Div(op) => op.forward(xs[0], xs[1])?,
            Op::Neg(op) => op.forward(xs[0]),
            Op::Pow(op) => op.forward(xs[0]),
            Op::Square(op) => op.forward(xs[0]),
            Op::Exp(op) => op.forward(xs[0]),
            Op::Matmul(op) => op.forward(xs[0], xs[1])?,
            Op::Linear(op) => op.forward(xs[0], xs[1], xs[2])?,
            Op::Reshape(op) => op.forward(xs[0])?,
            Op::Transpose(op) => op.forward(xs[0])?,
            Op::BroadcastTo(op) => op.forward(xs[0])?,
            Op::SumTo(op) => op.forward(xs[0])?,
            Op::Sum(op) => op.forward(xs[0])?,
            Op::Sigmoid(op) => op.forward(xs[0]),
            Op::Relu(op) => op.forward(xs[0]),
            Op::MeanSquaredError(op) => op.forward(xs[0], xs[1])?,
            Op::SoftmaxCrossEntropy(op) => op.forward(xs[0], xs[1])?,
            Op::GetItem(op) => op.forward(xs[0])?,
        };
        Ok(vec![y])
    }

    /// Computes one gradient per input, each shaped like that input.
    pub fn backward(&self, ctx: &BackwardContext<'_>) -> Result<Vec<NdArray>, GraphGradError> {
        self.check_arity(ctx.xs.len())?;
        if ctx.ys.len() != self.n_out() || ctx.gys.len() != self.n_out() {
            return Err(GraphGradError::ArityMismatch {
                operation: format!("{} backward", self.name()),
                expected: self.n_out(),
                actual: ctx.gys.len(),
            });
        }
        match self {
            Op::Add(op) => op.backward(ctx),
            Op::Sub(op) => op.backward(ctx),
            Op::Mul(op) => op.backward(ctx),
            Op::Div(op) => op.backward(ctx),
            Op::Neg(op) => op.backward(ctx),
            Op::Pow(op) => op.backward(ctx),
            Op::Square(op) => op.backward(ctx),
            Op::Exp(op) => op.backward(ctx),
            Op::Matmul(op) => op.backward(ctx),
            Op::Linear(op) => op.backward(ctx),
            Op::Reshape(op) => op.backward(ctx),
            Op::Transpose(op) => op.backward(ctx),
            Op::BroadcastTo(op) => op.backward(ctx),
            Op::SumTo(op) => op.backward(ctx),
            Op::Sum(op) => op.backward(ctx),
            Op::Sigmoid(op) => op.backward(ctx),
            Op::Relu(op) => op.backward(ctx),
            Op::MeanSquaredError(op) => op.backward(ctx),
            Op::SoftmaxCrossEntropy(op) => op.backward(ctx),
            Op::GetItem(op) => op.backward(ctx),
        }
    }
}

/// Calls `op` through the graph and returns its single output.
pub(crate) fn apply_op(op: Op, inputs: &[&Tensor]) -> Result<Tensor, GraphGradError> {
    let name = op.name();
    let inputs: Vec<Tensor> = inputs.iter().map(|&tensor| tensor.clone()).collect();
    Function::call(op, &inputs)?
        .into_iter()
        .next()
        .ok_or_else(|| GraphGradError::InternalConsistency {
            operation: name.to_string(),
            generation: 0,
            reason: "call returned no output".to_string(),
        })
}

/// Reads the single element of a rank-0 (or one-element) gradient.
pub(crate) fn scalar_of(value: &NdArray, operation: &str) -> Result<f64, GraphGradError> {
    if value.len() != 1 {
        return Err(GraphGradError::ShapeMismatch {
            expected: vec![],
            actual: value.shape().to_vec(),
            operation: operation.to_string(),
        });
    }
    value
        .iter()
        .next()
        .copied()
        .ok_or_else(|| GraphGradError::IndexOutOfBounds {
            index: vec![0],
            shape: value.shape().to_vec(),
        })
}
