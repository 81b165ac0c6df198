use crate::error::GraphGradError;
use crate::ops::{apply_op, scalar_of, BackwardContext, Op};
use crate::tensor::Tensor;
use crate::types::NdArray;
use ndarray::{Axis, Zip};

const PROB_FLOOR: f64 = 1.0e-12;

/// Softmax over the last axis followed by cross entropy against `label`.
///
/// `label` is either one-hot with the same shape as the score, or a vector of
/// class indices with one dimension less. Gradients only flow to the score.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SoftmaxCrossEntropyOp;

impl SoftmaxCrossEntropyOp {
    pub fn forward(&self, score: &NdArray, label: &NdArray) -> Result<NdArray, GraphGradError> {
        check_score_rank(score)?;
        let target = one_hot_target(score, label)?;
        let p = softmax_array(score);
        let n = score_batch_size(score) as f64;
        let total = Zip::from(&p)
            .and(&target)
            .fold(0.0, |acc, &p, &t| acc + t * p.clamp(PROB_FLOOR, 1.0).ln());
        Ok(NdArray::from_elem(Vec::<usize>::new(), -total / n))
    }

    pub fn backward(&self, ctx: &BackwardContext<'_>) -> Result<Vec<NdArray>, GraphGradError> {
        let (score, label) = (ctx.x(0), ctx.x(1));
        let g = scalar_of(ctx.gy(), "SoftmaxCrossEntropy backward")?;
        let target = one_hot_target(score, label)?;
        let scale = g / score_batch_size(score) as f64;
        let gx = Zip::from(&softmax_array(score))
            .and(&target)
            .map_collect(|&p, &t| (p - t) * scale);
        Ok(vec![gx, NdArray::zeros(label.raw_dim())])
    }
}

fn check_score_rank(score: &NdArray) -> Result<(), GraphGradError> {
    if score.ndim() == 0 || score.ndim() > 2 {
        return Err(GraphGradError::RankMismatch {
            operation: "SoftmaxCrossEntropy".to_string(),
            expected: 2,
            actual: score.ndim(),
        });
    }
    Ok(())
}

/// Rows of a rank-2 score are samples; a rank-1 score is a single sample.
fn score_batch_size(score: &NdArray) -> usize {
    if score.ndim() == 2 {
        score.shape()[0]
    } else {
        1
    }
}

/// Max-subtracted softmax along the last axis.
pub(crate) fn softmax_array(x: &NdArray) -> NdArray {
    let mut out = x.to_owned();
    if out.ndim() == 0 {
        out.fill(1.0);
        return out;
    }
    let last = Axis(out.ndim() - 1);
    for mut lane in out.lanes_mut(last) {
        let max = lane.fold(f64::NEG_INFINITY, |m, &v| m.max(v));
        lane.mapv_inplace(|v| (v - max).exp());
        let total = lane.sum();
        lane.mapv_inplace(|v| v / total);
    }
    out
}

/// Converts `label` into a one-hot array shaped like `score`.
fn one_hot_target(score: &NdArray, label: &NdArray) -> Result<NdArray, GraphGradError> {
    if label.shape() == score.shape() {
        return Ok(label.to_owned());
    }
    let rank = score.ndim();
    let classes = score.shape()[rank - 1];
    if label.shape() != &score.shape()[..rank - 1] {
        return Err(GraphGradError::ShapeMismatch {
            expected: score.shape()[..rank - 1].to_vec(),
            actual: label.shape().to_vec(),
            operation: "SoftmaxCrossEntropy".to_string(),
        });
    }

    let mut target = NdArray::zeros(score.raw_dim());
    for (mut row, &class) in target.lanes_mut(Axis(rank - 1)).into_iter().zip(label.iter()) {
        let class = class_index(class, classes, score.shape())?;
        row[class] = 1.0;
    }
    Ok(target)
}

/// Checks that `class` is a non-negative integer below `classes`.
pub(crate) fn class_index(class: f64, classes: usize, shape: &[usize]) -> Result<usize, GraphGradError> {
    if class < 0.0 || class.fract() != 0.0 {
        return Err(GraphGradError::InvalidConfiguration(format!(
            "class label {class} is not a non-negative integer"
        )));
    }
    let class = class as usize;
    if class >= classes {
        return Err(GraphGradError::IndexOutOfBounds {
            index: vec![class],
            shape: shape.to_vec(),
        });
    }
    Ok(class)
}

/// Softmax of `x` over its last axis. Not differentiable through the graph.
pub fn softmax(x: &Tensor) -> Tensor {
    Tensor::new(softmax_array(&x.read_data().value))
}

/// Averaged cross entropy between `softmax(score)` and `label`.
pub fn softmax_cross_entropy(score: &Tensor, label: &Tensor) -> Result<Tensor, GraphGradError> {
    apply_op(Op::SoftmaxCrossEntropy(SoftmaxCrossEntropyOp), &[score, label])
}

#[cfg(test)]
#[path = "softmax_cross_entropy_test.rs"]
mod tests;
