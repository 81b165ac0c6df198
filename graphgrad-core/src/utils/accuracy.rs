use crate::error::GraphGradError;
use crate::ops::loss::softmax_cross_entropy::class_index;
use crate::tensor::Tensor;
use crate::types::NdArray;
use ndarray::Axis;

/// Fraction of rows whose highest score matches the label.
///
/// `score` is `[N, C]`. `label` is either one-hot `[N, C]` or class indices `[N]`.
/// Not part of the graph.
pub fn accuracy(score: &Tensor, label: &Tensor) -> Result<f64, GraphGradError> {
    let score = score.value();
    let label = label.value();
    if score.ndim() != 2 {
        return Err(GraphGradError::RankMismatch {
            operation: "accuracy".to_string(),
            expected: 2,
            actual: score.ndim(),
        });
    }

    let predicted = argmax_rows(&score);
    let expected: Vec<usize> = if label.shape() == score.shape() {
        argmax_rows(&label)
    } else if label.shape() == &score.shape()[..1] {
        let classes = score.shape()[1];
        label
            .iter()
            .map(|&v| class_index(v, classes, score.shape()))
            .collect::<Result<_, _>>()?
    } else {
        return Err(GraphGradError::ShapeMismatch {
            expected: score.shape()[..1].to_vec(),
            actual: label.shape().to_vec(),
            operation: "accuracy".to_string(),
        });
    };

    if predicted.is_empty() {
        return Ok(0.0);
    }
    let hits = predicted
        .iter()
        .zip(expected.iter())
        .filter(|(p, e)| p == e)
        .count();
    Ok(hits as f64 / predicted.len() as f64)
}

/// Index of the maximum along the last axis of a rank-2 array; first wins on ties.
pub(crate) fn argmax_rows(value: &NdArray) -> Vec<usize> {
    value
        .lanes(Axis(value.ndim() - 1))
        .into_iter()
        .map(|row| {
            row.iter()
                .enumerate()
                .fold((0, f64::NEG_INFINITY), |(best_i, best_v), (i, &v)| {
                    if v > best_v {
                        (i, v)
                    } else {
                        (best_i, best_v)
                    }
                })
                .0
        })
        .collect()
}

#[cfg(test)]
#[path = "accuracy_test.rs"]
mod tests;
