// src/tensor/broadcast_utils.rs

use crate::error::GraphGradError;
use crate::types::NdArray;
use ndarray::{Axis, IxDyn};

/// Computes the shape two operands broadcast to (numpy rules, right-aligned).
pub fn broadcast_shapes(shape1: &[usize], shape2: &[usize]) -> Result<Vec<usize>, GraphGradError> {
    let rank = shape1.len().max(shape2.len());
    let mut result = vec![0; rank];
    for i in 0..rank {
        // Walk from the trailing axis, padding the shorter shape with 1.
        let d1 = if i < shape1.len() { shape1[shape1.len() - 1 - i] } else { 1 };
        let d2 = if i < shape2.len() { shape2[shape2.len() - 1 - i] } else { 1 };
        result[rank - 1 - i] = if d1 == d2 || d2 == 1 {
            d1
        } else if d1 == 1 {
            d2
        } else {
            return Err(GraphGradError::BroadcastError {
                shape1: shape1.to_vec(),
                shape2: shape2.to_vec(),
            });
        };
    }
    Ok(result)
}

/// Materializes `value` broadcast to `shape`.
pub fn broadcast_array(value: &NdArray, shape: &[usize]) -> Result<NdArray, GraphGradError> {
    if value.shape() == shape {
        return Ok(value.clone());
    }
    value
        .broadcast(IxDyn(shape))
        .map(|view| view.to_owned())
        .ok_or_else(|| GraphGradError::BroadcastError {
            shape1: value.shape().to_vec(),
            shape2: shape.to_vec(),
        })
}

/// Sums `value` over `axes` (all axes when `None`).
///
/// With `keep_dims` the reduced axes stay in place with size 1.
pub fn sum_axes(
    value: &NdArray,
    axes: Option<&[usize]>,
    keep_dims: bool,
) -> Result<NdArray, GraphGradError> {
    let rank = value.ndim();
    let mut axes: Vec<usize> = match axes {
        Some(axes) => axes.to_vec(),
        None => (0..rank).collect(),
    };
    axes.sort_unstable();
    axes.dedup();
    if let Some(&axis) = axes.iter().find(|&&axis| axis >= rank) {
        return Err(GraphGradError::InvalidAxis { axis, rank });
    }

    let mut result = value.clone();
    for &axis in &axes {
        result = result.sum_axis(Axis(axis)).insert_axis(Axis(axis));
    }
    if !keep_dims {
        // Highest axis first so the remaining indices stay valid.
        for &axis in axes.iter().rev() {
            result = result.index_axis_move(Axis(axis), 0);
        }
    }
    Ok(result)
}

/// Reduces a gradient that arrived in a broadcast shape back to `target_shape`.
///
/// Leading axes absent from the target are summed away, then every axis whose
/// target size is 1 is summed with its size kept.
pub fn sum_to(value: &NdArray, target_shape: &[usize]) -> Result<NdArray, GraphGradError> {
    if value.shape() == target_shape {
        return Ok(value.clone());
    }
    let rank = value.ndim();
    let target_rank = target_shape.len();
    if rank < target_rank {
        return Err(GraphGradError::ShapeMismatch {
            expected: target_shape.to_vec(),
            actual: value.shape().to_vec(),
            operation: "sum_to".to_string(),
        });
    }

    let lead = rank - target_rank;
    let mut result = value.clone();
    for _ in 0..lead {
        result = result.sum_axis(Axis(0));
    }
    let ones: Vec<usize> = target_shape
        .iter()
        .enumerate()
        .filter(|&(i, &size)| size == 1 && result.shape()[i] != 1)
        .map(|(i, _)| i)
        .collect();
    if !ones.is_empty() {
        result = sum_axes(&result, Some(&ones), true)?;
    }

    if result.shape() != target_shape {
        return Err(GraphGradError::ShapeMismatch {
            expected: target_shape.to_vec(),
            actual: value.shape().to_vec(),
            operation: "sum_to".to_string(),
        });
    }
    Ok(result)
}

#[cfg(test)]
#[path = "broadcast_utils_test.rs"]
mod tests;
