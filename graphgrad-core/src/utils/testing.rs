use crate::tensor::Tensor;
use crate::types::NdArray;
use approx::abs_diff_eq;

/// Checks if a tensor's value matches an expected shape and row-major data
/// within `tolerance`.
/// Panics if shapes differ or data differs significantly.
pub fn check_tensor_near(
    actual: &Tensor,
    expected_shape: &[usize],
    expected_data: &[f64],
    tolerance: f64,
) {
    check_array_near(&actual.value(), expected_shape, expected_data, tolerance);
}

/// Same as [`check_tensor_near`] for a bare array (e.g. a gradient).
pub fn check_array_near(
    actual: &NdArray,
    expected_shape: &[usize],
    expected_data: &[f64],
    tolerance: f64,
) {
    assert_eq!(actual.shape(), expected_shape, "Shape mismatch");
    assert_eq!(actual.len(), expected_data.len(), "Data length mismatch");

    for (i, (a, e)) in actual.iter().zip(expected_data.iter()).enumerate() {
        if !abs_diff_eq!(*a, *e, epsilon = tolerance) {
            panic!(
                "Data mismatch at index {}: actual={:?}, expected={:?}, diff={:?}, tolerance={:?}",
                i,
                a,
                e,
                (a - e).abs(),
                tolerance
            );
        }
    }
}
