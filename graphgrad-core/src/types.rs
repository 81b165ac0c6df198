use ndarray::ArrayD;

/// The numeric value stored in every tensor and gradient.
///
/// A dynamically ranked, row-major array of `f64`.
pub type NdArray = ArrayD<f64>;

