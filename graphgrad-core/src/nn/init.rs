//! Weight initialization.

use crate::tensor::create::randn_array;
use crate::types::NdArray;
use rand::Rng;

/// Xavier-style initialization for a `[in_size, out_size]` weight:
/// standard normal samples scaled by `sqrt(1 / in_size)`.
pub fn xavier_normal<R: Rng + ?Sized>(in_size: usize, out_size: usize, rng: &mut R) -> NdArray {
    let scale = (1.0 / in_size.max(1) as f64).sqrt();
    randn_array(&[in_size, out_size], rng) * scale
}

#[cfg(test)]
#[path = "init_test.rs"]
mod tests;
