// src/tensor/debug.rs
use crate::tensor::Tensor;
use std::fmt;

impl fmt::Debug for Tensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.data.try_borrow() {
            Ok(guard) => {
                write!(f, "Tensor(")?;
                if let Some(name) = &guard.name {
                    write!(f, "name={:?}, ", name)?;
                }
                write!(
                    f,
                    "shape={:?}, generation={}, has_grad={}, has_producer={}",
                    guard.value.shape(),
                    guard.generation,
                    guard.grad.is_some(),
                    guard.producer.is_some()
                )?;
                // Only small values are worth printing in full.
                if guard.value.len() <= 16 {
                    write!(f, ", value={:?}", guard.value.iter().collect::<Vec<_>>())?;
                }
                write!(f, ")")
            }
            Err(_) => write!(f, "Tensor(<mutably borrowed>)"),
        }
    }
}
