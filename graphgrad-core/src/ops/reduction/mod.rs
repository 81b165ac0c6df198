pub mod sum;

pub use sum::{sum_axes_op, sum_op, SumOp};
