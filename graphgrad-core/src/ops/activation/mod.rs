pub mod relu;
pub mod sigmoid;

pub use relu::{relu_op, ReluOp};
pub use sigmoid::{sigmoid_op, SigmoidOp};
