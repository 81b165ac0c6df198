pub mod backward;
pub mod function;
pub mod grad_check;
pub mod graph_mode;

pub use backward::BackwardOptions;
pub use function::Function;
pub use graph_mode::{is_graph_enabled, no_grad, set_graph_enabled, GraphContext, GraphModeGuard};
