pub mod array_dataset;
pub mod spiral;
pub mod traits;

pub use array_dataset::{ArrayDataset, Transform};
pub use spiral::Spiral;
pub use traits::{Dataset, Sample};
