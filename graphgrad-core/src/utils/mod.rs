pub mod accuracy;
pub mod testing;

pub use accuracy::accuracy;
