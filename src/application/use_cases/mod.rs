pub mod project_operations;

pub use project_operations::*;
