pub mod status;
pub mod validation;

pub use status::StatusNormalizer;
pub use validation::ActionValidator;
