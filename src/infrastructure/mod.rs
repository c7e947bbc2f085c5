pub mod config_repository;
pub mod script;

pub use config_repository::ConfigRepository;
