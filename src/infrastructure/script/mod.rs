pub mod ansi;
pub mod command;
pub mod repository;
pub mod table;

pub use command::{ProcessRunner, ScriptCommand, TokioProcessRunner};
pub use repository::ScriptProjectRepository;
