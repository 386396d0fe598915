mod error;
mod project;
mod runner;

pub use error::ProjectError;
pub use project::Project;
pub use runner::{CommandOutput, CommandRunner, SystemRunner, DEFAULT_PROGRAM};
