mod error;
mod orchestrator;
mod state;

pub use error::{ErrorKind, PipelineError};
pub use orchestrator::{Pipeline, PipelineReport};
