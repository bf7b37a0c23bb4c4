// Media tool execution
//
// - Commands: argument vectors for ffprobe and ffmpeg
// - Processor: runs a command as a child process and classifies the result

pub mod commands;
pub mod processor;

use async_trait::async_trait;

pub use commands::*;
pub use processor::*;

use crate::error::Result;

/// Executes media tool commands.
///
/// A non-zero exit is reported through `ProcessOutcome`, not as an error;
/// only a failure to launch the program is an `Err`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MediaToolRunner: Send + Sync {
    async fn run(&self, command: &MediaCommand) -> Result<ProcessOutcome>;
}

/// Factory for creating runner instances
pub struct MediaProcessorFactory;

impl MediaProcessorFactory {
    /// Create the default runner (spawns real processes)
    pub fn create_runner() -> Box<dyn MediaToolRunner> {
        Box::new(processor::MediaProcessorImpl::new())
    }
}
