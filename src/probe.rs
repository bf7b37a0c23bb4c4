//! Audio channel inspection through ffprobe.

use std::fmt;
use std::path::Path;
use tracing::{debug, warn};

use crate::error::Result;
use crate::media::{MediaCommandBuilder, MediaToolRunner, ProcessOutcome};

/// Channel count of the first audio stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioChannelCount {
    Known(u32),
    /// Inspection failed or produced unusable output
    Unknown,
}

impl AudioChannelCount {
    /// Count used by the audio policy; unknown counts as zero
    pub fn effective(self) -> u32 {
        match self {
            AudioChannelCount::Known(channels) => channels,
            AudioChannelCount::Unknown => 0,
        }
    }
}

impl fmt::Display for AudioChannelCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AudioChannelCount::Known(channels) => write!(f, "{}", channels),
            AudioChannelCount::Unknown => write!(f, "unknown"),
        }
    }
}

/// Interpret ffprobe's outcome. Anomalies are logged and degrade to `Unknown`.
pub fn parse_channel_output(outcome: &ProcessOutcome) -> AudioChannelCount {
    if !outcome.success() {
        warn!(
            "Could not determine audio channels. ffprobe error: {}",
            outcome.stderr.trim()
        );
        return AudioChannelCount::Unknown;
    }

    let value = outcome.stdout.trim();
    if value.is_empty() {
        debug!("No audio stream reported");
        return AudioChannelCount::Known(0);
    }

    match value.parse::<u32>() {
        Ok(channels) => AudioChannelCount::Known(channels),
        Err(_) => {
            warn!("ffprobe returned non-numeric audio channel count: {:?}", value);
            AudioChannelCount::Unknown
        }
    }
}

/// Queries stream properties of a movie
pub struct StreamInspector<'a> {
    runner: &'a dyn MediaToolRunner,
    commands: &'a MediaCommandBuilder,
}

impl<'a> StreamInspector<'a> {
    pub fn new(runner: &'a dyn MediaToolRunner, commands: &'a MediaCommandBuilder) -> Self {
        Self { runner, commands }
    }

    /// Channel count of the movie's first audio stream.
    ///
    /// Only a failure to launch ffprobe is returned as an error.
    pub async fn audio_channels(&self, movie_path: &Path) -> Result<AudioChannelCount> {
        let command = self.commands.probe_audio_channels(movie_path);
        let outcome = self.runner.run(&command).await?;
        Ok(parse_channel_output(&outcome))
    }
}
