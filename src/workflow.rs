use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

use crate::config::Config;
use crate::error::{Result, SubEmbedError};
use crate::media::{MediaCommand, MediaCommandBuilder, MediaProcessorFactory, MediaToolRunner};
use crate::paths::MediaPath;
use crate::probe::{AudioChannelCount, StreamInspector};
use crate::strategy::{AudioStrategy, SubtitleStrategy, select_strategies};

/// Stages of one embedding run, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Start,
    PathsDerived,
    AudioInspected,
    StrategiesSelected,
    Aborted,
    CommandBuilt,
    Executed,
    Done,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// What a successful run did
#[derive(Debug, Clone)]
pub struct EmbedReport {
    pub output_path: PathBuf,
    pub channels: AudioChannelCount,
    pub audio: AudioStrategy,
    pub subtitle: SubtitleStrategy,
    pub command: MediaCommand,
}

pub struct Workflow {
    config: Config,
    runner: Box<dyn MediaToolRunner>,
    commands: MediaCommandBuilder,
}

impl Workflow {
    pub fn new(config: Config) -> Self {
        Self::with_runner(config, MediaProcessorFactory::create_runner())
    }

    pub fn with_runner(config: Config, runner: Box<dyn MediaToolRunner>) -> Self {
        let commands = MediaCommandBuilder::new(&config.media.ffprobe_path, &config.media.ffmpeg_path);
        Self {
            config,
            runner,
            commands,
        }
    }

    pub fn runner(&self) -> &dyn MediaToolRunner {
        self.runner.as_ref()
    }

    pub fn commands(&self) -> &MediaCommandBuilder {
        &self.commands
    }

    /// Embed `subtitle_path` into a copy of `movie_path` written next to it
    pub async fn embed(&self, movie_path: &str, subtitle_path: &str) -> Result<EmbedReport> {
        let mut stage = Stage::Start;
        debug!("Stage: {}", stage);

        let media = MediaPath::parse(movie_path)?;
        let output_path = media.output_path();
        advance(&mut stage, Stage::PathsDerived);
        debug!("Output path: {}", output_path.display());

        let movie = media.path();
        let channels = StreamInspector::new(self.runner.as_ref(), &self.commands)
            .audio_channels(&movie)
            .await?;
        advance(&mut stage, Stage::AudioInspected);
        info!("Number of Audio Channels: {}", channels);

        let strategies = select_strategies(channels.effective(), &media.extension);
        advance(&mut stage, Stage::StrategiesSelected);
        debug!("Audio: {}, subtitles: {}", strategies.audio, strategies.subtitle);

        if strategies.subtitle == SubtitleStrategy::Unsupported {
            advance(&mut stage, Stage::Aborted);
            return Err(SubEmbedError::UnsupportedContainer {
                extension: media.extension,
            });
        }

        let command = self.commands.embed_subtitles(
            movie.as_path(),
            Path::new(subtitle_path),
            output_path.as_path(),
            strategies.audio,
            strategies.subtitle,
        )?;
        let command = if self.config.media.capture_transcode_output {
            command
        } else {
            command.inherit_output()
        };
        advance(&mut stage, Stage::CommandBuilt);

        info!("Executing command: {}", command);
        let output_existed = output_path.exists();
        let result = match self.runner.run(&command).await {
            Ok(outcome) => outcome.into_result().map(|_| ()),
            Err(e) => Err(e),
        };
        advance(&mut stage, Stage::Executed);

        if let Err(e) = result {
            if !output_existed {
                self.remove_partial_output(&output_path);
            }
            return Err(e);
        }

        advance(&mut stage, Stage::Done);
        info!("The File {} finished processing.", media.file_name());

        Ok(EmbedReport {
            output_path,
            channels,
            audio: strategies.audio,
            subtitle: strategies.subtitle,
            command,
        })
    }

    fn remove_partial_output(&self, output_path: &Path) {
        if !self.config.output.remove_partial_on_failure || !output_path.exists() {
            return;
        }

        match std::fs::remove_file(output_path) {
            Ok(()) => warn!("Removed incomplete output {}", output_path.display()),
            Err(e) => error!("Could not remove incomplete output {}: {}", output_path.display(), e),
        }
    }
}

fn advance(stage: &mut Stage, next: Stage) {
    debug!("Stage: {} -> {}", stage, next);
    *stage = next;
}
