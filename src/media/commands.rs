use std::fmt;
use std::path::Path;

use crate::error::{Result, SubEmbedError};
use crate::strategy::{AudioStrategy, SubtitleStrategy};

/// Character encoding ffmpeg assumes for the subtitle input
pub const SUBTITLE_CHARSET: &str = "ISO8859-9";

/// Abstract media tool invocation: program plus literal argument vector
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaCommand {
    pub program: String,
    pub args: Vec<String>,
    pub description: String,
    /// Capture stdout/stderr instead of sharing the console
    pub capture: bool,
}

impl MediaCommand {
    /// Create a new media command that captures its output
    pub fn new<S1: Into<String>, S2: Into<String>>(program: S1, description: S2) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            description: description.into(),
            capture: true,
        }
    }

    /// Add an argument
    pub fn arg<S: Into<String>>(mut self, arg: S) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Add multiple arguments
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(|s| s.into()));
        self
    }

    /// Add input file
    pub fn input<P: AsRef<Path>>(self, path: P) -> Self {
        self.arg("-i").arg(path.as_ref().to_string_lossy().to_string())
    }

    /// Add output file
    pub fn output<P: AsRef<Path>>(self, path: P) -> Self {
        self.arg(path.as_ref().to_string_lossy().to_string())
    }

    /// Set video codec
    pub fn video_codec<S: Into<String>>(self, codec: S) -> Self {
        self.arg("-c:v").arg(codec)
    }

    /// Set subtitle codec
    pub fn subtitle_codec<S: Into<String>>(self, codec: S) -> Self {
        self.arg("-c:s").arg(codec)
    }

    /// Copy video stream
    pub fn copy_video(self) -> Self {
        self.video_codec("copy")
    }

    /// Let the child share the console instead of capturing its output
    pub fn inherit_output(mut self) -> Self {
        self.capture = false;
        self
    }

    /// Full argument vector with the program name first
    pub fn argv(&self) -> Vec<&str> {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect()
    }
}

impl fmt::Display for MediaCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.argv().join(" "))
    }
}

/// Builder for the ffprobe and ffmpeg invocations
#[derive(Debug, Clone)]
pub struct MediaCommandBuilder {
    ffprobe_path: String,
    ffmpeg_path: String,
}

impl MediaCommandBuilder {
    pub fn new<S1: Into<String>, S2: Into<String>>(ffprobe_path: S1, ffmpeg_path: S2) -> Self {
        Self {
            ffprobe_path: ffprobe_path.into(),
            ffmpeg_path: ffmpeg_path.into(),
        }
    }

    pub fn ffprobe_path(&self) -> &str {
        &self.ffprobe_path
    }

    pub fn ffmpeg_path(&self) -> &str {
        &self.ffmpeg_path
    }

    /// Query the channel count of the first audio stream as a bare value
    pub fn probe_audio_channels<P: AsRef<Path>>(&self, movie_path: P) -> MediaCommand {
        MediaCommand::new(&self.ffprobe_path, "Audio channel probe")
            .input(movie_path)
            .arg("-show_entries").arg("stream=channels")
            .arg("-select_streams").arg("a:0")
            .arg("-of").arg("compact=p=0:nk=1")
            .arg("-v").arg("0")
    }

    /// Build the subtitle embedding command.
    ///
    /// Argument order is fixed: both inputs, video copy, the audio strategy's
    /// tokens, the subtitle codec, then the output path.
    pub fn embed_subtitles<P: AsRef<Path>>(
        &self,
        movie_path: P,
        subtitle_path: P,
        output_path: P,
        audio: AudioStrategy,
        subtitle: SubtitleStrategy,
    ) -> Result<MediaCommand> {
        let codec = subtitle.codec().ok_or_else(|| SubEmbedError::UnsupportedContainer {
            extension: output_path
                .as_ref()
                .extension()
                .map(|ext| format!(".{}", ext.to_string_lossy()))
                .unwrap_or_default(),
        })?;

        Ok(MediaCommand::new(&self.ffmpeg_path, "Subtitle embedding")
            .input(movie_path)
            .arg("-sub_charenc").arg(SUBTITLE_CHARSET)
            .input(subtitle_path)
            .copy_video()
            .args(audio.args().iter().copied())
            .subtitle_codec(codec)
            .output(output_path))
    }

    /// Build version check command
    pub fn version_check<S: Into<String>>(&self, program: S) -> MediaCommand {
        MediaCommand::new(program, "Version check").arg("-version")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder() -> MediaCommandBuilder {
        MediaCommandBuilder::new("ffprobe", "ffmpeg")
    }

    #[test]
    fn test_probe_command() {
        let cmd = builder().probe_audio_channels("movie.mkv");
        assert!(cmd.capture);
        assert_eq!(
            cmd.argv(),
            [
                "ffprobe", "-i", "movie.mkv",
                "-show_entries", "stream=channels",
                "-select_streams", "a:0",
                "-of", "compact=p=0:nk=1",
                "-v", "0",
            ]
        );
    }

    #[test]
    fn test_surround_mkv_command() {
        let cmd = builder()
            .embed_subtitles(
                "movie.mkv",
                "subs.srt",
                "SRT-movie.mkv",
                AudioStrategy::RemapAllStreams,
                SubtitleStrategy::SrtSubtitle,
            )
            .unwrap();

        assert_eq!(
            cmd.argv(),
            [
                "ffmpeg", "-i", "movie.mkv",
                "-sub_charenc", "ISO8859-9",
                "-i", "subs.srt",
                "-c:v", "copy",
                "-map", "0", "-map", "1",
                "-c:s", "srt",
                "SRT-movie.mkv",
            ]
        );
    }

    #[test]
    fn test_stereo_mp4_command() {
        let cmd = builder()
            .embed_subtitles(
                "clip.mp4",
                "subs.srt",
                "SRT-clip.mp4",
                AudioStrategy::CopyStream,
                SubtitleStrategy::MovTextSubtitle,
            )
            .unwrap();

        assert_eq!(
            cmd.to_string(),
            "ffmpeg -i clip.mp4 -sub_charenc ISO8859-9 -i subs.srt -c:v copy -c:a copy -c:s mov_text SRT-clip.mp4"
        );
    }

    #[test]
    fn test_paths_with_spaces_stay_single_arguments() {
        let cmd = builder()
            .embed_subtitles(
                "My Movies/film.mp4",
                "My Subs/film.tr.srt",
                "My Movies/SRT-film.mp4",
                AudioStrategy::CopyStream,
                SubtitleStrategy::MovTextSubtitle,
            )
            .unwrap();

        assert_eq!(cmd.args[1], "My Movies/film.mp4");
        assert_eq!(cmd.args[5], "My Subs/film.tr.srt");
        assert_eq!(cmd.args.last().unwrap(), "My Movies/SRT-film.mp4");
    }

    #[test]
    fn test_command_is_deterministic() {
        let build = || {
            builder()
                .embed_subtitles(
                    "a.mkv",
                    "a.srt",
                    "SRT-a.mkv",
                    AudioStrategy::CopyStream,
                    SubtitleStrategy::SrtSubtitle,
                )
                .unwrap()
        };
        assert_eq!(build(), build());
    }

    #[test]
    fn test_unsupported_container_rejected() {
        let err = builder()
            .embed_subtitles(
                "video.avi",
                "subs.srt",
                "SRT-video.avi",
                AudioStrategy::CopyStream,
                SubtitleStrategy::Unsupported,
            )
            .unwrap_err();

        match err {
            SubEmbedError::UnsupportedContainer { extension } => assert_eq!(extension, ".avi"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_version_check() {
        let cmd = builder().version_check("ffmpeg");
        assert_eq!(cmd.to_string(), "ffmpeg -version");
        assert_eq!(cmd.description, "Version check");
    }
}
