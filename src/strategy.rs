//! Audio and subtitle handling policy.
//!
//! The table is closed: two containers, two audio modes.

use std::fmt;

/// Sources with more channels than this get every stream mapped explicitly
pub const STEREO_CHANNELS: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioStrategy {
    /// Pass audio through unchanged (`-c:a copy`)
    CopyStream,
    /// Force-include all streams from both inputs (`-map 0 -map 1`)
    RemapAllStreams,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubtitleStrategy {
    /// MP4 containers take `mov_text` subtitles
    MovTextSubtitle,
    /// MKV containers take `srt` subtitles
    SrtSubtitle,
    /// Extension not recognized
    Unsupported,
}

impl AudioStrategy {
    pub fn from_channel_count(channels: u32) -> Self {
        if channels > STEREO_CHANNELS {
            AudioStrategy::RemapAllStreams
        } else {
            AudioStrategy::CopyStream
        }
    }

    /// Arguments this strategy contributes to the ffmpeg command
    pub fn args(self) -> &'static [&'static str] {
        match self {
            AudioStrategy::CopyStream => &["-c:a", "copy"],
            AudioStrategy::RemapAllStreams => &["-map", "0", "-map", "1"],
        }
    }
}

impl SubtitleStrategy {
    /// Case-insensitive match on an extension with its leading dot
    pub fn from_extension(extension: &str) -> Self {
        match extension.to_ascii_lowercase().as_str() {
            ".mp4" => SubtitleStrategy::MovTextSubtitle,
            ".mkv" => SubtitleStrategy::SrtSubtitle,
            _ => SubtitleStrategy::Unsupported,
        }
    }

    /// Value for `-c:s`, `None` for unsupported containers
    pub fn codec(self) -> Option<&'static str> {
        match self {
            SubtitleStrategy::MovTextSubtitle => Some("mov_text"),
            SubtitleStrategy::SrtSubtitle => Some("srt"),
            SubtitleStrategy::Unsupported => None,
        }
    }
}

impl fmt::Display for AudioStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AudioStrategy::CopyStream => write!(f, "copy audio stream"),
            AudioStrategy::RemapAllStreams => write!(f, "map all streams"),
        }
    }
}

impl fmt::Display for SubtitleStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.codec() {
            Some(codec) => write!(f, "{} subtitles", codec),
            None => write!(f, "unsupported container"),
        }
    }
}

/// Both decisions for one movie
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Strategies {
    pub audio: AudioStrategy,
    pub subtitle: SubtitleStrategy,
}

pub fn select_strategies(channels: u32, extension: &str) -> Strategies {
    Strategies {
        audio: AudioStrategy::from_channel_count(channels),
        subtitle: SubtitleStrategy::from_extension(extension),
    }
}
