use serde::{Deserialize, Serialize};
use std::path::Path;
use crate::error::{Result, SubEmbedError};

/// Placeholder shown next to path prompts
pub const DEFAULT_DIRECTORY_HINT: &str = r#""E:\Videos\""#;

/// Configuration file looked up in the working directory when `--config` is not given
pub const DEFAULT_CONFIG_FILE: &str = "subembed.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub media: MediaConfig,
    pub prompt: PromptConfig,
    pub output: OutputConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MediaConfig {
    /// Path to ffprobe binary
    pub ffprobe_path: String,
    /// Path to ffmpeg binary
    pub ffmpeg_path: String,
    /// Capture ffmpeg's output instead of letting it write to the console.
    /// When false, ffmpeg shares the console and can ask before overwriting.
    pub capture_transcode_output: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PromptConfig {
    /// Directory hint displayed when asking for missing paths
    pub directory_hint: String,
    /// Wait for Enter before the process exits
    pub pause_on_exit: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Delete the output file left behind by a failed ffmpeg run.
    /// A file that already existed before the run is never deleted.
    pub remove_partial_on_failure: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Also write logs to a daily rotated file
    pub file_logging: bool,
    /// Directory for log files
    pub directory: String,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            ffprobe_path: "ffprobe".to_string(),
            ffmpeg_path: "ffmpeg".to_string(),
            capture_transcode_output: false,
        }
    }
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            directory_hint: DEFAULT_DIRECTORY_HINT.to_string(),
            pause_on_exit: true,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            remove_partial_on_failure: true,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            file_logging: false,
            directory: ".subembed/log".to_string(),
        }
    }
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| SubEmbedError::Config(format!("Failed to read config file: {}", e)))?;

        toml::from_str(&content)
            .map_err(|e| SubEmbedError::Config(format!("Failed to parse config file: {}", e)))
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| SubEmbedError::Config(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)
            .map_err(|e| SubEmbedError::Config(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.media.ffprobe_path, "ffprobe");
        assert_eq!(config.media.ffmpeg_path, "ffmpeg");
        assert!(!config.media.capture_transcode_output);
        assert!(config.prompt.pause_on_exit);
        assert_eq!(config.prompt.directory_hint, DEFAULT_DIRECTORY_HINT);
        assert!(config.output.remove_partial_on_failure);
        assert!(!config.logging.file_logging);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let config: Config = toml::from_str(
            r#"
            [media]
            ffmpeg_path = "/opt/ffmpeg/bin/ffmpeg"

            [prompt]
            pause_on_exit = false
            "#,
        )
        .unwrap();

        assert_eq!(config.media.ffmpeg_path, "/opt/ffmpeg/bin/ffmpeg");
        assert_eq!(config.media.ffprobe_path, "ffprobe");
        assert!(!config.prompt.pause_on_exit);
        assert_eq!(config.prompt.directory_hint, DEFAULT_DIRECTORY_HINT);
        assert!(config.output.remove_partial_on_failure);
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("subembed.toml");

        let mut config = Config::default();
        config.media.ffprobe_path = "/usr/local/bin/ffprobe".to_string();
        config.output.remove_partial_on_failure = false;
        config.save_to_file(&path).unwrap();

        let loaded = Config::from_file(&path).unwrap();
        assert_eq!(loaded.media.ffprobe_path, "/usr/local/bin/ffprobe");
        assert!(!loaded.output.remove_partial_on_failure);
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let dir = TempDir::new().unwrap();
        let err = Config::from_file(dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(err, SubEmbedError::Config(_)));
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.toml");
        std::fs::write(&path, "[media\nffmpeg_path = ").unwrap();
        assert!(matches!(Config::from_file(&path), Err(SubEmbedError::Config(_))));
    }
}
