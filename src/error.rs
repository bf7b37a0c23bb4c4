use thiserror::Error;

#[derive(Error, Debug)]
pub enum SubEmbedError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid movie path: {0}")]
    PathFormat(String),

    #[error("File extension {} is not supported (expected .mp4 or .mkv)", display_extension(.extension))]
    UnsupportedContainer { extension: String },

    #[error("FFmpeg failed with return code {exit_code}{}", format_stderr(.stderr))]
    TranscodeFailure { exit_code: i32, stderr: String },

    #[error(
        "Failed to launch {program}: {source}. Please ensure 'ffmpeg' and 'ffprobe' are installed and accessible in your system's PATH"
    )]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Prompt error: {0}")]
    Prompt(String),
}

fn display_extension(extension: &str) -> &str {
    if extension.is_empty() { "(none)" } else { extension }
}

fn format_stderr(stderr: &str) -> String {
    let stderr = stderr.trim();
    if stderr.is_empty() {
        String::new()
    } else {
        format!(": {}", stderr)
    }
}

pub type Result<T> = std::result::Result<T, SubEmbedError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_container_names_extension() {
        let err = SubEmbedError::UnsupportedContainer { extension: ".avi".to_string() };
        assert!(err.to_string().contains(".avi"));

        let err = SubEmbedError::UnsupportedContainer { extension: String::new() };
        assert!(err.to_string().contains("(none)"));
    }

    #[test]
    fn test_transcode_failure_message() {
        let err = SubEmbedError::TranscodeFailure { exit_code: 1, stderr: "  \n".to_string() };
        assert_eq!(err.to_string(), "FFmpeg failed with return code 1");

        let err = SubEmbedError::TranscodeFailure { exit_code: 254, stderr: "Invalid data\n".to_string() };
        assert_eq!(err.to_string(), "FFmpeg failed with return code 254: Invalid data");
    }

    #[test]
    fn test_launch_error_carries_install_hint() {
        let err = SubEmbedError::Launch {
            program: "ffprobe".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        let message = err.to_string();
        assert!(message.contains("ffprobe"));
        assert!(message.contains("PATH"));
    }
}
