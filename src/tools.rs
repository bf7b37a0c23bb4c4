//! External tool availability checks.

use tracing::{info, warn};

use crate::error::SubEmbedError;
use crate::media::{MediaCommandBuilder, MediaToolRunner};

/// Information about an external tool
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolInfo {
    pub name: String,
    pub available: bool,
    /// First line of `-version` output
    pub version: Option<String>,
}

impl ToolInfo {
    fn unavailable(name: &str) -> Self {
        Self {
            name: name.to_string(),
            available: false,
            version: None,
        }
    }
}

/// Run `<program> -version` and report what was found
pub async fn check_tool(runner: &dyn MediaToolRunner, commands: &MediaCommandBuilder, program: &str) -> ToolInfo {
    let command = commands.version_check(program);

    match runner.run(&command).await {
        Ok(outcome) if outcome.success() => {
            let version = outcome.stdout.lines().next().map(|line| line.trim().to_string());
            info!("{} is available: {}", program, version.as_deref().unwrap_or("unknown version"));
            ToolInfo {
                name: program.to_string(),
                available: true,
                version,
            }
        }
        Ok(outcome) => {
            warn!("{} version check failed with code {}", program, outcome.exit_code);
            ToolInfo::unavailable(program)
        }
        Err(SubEmbedError::Launch { source, .. }) => {
            warn!("{} not found: {}", program, source);
            ToolInfo::unavailable(program)
        }
        Err(e) => {
            warn!("{} check failed: {}", program, e);
            ToolInfo::unavailable(program)
        }
    }
}

/// Check ffprobe and ffmpeg
pub async fn check_tools(runner: &dyn MediaToolRunner, commands: &MediaCommandBuilder) -> Vec<ToolInfo> {
    vec![
        check_tool(runner, commands, commands.ffprobe_path()).await,
        check_tool(runner, commands, commands.ffmpeg_path()).await,
    ]
}
