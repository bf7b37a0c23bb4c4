use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Movie file (.mp4 or .mkv); asked for when omitted
    pub movie: Option<String>,

    /// Subtitle file; asked for when omitted
    pub subtitle: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Exit without waiting for Enter
    #[arg(long)]
    pub no_pause: bool,

    /// Report whether ffprobe and ffmpeg can be run, then exit
    #[arg(long)]
    pub check_tools: bool,

    /// Write the default configuration to a file, then exit
    #[arg(long, value_name = "FILE")]
    pub write_config: Option<PathBuf>,
}
