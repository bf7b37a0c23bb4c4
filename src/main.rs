//! Subembed - Subtitle Embedding for MP4 and MKV
//!
//! Entry point: resolves the movie and subtitle paths (asking for missing
//! ones), runs the embedding workflow and waits for Enter before exiting.

use anyhow::Result;
use clap::Parser;
use std::io;
use std::path::Path;
use std::process::ExitCode;
use tracing::{error, info, Level};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::{non_blocking, rolling};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use subembed::cli::Args;
use subembed::config::{Config, LoggingConfig, PromptConfig, DEFAULT_CONFIG_FILE};
use subembed::prompt::Prompter;
use subembed::tools::check_tools;
use subembed::workflow::Workflow;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = Args::parse();
    let mut prompt_config = PromptConfig::default();

    let code = match startup(&args) {
        Ok((config, _guard)) => {
            info!("Starting Subembed");
            prompt_config = config.prompt.clone();
            match run(&args, config).await {
                Ok(code) => code,
                Err(e) => {
                    error!("{}", e);
                    ExitCode::FAILURE
                }
            }
        }
        Err(e) => {
            // Logging may not be installed yet
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    };

    if prompt_config.pause_on_exit && !args.no_pause {
        let mut prompter = Prompter::new(io::stdin().lock(), io::stdout(), &prompt_config);
        if let Err(e) = prompter.pause() {
            eprintln!("Error: {}", e);
        }
    }

    code
}

/// Load configuration and install logging
fn startup(args: &Args) -> Result<(Config, Option<WorkerGuard>)> {
    let config = match &args.config {
        Some(config_path) => Config::from_file(config_path)?,
        None => {
            if Path::new(DEFAULT_CONFIG_FILE).exists() {
                Config::from_file(DEFAULT_CONFIG_FILE)?
            } else {
                Config::default()
            }
        }
    };

    // Keep the guard alive so buffered file logs are flushed on exit
    let guard = setup_logging(args.verbose, &config.logging)?;
    Ok((config, guard))
}

async fn run(args: &Args, config: Config) -> subembed::error::Result<ExitCode> {
    if let Some(path) = &args.write_config {
        config.save_to_file(path)?;
        println!("Default configuration written to {}", path.display());
        return Ok(ExitCode::SUCCESS);
    }

    let workflow = Workflow::new(config.clone());

    if args.check_tools {
        let tools = check_tools(workflow.runner(), workflow.commands()).await;
        println!("\n{:<30} {:<10} {}", "Tool", "Status", "Version");
        println!("{}", "-".repeat(70));
        for tool in &tools {
            let status = if tool.available { "Found" } else { "Missing" };
            println!("{:<30} {:<10} {}", tool.name, status, tool.version.as_deref().unwrap_or("-"));
        }

        return Ok(if tools.iter().all(|tool| tool.available) {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        });
    }

    let (movie, subtitle) = {
        let mut prompter = Prompter::new(io::stdin().lock(), io::stdout(), &config.prompt);
        prompter.resolve_paths(args.movie.clone(), args.subtitle.clone())?
    };

    let report = workflow.embed(&movie, &subtitle).await?;
    info!("Output written to {}", report.output_path.display());
    Ok(ExitCode::SUCCESS)
}

fn setup_logging(verbose: bool, logging: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    // Determine log level
    let log_level = if verbose { Level::DEBUG } else { Level::INFO };

    let console_layer = fmt::layer().with_target(false);

    let (file_layer, guard) = if logging.file_logging {
        std::fs::create_dir_all(&logging.directory)?;

        // Daily rotated log file
        let file_appender = rolling::daily(&logging.directory, "subembed.log");
        let (non_blocking_file, guard) = non_blocking(file_appender);

        let layer = fmt::layer()
            .with_writer(non_blocking_file)
            .with_target(false)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .with_ansi(false); // No ANSI colors in file

        (Some(layer), Some(guard))
    } else {
        (None, None)
    };

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with(console_layer)
        .with(file_layer)
        .try_init()?;

    Ok(guard)
}
