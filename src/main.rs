//! json-post - runs the processor once against a single work item
//!
//! Usage: `json-post <config.yaml> [name=value ...]`
//!
//! The attributes given on the command line feed placeholder resolution.
//! The routed item is printed as JSON on stdout.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

use json_post::constants::{APP_VERSION, LOG_FILE_NAME};
use json_post::{MemorySession, PostJsonProcessor, ProcessorConfig, Relationship, WorkItem};

#[derive(Parser, Debug)]
#[command(name = "json-post", version, about = "POST templated JSON and route the work item on the response")]
struct Cli {
    /// Processor configuration (YAML)
    config: PathBuf,

    /// Work item attributes used for placeholder resolution
    #[arg(value_name = "NAME=VALUE", value_parser = parse_attribute)]
    attributes: Vec<(String, String)>,
}

fn parse_attribute(arg: &str) -> Result<(String, String), String> {
    let (name, value) = arg
        .split_once('=')
        .ok_or_else(|| format!("invalid attribute '{}', expected name=value", arg))?;
    if name.trim().is_empty() {
        return Err(format!("invalid attribute '{}', name is empty", arg));
    }
    Ok((name.trim().to_string(), value.to_string()))
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    let config_path = cli.config.display().to_string();

    let config = ProcessorConfig::load(&cli.config)?;

    // Initialize logging to file
    let level = config
        .log_level
        .parse::<tracing::Level>()
        .with_context(|| format!("Invalid log level '{}'", config.log_level))?;
    let file_appender = tracing_appender::rolling::never(".", LOG_FILE_NAME);
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_max_level(level)
        .init();

    tracing::info!(version = APP_VERSION, config = %config_path, "Starting json-post");

    let processor = PostJsonProcessor::new(&config)?;
    let mut session = MemorySession::new();
    session.enqueue(WorkItem::with_attributes(cli.attributes));

    let result = processor.on_trigger(&mut session).await;

    for destination in [Relationship::Success, Relationship::Failure] {
        for item in session.transferred(destination) {
            let summary = serde_json::json!({
                "destination": destination.as_str(),
                "attributes": item.attributes,
                "content": item.content_str(),
            });
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
    }

    match result {
        Ok(Relationship::Success) => Ok(ExitCode::SUCCESS),
        Ok(Relationship::Failure) => Ok(ExitCode::from(2)),
        Err(e) => {
            eprintln!("Processing error: {}", e);
            Ok(ExitCode::FAILURE)
        }
    }
}
