//! `courier` — send Slack messages through the configured delivery mode.

mod config;

use clap::{Parser, Subcommand};
use config::CourierConfig;
use courier_channels::SlackService;
use courier_core::SlackMessage;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "courier", about = "Courier — Slack message dispatcher")]
struct Cli {
    /// Path to config file
    #[arg(short, long, default_value = "courier.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Send a plain text message
    Text {
        /// Message text
        text: String,
        /// Target channel (defaults to `default_channel`)
        #[arg(long)]
        channel: Option<String>,
        /// Reply in this thread
        #[arg(long)]
        thread_ts: Option<String>,
    },
    /// Send Block Kit blocks read from a JSON array file (`-` for stdin)
    Blocks {
        file: PathBuf,
        /// Target channel (defaults to `default_channel`)
        #[arg(long)]
        channel: Option<String>,
        /// Notification fallback text
        #[arg(long)]
        text: Option<String>,
    },
    /// Send a full JSON payload read from a file (`-` for stdin)
    Post { file: PathBuf },
    /// Validate the config and show what is configured
    Check,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Logs go to stderr; stdout belongs to the stdout and logging modes.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .json()
        .init();

    let cli = Cli::parse();

    let mut config = CourierConfig::load(&cli.config).await?;
    config.apply_env(|key| std::env::var(key).ok());

    let service = SlackService::from_settings(&config.slack)?;

    match cli.command {
        Commands::Text {
            text,
            channel,
            thread_ts,
        } => {
            service
                .send_text(text, Some(text_options(channel, thread_ts)))
                .await?;
            info!(mode = %service.mode(), "text message sent");
        }
        Commands::Blocks {
            file,
            channel,
            text,
        } => {
            let blocks = read_blocks(&file).await?;
            let count = blocks.len();
            service
                .send_blocks(blocks, Some(blocks_options(channel, text)))
                .await?;
            info!(mode = %service.mode(), blocks = count, "blocks sent");
        }
        Commands::Post { file } => {
            service.post_message(read_payload(&file).await?).await?;
            info!(mode = %service.mode(), "message posted");
        }
        Commands::Check => {
            let slack = &config.slack;
            let default_channel = slack.default_channel.as_deref().filter(|c| !c.is_empty());
            println!("Mode:            {}", slack.mode);
            println!("Default channel: {}", default_channel.unwrap_or("(none)"));
            println!("Web API client:  {}", yes_no(service.has_client()));
            println!("Webhook URL:     {}", yes_no(service.webhook_url().is_some()));
            println!("Log sink:        {}", yes_no(service.has_log_sink()));
            if slack.mode.requires_channel() && default_channel.is_none() {
                println!("\nNote: mode '{}' needs --channel on every send", slack.mode);
            }
        }
    }

    Ok(())
}

/// Options for `text`: only channel and thread are taken from flags.
fn text_options(channel: Option<String>, thread_ts: Option<String>) -> SlackMessage {
    SlackMessage {
        channel,
        thread_ts,
        ..SlackMessage::default()
    }
}

/// Options for `blocks`: channel and notification fallback text.
fn blocks_options(channel: Option<String>, text: Option<String>) -> SlackMessage {
    SlackMessage {
        channel,
        text,
        ..SlackMessage::default()
    }
}

/// Read a JSON array of Block Kit blocks.
async fn read_blocks(path: &Path) -> anyhow::Result<Vec<Value>> {
    let raw = read_input(path).await?;
    serde_json::from_str(&raw).map_err(|e| {
        anyhow::anyhow!(
            "'{}' is not a JSON array of blocks: {}",
            path.display(),
            e
        )
    })
}

/// Read a full `chat.postMessage` payload.
async fn read_payload(path: &Path) -> anyhow::Result<SlackMessage> {
    let raw = read_input(path).await?;
    serde_json::from_str(&raw)
        .map_err(|e| anyhow::anyhow!("'{}' is not a message payload: {}", path.display(), e))
}

async fn read_input(path: &Path) -> anyhow::Result<String> {
    if path == Path::new("-") {
        use tokio::io::AsyncReadExt;
        let mut buf = String::new();
        tokio::io::stdin().read_to_string(&mut buf).await?;
        return Ok(buf);
    }
    tokio::fs::read_to_string(path)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to read '{}': {}", path.display(), e))
}

fn yes_no(present: bool) -> &'static str {
    if present {
        "configured"
    } else {
        "missing"
    }
}
