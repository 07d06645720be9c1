//! # Main Entry Point
//!
//! Initializes the application:
//! - Domain: Configuration and Types
//! - Application: Store, Registry, Repository, Dispatcher
//! - Infrastructure: Console transport
//! - Interface: Command Handlers

mod application;
mod domain;
mod infrastructure;
mod interface;
mod strings;

use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tokio::io::AsyncBufReadExt;

use crate::application::registry::AdminRegistry;
use crate::application::repository::FileRepository;
use crate::application::router::Dispatcher;
use crate::application::store::Store;
use crate::domain::config::AppConfig;
use crate::domain::types::{SenderInfo, UserId};
use crate::infrastructure::console::{self, ConsoleChat};

#[derive(Parser, Debug)]
#[command(name = "passpaper", version, about = "Grade 11 pass paper catalog bot")]
struct Cli {
    /// Path to the YAML configuration file
    #[arg(long, default_value = "data/config.yaml")]
    config: String,
    /// Identity the console session presents to the bot
    #[arg(long, default_value = "console")]
    user: String,
    /// Display name for the console identity
    #[arg(long, default_value = "Console User")]
    name: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 1. Load Configuration
    let config_content = fs::read_to_string(&cli.config)
        .with_context(|| format!("Failed to read {}", cli.config))?;
    let config: AppConfig =
        serde_yaml::from_str(&config_content).context("Failed to parse config file")?;

    // 2. Logging Setup
    if !Path::new(&config.system.log_dir).exists() {
        fs::create_dir_all(&config.system.log_dir).context("Failed to create log directory")?;
    }

    // Clear previous session log
    let log_path = Path::new(&config.system.log_dir).join("session.log");
    if log_path.exists() {
        let _ = fs::remove_file(&log_path);
    }

    let file_appender = tracing_appender::rolling::never(&config.system.log_dir, "session.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false);

    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .init();

    tracing::info!("Starting Pass Paper Bot...");

    // 3. Initialize Core Components
    let bootstrap = UserId::new(config.system.bootstrap_admin.clone());
    let store = Store::open(&config.system.data_file, &bootstrap)
        .context("Failed to open the persisted store")?;
    let registry = Arc::new(AdminRegistry::new(store.clone(), bootstrap));
    let repository = Arc::new(FileRepository::new(store));
    let dispatcher = Dispatcher::new(registry, repository);

    // 4. Console Session
    let chat = ConsoleChat::new();
    let sender = SenderInfo {
        id: UserId::new(cli.user.clone()),
        display_name: cli.name.clone(),
        username: None,
    };

    println!("🤖 Pass Paper Bot is running (console transport).");
    println!("Type /start to begin, /help for commands.");
    println!("Buttons: `:tap <token>` · uploads: `:doc <handle>` · impersonate: `@id <line>`");

    // 5. Event Loop
    let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();
    let mut seq = 0u64;
    while let Some(line) = lines.next_line().await? {
        let Some(event) = console::parse_line(&line, &sender, &mut seq) else {
            continue;
        };
        if let Err(e) = dispatcher.route(&chat, event).await {
            tracing::error!("Failed to route event: {e}");
        }
    }

    tracing::info!("Console session closed, shutting down.");
    Ok(())
}
