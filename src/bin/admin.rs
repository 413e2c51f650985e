//! CLI administration tool for snaplink.
//!
//! Works directly against the configured link store, without going through
//! the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Shorten a URL
//! cargo run --bin admin -- link create example.com
//!
//! # Inspect a link without counting a click
//! cargo run --bin admin -- link show Xk3_a9Qz
//!
//! # Remove expired links now instead of waiting for the sweep
//! cargo run --bin admin -- purge -y
//!
//! # Check store connectivity
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! Same as the server; see [`snaplink::config`].

use snaplink::application::services::LinkService;
use snaplink::config::{self, Config};
use snaplink::domain::entities::link_ttl;
use snaplink::infrastructure::persistence;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;

/// CLI tool for managing snaplink.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Manage links
    Link {
        #[command(subcommand)]
        action: LinkAction,
    },

    /// Delete expired links
    Purge {
        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Link management subcommands.
#[derive(Subcommand)]
enum LinkAction {
    /// Create a short link
    Create {
        /// Destination URL; `https://` is added when no scheme is given
        url: String,
    },

    /// Show a link and its click count
    Show {
        /// Short link identifier
        identifier: String,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check store connection
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = config::load_from_env()?;

    match cli.command {
        Commands::Link { action } => handle_link_action(action, &config).await?,
        Commands::Purge { yes } => handle_purge(yes, &config).await?,
        Commands::Db { action } => handle_db_action(action, &config).await?,
    }

    Ok(())
}

/// Dispatches link management commands.
async fn handle_link_action(action: LinkAction, config: &Config) -> Result<()> {
    let store = persistence::connect(config).await?;
    let service =
        LinkService::new(store, config.base_url.clone()).with_store_timeout(config.store_timeout());

    match action {
        LinkAction::Create { url } => {
            println!("{}", "🔗 Create Short Link".bright_blue().bold());
            println!();

            let created = service
                .create_short_link(&url)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to create link: {}", e))?;

            println!("  Identifier: {}", created.identifier.cyan());
            println!("  Short link: {}", created.short_link.bright_yellow().bold());
            println!();
        }
        LinkAction::Show { identifier } => {
            let record = service
                .get_link_details(&identifier)
                .await
                .map_err(|e| anyhow::anyhow!("{}", e))?;

            println!("{}", "🔎 Link Details".bright_blue().bold());
            println!();
            println!("  Identifier:  {}", record.identifier.cyan());
            println!("  Destination: {}", record.destination.bright_white());
            println!(
                "  Clicks:      {}",
                record.click_count.to_string().bright_green().bold()
            );
            println!(
                "  Created:     {}",
                record
                    .created_at
                    .format("%Y-%m-%d %H:%M")
                    .to_string()
                    .bright_black()
            );
            println!(
                "  Expires:     {}",
                record
                    .expires_at(link_ttl())
                    .format("%Y-%m-%d %H:%M")
                    .to_string()
                    .bright_black()
            );
            println!();
        }
    }

    Ok(())
}

/// Deletes every logically expired link after confirmation.
///
/// Expired links are already unreachable; this only reclaims storage.
async fn handle_purge(skip_confirm: bool, config: &Config) -> Result<()> {
    println!("{}", "🧹 Purge Expired Links".bright_blue().bold());
    println!();

    let store = persistence::connect(config).await?;

    if store.has_native_expiry() {
        println!(
            "{}",
            "  This store expires links on its own, nothing to do".yellow()
        );
        return Ok(());
    }

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Delete all links older than 30 days?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let removed = store
        .purge_expired()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to purge: {}", e))?;

    println!(
        "{} {}",
        "✅ Removed".green().bold(),
        removed.to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

/// Handles store diagnostic commands.
async fn handle_db_action(action: DbAction, config: &Config) -> Result<()> {
    match action {
        DbAction::Check => {
            println!(
                "{} {}",
                "🔍 Checking store connection:".bright_blue(),
                config.storage_backend.to_string().bright_white()
            );

            let store = persistence::connect(config).await?;
            store
                .health_check()
                .await
                .map_err(|e| anyhow::anyhow!("Store check failed: {}", e))?;

            println!("{}", "✅ Store connection OK".green().bold());
        }
    }

    Ok(())
}
