//! CLI interface module
//!
//! Operator commands against the same store the server uses. Each command
//! creates its own storage connection; there is no IPC to a running server.

pub mod commands;
mod parser;

pub use parser::{Cli, Commands, PublishArgs};

use colored::Colorize;

use crate::config::{StaticConfig, get_config};
use crate::errors::{ImsakiaError, Result};
use crate::services::PublisherService;
use crate::storage::StorageFactory;

/// Dispatch a parsed subcommand. Returns the process exit code.
pub async fn run(command: Commands) -> i32 {
    match dispatch(command).await {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("{}", e.format_colored());
            1
        }
    }
}

async fn dispatch(command: Commands) -> Result<()> {
    match command {
        Commands::Publish(args) => {
            let store = StorageFactory::create().await?;
            let publisher = PublisherService::new(store, &get_config().site.public_url)?;
            commands::publish_profile(&publisher, args).await
        }
        Commands::Resolve { slug } => {
            let store = StorageFactory::create().await?;
            commands::resolve_slug(store.as_ref(), &slug).await
        }
        Commands::List => {
            let store = StorageFactory::create().await?;
            commands::list_links(store.as_ref()).await
        }
        Commands::ConfigInit { path } => {
            StaticConfig::default()
                .save_to_file(&path)
                .map_err(|e| ImsakiaError::file_operation(format!("cannot write {}: {}", path, e)))?;
            println!("{} Wrote sample config to {}", "✓".bold().green(), path.cyan());
            Ok(())
        }
    }
}
