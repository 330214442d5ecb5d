//! Resolve command

use colored::Colorize;

use crate::errors::Result;
use crate::storage::{LinkStore, decode_payload};

pub async fn resolve_slug(store: &dyn LinkStore, slug: &str) -> Result<()> {
    let key = slug.trim().to_lowercase();

    match store.get(&key).await? {
        Some(record) => {
            let profile = decode_payload(&record.payload)?;
            println!(
                "{} {} (updated {})",
                "✓".bold().green(),
                record.slug.cyan(),
                record
                    .updated_at
                    .format("%Y-%m-%d %H:%M:%S UTC")
                    .to_string()
                    .yellow()
            );
            println!("{}", serde_json::to_string_pretty(&profile)?);
        }
        None => {
            println!(
                "{} No record under '{}'; visitors get the default profile",
                "✗".bold().red(),
                key.cyan()
            );
        }
    }

    Ok(())
}
