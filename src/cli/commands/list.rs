//! List command

use colored::Colorize;

use crate::errors::Result;
use crate::storage::{LinkStore, decode_payload};

pub async fn list_links(store: &dyn LinkStore) -> Result<()> {
    let records = store.load_all().await?;

    if records.is_empty() {
        println!("{} No records published yet", "ℹ".bold().blue());
        return Ok(());
    }

    println!("{} {} record(s):", "ℹ".bold().blue(), records.len());
    for record in records {
        let name = decode_payload(&record.payload)
            .map(|p| p.name)
            .unwrap_or_else(|_| "<undecodable payload>".to_string());
        println!(
            "  {} {} ({})",
            record.slug.cyan(),
            name,
            record
                .updated_at
                .format("%Y-%m-%d %H:%M:%S UTC")
                .to_string()
                .yellow()
        );
    }

    Ok(())
}
