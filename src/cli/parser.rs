use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "imsakia",
    version,
    about = "Branded Ramadan timetable pages behind short links",
    long_about = "Runs the HTTP server when no subcommand is given."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Publish (create or replace) a client profile under a slug
    Publish(PublishArgs),
    /// Show the record stored under a slug
    Resolve {
        slug: String,
    },
    /// List all published records
    List,
    /// Write a sample configuration file
    ConfigInit {
        #[arg(default_value = "config.toml")]
        path: String,
    },
}

#[derive(Args, Debug)]
pub struct PublishArgs {
    /// Desired slug; normalized to lower-case word characters and hyphens
    #[arg(long)]
    pub slug: String,
    /// Client display name
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub logo: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub whatsapp: Option<String>,
    #[arg(long)]
    pub maps: Option<String>,
    #[arg(long)]
    pub facebook: Option<String>,
    #[arg(long)]
    pub instagram: Option<String>,
    #[arg(long)]
    pub tiktok: Option<String>,
    #[arg(long)]
    pub snapchat: Option<String>,
    #[arg(long)]
    pub city: Option<String>,
}
