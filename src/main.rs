use clap::Parser;
use dotenvy::dotenv;

use imsakia::cli::{self, Cli};
use imsakia::config::get_config;
use imsakia::runtime::modes::server::run_server;
use imsakia::system::logging::init_logging;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let args = Cli::parse();
    let config = get_config();

    match args.command {
        // CLI mode: operator commands print their own output; keep the
        // tracing pipeline out of the way.
        Some(command) => {
            let code = cli::run(command).await;
            std::process::exit(code);
        }
        // Server mode
        None => {
            let _guard = init_logging(&config.logging);
            run_server().await
        }
    }
}
