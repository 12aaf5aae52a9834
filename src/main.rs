use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

use music_jammer_client::cli::Args;
use music_jammer_client::{terminal, App, Config, JammerClient, JammerError};

#[tokio::main]
async fn main() -> ExitCode {
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<(), JammerError> {
    let config = Config::load(args.config.as_deref(), args.overrides())?;
    info!("Talking to {}", config.base_url);

    let client = Arc::new(JammerClient::new(config.base_url.clone())?);
    let app = App::new(client);

    terminal::run(app, config.poll_interval).await
}
