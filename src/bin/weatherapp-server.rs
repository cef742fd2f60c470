// ABOUTME: Weather app backend entry point
// ABOUTME: Loads configuration, initializes logging and serves the HTTP API until shutdown
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Weather App Server Binary
//!
//! Starts the account and session API on the configured port.

use anyhow::Result;
use clap::Parser;
use tracing::{debug, error, info};
use weatherapp_server::{
    config::{DatabaseUrl, ServerConfig},
    logging, server,
};

#[derive(Parser)]
#[command(name = "weatherapp-server")]
#[command(about = "Weather app backend - accounts, sessions and user administration")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,

    /// Override database URL
    #[arg(long)]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // `.env` may set RUST_LOG
    let dotenv_result = dotenvy::dotenv();
    logging::init_from_env()?;
    if let Err(e) = dotenv_result {
        debug!("No .env file loaded: {}", e);
    }

    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }
    if let Some(database_url) = args.database_url {
        config.database_url = DatabaseUrl::parse_url(&database_url)?;
    }

    info!("Starting Weather App Server");
    info!("{}", config.summary());

    if let Err(e) = server::run(config).await {
        error!("Server error: {:#}", e);
        return Err(e);
    }

    Ok(())
}
