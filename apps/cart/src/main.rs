//! # GoMarketplace Cart
//!
//! Command-line entry point. Prints the cart as JSON on stdout; errors
//! are printed as an `ErrorResponse` on stderr with exit code 1.

use std::process::ExitCode;

use marketplace_cart::cli;
use marketplace_cart::commands::cart::CartResponse;
use marketplace_cart::error::{CartResult, ErrorResponse};
use marketplace_cart::state::CartConfig;
use tracing::debug;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(Some(response)) => match serde_json::to_string_pretty(&response) {
            Ok(json) => {
                println!("{}", json);
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("failed to render cart: {}", e);
                ExitCode::FAILURE
            }
        },
        Ok(None) => {
            println!("{}", cli::USAGE);
            ExitCode::SUCCESS
        }
        Err(err) => {
            let response = ErrorResponse::from(&err);
            match serde_json::to_string(&response) {
                Ok(json) => eprintln!("{}", json),
                Err(_) => eprintln!("{}", err),
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> CartResult<Option<CartResponse>> {
    let Some(invocation) = cli::parse_args(std::env::args().skip(1))? else {
        return Ok(None);
    };

    marketplace_cart::init_tracing();

    let config = CartConfig::load(invocation.config_path)?;
    debug!(?config, "Configuration loaded");

    let provider = marketplace_cart::bootstrap(&config).await?;
    let response = provider.provide(cli::execute(invocation.command)).await?;

    Ok(Some(response))
}
