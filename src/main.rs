use std::process::ExitCode;

use tracing::error;
use tracing_subscriber::EnvFilter;

use azure_vm_starter::{credential, run, ArmClient, Config};

const DEFAULT_LOG_FILTER: &str = "info,azure_vm_starter=debug";

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = match Config::new_from_env() {
        Ok(config) => config,
        Err(err) => {
            error!("{}", err);
            return ExitCode::FAILURE;
        }
    };

    let token = match credential::acquire_token(&config.scope).await {
        Ok(token) => token,
        Err(err) => {
            error!("{}", err);
            return ExitCode::FAILURE;
        }
    };

    let client = match ArmClient::new(&config) {
        Ok(client) => client,
        Err(err) => {
            error!("{}", err);
            return ExitCode::FAILURE;
        }
    };

    match run(&client, &token).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            error!("Failed to list subscriptions: {}", err);
            ExitCode::FAILURE
        }
    }
}
