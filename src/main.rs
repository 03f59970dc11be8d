// src/main.rs

use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use sysaccessos_console::{
    config::{AppState, ConsoleConfig},
    console::Shell,
    services::api::DEFAULT_BASE_URL,
};

#[derive(Parser, Debug)]
#[command(name = "sysaccessos", about = "Console administrativo do SysAccessos")]
struct Args {
    /// URL base da API REST
    #[arg(long, env = "API_BASE_URL", default_value = DEFAULT_BASE_URL)]
    api_url: String,

    /// Timeout das requisições em segundos (sem timeout se omitido)
    #[arg(long, env = "API_TIMEOUT_SECS")]
    timeout_secs: Option<u64>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // O .env precisa ser lido antes do clap, que consulta as variáveis de ambiente
    dotenvy::dotenv().ok();
    let args = Args::parse();

    // Logs vão para stderr para não se misturarem com as telas
    tracing_subscriber::fmt()
        .with_target(false)
        .compact()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let config = ConsoleConfig {
        api_base_url: args.api_url,
        timeout: args.timeout_secs.map(Duration::from_secs),
    };
    let state = AppState::new(&config)?;

    Shell::new(state).run().await
}
