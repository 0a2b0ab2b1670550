//! `suitcut-server`: serves the order tracker over HTTP

use clap::Parser;
use suitcut::config::AppConfig;
use suitcut::server::{AppContext, serve};

/// Command-line arguments for the server
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to a YAML configuration file
    #[arg(short, long, env = "SUITCUT_CONFIG")]
    config: Option<String>,

    /// Listen address, overrides the configuration file
    #[arg(long, env = "SUITCUT_HOST")]
    host: Option<String>,

    /// Listen port, overrides the configuration file
    #[arg(short, long, env = "SUITCUT_PORT")]
    port: Option<u16>,

    /// Log level (trace, debug, info, warn, error) when RUST_LOG is unset
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    use tracing_subscriber::{EnvFilter, fmt};

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    fmt().with_env_filter(env_filter).with_target(true).init();

    let config = match &args.config {
        Some(path) => AppConfig::from_yaml_file(path)?,
        None => AppConfig::default(),
    }
    .with_listener(args.host, args.port);

    tracing::info!(
        seed = config.seed.enabled,
        offline = config.offline.enabled,
        "starting suitcut"
    );

    let ctx = AppContext::from_config(&config).await?;
    serve(ctx, &config.server.bind_address()).await
}
