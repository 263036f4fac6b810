use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt};

use saferoute_server::{
    cli::{Cli, Command},
    load_config, route_file, serve,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let cli = Cli::parse();

    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("saferoute=info,tower_http=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut config = load_config(cli.config.as_deref())?;
    if let Some(host) = cli.host {
        config.server.host = host;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(config).await,
        Command::Route { request, geojson } => {
            println!("{}", route_file(&config, &request, geojson)?);
            Ok(())
        }
    }
}
