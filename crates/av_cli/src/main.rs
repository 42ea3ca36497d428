use clap::Parser;
use tracing::info;

mod cli;
mod duration;
mod logging;
mod picker;
mod render;

use cli::Commands;
use duration::HumanDuration;

#[derive(Parser, Debug)]
#[command(author, version, about = "Classify crop and land photos with a remote inference service", long_about = None)]
pub struct Cli {
    #[arg(long, default_value = "crop", help = "Endpoint to classify against. Available endpoints: crop (default), land")]
    endpoint: String,
    #[arg(long, default_value = av_inference::DEFAULT_BASE_URL)]
    base_url: String,
    #[arg(long, default_value = "30s", help = "Request timeout (e.g. 30s, 1m, 1m30s, 500ms)")]
    timeout: HumanDuration,
    #[arg(long, default_value = "http", help = "Inference client to use. Available clients: http (default), dummy")]
    client: String,
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    let config = av_inference::Config {
        client_name: Some(cli.client.clone()),
        inference_config: av_inference::InferenceConfig::new(&cli.base_url, cli.timeout.0)?,
    };

    if let Commands::Endpoints = cli.command {
        cli::list_endpoints(&config.endpoints()?);
        return Ok(());
    }

    let endpoint = config.endpoint(&cli.endpoint)?;
    let client = av_inference::create_client(Some(config)).await?;
    info!(endpoint = %endpoint.name, url = %endpoint.url, timeout = %cli.timeout, "Controller ready");

    match cli.command {
        Commands::Classify { path, json } => cli::classify(endpoint, client, path, json).await,
        Commands::Interactive => cli::interactive(endpoint, client).await,
        Commands::Endpoints => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_classify_args() {
        let cli = Cli::try_parse_from(["av", "--endpoint", "land", "--timeout", "1m", "classify", "field.jpg"]).unwrap();
        assert_eq!(cli.endpoint, "land");
        assert_eq!(cli.timeout.0, std::time::Duration::from_secs(60));
        assert!(matches!(cli.command, Commands::Classify { json: false, .. }));
    }
}
