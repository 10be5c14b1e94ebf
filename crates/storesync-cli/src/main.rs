mod images;
mod run;

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "storesync")]
#[command(about = "Import a storefront product page into WooCommerce")]
struct Cli {
    /// Product page URL to import
    url: String,

    /// Print the product payload as JSON instead of uploading it
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    match run_cli(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run_cli(cli: &Cli) -> anyhow::Result<()> {
    let config = storesync_core::load_app_config_from_env()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let outcome = run::run_import(&config, &cli.url, cli.dry_run).await?;

    match outcome.created {
        Some(record) => println!(
            "created product {} ({}), features from {}",
            record.id,
            record.permalink,
            outcome
                .feature_source
                .map_or("none", storesync_scraper::FeatureSource::as_str),
        ),
        None => println!("{}", serde_json::to_string_pretty(&outcome.product)?),
    }
    Ok(())
}

#[cfg(test)]
mod tests;
