use clap::Parser;
use tracing_subscriber::EnvFilter;

use jobscope::config::{Config, OutputFormat};
use jobscope::get_scraper;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("jobscope=info")),
        )
        .init();

    let config = Config::parse();

    let scraper = get_scraper(&config.site, &config.scraper_config())?;
    tracing::info!("Running {} scraper", scraper.name());

    let jobs = scraper.search(&config.query()).await?;

    match config.format {
        OutputFormat::Text => {
            println!("Found {} jobs:", jobs.len());
            for job in &jobs {
                println!("- {} at {}", job.title, job.company);
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&jobs)?),
    }

    Ok(())
}
