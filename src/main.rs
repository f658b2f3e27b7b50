//! ec2-find-asg - find EC2 Auto Scaling Groups by tags.
//!
//! Lists the Auto Scaling Groups in one region, keeps those whose tags
//! include every requested key/value pair, and prints each match with:
//! - Capacity and health check configuration
//! - Member instances with per-instance health and lifecycle facts
//! - Healthy, in-service, pending, terminating and viable counts
//! - Load balancers and tags

mod asg;
mod config;
mod error;
mod output;

use anyhow::Result;
use clap::Parser;
use tracing::{debug, error};

use asg::client::AsgClient;
use config::{Args, Config};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args = Args::parse();

    if let Err(e) = init_tracing(&args.log_level) {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    debug!("Starting ec2-find-asg {}", config::VERSION);

    let config = match Config::from_args(args) {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = run(&config).await {
        error!("{}", e);
        std::process::exit(1);
    }
}

/// Main application logic.
async fn run(config: &Config) -> Result<()> {
    debug!(
        "Searching region {} for {} tag(s) {}",
        config.region_display(),
        config.search_tags.len(),
        config.search_tags
    );

    let client = AsgClient::new(config).await?;
    let result = asg::find(&client, &config.search_tags).await?;

    debug!(
        "Found {} matching group(s) in {}",
        result.as_groups.len(),
        client.region()
    );

    println!("{}", output::render(&result, config.output, config.compact)?);
    Ok(())
}

/// Initialize tracing subscriber. Logs go to stderr so stdout carries only the result.
fn init_tracing(log_level: &str) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .map_err(|e| anyhow::anyhow!("Failed to initialize log filter: {}", e))?;

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();

    Ok(())
}
