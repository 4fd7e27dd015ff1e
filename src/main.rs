use crate::cli::{Cli, Commands};
use crate::client::HttpResourceClient;
use crate::config::{ProbeConfig, SeedConfig};
use crate::orchestrator::ConformanceRun;
use anyhow::Context;
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod auth;
mod cli;
mod client;
mod config;
mod domain;
mod errors;
mod generator;
mod orchestrator;
mod recorder;

#[cfg(test)]
mod tests;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn probe_config(
    url: &str,
    username: Option<String>,
    password: Option<String>,
) -> anyhow::Result<ProbeConfig> {
    ProbeConfig::new(url, username, password).context("invalid configuration")
}

fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    match cli.command {
        Commands::Check {
            target,
            discovery,
            allow_failures,
        } => {
            let config = probe_config(&target.url, target.username, target.password)?;
            let api = HttpResourceClient::new(&config).context("failed to build HTTP client")?;

            info!("Checking listing API at {}", config.base_url);
            let summary = ConformanceRun::new(&api, config.credentials)
                .with_discovery(discovery)
                .run()
                .summary();

            println!("\n{summary}");

            if summary.all_passed() || allow_failures {
                Ok(ExitCode::SUCCESS)
            } else {
                Ok(ExitCode::FAILURE)
            }
        }

        Commands::Seed {
            target,
            count,
            seed,
        } => {
            let config = probe_config(&target.url, Some(target.username), Some(target.password))?;
            let seed_config = SeedConfig::new(count, seed).context("invalid configuration")?;
            let api = HttpResourceClient::new(&config).context("failed to build HTTP client")?;

            let rng = match seed_config.rng_seed {
                Some(s) => StdRng::seed_from_u64(s),
                None => StdRng::from_entropy(),
            };

            info!("Seeding listing API at {}", config.base_url);
            let report = generator::seed(&api, config.credentials.as_ref(), seed_config.count, rng)
                .context("seeding aborted")?;

            println!(
                "\nSuccessfully created {} out of {} properties ({} districts available)",
                report.created.len(),
                report.requested,
                report.districts
            );
            println!("Note: no images were uploaded; add them through the site admin.");

            if report.failed() == 0 {
                Ok(ExitCode::SUCCESS)
            } else {
                Ok(ExitCode::FAILURE)
            }
        }
    }
}
