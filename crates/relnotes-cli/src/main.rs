//! relnotes CLI - manage a release view's notes from the terminal
//!
//! Drives the same add/remove/render flows the admin page runs, against a
//! live notes API.

mod cli;
mod commands;
mod error;
mod profiles;
#[cfg(test)]
mod tests;

use std::env;

use clap::Parser;

use crate::cli::{Cli, Commands, ConfigCommands};
use crate::commands::add::run_add;
use crate::commands::common::{resolve_settings, ResolvedSettings};
use crate::commands::completions::run_completions;
use crate::commands::config::{run_config_set, run_config_show, ConfigSetArgs};
use crate::commands::remove::run_remove;
use crate::commands::show::run_show;
use crate::error::CliError;
use crate::profiles::ProfilesConfig;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), CliError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("relnotes=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();
    let mut config = ProfilesConfig::load()?;
    let profile_name = config.resolve_profile_name(
        cli.profile.as_deref(),
        env::var("RELNOTES_PROFILE").ok().as_deref(),
    );
    tracing::debug!(profile = %profile_name, "resolved CLI profile");
    let flag_base_url = cli.base_url.clone();
    let flag_release = cli.release.clone();

    match cli.command {
        Commands::Show { format } => {
            let settings = settings_from(flag_base_url, flag_release, &config, &profile_name)?;
            run_show(&settings, format).await?;
        }
        Commands::Add { id, format } => {
            let settings = settings_from(flag_base_url, flag_release, &config, &profile_name)?;
            run_add(&id, &settings, format).await?;
        }
        Commands::Remove { id, format } => {
            let settings = settings_from(flag_base_url, flag_release, &config, &profile_name)?;
            run_remove(&id, &settings, format).await?;
        }
        Commands::Config { command } => match command {
            ConfigCommands::Show => run_config_show(&config, &profile_name)?,
            ConfigCommands::Set {
                base_url,
                release,
                edit_url_base,
                bug_url_base,
            } => {
                run_config_set(
                    &mut config,
                    &profile_name,
                    ConfigSetArgs {
                        base_url,
                        release,
                        edit_url_base,
                        bug_url_base,
                    },
                )?;
            }
        },
        Commands::Completions { shell, output } => {
            run_completions(shell, output.as_deref())?;
        }
    }

    Ok(())
}

fn settings_from(
    flag_base_url: Option<String>,
    flag_release: Option<String>,
    config: &ProfilesConfig,
    profile_name: &str,
) -> Result<ResolvedSettings, CliError> {
    resolve_settings(
        flag_base_url,
        flag_release,
        env::var("RELNOTES_BASE_URL").ok(),
        env::var("RELNOTES_RELEASE").ok(),
        config.profile(profile_name),
    )
}
