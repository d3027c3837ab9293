use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use log::info;
use std::path::PathBuf;

use crate::analysis::AnalysisOptions;
use crate::auth::Token;
use crate::config::{Config, GitHubConfig, OutputFormat};
use crate::output;
use crate::providers::GitHubProvider;

#[derive(Parser)]
#[command(name = "actperf")]
#[command(author, version, about = "GitHub Actions step performance", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (defaults to ./actperf.{toml,json,yaml,yml})
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Write the report as JSON to this file
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    #[arg(short, long, global = true, default_value_t = false)]
    pretty: bool,

    /// Print the report as JSON instead of the summary
    #[arg(long, global = true, default_value_t = false)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    Github {
        #[arg(short, long, env = "GITHUB_TOKEN", hide_env_values = true)]
        token: Option<String>,

        #[arg(short, long)]
        url: Option<String>,

        /// Organization whose audit log lists the workflow runs
        #[arg(short = 'O', long = "org")]
        organization: Option<String>,

        /// Audit log search phrase
        #[arg(long)]
        phrase: Option<String>,

        #[arg(short, long)]
        limit: Option<usize>,

        /// Skip jobs with fewer recorded steps than declared steps
        #[arg(long, default_value_t = false)]
        strict: bool,
    },
}

/// Settings for a GitHub collection after merging the config file and flags.
#[derive(Debug)]
struct GitHubSettings {
    token: Token,
    base_url: String,
    organization: String,
    phrase: String,
    limit: usize,
    options: AnalysisOptions,
}

fn resolve_github_settings(
    config: GitHubConfig,
    token: Option<&str>,
    url: Option<&str>,
    organization: Option<&str>,
    phrase: Option<&str>,
    limit: Option<usize>,
    strict: bool,
) -> Result<GitHubSettings> {
    let Some(token) = token
        .map(str::to_string)
        .or(config.token)
        .filter(|t| !t.is_empty())
    else {
        bail!("The environment variable 'GITHUB_TOKEN' is not set.");
    };

    let Some(organization) = organization.map(str::to_string).or(config.organization) else {
        bail!("No organization given: pass --org or set github.organization in the config file");
    };

    Ok(GitHubSettings {
        token: Token::from(token),
        base_url: url.map_or(config.base_url, str::to_string),
        organization,
        phrase: phrase.map_or(config.phrase, str::to_string),
        limit: limit.unwrap_or(config.limit),
        options: AnalysisOptions {
            strict_alignment: strict || config.strict_alignment,
        },
    })
}

impl Cli {
    async fn execute_github(&self, config: Config, settings: GitHubSettings) -> Result<()> {
        info!(
            "Collecting action timings for organization: {}",
            settings.organization
        );

        let provider =
            GitHubProvider::new(&settings.base_url, settings.organization, &settings.token)?;

        let report = provider
            .collect_performance(&settings.phrase, settings.limit, &settings.options)
            .await?;

        let pretty = self.pretty || config.output.pretty;
        let as_json = self.json || config.output.format == OutputFormat::Json;

        if let Some(output_path) = &self.output {
            let json_output = to_json(&report, pretty)?;
            std::fs::write(output_path, json_output)?;
            info!("Report written to: {}", output_path.display());
        } else if as_json {
            println!("{}", to_json(&report, pretty)?);
        } else {
            output::print_summary(&report);
        }

        Ok(())
    }

    pub async fn execute(&self) -> Result<()> {
        let config = Config::load(self.config.as_deref())?;

        match &self.command {
            Commands::Github {
                token,
                url,
                organization,
                phrase,
                limit,
                strict,
            } => {
                let settings = resolve_github_settings(
                    config.github.clone(),
                    token.as_deref(),
                    url.as_deref(),
                    organization.as_deref(),
                    phrase.as_deref(),
                    *limit,
                    *strict,
                )?;
                self.execute_github(config, settings).await
            }
        }
    }
}

fn to_json(report: &crate::report::PerformanceReport, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(report)?
    } else {
        serde_json::to_string(report)?
    };
    Ok(json)
}
