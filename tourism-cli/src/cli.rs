use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tourism_core::{
    Config, HttpTourismClient, QuerySession, ResultsView, TourismApi,
    client::DEFAULT_PLACE_HISTORY_LIMIT, panel, render,
};
use tracing::info;

use crate::{configure, interactive};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "tourism", version, about = "Tourism AI command-line client")]
pub struct Cli {
    /// Backend base URL; overrides the config file.
    #[arg(long, global = true, env = "TOURISM_API_BASE_URL")]
    pub base_url: Option<String>,

    /// Request timeout in seconds.
    #[arg(long, global = true, env = "TOURISM_API_TIMEOUT")]
    pub timeout: Option<u64>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Ask a travel question, e.g. "I'm going to Bangalore, what's the weather?".
    Ask {
        /// Free-text query.
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,

        /// Optional place hint.
        #[arg(long)]
        place: Option<String>,

        /// Print the raw JSON response.
        #[arg(long)]
        json: bool,
    },

    /// Show recent queries.
    History {
        /// Maximum number of entries.
        #[arg(long)]
        limit: Option<u32>,

        /// Only include the last N days.
        #[arg(long, conflicts_with = "place")]
        days: Option<u32>,

        /// Only show queries about this place.
        #[arg(long)]
        place: Option<String>,

        #[arg(long)]
        json: bool,
    },

    /// Show aggregate query statistics.
    Stats {
        #[arg(long)]
        json: bool,
    },

    /// Check that the backend is up.
    Health {
        /// Also list the endpoints the backend advertises.
        #[arg(long)]
        endpoints: bool,
    },

    /// Interactive session with query form, results and history panel.
    Interactive {
        /// Number of history entries shown in the panel.
        #[arg(long)]
        history_limit: Option<u32>,
    },

    /// Store backend URL and defaults in the config file.
    Configure,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<ExitCode> {
        let config = Config::load()?;
        let settings = config.client_settings(self.base_url.as_deref(), self.timeout);
        let connect = || {
            info!(base_url = %settings.base_url, timeout = ?settings.timeout, "using backend");
            HttpTourismClient::new(&settings).context("Failed to set up backend client")
        };

        match self.command {
            Command::Ask { query, place, json } => {
                ask(&connect()?, &query.join(" "), place.as_deref(), json).await
            }
            Command::History { limit, days, place, json } => {
                let limit = match place {
                    Some(_) => limit.unwrap_or(DEFAULT_PLACE_HISTORY_LIMIT),
                    None => limit.unwrap_or_else(|| config.history_limit()),
                };
                history(&connect()?, limit, days, place.as_deref(), json).await
            }
            Command::Stats { json } => stats(&connect()?, json).await,
            Command::Health { endpoints } => health(&connect()?, endpoints).await,
            Command::Interactive { history_limit } => {
                let limit = history_limit.unwrap_or_else(|| config.history_limit());
                interactive::run(&connect()?, limit).await?;
                Ok(ExitCode::SUCCESS)
            }
            Command::Configure => {
                configure::run(config)?;
                Ok(ExitCode::SUCCESS)
            }
        }
    }
}

async fn ask(
    api: &dyn TourismApi,
    query: &str,
    place: Option<&str>,
    json: bool,
) -> anyhow::Result<ExitCode> {
    let mut session = QuerySession::new();
    if !session.submit(api, query, place).await {
        eprintln!("Please enter a query");
        return Ok(ExitCode::FAILURE);
    }

    let Some(response) = session.response() else {
        return Ok(ExitCode::FAILURE);
    };

    if json {
        println!("{}", serde_json::to_string_pretty(response)?);
        return Ok(if response.success { ExitCode::SUCCESS } else { ExitCode::FAILURE });
    }

    let view = ResultsView::strict(response);
    print!("{}", render::results(&view));

    Ok(if view.is_error() { ExitCode::FAILURE } else { ExitCode::SUCCESS })
}

async fn history(
    api: &dyn TourismApi,
    limit: u32,
    days: Option<u32>,
    place: Option<&str>,
    json: bool,
) -> anyhow::Result<ExitCode> {
    match panel::fetch_history(api, limit, days, place).await {
        Ok(entries) if json => println!("{}", serde_json::to_string_pretty(&entries)?),
        Ok(entries) => print!("{}", render::history(&entries, place)),
        Err(err) => {
            eprintln!("Error: {}", err.user_message(api.base_url()));
            return Ok(ExitCode::FAILURE);
        }
    }

    Ok(ExitCode::SUCCESS)
}

async fn stats(api: &dyn TourismApi, json: bool) -> anyhow::Result<ExitCode> {
    match api.stats().await {
        Ok(stats) if json => println!("{}", serde_json::to_string_pretty(&stats)?),
        Ok(stats) => print!("{}", render::stats(&stats)),
        Err(err) => {
            eprintln!("Error: {}", err.user_message(api.base_url()));
            return Ok(ExitCode::FAILURE);
        }
    }

    Ok(ExitCode::SUCCESS)
}

async fn health(api: &dyn TourismApi, endpoints: bool) -> anyhow::Result<ExitCode> {
    let status = match api.health().await {
        Ok(status) => status,
        Err(err) => {
            eprintln!("Error: {}", err.user_message(api.base_url()));
            return Ok(ExitCode::FAILURE);
        }
    };
    print!("{}", render::health(api.base_url(), &status));

    if endpoints {
        match api.service_info().await {
            Ok(info) => print!("{}", render::service_info(&info)),
            Err(err) => eprintln!("Error: {}", err.user_message(api.base_url())),
        }
    }

    Ok(if status.is_healthy() { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}
