//! Command-line entry point: parse arguments, run one search, open the browser.

use crate::config::{self, Config};
use crate::logging;
use crate::opener::{LinkOpener, SystemOpener};
use crate::search::{Engine, SearchOptions, SearchProvider};
use crate::tui::{self, App, Theme};
use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

const USAGE: &str = "Usage: atlas [\"query\"] or -q <query> [-e ddg|wiki|hn|reddit] [-l <limit>]";

/// Search the web from the terminal and browse the results
#[derive(Debug, Parser)]
#[command(name = "atlas", disable_version_flag = true)]
pub struct Cli {
    /// Search query; only the first positional argument is used
    #[arg(value_name = "QUERY")]
    pub terms: Vec<String>,

    /// Search query (takes precedence over the positional query)
    #[arg(short = 'q', long = "query", value_name = "QUERY")]
    pub query: Option<String>,

    /// Maximum number of results, 0 for no limit [default: 10]
    #[arg(short = 'l', long = "limit")]
    pub limit: Option<usize>,

    /// Engine to use: ddg, wiki, hn, reddit [default: ddg]
    #[arg(short = 'e', long = "engine")]
    pub engine: Option<String>,

    /// Show version
    #[arg(short = 'v', long = "version")]
    pub version: bool,

    /// Use an alternate config file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Write debug logs regardless of the config file
    #[arg(long)]
    pub debug: bool,
}

impl Cli {
    /// The query to search for: `--query` when non-empty, else the first positional argument
    pub fn resolve_query(&self) -> Option<String> {
        self.query
            .iter()
            .chain(self.terms.first())
            .map(|q| q.trim())
            .find(|q| !q.is_empty())
            .map(str::to_string)
    }
}

/// Run the CLI
pub async fn run() -> Result<ExitCode> {
    run_with(Cli::parse()).await
}

pub async fn run_with(cli: Cli) -> Result<ExitCode> {
    if cli.version {
        println!("atlas v{VERSION}");
        return Ok(ExitCode::SUCCESS);
    }

    let Some(query) = cli.resolve_query() else {
        eprintln!("{USAGE}");
        return Ok(ExitCode::FAILURE);
    };

    let config_path = match &cli.config {
        Some(path) => path.clone(),
        None => config::config_path()?,
    };
    let mut config = config::load_or_create_config(&config_path)?;
    if cli.debug {
        config.debug = true;
    }
    let _log_guard = logging::init(&config, &config_path)?;

    let engine = Engine::from_selector(cli.engine.as_deref().unwrap_or(&config.default_engine));
    let options = SearchOptions::new(query, cli.limit.unwrap_or(config.limit));
    let provider = engine.build(&config.http).context("search failed")?;

    search_and_browse(provider.as_ref(), &options, &config, Box::new(SystemOpener)).await
}

/// Run one search and hand the results to the browser.
///
/// Zero results is a normal outcome: the browser is never started.
pub async fn search_and_browse(
    provider: &dyn SearchProvider,
    options: &SearchOptions,
    config: &Config,
    opener: Box<dyn LinkOpener>,
) -> Result<ExitCode> {
    println!("Searching for '{}' using {}...", options.query, provider.name());
    let results = provider.search(options).await.context("search failed")?;

    if results.is_empty() {
        println!("No results found.");
        return Ok(ExitCode::SUCCESS);
    }

    let theme = Theme::from_config(&config.theme);
    let mut app = App::new(
        results,
        options.query.clone(),
        provider.name(),
        theme,
        &config.browser,
        opener,
    );
    tui::run(&mut app).await?;

    Ok(ExitCode::SUCCESS)
}
