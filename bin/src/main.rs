//! dsefeed CLI - Dhaka Stock Exchange share table scraper.

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use dsefeed_lib::prelude::*;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::{EnvFilter, fmt};

mod commands;
mod display;

use display::{Format, Output};

#[derive(Parser)]
#[command(name = "dsefeed")]
#[command(about = "Dhaka Stock Exchange share table scraper", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Quiet mode (only log errors)
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    format: Format,

    /// Write output to a file instead of stdout
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    /// Wrap JSON output in a {success, data, timestamp} envelope
    #[arg(long, global = true)]
    envelope: bool,

    /// Site origin
    #[arg(long, default_value = dsefeed_lib::DEFAULT_BASE_URL, global = true)]
    base_url: String,

    /// Per-request timeout in seconds
    #[arg(long, default_value = "30", global = true)]
    timeout: u64,

    /// Maximum attempts per request
    #[arg(long, default_value = "3", global = true)]
    retries: u32,

    /// Skip TLS certificate verification
    #[arg(long, global = true)]
    insecure: bool,

    /// Fail on any fetch error, including index pages
    #[arg(long, global = true, conflicts_with = "lenient")]
    strict: bool,

    /// Print an empty result instead of failing, including latest prices
    #[arg(long, global = true)]
    lenient: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Latest share prices
    Latest,

    /// DSEX index constituents
    Index {
        /// Only show this trading code (case-insensitive)
        #[arg(short, long)]
        symbol: Option<String>,
    },

    /// DS30 index constituents
    Top30,

    /// Day-end price archive
    Historical {
        /// Start date (YYYY-MM-DD)
        #[arg(short, long)]
        start: String,

        /// End date (YYYY-MM-DD)
        #[arg(short, long)]
        end: String,

        /// Trading code
        #[arg(short, long, default_value = dsefeed_lib::DEFAULT_INSTRUMENT)]
        inst: String,
    },

    /// Latest prices and both index tables, fetched concurrently
    Snapshot,

    /// List exchange pages and how they are read
    Endpoints,
}

impl Cli {
    fn client_config(&self) -> ClientConfig {
        ClientConfig::default()
            .with_base_url(&self.base_url)
            .with_timeout(Duration::from_secs(self.timeout))
            .with_max_retries(self.retries)
            .with_accept_invalid_certs(self.insecure)
    }

    const fn failure_policy(&self) -> Option<FailurePolicy> {
        if self.strict {
            Some(FailurePolicy::Propagate)
        } else if self.lenient {
            Some(FailurePolicy::Degrade)
        } else {
            None
        }
    }

    fn service(&self) -> Result<StockService> {
        let service = StockService::new(self.client_config())
            .with_context(|| format!("Invalid base URL: {}", self.base_url))?;

        Ok(match self.failure_policy() {
            Some(policy) => service.with_failure_policy(policy),
            None => service,
        })
    }

    fn output(&self) -> Output {
        Output::new(self.format, self.output.clone(), self.envelope)
    }
}

/// Logs go to stderr so that stdout carries only data.
fn init_tracing(verbose: u8, quiet: bool) {
    let default = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, 2) => "debug",
        (false, _) => "trace",
    };
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .with_target(verbose > 1)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    // Show help if no command provided
    let Some(command) = cli.command.as_ref() else {
        Cli::command().print_help()?;
        return Ok(());
    };

    if matches!(command, Commands::Endpoints) {
        commands::endpoints::list_endpoints(cli.failure_policy());
        return Ok(());
    }

    let service = cli.service()?;
    let output = cli.output();

    let result = match command {
        Commands::Latest => commands::fetch::run(&service, Endpoint::Latest, &output).await,
        Commands::Index { symbol } => {
            commands::fetch::index(&service, symbol.as_deref(), &output).await
        }
        Commands::Top30 => commands::fetch::run(&service, Endpoint::TopMovers, &output).await,
        Commands::Historical { start, end, inst } => {
            let query = HistoricalQuery::new(start, end).with_instrument(inst);
            commands::fetch::historical(&service, &query, &output).await
        }
        Commands::Snapshot => commands::snapshot::snapshot(&service, &output).await,
        Commands::Endpoints => Ok(()),
    };

    service.close();
    result
}
