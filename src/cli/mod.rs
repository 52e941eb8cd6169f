mod session;

pub use session::*;

use std::io::IsTerminal;

use anyhow::Result;
use clap::Parser;
use tokio::io::BufReader;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::application::LedgerService;

/// Arca - In-Memory Bank Ledger
#[derive(Parser)]
#[command(name = "arca")]
#[command(about = "An in-memory bank-account ledger driven from an interactive prompt")]
#[command(version)]
pub struct Cli {
    /// Enable verbose (debug) logging on stderr
    #[arg(short, long)]
    pub verbose: bool,

    /// Never print the "> " prompt, even on a terminal
    #[arg(long)]
    pub no_prompt: bool,

    /// Default output format for the `accounts` command
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        init_tracing(self.verbose);

        let service = LedgerService::new();
        let session = Session::new(&service).with_default_format(self.format);
        let prompt = !self.no_prompt && std::io::stdin().is_terminal();

        session
            .run(BufReader::new(tokio::io::stdin()), tokio::io::stdout(), prompt)
            .await?;

        debug!(accounts = service.account_count(), "session ended");
        Ok(())
    }
}

/// Install the stderr log subscriber. `RUST_LOG` overrides the default filter.
///
/// Calling this more than once is harmless; later calls are no-ops.
pub fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "arca=debug" } else { "arca=warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
