use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::application::{AppError, LedgerService};
use crate::domain::{format_cents, parse_cents, Cents};
use crate::io::Exporter;

/// Output format for account listings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Csv,
}

/// One line of session input. The first word names the command.
#[derive(Parser, Debug)]
#[command(multicall = true)]
struct SessionLine {
    #[command(subcommand)]
    command: SessionCommand,
}

#[derive(Subcommand, Debug)]
enum SessionCommand {
    /// Open a new account with a zero balance
    Create {
        /// Account number (must be unique)
        #[arg(allow_hyphen_values = true)]
        account: Option<String>,
    },

    /// Deposit money into an account
    Deposit {
        /// Account number
        #[arg(allow_hyphen_values = true)]
        account: Option<String>,

        /// Amount to deposit (e.g., "50.00" or "50")
        #[arg(allow_hyphen_values = true)]
        amount: Option<String>,
    },

    /// Withdraw money from an account
    Withdraw {
        /// Account number
        #[arg(allow_hyphen_values = true)]
        account: Option<String>,

        /// Amount to withdraw (e.g., "50.00" or "50")
        #[arg(allow_hyphen_values = true)]
        amount: Option<String>,
    },

    /// Show the balance of an account
    Balance {
        /// Account number
        #[arg(allow_hyphen_values = true)]
        account: Option<String>,
    },

    /// List all accounts with their balances
    Accounts {
        /// Output format (defaults to the session's --format)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// End the session
    #[command(visible_alias = "exit")]
    Quit,
}

/// Reply to a line that is not valid UTF-8
const INVALID_INPUT: &str = "Invalid input.";

/// What the session should do after handling a line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Print this text
    Message(String),
    /// Nothing to print (blank line or comment)
    Nothing,
    /// Stop reading input
    Quit,
}

/// Interactive front-end over a [`LedgerService`].
///
/// Each line is parsed independently; failures are turned into a reply and
/// the session keeps going.
pub struct Session<'a> {
    service: &'a LedgerService,
    default_format: OutputFormat,
}

impl<'a> Session<'a> {
    pub fn new(service: &'a LedgerService) -> Self {
        Self {
            service,
            default_format: OutputFormat::default(),
        }
    }

    pub fn with_default_format(mut self, format: OutputFormat) -> Self {
        self.default_format = format;
        self
    }

    /// Read commands until end of input or `quit`, writing one reply per command.
    pub async fn run<R, W>(&self, mut input: R, mut output: W, prompt: bool) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut buffer = Vec::new();

        loop {
            if prompt {
                output.write_all(b"> ").await?;
                output.flush().await?;
            }

            buffer.clear();
            if input.read_until(b'\n', &mut buffer).await? == 0 {
                if prompt {
                    output.write_all(b"\n").await?;
                }
                break;
            }

            let raw = buffer.strip_suffix(b"\n").unwrap_or(&buffer);
            let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
            let reply = match std::str::from_utf8(raw) {
                Ok(line) => self.execute(line),
                Err(_) => Reply::Message(INVALID_INPUT.to_string()),
            };

            match reply {
                Reply::Message(text) => {
                    output.write_all(text.as_bytes()).await?;
                    if !text.ends_with('\n') {
                        output.write_all(b"\n").await?;
                    }
                }
                Reply::Nothing => {}
                Reply::Quit => break,
            }
        }

        output.flush().await?;
        Ok(())
    }

    /// Handle a single line of input.
    pub fn execute(&self, line: &str) -> Reply {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Reply::Nothing;
        }

        let parsed = match SessionLine::try_parse_from(split_words(line)) {
            Ok(parsed) => parsed,
            // Covers `help` too, which clap reports as an error kind
            Err(err) => return Reply::Message(err.render().to_string().trim_end().to_string()),
        };

        match self.dispatch(parsed.command) {
            Ok(reply) => reply,
            Err(err) => Reply::Message(err.to_string()),
        }
    }

    fn dispatch(&self, command: SessionCommand) -> Result<Reply, AppError> {
        let text = match command {
            SessionCommand::Create { account } => {
                let account_number = require_account(account)?;
                let account = self.service.create_account(&account_number)?;
                format!("Account {} created.", account.account_number)
            }

            SessionCommand::Deposit { account, amount } => {
                let account_number = require_account(account)?;
                let amount = parse_amount(amount)?;
                let result = self.service.deposit(&account_number, amount)?;
                format!(
                    "Deposited {} to account {}.",
                    format_cents(result.amount),
                    result.account_number
                )
            }

            SessionCommand::Withdraw { account, amount } => {
                let account_number = require_account(account)?;
                let amount = parse_amount(amount)?;
                let result = self.service.withdraw(&account_number, amount)?;
                format!(
                    "Withdrew {} from account {}.",
                    format_cents(result.amount),
                    result.account_number
                )
            }

            SessionCommand::Balance { account } => {
                let account_number = require_account(account)?;
                let entry = self.service.get_balance(&account_number)?;
                format!(
                    "Account {} balance: {}",
                    entry.account_number,
                    format_cents(entry.balance)
                )
            }

            SessionCommand::Accounts { format } => {
                self.render_accounts(format.unwrap_or(self.default_format))
            }

            SessionCommand::Quit => return Ok(Reply::Quit),
        };

        Ok(Reply::Message(text))
    }

    fn render_accounts(&self, format: OutputFormat) -> String {
        let exporter = Exporter::new(self.service);
        let mut buffer = Vec::new();

        let exported = match format {
            OutputFormat::Table => return accounts_table(self.service),
            OutputFormat::Json => exporter.export_accounts_json(&mut buffer).map(|_| ()),
            OutputFormat::Csv => exporter.export_accounts_csv(&mut buffer).map(|_| ()),
        };

        match exported {
            Ok(()) => String::from_utf8_lossy(&buffer).into_owned(),
            Err(err) => format!("Export failed: {:#}", err),
        }
    }
}

fn accounts_table(service: &LedgerService) -> String {
    let accounts = service.list_accounts();
    if accounts.is_empty() {
        return "No accounts found.".to_string();
    }

    let width = accounts
        .iter()
        .map(|a| a.account_number.chars().count())
        .chain(std::iter::once("ACCOUNT".len()))
        .max()
        .unwrap_or_default();

    let mut table = format!("{:<width$} {:>14}  {}\n", "ACCOUNT", "BALANCE", "OPENED");
    table.push_str(&"-".repeat(width + 36));
    for account in accounts {
        table.push_str(&format!(
            "\n{:<width$} {:>14}  {}",
            account.account_number,
            format_cents(account.balance),
            account.opened_at.format("%Y-%m-%d %H:%M:%S")
        ));
    }
    table
}

/// Split a line into words. Double quotes group text with spaces into one
/// word (`create "Joint Savings"`); an unclosed quote runs to the end of the line.
fn split_words(line: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quoted = false;

    for ch in line.chars() {
        match ch {
            '"' => {
                quoted = !quoted;
                in_word = true;
            }
            c if c.is_whitespace() && !quoted => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            c => {
                current.push(c);
                in_word = true;
            }
        }
    }
    if in_word {
        words.push(current);
    }
    words
}

fn require_account(account: Option<String>) -> Result<String, AppError> {
    account
        .filter(|a| !a.trim().is_empty())
        .ok_or(AppError::MissingAccountNumber)
}

fn parse_amount(amount: Option<String>) -> Result<Cents, AppError> {
    let text = amount.unwrap_or_default();
    parse_cents(&text).map_err(|_| AppError::InvalidAmountFormat(text))
}
