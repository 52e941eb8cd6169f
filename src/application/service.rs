use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, warn};

use crate::domain::{format_cents, Account, Cents, Ledger, LedgerError};

use super::AppError;

/// Application service providing the ledger operations to any client
/// (interactive session, tests, future front-ends).
///
/// Cloning is cheap and every clone shares the same ledger. Each call holds
/// the lock for exactly one ledger operation, so concurrent callers never see
/// a half-applied change.
#[derive(Clone, Default)]
pub struct LedgerService {
    ledger: Arc<Mutex<Ledger>>,
}

/// Result of a deposit or withdrawal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovementResult {
    pub account_number: String,
    pub amount: Cents,
    pub balance: Cents,
}

/// Balance entry for an account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BalanceEntry {
    pub account_number: String,
    pub balance: Cents,
}

impl LedgerService {
    /// Create a service over an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a service over an existing ledger.
    pub fn with_ledger(ledger: Ledger) -> Self {
        Self {
            ledger: Arc::new(Mutex::new(ledger)),
        }
    }

    // ========================
    // Account operations
    // ========================

    /// Open a new account with a zero balance.
    pub fn create_account(&self, account_number: &str) -> Result<Account, AppError> {
        let result = self
            .ledger
            .lock()
            .create_account(account_number)
            .map(Account::clone);
        let account = rejected("create", account_number, result)?;

        debug!(account = %account.account_number, "account created");
        Ok(account)
    }

    /// Get a snapshot of a single account.
    pub fn get_account(&self, account_number: &str) -> Result<Account, AppError> {
        let result = self.ledger.lock().account(account_number).map(Account::clone);
        rejected("show", account_number, result)
    }

    /// List all accounts, ordered by account number.
    pub fn list_accounts(&self) -> Vec<Account> {
        self.ledger
            .lock()
            .accounts()
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn account_count(&self) -> usize {
        self.ledger.lock().len()
    }

    // ========================
    // Balance operations
    // ========================

    pub fn deposit(&self, account_number: &str, amount: Cents) -> Result<MovementResult, AppError> {
        let result = self.ledger.lock().deposit(account_number, amount);
        let balance = rejected("deposit", account_number, result)?;

        debug!(
            account = account_number,
            amount = %format_cents(amount),
            balance = %format_cents(balance),
            "deposit applied"
        );
        Ok(MovementResult {
            account_number: account_number.to_string(),
            amount,
            balance,
        })
    }

    pub fn withdraw(&self, account_number: &str, amount: Cents) -> Result<MovementResult, AppError> {
        let result = self.ledger.lock().withdraw(account_number, amount);
        let balance = rejected("withdraw", account_number, result)?;

        debug!(
            account = account_number,
            amount = %format_cents(amount),
            balance = %format_cents(balance),
            "withdrawal applied"
        );
        Ok(MovementResult {
            account_number: account_number.to_string(),
            amount,
            balance,
        })
    }

    /// Get the current balance of an account.
    pub fn get_balance(&self, account_number: &str) -> Result<BalanceEntry, AppError> {
        let result = self.ledger.lock().balance(account_number);
        let balance = rejected("balance", account_number, result)?;

        Ok(BalanceEntry {
            account_number: account_number.to_string(),
            balance,
        })
    }
}

fn rejected<T>(
    operation: &'static str,
    account_number: &str,
    result: Result<T, LedgerError>,
) -> Result<T, AppError> {
    result.map_err(|err| {
        warn!(operation, account = account_number, error = %err, "operation rejected");
        AppError::from(err)
    })
}
