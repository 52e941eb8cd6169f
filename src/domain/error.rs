use std::fmt;

use thiserror::Error;

use super::Cents;

/// Which balance movement an amount was offered to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Movement {
    Deposit,
    Withdraw,
}

impl Movement {
    pub fn as_str(&self) -> &'static str {
        match self {
            Movement::Deposit => "deposit",
            Movement::Withdraw => "withdraw",
        }
    }
}

impl fmt::Display for Movement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Failures reported by the ledger. None of them leave partial changes behind.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("account already exists")]
    DuplicateAccount(String),

    #[error("account not found")]
    AccountNotFound(String),

    #[error("{0} amount must be positive")]
    InvalidAmount(Movement),

    #[error("insufficient funds")]
    InsufficientFunds { balance: Cents, requested: Cents },

    #[error("account number must not be empty")]
    EmptyAccountNumber,

    #[error("balance would overflow")]
    BalanceOverflow,
}
