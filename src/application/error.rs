use thiserror::Error;

use crate::domain::LedgerError;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    /// Rejected by the ledger; the message is shown as-is.
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error("Invalid amount.")]
    InvalidAmountFormat(String),

    #[error("Please enter an account number.")]
    MissingAccountNumber,
}

impl AppError {
    /// The ledger failure behind this error, if any.
    pub fn ledger_error(&self) -> Option<&LedgerError> {
        match self {
            AppError::Ledger(err) => Some(err),
            _ => None,
        }
    }
}
