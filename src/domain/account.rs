use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Cents;

/// A named balance record held by the [`Ledger`](super::Ledger).
///
/// The account number is assigned by the caller and never changes. The balance
/// never goes below zero; only the ledger mutates it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub account_number: String,
    pub balance: Cents,
    pub opened_at: DateTime<Utc>,
}

impl Account {
    pub fn new(account_number: impl Into<String>) -> Self {
        Self {
            account_number: account_number.into(),
            balance: 0,
            opened_at: Utc::now(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.balance == 0
    }
}
