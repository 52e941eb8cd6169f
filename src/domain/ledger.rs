use std::collections::HashMap;
use std::collections::hash_map::Entry;

use super::{Account, Cents, LedgerError, Movement};

/// In-memory collection of accounts keyed by account number.
///
/// Every mutation validates first and applies second, so a failed call leaves
/// the ledger exactly as it was. The ledger has no internal locking; share it
/// across threads through [`LedgerService`](crate::application::LedgerService).
#[derive(Debug, Default)]
pub struct Ledger {
    accounts: HashMap<String, Account>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a new account with a zero balance.
    pub fn create_account(&mut self, account_number: &str) -> Result<&Account, LedgerError> {
        if account_number.trim().is_empty() {
            return Err(LedgerError::EmptyAccountNumber);
        }

        match self.accounts.entry(account_number.to_string()) {
            Entry::Occupied(_) => Err(LedgerError::DuplicateAccount(account_number.to_string())),
            Entry::Vacant(slot) => {
                let account = slot.insert(Account::new(account_number));
                Ok(&*account)
            }
        }
    }

    /// Add `amount` to the account and return the new balance.
    /// Existence is checked before the amount.
    pub fn deposit(&mut self, account_number: &str, amount: Cents) -> Result<Cents, LedgerError> {
        let account = self.account_mut(account_number)?;
        if amount <= 0 {
            return Err(LedgerError::InvalidAmount(Movement::Deposit));
        }

        account.balance = account
            .balance
            .checked_add(amount)
            .ok_or(LedgerError::BalanceOverflow)?;
        Ok(account.balance)
    }

    /// Remove `amount` from the account and return the new balance.
    /// Checks run in order: existence, positive amount, sufficient funds.
    pub fn withdraw(&mut self, account_number: &str, amount: Cents) -> Result<Cents, LedgerError> {
        let account = self.account_mut(account_number)?;
        if amount <= 0 {
            return Err(LedgerError::InvalidAmount(Movement::Withdraw));
        }
        if amount > account.balance {
            return Err(LedgerError::InsufficientFunds {
                balance: account.balance,
                requested: amount,
            });
        }

        account.balance -= amount;
        Ok(account.balance)
    }

    pub fn balance(&self, account_number: &str) -> Result<Cents, LedgerError> {
        self.account(account_number).map(|account| account.balance)
    }

    pub fn account(&self, account_number: &str) -> Result<&Account, LedgerError> {
        self.accounts
            .get(account_number)
            .ok_or_else(|| LedgerError::AccountNotFound(account_number.to_string()))
    }

    /// All accounts, ordered by account number.
    pub fn accounts(&self) -> Vec<&Account> {
        let mut accounts: Vec<&Account> = self.accounts.values().collect();
        accounts.sort_by(|a, b| a.account_number.cmp(&b.account_number));
        accounts
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    fn account_mut(&mut self, account_number: &str) -> Result<&mut Account, LedgerError> {
        self.accounts
            .get_mut(account_number)
            .ok_or_else(|| LedgerError::AccountNotFound(account_number.to_string()))
    }
}
