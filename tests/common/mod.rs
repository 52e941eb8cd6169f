// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use anyhow::Result;
use arca::LedgerService;
use arca::cli::Session;
use arca::domain::Cents;

/// Test fixture: standard account setup
pub struct StandardAccounts;

impl StandardAccounts {
    /// Create two empty accounts: A1 and B2
    pub fn create_basic(service: &LedgerService) -> Result<()> {
        service.create_account("A1")?;
        service.create_account("B2")?;
        Ok(())
    }

    /// Create an account and deposit an opening amount into it
    pub fn create_funded(service: &LedgerService, account: &str, amount: Cents) -> Result<()> {
        service.create_account(account)?;
        service.deposit(account, amount)?;
        Ok(())
    }
}

/// Helper to feed a script through a session and collect everything it prints
pub async fn run_script(service: &LedgerService, script: &str) -> Result<String> {
    let mut output = Vec::new();
    Session::new(service)
        .run(script.as_bytes(), &mut output, false)
        .await?;
    Ok(String::from_utf8(output)?)
}
