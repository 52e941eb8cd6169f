mod common;

use anyhow::Result;
use arca::LedgerService;
use common::{StandardAccounts, run_script};

#[tokio::test]
async fn test_walkthrough_script() -> Result<()> {
    let service = LedgerService::new();

    let output = run_script(
        &service,
        "create A1\n\
         balance A1\n\
         deposit A1 100.0\n\
         balance A1\n\
         withdraw A1 30\n\
         balance A1\n\
         withdraw A1 1000.00\n\
         balance A1\n\
         balance A2\n",
    )
    .await?;

    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(
        lines,
        vec![
            "Account A1 created.",
            "Account A1 balance: 0.00",
            "Deposited 100.00 to account A1.",
            "Account A1 balance: 100.00",
            "Withdrew 30.00 from account A1.",
            "Account A1 balance: 70.00",
            "insufficient funds",
            "Account A1 balance: 70.00",
            "account not found",
        ]
    );
    Ok(())
}

#[tokio::test]
async fn test_errors_do_not_end_the_session() -> Result<()> {
    let service = LedgerService::new();

    let output = run_script(
        &service,
        "create A1\n\
         create A1\n\
         deposit A1 abc\n\
         deposit A1 0\n\
         withdraw A1 5\n\
         deposit A1 12.5\n",
    )
    .await?;

    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(
        lines,
        vec![
            "Account A1 created.",
            "account already exists",
            "Invalid amount.",
            "deposit amount must be positive",
            "insufficient funds",
            "Deposited 12.50 to account A1.",
        ]
    );
    assert_eq!(service.get_balance("A1")?.balance, 1250);
    Ok(())
}

#[tokio::test]
async fn test_quit_stops_reading() -> Result<()> {
    let service = LedgerService::new();

    let output = run_script(&service, "create A1\nquit\ncreate B2\n").await?;

    assert_eq!(output, "Account A1 created.\n");
    assert_eq!(service.account_count(), 1);
    Ok(())
}

#[tokio::test]
async fn test_script_without_trailing_newline() -> Result<()> {
    let service = LedgerService::new();
    StandardAccounts::create_funded(&service, "A1", 7000)?;

    let output = run_script(&service, "# check\n\nbalance A1").await?;

    assert_eq!(output, "Account A1 balance: 70.00\n");
    Ok(())
}

#[tokio::test]
async fn test_prompt_is_written_per_line() -> Result<()> {
    let service = LedgerService::new();
    let mut output = Vec::new();

    arca::cli::Session::new(&service)
        .run("create A1\n".as_bytes(), &mut output, true)
        .await?;

    assert_eq!(String::from_utf8(output)?, "> Account A1 created.\n> \n");
    Ok(())
}

#[tokio::test]
async fn test_invalid_utf8_line_does_not_end_the_session() -> Result<()> {
    let service = LedgerService::new();
    let mut output = Vec::new();

    arca::cli::Session::new(&service)
        .run(
            &b"create A1\n\xff\xfe\ncreate B2\r\nbalance A1\n"[..],
            &mut output,
            false,
        )
        .await?;

    let text = String::from_utf8(output)?;
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines,
        vec![
            "Account A1 created.",
            "Invalid input.",
            "Account B2 created.",
            "Account A1 balance: 0.00",
        ]
    );
    assert_eq!(service.account_count(), 2);
    Ok(())
}

#[tokio::test]
async fn test_amount_forms_in_a_script() -> Result<()> {
    let service = LedgerService::new();

    let output = run_script(
        &service,
        "create A1\n\
         deposit A1 0.001\n\
         deposit A1 +5\n\
         deposit A1 1e3\n\
         withdraw A1 2.50\n",
    )
    .await?;

    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(
        lines,
        vec![
            "Account A1 created.",
            "Invalid amount.",
            "Deposited 5.00 to account A1.",
            "Deposited 1000.00 to account A1.",
            "Withdrew 2.50 from account A1.",
        ]
    );
    assert_eq!(service.get_balance("A1")?.balance, 100250);
    Ok(())
}
