mod common;

use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

fn run_script(path: &std::path::Path) -> assert_cmd::assert::Assert {
    Command::new(cargo_bin!("seacharge"))
        .env_remove("GEMINI_API_KEY")
        .env_remove("API_KEY")
        .env("SEACHARGE_PAYMENT_DELAY_MS", "0")
        .env("RUST_LOG", "info")
        .arg("run")
        .arg(path)
        .assert()
}

#[test]
fn test_malformed_rows_are_skipped() {
    let mut rows = vec![("teleport", "home"), ("category", "groceries")];
    rows.extend(common::purchase("mobile", "ais", "0812345678", "m1"));
    rows.extend([("remove", "first"), ("method", "cash"), ("pay", "")]);
    let script = common::write_script(&rows);

    run_script(script.path())
        .success()
        .stderr(predicate::str::contains("Error reading event"))
        .stdout(predicate::str::contains(",1,107.00,SUCCESS,"));
}

#[test]
fn test_inapplicable_events_are_skipped() {
    let mut rows = vec![
        // Nothing to choose a provider for yet.
        ("provider", "ais"),
        ("category", "mobile"),
        // Wrong category.
        ("provider", "mea"),
        ("provider", "true"),
        ("account", "0898765432"),
        ("next", ""),
        // Belongs to AIS, not TrueMove.
        ("plan", "m1"),
        ("plan", "m3"),
        ("add", ""),
    ];
    rows.push(("pay", ""));
    let script = common::write_script(&rows);

    run_script(script.path())
        .success()
        .stderr(predicate::str::contains("Error processing event"))
        .stdout(predicate::str::contains(",1,53.50,SUCCESS,"));
}

#[test]
fn test_incomplete_steps_do_not_add_to_cart() {
    let script = common::write_script(&[
        ("category", "utility"),
        ("provider", "mea"),
        // No account entered; advancing is a no-op.
        ("next", ""),
        ("plan", "u1"),
        ("add", ""),
        ("pay", ""),
    ]);

    run_script(script.path())
        .success()
        .stderr(predicate::str::contains("Error processing event"))
        .stdout(predicate::str::diff(
            "id,date,items,total,status,payer,method,tax_invoice\n",
        ));
}

#[test]
fn test_empty_cart_payment_reported() {
    let script = common::write_script(&[("pay", ""), ("clear", "")]);

    run_script(script.path())
        .success()
        .stderr(predicate::str::contains("Error processing event"))
        .stderr(predicate::str::contains("Cart is empty"));
}
