use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::io::Write;
use std::process::Command;

#[test]
fn test_card_command_reports_each_field() {
    let mut cmd = Command::new(cargo_bin!("dinebook"));
    cmd.args([
        "--today",
        "2025-06-15",
        "card",
        "--number",
        "4111 1111 1111 1111",
        "--expiry",
        "01/20",
        "--cvv",
        "123",
    ]);

    cmd.assert()
        .failure()
        .stdout(predicate::str::contains("number: ok"))
        .stdout(predicate::str::contains("expiry: Card has expired"))
        .stdout(predicate::str::contains("cvv: ok"))
        .stdout(predicate::str::contains("holder_name: blank"));
}

#[test]
fn test_card_command_blank_fields_pass() {
    let mut cmd = Command::new(cargo_bin!("dinebook"));
    cmd.args(["card", "--name", "Jo Lee"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("number: blank"))
        .stdout(predicate::str::contains("holder_name: ok"));
}

#[test]
fn test_cards_command_end_to_end() {
    let mut cmd = Command::new(cargo_bin!("dinebook"));
    cmd.args(["--today", "2025-06-15", "cards", "tests/fixtures/cards.csv"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("row,number,expiry,cvv,holder,valid"))
        .stdout(predicate::str::contains("1,ok,ok,ok,ok,true"))
        .stdout(predicate::str::contains(
            "2,\"Card number is not valid, please check the digits\",ok,ok,ok,false",
        ))
        .stdout(predicate::str::contains(
            "3,ok,Card has expired,Please enter a valid CVV (3-4 digits),Please enter a valid cardholder name,false",
        ));
}

#[test]
fn test_cards_command_skips_unreadable_rows() {
    let mut csv = tempfile::NamedTempFile::new().unwrap();
    writeln!(csv, "number,expiry,cvv,holder").unwrap();
    csv.write_all(b"4111111111111111,12/30,123,Jo \xff\n").unwrap();
    writeln!(csv, "4111111111111111,12/30,123,Jo Lee").unwrap();

    let mut cmd = Command::new(cargo_bin!("dinebook"));
    cmd.args(["--today", "2025-06-15", "cards"]).arg(csv.path());

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("Error reading card row 1"))
        .stdout(predicate::str::contains("2,ok,ok,ok,ok,true"));
}

#[test]
fn test_cards_command_reports_short_rows_as_required() {
    let mut csv = tempfile::NamedTempFile::new().unwrap();
    writeln!(csv, "number,expiry,cvv,holder").unwrap();
    writeln!(csv, "4111111111111111,12/30").unwrap();

    let mut cmd = Command::new(cargo_bin!("dinebook"));
    cmd.args(["--today", "2025-06-15", "cards"]).arg(csv.path());

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("Error reading").not())
        .stdout(predicate::str::contains(
            "1,ok,ok,This field is required,This field is required,false",
        ));
}

#[test]
fn test_points_command() {
    let mut cmd = Command::new(cargo_bin!("dinebook"));
    cmd.args(["points", "--guests", "8", "--current", "20"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("130 points"))
        .stdout(predicate::str::contains("150 points total"));
}

#[test]
fn test_check_command_degrades_silently_when_server_is_down() {
    let mut cmd = Command::new(cargo_bin!("dinebook"));
    cmd.args([
        "--today",
        "2025-06-01",
        "check",
        "--date",
        "2025-06-07",
        "--time",
        "19:00",
        "--guests",
        "2",
        "--base-url",
        "http://127.0.0.1:1",
        "--timeout-secs",
        "2",
    ]);

    cmd.assert().success().stdout(predicate::str::is_empty());
}

#[test]
fn test_check_command_rejects_past_dates() {
    let mut cmd = Command::new(cargo_bin!("dinebook"));
    cmd.args([
        "--today",
        "2025-06-10",
        "check",
        "--date",
        "2025-06-07",
        "--time",
        "19:00",
        "--guests",
        "2",
    ]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("cannot be in the past"));
}

#[test]
fn test_calendar_command_reports_unreachable_server() {
    let mut cmd = Command::new(cargo_bin!("dinebook"));
    cmd.args([
        "--today",
        "2025-06-07",
        "calendar",
        "--base-url",
        "http://127.0.0.1:1",
        "--timeout-secs",
        "2",
    ]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Unable to load availability"));
}
