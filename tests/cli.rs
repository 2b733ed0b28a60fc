//! Integration tests for top-level CLI behavior.

use std::path::Path;
use std::process::Command;

const SETTINGS: &str = r#"
config:
  email_subject: "Secret Santa: a note for {{giver.name}}"
  smtp:
    host: smtp.example.com
    port: 465
    user: santa@example.com
    password: "$SANTA_CLI_TEST_PASSWORD"
  testing:
    name: Tess
    email: tess@example.com
rules:
  limit_dollars: 20
  opening_day: 2025-12-24
participants:
  - name: Alice
    email: alice@example.com
  - name: Bob
    email: bob@example.com
  - name: Carol
    email: carol@example.com
exclusions:
  - giver: Alice
    recipient: Bob
"#;

fn run_santa(dir: &Path, args: &[&str]) -> std::process::Output {
    let bin = env!("CARGO_BIN_EXE_santa");
    Command::new(bin)
        .args(args)
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .env_remove("SANTA_CLI_TEST_PASSWORD")
        .output()
        .expect("failed to run santa binary")
}

fn event_dir(settings: &str) -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("settings.yml"), settings).unwrap();
    dir
}

#[test]
fn dry_run_draw_prints_every_letter() {
    let dir = event_dir(SETTINGS);
    let output = run_santa(dir.path(), &["draw", "--seed", "11"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    for name in ["Alice", "Bob", "Carol"] {
        assert!(stdout.contains(&format!("To: {name} <{}@example.com>", name.to_lowercase())));
        assert!(stdout.contains(&format!("Subject: Secret Santa: a note for {name}")));
    }
    assert!(stdout.contains("$20 or less"));
    assert!(stdout.contains("Finished!"));
    assert!(!stdout.contains("Sending e-mail"));
}

#[test]
fn excluded_pair_is_never_drawn() {
    // With Alice -> Bob excluded, the only valid draw is Alice -> Carol -> Bob -> Alice.
    let dir = event_dir(SETTINGS);
    std::fs::write(dir.path().join("short.hbs"), "{{giver.name}} buys for {{recipient.name}}")
        .unwrap();
    let output = run_santa(dir.path(), &["draw", "--template", "short.hbs"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert!(stdout.contains("Alice buys for Carol"));
    assert!(stdout.contains("Carol buys for Bob"));
    assert!(stdout.contains("Bob buys for Alice"));
}

#[test]
fn same_seed_reproduces_the_draw() {
    let settings = SETTINGS.replace(
        "exclusions:\n  - giver: Alice\n    recipient: Bob\n",
        "  - name: Dave\n    email: dave@example.com\n  - name: Erin\n    email: erin@example.com\n",
    );
    let dir = event_dir(&settings);
    let first = run_santa(dir.path(), &["draw", "--seed", "2024"]);
    let second = run_santa(dir.path(), &["draw", "--seed", "2024"]);

    assert!(first.status.success(), "{}", String::from_utf8_lossy(&first.stderr));
    assert_eq!(first.stdout, second.stdout);
}

#[test]
fn check_reports_a_valid_draw() {
    let dir = event_dir(SETTINGS);
    let output = run_santa(dir.path(), &["check"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success());
    assert!(stdout.contains("Settings validated successfully!"));
    assert!(stdout.contains("3 participants, 1 excluded pairs"));
}

#[test]
fn impossible_exclusions_fail_before_sending() {
    let settings = SETTINGS.replace(
        "    recipient: Bob\n",
        "    recipient: Bob\n    mutual: true\n  - giver: Carol\n    recipient: Alice\n    mutual: true\n",
    );
    let dir = event_dir(&settings);
    let output = run_santa(dir.path(), &["draw"]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success());
    assert!(stderr.contains("no valid assignment"));
    assert!(!String::from_utf8_lossy(&output.stdout).contains("To:"));
}

#[test]
fn invalid_settings_list_every_problem() {
    let settings = SETTINGS
        .replace("email: bob@example.com", "email: bob-at-example")
        .replace("limit_dollars: 20", "limit_dollars: -5");
    let dir = event_dir(&settings);
    let output = run_santa(dir.path(), &["check"]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success());
    assert!(stderr.contains("participants[1].email"));
    assert!(stderr.contains("rules.limit_dollars"));
}

#[test]
fn missing_settings_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_santa(dir.path(), &["draw"]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success());
    assert!(stderr.contains("failed to read settings file settings.yml"));
}

#[test]
fn sending_without_password_variable_fails() {
    let dir = event_dir(SETTINGS);
    let output = run_santa(dir.path(), &["draw", "--send"]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success());
    assert!(stderr.contains("SANTA_CLI_TEST_PASSWORD"));
}

#[test]
fn config_flag_selects_settings_file() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("party.yml"), SETTINGS).unwrap();
    let output = run_santa(dir.path(), &["--config", "party.yml", "check"]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
}

#[test]
fn help_lists_subcommands() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_santa(dir.path(), &["--help"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success());
    assert!(stdout.contains("draw"));
    assert!(stdout.contains("test-email"));
    assert!(stdout.contains("check"));
}

#[test]
fn invalid_subcommand_exits_with_error() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_santa(dir.path(), &["nonsense"]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stderr.contains("unrecognized subcommand"));
}
