use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn help_lists_the_subcommands() {
    let mut cmd = Command::cargo_bin("nutrichat").expect("binary builds");
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("chat").and(predicate::str::contains("plan")));
}

#[test]
fn missing_api_key_is_a_fatal_startup_error() {
    let mut cmd = Command::cargo_bin("nutrichat").expect("binary builds");
    cmd.env_remove("GEMINI_API_KEY")
        .args([
            "plan", "--age", "30", "--height", "5'10\"", "--weight", "180",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("GEMINI_API_KEY"));
}

#[test]
fn invalid_fields_block_the_plan_subcommand() {
    let mut cmd = Command::cargo_bin("nutrichat").expect("binary builds");
    cmd.env("GEMINI_API_KEY", "test-key")
        .args([
            "plan", "--age", "15", "--height", "5'10\"", "--weight", "180",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Age must be between 18 and 100"));
}
