//! End-to-end tests for the questforge binary
//!
//! Gated behind the `integration` feature. Run with:
//!
//! ```sh
//! cargo test -p questforge-cli --features integration
//! ```

#![cfg(feature = "integration")]

use std::path::Path;
use std::process::{Command, Output};

/// Run the CLI with session and project config isolated in `home`
fn questforge(home: &Path, args: &[&str]) -> Output {
    Command::new("cargo")
        .args(["run", "-q", "-p", "questforge-cli", "--"])
        .args(args)
        .env("XDG_DATA_HOME", home.join("data"))
        .env("XDG_CONFIG_HOME", home.join("config"))
        .env("QUESTFORGE_PROJECT_CONFIG_DIR", home.join("project"))
        .output()
        .expect("Failed to run questforge")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn questforge_help_lists_commands() {
    let home = tempfile::tempdir().unwrap();
    let output = questforge(home.path(), &["--help"]);

    assert!(output.status.success());
    let out = stdout(&output);
    for command in ["roles", "permissions", "check", "session", "task", "config"] {
        assert!(out.contains(command), "missing {command} in help");
    }
}

#[test]
fn questforge_config_show_prints_defaults() {
    let home = tempfile::tempdir().unwrap();
    let output = questforge(home.path(), &["config", "show"]);

    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("[api]"));
    assert!(out.contains("http://localhost:8000/api"));
}

#[test]
fn questforge_check_sets_exit_status() {
    let home = tempfile::tempdir().unwrap();

    let allowed = questforge(
        home.path(),
        &["check", "delete", "--role", "project manager", "--resource", "project"],
    );
    assert!(allowed.status.success());
    assert!(stdout(&allowed).contains("allowed"));

    let denied = questforge(
        home.path(),
        &["check", "delete", "--role", "team member", "--resource", "project"],
    );
    assert_eq!(denied.status.code(), Some(1));
    assert!(stdout(&denied).contains("denied"));
}

#[test]
fn questforge_review_cycle_through_task_file() {
    let home = tempfile::tempdir().unwrap();
    let task_file = home.path().join("task.json");
    std::fs::write(
        &task_file,
        r#"{"id": 7, "title": "Audit", "status": "not_started", "assigned_to_id": 6, "assigned_by_id": 5}"#,
    )
    .unwrap();
    let task = task_file.to_str().unwrap();

    let login = |id: &str, role: &str| {
        let output = questforge(
            home.path(),
            &["session", "login", "--id", id, "--name", "U", "--email", "u@example.com", "--roles", role],
        );
        assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    };

    login("6", "team_member");
    assert!(questforge(home.path(), &["task", "start", task]).status.success());
    let submitted = questforge(home.path(), &["task", "submit", task, "--notes", "done"]);
    assert!(submitted.status.success());
    assert!(stdout(&submitted).contains("POST http://localhost:8000/api/tasks/7/submit"));

    // The assignee cannot review their own submission
    assert!(!questforge(home.path(), &["task", "start-review", task]).status.success());

    login("5", "team_lead");
    let actions = questforge(home.path(), &["task", "actions", task]);
    assert!(stdout(&actions).contains("start_review"));
    assert!(questforge(home.path(), &["task", "start-review", task]).status.success());
    let reviewed = questforge(
        home.path(),
        &["task", "review", task, "--verdict", "approved", "--feedback", "good"],
    );
    assert!(reviewed.status.success());
    assert!(stdout(&reviewed).contains("Completed"));

    let saved = std::fs::read_to_string(&task_file).unwrap();
    assert!(saved.contains("\"completed\""));
}

#[test]
fn questforge_switch_rejects_unheld_role() {
    let home = tempfile::tempdir().unwrap();
    let login = questforge(
        home.path(),
        &["session", "login", "--id", "1", "--name", "A", "--email", "a@example.com", "--roles", "team_lead,team_member"],
    );
    assert!(login.status.success());

    assert!(questforge(home.path(), &["session", "switch", "team member"]).status.success());
    assert!(!questforge(home.path(), &["session", "switch", "admin"]).status.success());
}
