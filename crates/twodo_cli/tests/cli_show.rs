use std::path::PathBuf;
use std::process::{Command, Output};
use std::time::{SystemTime, UNIX_EPOCH};

fn temp_path(file_name: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("twodo-{nanos}-{file_name}"))
}

fn run(args: &[&str], config_name: &str) -> Output {
    let exe = env!("CARGO_BIN_EXE_twodo");
    Command::new(exe)
        .args(args)
        .env("TWODO_CONFIG_PATH", temp_path(config_name))
        .env("TWODO_DISABLE_OPEN", "1")
        .output()
        .expect("failed to run twodo")
}

#[test]
fn show_commands_print_fixed_urls() {
    for (view, command) in [
        ("all", "showAll"),
        ("today", "showToday"),
        ("starred", "showStarred"),
        ("scheduled", "showScheduled"),
    ] {
        let output = run(&["show", view], "cli-show.json");

        assert!(output.status.success());
        let stdout = String::from_utf8_lossy(&output.stdout);
        assert_eq!(stdout.trim(), format!("twodo://x-callback-url/{command}"));
    }
}

#[test]
fn show_command_json_output() {
    let output = run(&["--json", "show", "starred"], "cli-show-json.json");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).expect("json output");
    assert_eq!(parsed["url"], "twodo://x-callback-url/showStarred");
    assert_eq!(parsed["execute"], false);
    assert!(parsed.get("task").is_none());
}

#[test]
fn show_command_with_execute_uses_opener() {
    let output = run(&["--json", "-e", "show", "today"], "cli-show-execute.json");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).expect("json output");
    assert_eq!(parsed["execute"], true);
}

#[test]
fn quick_command_encodes_title() {
    let output = run(&["quick", "Test title of the task."], "cli-quick.json");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(
        stdout.trim(),
        "twodo://x-callback-url/add?task=Test%20title%20of%20the%20task."
    );
}

#[test]
fn quick_command_rejects_missing_title() {
    let output = run(&["quick"], "cli-quick-missing.json");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERROR: invalid_input - title is required"));
}
