use std::process::Command;

#[test]
fn test_help_lists_every_command() {
    let bin = env!("CARGO_BIN_EXE_husk-submit");

    let output = Command::new(bin).arg("--help").output().unwrap();

    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    for command in ["submit", "inspect", "render", "options", "install"] {
        assert!(
            stdout.contains(command),
            "help output should list '{}'; got:\n{}",
            command,
            stdout
        );
    }
}

#[test]
fn test_submit_help_lists_renderer_flags() {
    let bin = env!("CARGO_BIN_EXE_husk-submit");

    let output = Command::new(bin).args(["submit", "--help"]).output().unwrap();

    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    for flag in ["--frames", "--headlight", "--tile-count", "--dry-run"] {
        assert!(stdout.contains(flag), "missing {}; got:\n{}", flag, stdout);
    }
}

#[test]
fn test_submit_without_files_is_a_usage_error() {
    let bin = env!("CARGO_BIN_EXE_husk-submit");

    let output = Command::new(bin).arg("submit").output().unwrap();

    assert!(!output.status.success());
    assert_eq!(output.status.code(), Some(2));
}
