#![cfg(unix)]

mod common;

use common::TestEnv;

#[test]
fn test_install_writes_into_repository_plugin_dir() {
    let env = TestEnv::new();
    env.install_deadlinecommand();

    let result = env.run(&["install"]);

    assert!(result.success, "{}", result.combined_output());
    let plugin_dir = env.tool_path("repository/custom/plugins/HuskStandalone");
    assert!(plugin_dir.join("HuskStandalone.param").is_file());
    assert!(plugin_dir.join("HuskStandalone.options").is_file());
    assert!(plugin_dir.join("HuskStandalone.py").is_file());
    assert!(result.stdout.contains("Plugin files installed"), "{}", result.stdout);
}

#[test]
fn test_install_without_deadlinecommand_fails_with_hint() {
    let env = TestEnv::new();

    let result = env.run(&["install"]);

    assert!(!result.success);
    assert!(result.stderr.contains("deadlinecommand failed"), "{}", result.stderr);
    assert!(result.stderr.contains("[farm] deadlinecommand"), "{}", result.stderr);
}
