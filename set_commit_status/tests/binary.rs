use std::process::Command;

const SET_COMMIT_STATUS: &str = env!("CARGO_BIN_EXE_set-commit-status");

#[test]
fn binary_should_exit_with_one_before_reading_log_configuration() {
    let output = Command::new(SET_COMMIT_STATUS)
        .env_clear()
        .env("RUST_LOG", "domain=loud")
        .args(["--owner", "org", "--repo", "name"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(String::from_utf8_lossy(&output.stderr), "Missing --sha\n");
}

#[test]
fn binary_should_exit_with_two_when_private_key_is_missing() {
    let output = Command::new(SET_COMMIT_STATUS)
        .env_clear()
        .env("GH_APP_ID", "1234")
        .env("GH_INSTALLATION_ID", "42")
        .args([
            "--owner",
            "org",
            "--repo",
            "name",
            "--sha",
            "7638417db6d59f3c431d3e1f261cc637155684cd",
        ])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(2));
    assert!(
        String::from_utf8_lossy(&output.stderr).contains("missing env variable GH_PRIVATE_KEY")
    );
}
