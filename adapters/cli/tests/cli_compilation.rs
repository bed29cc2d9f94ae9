use std::process::Command;

#[test]
fn cli_compiles_without_warnings() {
    let status = Command::new(env!("CARGO"))
        .current_dir(env!("CARGO_MANIFEST_DIR"))
        .args(["check", "--quiet", "--bin", "scout"])
        .status()
        .expect("failed to invoke cargo check for scout CLI binary");

    assert!(status.success(), "cargo check --bin scout should succeed");
}

#[test]
fn bundled_levels_run_to_completion() {
    let levels = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("levels");
    let mut entries: Vec<_> = std::fs::read_dir(&levels)
        .expect("levels directory should exist")
        .map(|entry| entry.expect("level entry should be readable").path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "toml"))
        .collect();
    entries.sort();
    assert!(!entries.is_empty(), "no bundled levels found");

    for level in entries {
        let output = Command::new(env!("CARGO_BIN_EXE_scout"))
            .arg(&level)
            .output()
            .expect("failed to run scout binary");

        assert!(
            output.status.success(),
            "scout failed on {}: {}",
            level.display(),
            String::from_utf8_lossy(&output.stderr)
        );
        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(
            stdout.contains("all stars collected"),
            "{} did not finish: {stdout}",
            level.display()
        );
    }
}

#[test]
fn missing_level_reports_error() {
    let output = Command::new(env!("CARGO_BIN_EXE_scout"))
        .arg("does-not-exist.toml")
        .output()
        .expect("failed to run scout binary");

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("failed to load level"));
}
