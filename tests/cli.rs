use assert_cmd::Command;
use numpad::config::{Config, ConfigStore, FileConfigStore};
use tempfile::tempdir;

fn numpad() -> Command {
    Command::cargo_bin("numpad").unwrap()
}

#[test]
fn version_flag_prints_version() {
    let output = numpad().arg("--version").assert().success();
    let stdout = String::from_utf8_lossy(&output.get_output().stdout).to_string();
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")), "got {stdout}");
}

#[test]
fn help_lists_flags() {
    let output = numpad().arg("--help").assert().success();
    let stdout = String::from_utf8_lossy(&output.get_output().stdout).to_string();
    for flag in [
        "--window-size",
        "--digits-only",
        "--numpad",
        "--seed",
        "--no-seed",
        "--no-auto-start",
        "--auto-start",
    ] {
        assert!(stdout.contains(flag), "missing {flag} in {stdout}");
    }
}

#[test]
fn non_tty_stdin_is_rejected() {
    let home = tempdir().unwrap();
    let output = numpad()
        .env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join("config"))
        .write_stdin("123")
        .assert()
        .failure();
    let stderr = String::from_utf8_lossy(&output.get_output().stderr).to_string();
    assert!(stderr.contains("stdin must be a tty"), "got {stderr}");
}

#[test]
fn oversized_window_is_rejected() {
    let home = tempdir().unwrap();
    let output = numpad()
        .env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join("config"))
        .args(["--window-size", "99"])
        .assert()
        .failure();
    let stderr = String::from_utf8_lossy(&output.get_output().stderr).to_string();
    assert!(stderr.contains("window size"), "got {stderr}");
}

#[test]
fn save_config_writes_effective_settings() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("numpad.json");

    // the run itself stops at the tty check, after the config is saved
    numpad()
        .env("HOME", dir.path())
        .args(["--config", path.to_str().unwrap()])
        .args(["--digits-only", "--window-size", "3", "--save-config"])
        .write_stdin("")
        .assert()
        .failure();

    let saved = FileConfigStore::with_path(&path).load();
    assert_eq!(
        saved,
        Config {
            digits_only: true,
            window_size: 3,
            ..Config::default()
        }
    );
}

#[test]
fn saved_settings_can_be_switched_back() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("numpad.json");
    let store = FileConfigStore::with_path(&path);
    store
        .save(&Config {
            digits_only: true,
            auto_start: false,
            seed: Some(9),
            ..Config::default()
        })
        .unwrap();

    numpad()
        .env("HOME", dir.path())
        .args(["--config", path.to_str().unwrap()])
        .args(["--numpad", "--auto-start", "--no-seed", "--save-config"])
        .write_stdin("")
        .assert()
        .failure();

    assert_eq!(store.load(), Config::default());
}
