//! Integration tests for Pantry

mod http;
mod support;

mod cli_tests {
    use crate::support;
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;
    use tempfile::TempDir;

    /// Binary pointed at a throwaway config file
    fn pantry(config_dir: &TempDir) -> Command {
        let mut cmd = cargo_bin_cmd!("pantry");
        cmd.env_remove("PANTRY_SERVER")
            .arg("--config")
            .arg(config_dir.path().join("config.toml"));
        cmd
    }

    #[test]
    fn help_displays() {
        cargo_bin_cmd!("pantry")
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("Kitchen inventory"));
    }

    #[test]
    fn version_displays() {
        cargo_bin_cmd!("pantry")
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("pantry"));
    }

    #[test]
    fn config_path_uses_flag() {
        let dir = TempDir::new().unwrap();
        pantry(&dir)
            .args(["config", "path"])
            .assert()
            .success()
            .stdout(predicate::str::contains("config.toml"));
    }

    #[test]
    fn config_show_defaults() {
        let dir = TempDir::new().unwrap();
        pantry(&dir)
            .args(["config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("[server]"))
            .stdout(predicate::str::contains("http://localhost:3000"));
    }

    #[test]
    fn config_set_then_show() {
        let dir = TempDir::new().unwrap();
        pantry(&dir)
            .args(["config", "set", "server.timeout_secs", "7"])
            .assert()
            .success();
        pantry(&dir)
            .args(["config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("timeout_secs = 7"));
    }

    #[test]
    fn config_set_unknown_key_fails() {
        let dir = TempDir::new().unwrap();
        pantry(&dir)
            .args(["config", "set", "server.port", "80"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Unknown configuration key"));
    }

    #[test]
    fn list_against_unreachable_server_fails() {
        let dir = TempDir::new().unwrap();
        pantry(&dir)
            .args(["--server", "http://127.0.0.1:9", "list"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Error:"));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn add_then_list_json() {
        let server = support::spawn().await;
        let dir = TempDir::new().unwrap();

        pantry(&dir)
            .args(["--server", &server.base_url(), "add", "  Tomato ", "-q", "3"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Added tomato (3 pcs)"));

        pantry(&dir)
            .args(["--server", &server.base_url(), "list", "--format", "json"])
            .assert()
            .success()
            .stdout(predicate::str::contains("\"name\": \"tomato\""))
            .stdout(predicate::str::contains("\"addedAt\""));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn clear_reports_partial_failure() {
        let server = support::spawn().await;
        server.seed("eggs", 6.0, "pcs");
        let locked = server.seed("milk", 1.0, "l");
        server.lock_delete(&locked.id);
        let dir = TempDir::new().unwrap();

        pantry(&dir)
            .args(["--server", &server.base_url(), "clear", "--yes"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("1 of 2 deletions failed"))
            .stderr(predicate::str::contains("Hint:"));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn scan_adds_known_product() {
        let server = support::spawn().await;
        let dir = TempDir::new().unwrap();

        pantry(&dir)
            .args(["--server", &server.base_url(), "scan", support::KNOWN_BARCODE])
            .assert()
            .success()
            .stdout(predicate::str::contains("greek yogurt (500 g)"));
        assert_eq!(server.rows().len(), 1);
    }
}
