#![allow(clippy::unwrap_used)]
// Layering and persistence tests for torbox-config.

use std::path::{Path, PathBuf};
use std::time::Duration;

use figment::Jail;
use pretty_assertions::assert_eq;

use torbox_config::{Config, load_config, save_config};

#[test]
fn missing_file_yields_defaults() {
    Jail::expect_with(|_jail| {
        let cfg = load_config(Some(Path::new("absent.toml"))).unwrap();
        assert_eq!(cfg, Config::default());
        Ok(())
    });
}

#[test]
fn file_overrides_defaults() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
                base_url = "https://staging.torbox.test"
                timeout_secs = 10
            "#,
        )?;

        let cfg = load_config(Some(Path::new("config.toml"))).unwrap();
        assert_eq!(cfg.base_url, "https://staging.torbox.test");
        assert_eq!(cfg.timeout_secs, 10);
        assert_eq!(cfg.api_prefix, "/v1/api");
        assert_eq!(cfg.toast_secs, 5);
        Ok(())
    });
}

#[test]
fn environment_overrides_file() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
                base_url = "https://from-file.test"
                toast_secs = 8
            "#,
        )?;
        jail.set_env("TORBOX_BASE_URL", "https://from-env.test");
        jail.set_env("TORBOX_LOG_FILE", "/var/log/dash.log");

        let cfg = load_config(Some(Path::new("config.toml"))).unwrap();
        assert_eq!(cfg.base_url, "https://from-env.test");
        assert_eq!(cfg.toast_secs, 8);
        assert_eq!(cfg.log_file, Some(PathBuf::from("/var/log/dash.log")));

        let dash = cfg.to_dashboard_config().unwrap();
        assert_eq!(dash.toast_duration, Duration::from_secs(8));
        Ok(())
    });
}

#[test]
fn api_key_in_environment_is_ignored() {
    Jail::expect_with(|jail| {
        jail.set_env("TORBOX_API_KEY", "should-not-load");
        let cfg = load_config(Some(Path::new("absent.toml"))).unwrap();
        assert_eq!(cfg, Config::default());
        Ok(())
    });
}

#[test]
fn save_then_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    let cfg = Config {
        base_url: "http://localhost:8080".into(),
        timeout_secs: 12,
        log_file: Some(dir.path().join("dash.log")),
        ..Config::default()
    };
    save_config(&cfg, &path).unwrap();

    let written = std::fs::read_to_string(&path).unwrap();
    assert!(written.contains("timeout_secs = 12"));
    assert!(!written.contains("api_key"));

    let loaded: Config = toml::from_str(&written).unwrap();
    assert_eq!(loaded, cfg);
}
