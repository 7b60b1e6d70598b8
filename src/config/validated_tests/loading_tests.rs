//! Tests for loading configuration files.

use crate::config::{default_config_template, write_default_config};

use super::*;

#[test]
fn load_without_config_file() {
    let config = ValidatedConfig::load(&cli(&["--base-url", "http://localhost:3001"])).unwrap();

    assert_eq!(config.base_url.as_str(), "http://localhost:3001/");
}

#[test]
fn load_reads_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("probe.toml");
    std::fs::write(&path, "[target]\ntimeout = 9\n").unwrap();

    let config = ValidatedConfig::load(&cli(&["--config", path.to_str().unwrap()])).unwrap();

    assert_eq!(config.timeout.as_secs(), 9);
}

#[test]
fn load_reports_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.toml");

    let result = ValidatedConfig::load(&cli(&["--config", path.to_str().unwrap()]));

    assert!(matches!(result, Err(ConfigError::FileRead { .. })));
}

#[test]
fn load_reports_invalid_toml() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.toml");
    std::fs::write(&path, "[target\n").unwrap();

    let result = ValidatedConfig::load(&cli(&["--config", path.to_str().unwrap()]));

    assert!(matches!(result, Err(ConfigError::TomlParse(_))));
}

#[test]
fn write_default_config_creates_loadable_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("booker-probe.toml");

    write_default_config(&path).unwrap();

    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        default_config_template()
    );
    let toml = TomlConfig::load(&path).unwrap();
    let config = ValidatedConfig::from_raw(&cli(&[]), Some(&toml), no_env).unwrap();
    assert_eq!(
        config.base_url.as_str(),
        "https://restful-booker.herokuapp.com/"
    );
}

#[test]
fn write_default_config_reports_unwritable_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing-dir").join("booker-probe.toml");

    let result = write_default_config(&path);

    assert!(matches!(result, Err(ConfigError::FileWrite { .. })));
}
