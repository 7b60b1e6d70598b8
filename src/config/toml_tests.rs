//! Tests for TOML configuration parsing.

use std::path::PathBuf;

use super::ConfigError;
use super::toml::{TomlConfig, default_config_template};

mod parsing {
    use super::*;

    #[test]
    fn parse_empty_config() {
        let config = TomlConfig::parse("").unwrap();

        assert!(config.target.base_url.is_none());
        assert!(config.report.dir.is_none());
        assert!(config.expect.delete.is_none());
    }

    #[test]
    fn parse_target_section() {
        let toml = r#"
            [target]
            base_url = "http://localhost:3001"
            username = "tester"
            password = "s3cret"
            timeout = 10
        "#;

        let config = TomlConfig::parse(toml).unwrap();
        let target = &config.target;

        assert_eq!(target.base_url.as_deref(), Some("http://localhost:3001"));
        assert_eq!(target.username.as_deref(), Some("tester"));
        assert_eq!(target.password.as_deref(), Some("s3cret"));
        assert_eq!(target.timeout, Some(10));
    }

    #[test]
    fn parse_report_section() {
        let config = TomlConfig::parse("[report]\ndir = \"reports\"").unwrap();

        assert_eq!(config.report.dir, Some(PathBuf::from("reports")));
    }

    #[test]
    fn parse_expect_section() {
        let toml = r"
            [expect]
            health = [200, 201]
            delete = [204]
        ";

        let config = TomlConfig::parse(toml).unwrap();

        assert_eq!(config.expect.health, Some(vec![200, 201]));
        assert_eq!(config.expect.delete, Some(vec![204]));
        assert!(config.expect.update.is_none());
    }
}

mod errors {
    use super::*;

    #[test]
    fn unknown_field_is_rejected() {
        let toml = r#"
            [target]
            base_url = "http://localhost"
            retries = 3
        "#;

        let result = TomlConfig::parse(toml);

        assert!(matches!(result, Err(ConfigError::TomlParse(_))));
    }

    #[test]
    fn unknown_section_is_rejected() {
        let result = TomlConfig::parse("[server]\nport = 8080");

        assert!(matches!(result, Err(ConfigError::TomlParse(_))));
    }

    #[test]
    fn wrong_type_is_rejected() {
        let result = TomlConfig::parse("[expect]\nhealth = \"201\"");

        assert!(matches!(result, Err(ConfigError::TomlParse(_))));
    }

    #[test]
    fn missing_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");

        let result = TomlConfig::load(&path);

        assert!(matches!(result, Err(ConfigError::FileRead { path: p, .. }) if p == path));
    }
}

mod template {
    use super::*;

    #[test]
    fn default_template_parses() {
        let config = TomlConfig::parse(&default_config_template()).unwrap();

        assert_eq!(
            config.target.base_url.as_deref(),
            Some("https://restful-booker.herokuapp.com")
        );
        assert!(config.target.username.is_none());
        assert!(config.report.dir.is_none());
    }

    #[test]
    fn load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("probe.toml");
        std::fs::write(&path, "[target]\ntimeout = 7").unwrap();

        let config = TomlConfig::load(&path).unwrap();

        assert_eq!(config.target.timeout, Some(7));
    }
}
