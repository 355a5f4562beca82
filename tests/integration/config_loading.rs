//! Integration tests for Configuration System

use super::test_utils::with_cfctl_env;
use cfctl::config::ConfigLoader;
use tempfile::TempDir;

#[test]
fn test_config_file_session_and_target() {
    let temp_dir = TempDir::new().unwrap();
    let config_file = temp_dir.path().join("config.toml");
    std::fs::write(
        &config_file,
        r#"
[target]
api_endpoint = "https://api.example.com"
api_version = "2.54.0"

[session]
access_token = "bearer abc"
username = "admin"

[session.organization]
guid = "org-guid"
name = "my-org"

[session.space]
guid = "space-guid"
name = "dev"

[http]
request_timeout_secs = 30
"#,
    )
    .unwrap();

    let config = with_cfctl_env(&[], || ConfigLoader::load_from_file(&config_file)).unwrap();
    assert!(config.is_logged_in());
    assert_eq!(config.username(), "admin");
    assert_eq!(config.organization().unwrap().name, "my-org");
    assert_eq!(config.space().unwrap().guid, "space-guid");
    assert_eq!(config.http.request_timeout_secs, 30);
    assert_eq!(config.http.connect_timeout_secs, 10);
    assert_eq!(
        config.api_version().unwrap(),
        Some(semver::Version::new(2, 54, 0))
    );
}

#[test]
fn test_invalid_api_version_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let config_file = temp_dir.path().join("config.toml");
    std::fs::write(&config_file, "[target]\napi_version = \"two\"\n").unwrap();

    let err = with_cfctl_env(&[], || ConfigLoader::load_from_file(&config_file)).unwrap_err();
    assert!(err.to_string().contains("Invalid API version"));
}

#[test]
fn test_missing_config_file_is_an_error() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("absent.toml");
    let err = with_cfctl_env(&[], || ConfigLoader::load_from_file(&missing)).unwrap_err();
    assert!(err.to_string().contains("Config file not found"));
}

#[test]
fn test_environment_overrides_config_file() {
    let temp_dir = TempDir::new().unwrap();
    let config_file = temp_dir.path().join("config.toml");
    std::fs::write(
        &config_file,
        r#"
[target]
api_endpoint = "https://api.example.com"
api_version = "2.51.0"

[session]
access_token = "bearer from-file"
username = "admin"

[http]
connect_timeout_secs = 20
"#,
    )
    .unwrap();

    let config = with_cfctl_env(
        &[
            ("CFCTL__SESSION__ACCESS_TOKEN", "bearer from-env"),
            ("CFCTL__HTTP__CONNECT_TIMEOUT_SECS", "3"),
        ],
        || ConfigLoader::load_from_file(&config_file),
    )
    .unwrap();

    assert_eq!(config.session.access_token, "bearer from-env");
    assert_eq!(config.http.connect_timeout_secs, 3);
    assert_eq!(config.username(), "admin");
    assert_eq!(config.target.api_version.as_deref(), Some("2.51.0"));
}
