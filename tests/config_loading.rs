// tests/config_loading.rs

use std::io::Write;

use tempfile::NamedTempFile;
use gha2argo::config::{load_and_validate, load_or_default, ConfigOverrides};
use gha2argo::errors::Gha2ArgoError;

fn config_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{contents}").unwrap();
    file
}

#[test]
fn test_file_values_and_cli_overrides() {
    let file = config_file(
        r#"
[server]
listen = "127.0.0.1:9000"
result_path = "/jobs"

[pool]
workers = 3
queue_capacity = 10

[translate]
parallelism = 8
reject_cycles = true
"#,
    );

    let overrides = ConfigOverrides {
        workers: Some(7),
        ..ConfigOverrides::default()
    };
    let cfg = load_and_validate(file.path(), &overrides).unwrap();

    assert_eq!(cfg.server.listen, "127.0.0.1:9000");
    assert_eq!(cfg.server.result_path, "/jobs");
    assert_eq!(cfg.server.async_path, "/convert");

    let service = cfg.service_options();
    assert_eq!(service.workers, 7);
    assert_eq!(service.queue_capacity, 10);

    let translate = cfg.translate_options();
    assert_eq!(translate.parallelism, 8);
    assert!(translate.reject_cycles);
}

#[test]
fn test_defaults_without_file() {
    let overrides = ConfigOverrides {
        listen: Some("127.0.0.1:0".to_string()),
        ..ConfigOverrides::default()
    };
    let cfg = load_or_default(None, &overrides).unwrap();

    assert_eq!(cfg.server.listen, "127.0.0.1:0");
    assert_eq!(cfg.pool.workers, 5);
    assert_eq!(cfg.pool.queue_capacity, 100);
    assert_eq!(cfg.translate.parallelism, 50);
}

#[test]
fn test_zero_capacity_override_returns_config_error() {
    let overrides = ConfigOverrides {
        queue_capacity: Some(0),
        ..ConfigOverrides::default()
    };

    match load_or_default(None, &overrides) {
        Err(Gha2ArgoError::ConfigError(msg)) => assert!(msg.contains("queue_capacity")),
        Err(e) => panic!("Expected ConfigError, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}

#[test]
fn test_colliding_routes_return_config_error() {
    let file = config_file(
        r#"
[server]
async_path = "/result"
"#,
    );

    match load_and_validate(file.path(), &ConfigOverrides::default()) {
        Err(Gha2ArgoError::ConfigError(msg)) => {
            assert!(msg.contains("async_path"));
            assert!(msg.contains("result_path"));
        }
        Err(e) => panic!("Expected ConfigError, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}

#[test]
fn test_missing_file_returns_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("gha2argo.toml");

    match load_and_validate(&missing, &ConfigOverrides::default()) {
        Err(Gha2ArgoError::IoError(_)) => {}
        Err(e) => panic!("Expected IoError, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}
