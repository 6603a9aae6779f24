// src/config/validate.rs

use std::net::SocketAddr;

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{Gha2ArgoError, Result};

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = Gha2ArgoError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(ConfigFile::new_unchecked(raw))
    }
}

fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    validate_pool(cfg)?;
    validate_translate(cfg)?;
    validate_listen(cfg)?;
    validate_paths(cfg)?;
    Ok(())
}

fn validate_pool(cfg: &RawConfigFile) -> Result<()> {
    if cfg.pool.workers == 0 {
        return Err(Gha2ArgoError::ConfigError(
            "[pool].workers must be >= 1 (got 0)".to_string(),
        ));
    }
    if cfg.pool.queue_capacity == 0 {
        return Err(Gha2ArgoError::ConfigError(
            "[pool].queue_capacity must be >= 1 (got 0)".to_string(),
        ));
    }
    Ok(())
}

fn validate_translate(cfg: &RawConfigFile) -> Result<()> {
    if cfg.translate.parallelism == 0 {
        return Err(Gha2ArgoError::ConfigError(
            "[translate].parallelism must be >= 1 (got 0)".to_string(),
        ));
    }
    Ok(())
}

fn validate_listen(cfg: &RawConfigFile) -> Result<()> {
    cfg.server.listen.parse::<SocketAddr>().map_err(|e| {
        Gha2ArgoError::ConfigError(format!(
            "[server].listen '{}' is not a socket address: {e}",
            cfg.server.listen
        ))
    })?;
    Ok(())
}

fn validate_paths(cfg: &RawConfigFile) -> Result<()> {
    let paths = [
        ("sync_path", cfg.server.sync_path.as_str()),
        ("async_path", cfg.server.async_path.as_str()),
        ("result_path", cfg.server.result_path.as_str()),
    ];

    for (key, path) in paths.iter() {
        if !path.starts_with('/') || path.len() < 2 {
            return Err(Gha2ArgoError::ConfigError(format!(
                "[server].{key} must start with '/' and name a route (got '{path}')"
            )));
        }
        if path.ends_with('/') {
            return Err(Gha2ArgoError::ConfigError(format!(
                "[server].{key} must not end with '/' (got '{path}')"
            )));
        }
    }

    for (i, (key_a, a)) in paths.iter().enumerate() {
        for (key_b, b) in paths.iter().skip(i + 1) {
            if a == b {
                return Err(Gha2ArgoError::ConfigError(format!(
                    "[server].{key_a} and [server].{key_b} must differ (both '{a}')"
                )));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(toml_src: &str) -> Result<ConfigFile> {
        let raw: RawConfigFile = toml::from_str(toml_src)?;
        ConfigFile::try_from(raw)
    }

    #[test]
    fn empty_file_uses_defaults() -> Result<()> {
        let cfg = parse("")?;
        assert_eq!(cfg.server.listen, "0.0.0.0:8080");
        assert_eq!(cfg.server.sync_path, "/api/v1/convert");
        assert_eq!(cfg.pool.workers, 5);
        assert_eq!(cfg.pool.queue_capacity, 100);
        assert_eq!(cfg.translate.parallelism, 50);
        assert!(!cfg.translate.reject_cycles);
        Ok(())
    }

    #[test]
    fn zero_workers_rejected() {
        match parse("[pool]\nworkers = 0\n") {
            Err(Gha2ArgoError::ConfigError(msg)) => assert!(msg.contains("workers")),
            other => panic!("expected ConfigError, got {other:?}"),
        }
    }

    #[test]
    fn bad_listen_and_paths_rejected() {
        assert!(matches!(
            parse("[server]\nlisten = \"nowhere\"\n"),
            Err(Gha2ArgoError::ConfigError(_))
        ));
        assert!(matches!(
            parse("[server]\nresult_path = \"/result/\"\n"),
            Err(Gha2ArgoError::ConfigError(_))
        ));
        match parse("[server]\nsync_path = \"/convert\"\n") {
            Err(Gha2ArgoError::ConfigError(msg)) => assert!(msg.contains("must differ")),
            other => panic!("expected ConfigError, got {other:?}"),
        }
    }

    #[test]
    fn unknown_keys_are_toml_errors() {
        assert!(matches!(
            parse("[pool]\nthreads = 3\n"),
            Err(Gha2ArgoError::TomlError(_))
        ));
    }
}
