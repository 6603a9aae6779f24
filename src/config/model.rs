// src/config/model.rs

use serde::Deserialize;

use crate::engine::ServiceOptions;
use crate::translate::TranslateOptions;

/// Top-level configuration as read from a TOML file.
///
/// ```toml
/// [server]
/// listen = "0.0.0.0:8080"
/// sync_path = "/api/v1/convert"
/// async_path = "/convert"
/// result_path = "/result"
///
/// [pool]
/// workers = 5
/// queue_capacity = 100
///
/// [translate]
/// parallelism = 50
/// reject_cycles = false
/// ```
///
/// All sections are optional and have reasonable defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawConfigFile {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub pool: PoolConfig,

    #[serde(default)]
    pub translate: TranslateConfig,
}

/// Validated configuration. Only obtainable through `TryFrom<RawConfigFile>`.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    pub server: ServerConfig,
    pub pool: PoolConfig,
    pub translate: TranslateConfig,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(raw: RawConfigFile) -> Self {
        Self {
            server: raw.server,
            pool: raw.pool,
            translate: raw.translate,
        }
    }

    pub fn service_options(&self) -> ServiceOptions {
        ServiceOptions {
            workers: self.pool.workers,
            queue_capacity: self.pool.queue_capacity,
        }
    }

    pub fn translate_options(&self) -> TranslateOptions {
        TranslateOptions {
            parallelism: self.translate.parallelism,
            reject_cycles: self.translate.reject_cycles,
        }
    }
}

/// `[server]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Socket address to bind, e.g. `"0.0.0.0:8080"`.
    #[serde(default = "default_listen")]
    pub listen: String,

    /// Route for synchronous conversions.
    #[serde(default = "default_sync_path")]
    pub sync_path: String,

    /// Route for asynchronous submissions.
    #[serde(default = "default_async_path")]
    pub async_path: String,

    /// Prefix for result polling; results live at `<result_path>/{jobID}`.
    #[serde(default = "default_result_path")]
    pub result_path: String,
}

fn default_listen() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_sync_path() -> String {
    "/api/v1/convert".to_string()
}

fn default_async_path() -> String {
    "/convert".to_string()
}

fn default_result_path() -> String {
    "/result".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            sync_path: default_sync_path(),
            async_path: default_async_path(),
            result_path: default_result_path(),
        }
    }
}

/// `[pool]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PoolConfig {
    #[serde(default = "default_workers")]
    pub workers: usize,

    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,
}

fn default_workers() -> usize {
    5
}

fn default_queue_capacity() -> usize {
    100
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            workers: default_workers(),
            queue_capacity: default_queue_capacity(),
        }
    }
}

/// `[translate]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TranslateConfig {
    #[serde(default = "default_parallelism")]
    pub parallelism: u32,

    /// Fail conversions whose `needs` graph has a cycle instead of passing
    /// it through.
    #[serde(default)]
    pub reject_cycles: bool,
}

fn default_parallelism() -> u32 {
    crate::translate::translator::DEFAULT_PARALLELISM
}

impl Default for TranslateConfig {
    fn default() -> Self {
        Self {
            parallelism: default_parallelism(),
            reject_cycles: false,
        }
    }
}

/// Values given on the command line, applied on top of the file.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub listen: Option<String>,
    pub workers: Option<usize>,
    pub queue_capacity: Option<usize>,
}

impl RawConfigFile {
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(listen) = &overrides.listen {
            self.server.listen = listen.clone();
        }
        if let Some(workers) = overrides.workers {
            self.pool.workers = workers;
        }
        if let Some(capacity) = overrides.queue_capacity {
            self.pool.queue_capacity = capacity;
        }
    }
}
