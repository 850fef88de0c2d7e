use config::{Config, ConfigError, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct ShiftdeskConfig {
    #[serde(default)]
    pub service: ServiceConfig,
    #[serde(default)]
    pub scheduling: SchedulingConfig,
    #[serde(default)]
    pub http: HttpConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServiceConfig {
    pub log_level: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct SchedulingConfig {
    /// Period of the assignment tick (queue draining + capacity reaping).
    pub assign_interval_seconds: u64,
    /// Period of the liveness sweep (shorter than the assignment tick).
    pub sweep_interval_seconds: u64,
    /// Gap between polls after which a session is demoted to Inactive.
    pub inactivity_threshold_seconds: u64,
}

impl Default for SchedulingConfig {
    fn default() -> Self {
        // Assignment every 5s, sweep every 2s, threshold 3s (~3 missed polls).
        Self {
            assign_interval_seconds: 5,
            sweep_interval_seconds: 2,
            inactivity_threshold_seconds: 3,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct HttpConfig {
    pub enabled: bool,
    pub host: String,
    pub port: u16,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            host: "127.0.0.1".to_string(),
            port: 8750,
        }
    }
}

impl ShiftdeskConfig {
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        let s = Config::builder()
            .add_source(File::with_name(path))
            .build()?;
        s.try_deserialize()
    }
}
