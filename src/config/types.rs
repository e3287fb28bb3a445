//! Configuration type definitions

use serde::{Deserialize, Serialize};

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level ("trace", "debug", "info", "warn", "error")
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// Trace replay configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplayConfig {
    /// Simulated render rate (frames per second)
    #[serde(default = "default_fps")]
    pub fps: u32,

    /// Keep rendering this long after the last sample (ms)
    #[serde(default = "default_tail_ms")]
    pub tail_ms: i64,
}

fn default_fps() -> u32 {
    60
}
fn default_tail_ms() -> i64 {
    250
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            fps: default_fps(),
            tail_ms: default_tail_ms(),
        }
    }
}
