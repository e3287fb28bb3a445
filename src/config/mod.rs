//! Configuration management
//!
//! Handles loading, validation, and merging of configuration from:
//! - TOML files
//! - CLI arguments
//!
//! Every section and field is optional in the file; missing values take
//! their defaults.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub mod types;

pub use types::{LoggingConfig, ReplayConfig};

use crate::cursor::{DeadZoneConfig, PredictorConfig, SmootherConfig, StrategyKind};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Smoothing strategy for new entities
    #[serde(default)]
    pub strategy: StrategyKind,
    /// Predictor configuration
    #[serde(default)]
    pub predictor: PredictorConfig,
    /// Lightweight smoother configuration
    #[serde(default)]
    pub smoother: SmootherConfig,
    /// Sender-side dead zone
    #[serde(default)]
    pub dead_zone: DeadZoneConfig,
    /// Trace replay configuration
    #[serde(default)]
    pub replay: ReplayConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .context(format!("Failed to read config file: {}", path))?;

        let config = Self::from_toml(&content)?;
        Ok(config)
    }

    /// Parse and validate configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content).context("Failed to parse config file")?;

        config.validate()?;
        Ok(config)
    }

    /// Create default configuration
    pub fn default_config() -> Result<Self> {
        let config = Self::default();
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        let predictor = &self.predictor;

        if predictor.interpolation_delay_ms < 0 {
            anyhow::bail!(
                "interpolation_delay_ms cannot be negative: {}",
                predictor.interpolation_delay_ms
            );
        }

        if predictor.max_extrapolation_ms < 0 {
            anyhow::bail!(
                "max_extrapolation_ms cannot be negative: {}",
                predictor.max_extrapolation_ms
            );
        }

        if !(predictor.max_speed_px_per_sec.is_finite() && predictor.max_speed_px_per_sec > 0.0) {
            anyhow::bail!(
                "max_speed_px_per_sec must be positive: {}",
                predictor.max_speed_px_per_sec
            );
        }

        if !(predictor.max_accel_px_per_sec2.is_finite() && predictor.max_accel_px_per_sec2 > 0.0)
        {
            anyhow::bail!(
                "max_accel_px_per_sec2 must be positive: {}",
                predictor.max_accel_px_per_sec2
            );
        }

        if predictor.buffer_size == 0 {
            anyhow::bail!("buffer_size must be at least 1");
        }

        let one_euro = &predictor.one_euro;
        if !(one_euro.min_cutoff.is_finite()
            && one_euro.min_cutoff > 0.0
            && one_euro.d_cutoff.is_finite()
            && one_euro.d_cutoff > 0.0)
        {
            anyhow::bail!(
                "One-Euro cutoffs must be positive (min_cutoff={}, d_cutoff={})",
                one_euro.min_cutoff,
                one_euro.d_cutoff
            );
        }
        if !(one_euro.beta.is_finite() && one_euro.beta >= 0.0) {
            anyhow::bail!(
                "One-Euro beta must be finite and non-negative: {}",
                one_euro.beta
            );
        }

        let smoother = &self.smoother;
        for (name, factor) in [
            ("position_smoothing", smoother.position_smoothing),
            ("velocity_smoothing", smoother.velocity_smoothing),
        ] {
            if !(0.0..=1.0).contains(&factor) {
                anyhow::bail!("{} must be between 0.0 and 1.0: {}", name, factor);
            }
        }

        if smoother.max_prediction_ms < 0 || smoother.prediction_ceiling_ms < 0 {
            anyhow::bail!("Smoother prediction windows cannot be negative");
        }

        if self.dead_zone.min_interval_ms < 0
            || self.dead_zone.min_distance_px.is_nan()
            || self.dead_zone.min_distance_px < 0.0
        {
            anyhow::bail!("Dead zone thresholds cannot be negative");
        }

        if self.replay.fps == 0 {
            anyhow::bail!("Replay fps must be at least 1");
        }

        match self.logging.level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => anyhow::bail!("Invalid log level: {}", self.logging.level),
        }

        Ok(())
    }

    /// Override config with CLI arguments
    pub fn with_overrides(
        mut self,
        strategy: Option<StrategyKind>,
        fps: Option<u32>,
        tail_ms: Option<i64>,
    ) -> Self {
        if let Some(strategy) = strategy {
            self.strategy = strategy;
        }
        if let Some(fps) = fps {
            self.replay.fps = fps;
        }
        if let Some(tail_ms) = tail_ms {
            self.replay.tail_ms = tail_ms;
        }

        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default_config().unwrap();
        assert_eq!(config.strategy, StrategyKind::Predictive);
        assert_eq!(config.predictor.interpolation_delay_ms, 100);
        assert_eq!(config.predictor.buffer_size, 20);
        assert_eq!(config.replay.fps, 60);
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config.predictor, PredictorConfig::default());
        assert_eq!(config.smoother, SmootherConfig::default());
    }

    #[test]
    fn test_partial_sections() {
        let config = Config::from_toml(
            r#"
            strategy = "lightweight"

            [predictor]
            interpolation_delay_ms = 80

            [predictor.one_euro]
            beta = 0.02
            "#,
        )
        .unwrap();

        assert_eq!(config.strategy, StrategyKind::Lightweight);
        assert_eq!(config.predictor.interpolation_delay_ms, 80);
        assert_eq!(config.predictor.max_extrapolation_ms, 150);
        assert_eq!(config.predictor.one_euro.beta, 0.02);
        assert_eq!(config.predictor.one_euro.min_cutoff, 1.5);
    }

    #[test]
    fn test_config_validation_zero_buffer() {
        let mut config = Config::default();
        config.predictor.buffer_size = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_bad_speed() {
        let mut config = Config::default();
        config.predictor.max_speed_px_per_sec = 0.0;
        assert!(config.validate().is_err());
        config.predictor.max_speed_px_per_sec = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_smoothing_range() {
        let mut config = Config::default();
        config.smoother.position_smoothing = 1.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_invalid_log_level() {
        let mut config = Config::default();
        config.logging.level = "loud".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unknown_strategy_rejected() {
        assert!(Config::from_toml("strategy = \"kalman\"").is_err());
    }

    #[test]
    fn test_with_overrides() {
        let config = Config::default().with_overrides(Some(StrategyKind::Lightweight), Some(30), None);
        assert_eq!(config.strategy, StrategyKind::Lightweight);
        assert_eq!(config.replay.fps, 30);
        assert_eq!(config.replay.tail_ms, 250);
    }

    #[test]
    fn test_config_validation_non_finite_beta() {
        assert!(Config::from_toml("[predictor.one_euro]\nbeta = inf").is_err());
        assert!(Config::from_toml("[predictor.one_euro]\nmin_cutoff = inf").is_err());
        assert!(Config::from_toml("[predictor.one_euro]\nd_cutoff = nan").is_err());

        let mut config = Config::default();
        config.predictor.one_euro.beta = f64::NAN;
        assert!(config.validate().is_err());
    }
}
