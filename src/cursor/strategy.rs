//! Cursor smoothing strategies
//!
//! Both smoothing implementations sit behind [`CursorSmoothing`] so callers
//! can pick one per deployment (or per entity) without changing the code
//! that feeds samples and polls positions.

use serde::{Deserialize, Serialize};

use super::predictor::Predictor;
use super::smoother::LightweightSmoother;
use super::types::{Point, Sample};
use crate::config::Config;

/// Smoothing strategy selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    /// Buffered interpolation, dead reckoning and One-Euro filtering
    #[default]
    Predictive,

    /// Exponential smoothing with short linear prediction
    Lightweight,
}

impl StrategyKind {
    /// Get human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            Self::Predictive => "Spline interpolation with dead reckoning (smoothest)",
            Self::Lightweight => "Exponential smoothing (cheapest)",
        }
    }

    /// Build a fresh strategy instance from `config`
    pub fn build(self, config: &Config) -> Box<dyn CursorSmoothing + Send> {
        match self {
            Self::Predictive => Box::new(Predictor::new(config.predictor.clone())),
            Self::Lightweight => Box::new(LightweightSmoother::new(config.smoother.clone())),
        }
    }
}

impl std::fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Predictive => write!(f, "Predictive"),
            Self::Lightweight => write!(f, "Lightweight"),
        }
    }
}

impl std::str::FromStr for StrategyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "predictive" | "predict" | "spline" => Ok(Self::Predictive),
            "lightweight" | "light" | "ema" => Ok(Self::Lightweight),
            _ => Err(format!("Unknown smoothing strategy: {}", s)),
        }
    }
}

/// Common interface for per-entity cursor smoothing
///
/// One instance tracks one remote cursor. Calls must be serialised by the
/// caller; the network path calls [`push`](Self::push) and the render loop
/// calls [`position`](Self::position) independently.
pub trait CursorSmoothing {
    /// Feed a sample; returns whether it was used
    fn push(&mut self, sample: Sample) -> bool;

    /// Position to render at `now_ms`
    fn position(&mut self, now_ms: i64) -> Point;

    /// Return to the "no data yet" state
    fn reset(&mut self);

    /// Which strategy this is
    fn kind(&self) -> StrategyKind;
}

impl CursorSmoothing for Predictor {
    fn push(&mut self, sample: Sample) -> bool {
        Predictor::push(self, sample)
    }

    fn position(&mut self, now_ms: i64) -> Point {
        self.get_position(now_ms)
    }

    fn reset(&mut self) {
        Predictor::reset(self)
    }

    fn kind(&self) -> StrategyKind {
        StrategyKind::Predictive
    }
}

impl CursorSmoothing for LightweightSmoother {
    fn push(&mut self, sample: Sample) -> bool {
        self.update_sequenced(sample.x, sample.y, sample.arrive_ms, sample.seq)
    }

    fn position(&mut self, now_ms: i64) -> Point {
        self.tick(now_ms)
    }

    fn reset(&mut self) {
        LightweightSmoother::reset(self)
    }

    fn kind(&self) -> StrategyKind {
        StrategyKind::Lightweight
    }
}
