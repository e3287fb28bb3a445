//! Lightweight Cursor Smoother
//!
//! Exponential-moving-average alternative to [`Predictor`](super::Predictor)
//! for consumers that do not need spline accuracy.
//!
//! ```text
//! velocity_smooth = velocity_old + α_v · (velocity_new - velocity_old)
//! current         = current + α_p · (target - current)
//! rendered        = current + velocity_smooth · min(since_update, max_prediction)
//! ```
//!
//! Prediction only applies while the last update is younger than the
//! prediction ceiling, so a cursor that stops reporting settles on its last
//! target instead of drifting.

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::types::Point;

/// Configuration for the lightweight smoother
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SmootherConfig {
    /// Position smoothing factor per tick (0.0-1.0, higher = more responsive)
    #[serde(default = "default_position_smoothing")]
    pub position_smoothing: f64,

    /// Velocity smoothing factor per update (0.0-1.0)
    #[serde(default = "default_velocity_smoothing")]
    pub velocity_smoothing: f64,

    /// Movement below this distance does not update velocity (pixels)
    #[serde(default = "default_min_movement")]
    pub min_movement_px: f64,

    /// Enable forward prediction
    #[serde(default = "default_true")]
    pub prediction: bool,

    /// No prediction once the last update is older than this (ms)
    #[serde(default = "default_prediction_ceiling")]
    pub prediction_ceiling_ms: i64,

    /// Longest travel time added by prediction (ms)
    #[serde(default = "default_max_prediction")]
    pub max_prediction_ms: i64,
}

fn default_position_smoothing() -> f64 {
    0.15
}
fn default_velocity_smoothing() -> f64 {
    0.2
}
fn default_min_movement() -> f64 {
    0.5
}
fn default_true() -> bool {
    true
}
fn default_prediction_ceiling() -> i64 {
    100
}
fn default_max_prediction() -> i64 {
    50
}

impl Default for SmootherConfig {
    fn default() -> Self {
        Self {
            position_smoothing: default_position_smoothing(),
            velocity_smoothing: default_velocity_smoothing(),
            min_movement_px: default_min_movement(),
            prediction: default_true(),
            prediction_ceiling_ms: default_prediction_ceiling(),
            max_prediction_ms: default_max_prediction(),
        }
    }
}

/// EMA smoother with short-horizon linear prediction
#[derive(Debug, Clone)]
pub struct LightweightSmoother {
    config: SmootherConfig,

    /// Smoothed position, `None` until the first target
    current: Option<Point>,

    /// Most recent reported position
    target: Point,

    /// Smoothed velocity (pixels/second)
    velocity: Point,

    /// Time of the last target update (ms)
    last_update_ms: Option<i64>,

    /// Last sender sequence number seen
    last_seq: Option<u64>,
}

impl LightweightSmoother {
    /// Create a smoother with no target yet
    pub fn new(config: SmootherConfig) -> Self {
        Self {
            config,
            current: None,
            target: Point::ZERO,
            velocity: Point::ZERO,
            last_update_ms: None,
            last_seq: None,
        }
    }

    /// Record a new reported position.
    ///
    /// Non-finite positions are ignored, as are positions reported earlier
    /// than the last accepted one.
    pub fn update_target(&mut self, x: f64, y: f64, now_ms: i64) -> bool {
        let point = Point::new(x, y);
        if !point.is_finite() {
            return false;
        }

        let Some(last_update) = self.last_update_ms else {
            self.current = Some(point);
            self.target = point;
            self.last_update_ms = Some(now_ms);
            return true;
        };

        if now_ms < last_update {
            trace!("Smoother dropping late update at {}ms (last {})", now_ms, last_update);
            return false;
        }

        let dt = now_ms.saturating_sub(last_update) as f64 / 1000.0;
        if dt > 0.0 && self.target.distance(point) > self.config.min_movement_px {
            let vx = (point.x - self.target.x) / dt;
            let vy = (point.y - self.target.y) / dt;

            let alpha = self.config.velocity_smoothing;
            self.velocity.x += alpha * (vx - self.velocity.x);
            self.velocity.y += alpha * (vy - self.velocity.y);
        }

        self.target = point;
        self.last_update_ms = Some(now_ms);
        true
    }

    /// [`update_target`](Self::update_target), dropping sequence numbers at or
    /// below the last one seen
    pub fn update_sequenced(&mut self, x: f64, y: f64, now_ms: i64, seq: Option<u64>) -> bool {
        if let (Some(seq), Some(last)) = (seq, self.last_seq) {
            if seq <= last {
                trace!("Smoother dropping seq={} (last {})", seq, last);
                return false;
            }
        }

        let accepted = self.update_target(x, y, now_ms);
        if accepted && seq.is_some() {
            self.last_seq = seq;
        }
        accepted
    }

    /// Advance one animation frame and return the position to render
    pub fn tick(&mut self, now_ms: i64) -> Point {
        let Some(current) = self.current.as_mut() else {
            return Point::ZERO;
        };

        let alpha = self.config.position_smoothing;
        current.x += alpha * (self.target.x - current.x);
        current.y += alpha * (self.target.y - current.y);
        let current = *current;

        if !self.config.prediction {
            return current;
        }

        let since_update = self.last_update_ms.map_or(i64::MAX, |t| now_ms.saturating_sub(t));
        if !(0..self.config.prediction_ceiling_ms).contains(&since_update) {
            return current;
        }

        let lookahead = since_update.min(self.config.max_prediction_ms) as f64 / 1000.0;
        Point::new(
            current.x + self.velocity.x * lookahead,
            current.y + self.velocity.y * lookahead,
        )
    }

    /// Smoothed position without prediction
    pub fn current(&self) -> Option<Point> {
        self.current
    }

    /// Most recent reported position
    pub fn target(&self) -> Point {
        self.target
    }

    /// Smoothed velocity (pixels/second)
    pub fn velocity(&self) -> Point {
        self.velocity
    }

    /// Forget all state
    pub fn reset(&mut self) {
        self.current = None;
        self.target = Point::ZERO;
        self.velocity = Point::ZERO;
        self.last_update_ms = None;
        self.last_seq = None;
    }
}

impl Default for LightweightSmoother {
    fn default() -> Self {
        Self::new(SmootherConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn without_prediction() -> SmootherConfig {
        SmootherConfig {
            prediction: false,
            ..SmootherConfig::default()
        }
    }

    #[test]
    fn test_default_config() {
        let config = SmootherConfig::default();
        assert_eq!(config.position_smoothing, 0.15);
        assert_eq!(config.velocity_smoothing, 0.2);
        assert_eq!(config.prediction_ceiling_ms, 100);
        assert_eq!(config.max_prediction_ms, 50);
        assert!(config.prediction);
    }

    #[test]
    fn test_tick_before_update() {
        let mut smoother = LightweightSmoother::default();
        assert_eq!(smoother.tick(0), Point::ZERO);
        assert!(smoother.current().is_none());
    }

    #[test]
    fn test_first_update_snaps() {
        let mut smoother = LightweightSmoother::new(without_prediction());
        smoother.update_target(40.0, 60.0, 0);
        assert_eq!(smoother.tick(16), Point::new(40.0, 60.0));
        assert_eq!(smoother.velocity(), Point::ZERO);
    }

    #[test]
    fn test_converges_toward_target() {
        let mut smoother = LightweightSmoother::new(without_prediction());
        smoother.update_target(0.0, 0.0, 0);
        smoother.update_target(100.0, 0.0, 16);

        let first = smoother.tick(16);
        assert!((first.x - 15.0).abs() < 1e-9, "x={}", first.x);

        let mut out = first;
        for i in 2..200 {
            out = smoother.tick(i * 16);
        }
        assert!((out.x - 100.0).abs() < 0.01, "x={}", out.x);
    }

    #[test]
    fn test_micro_jitter_ignored_for_velocity() {
        let mut smoother = LightweightSmoother::default();
        smoother.update_target(10.0, 10.0, 0);
        smoother.update_target(10.2, 10.1, 16);
        assert_eq!(smoother.velocity(), Point::ZERO);
        assert_eq!(smoother.target(), Point::new(10.2, 10.1));
    }

    #[test]
    fn test_velocity_is_smoothed() {
        let mut smoother = LightweightSmoother::default();
        smoother.update_target(0.0, 0.0, 0);
        // 1000 px/s instantaneous
        smoother.update_target(16.0, 0.0, 16);
        assert!((smoother.velocity().x - 200.0).abs() < 1e-9);
    }

    #[test]
    fn test_prediction_leads_and_is_bounded() {
        let mut smoother = LightweightSmoother::default();
        smoother.update_target(0.0, 0.0, 0);
        smoother.update_target(100.0, 0.0, 100);
        let velocity = smoother.velocity().x;
        assert!(velocity > 0.0);

        let mut plain = smoother.clone();
        plain.config.prediction = false;

        let predicted = smoother.tick(180);
        let unpredicted = plain.tick(180);
        let lead = predicted.x - unpredicted.x;
        assert!(lead > 0.0);
        assert!(lead <= velocity * 0.05 + 1e-9, "lead {} over 50ms of travel", lead);
    }

    #[test]
    fn test_prediction_stops_after_ceiling() {
        let mut smoother = LightweightSmoother::default();
        smoother.update_target(0.0, 0.0, 0);
        smoother.update_target(100.0, 0.0, 100);

        let mut plain = smoother.clone();
        plain.config.prediction = false;

        assert_eq!(smoother.tick(200), plain.tick(200));
    }

    #[test]
    fn test_stale_seq_ignored() {
        let mut smoother = LightweightSmoother::default();
        assert!(smoother.update_sequenced(0.0, 0.0, 0, Some(4)));
        assert!(!smoother.update_sequenced(50.0, 0.0, 16, Some(4)));
        assert_eq!(smoother.target(), Point::ZERO);
        assert!(smoother.update_sequenced(50.0, 0.0, 32, Some(5)));
        assert_eq!(smoother.target(), Point::new(50.0, 0.0));
    }

    #[test]
    fn test_reset() {
        let mut smoother = LightweightSmoother::default();
        smoother.update_target(5.0, 5.0, 0);
        smoother.update_target(50.0, 5.0, 16);
        smoother.reset();
        assert_eq!(smoother.tick(32), Point::ZERO);
        assert_eq!(smoother.velocity(), Point::ZERO);
    }

    #[test]
    fn test_late_update_ignored() {
        let mut smoother = LightweightSmoother::default();
        assert!(smoother.update_target(0.0, 0.0, 100));
        assert!(smoother.update_target(50.0, 0.0, 200));
        let velocity = smoother.velocity();

        assert!(!smoother.update_target(10.0, 0.0, 150));
        assert_eq!(smoother.target(), Point::new(50.0, 0.0));
        assert_eq!(smoother.velocity(), velocity);

        // Same timestamp is not late
        assert!(smoother.update_target(60.0, 0.0, 200));
    }

    #[test]
    fn test_extreme_timestamps_stay_finite() {
        let mut smoother = LightweightSmoother::default();
        assert!(smoother.update_target(0.0, 0.0, i64::MIN));
        assert!(smoother.update_target(100.0, 0.0, i64::MAX));
        assert!(smoother.velocity().is_finite());
        assert!(smoother.tick(i64::MIN).is_finite());
        assert!(smoother.tick(i64::MAX).is_finite());
    }
}
