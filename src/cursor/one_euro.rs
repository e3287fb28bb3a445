//! One-Euro Filter
//!
//! Adaptive low-pass filter applied to the predictor output. The cutoff
//! frequency rises with the estimated pointer speed, so a resting cursor is
//! smoothed heavily (jitter rejection) while a fast-moving one follows with
//! little lag.
//!
//! # Smoothing
//!
//! ```text
//! tau   = 1 / (2π · cutoff)
//! alpha = 1 / (1 + tau / dt)
//! x̂     = alpha · x + (1 - alpha) · x̂_prev
//! ```
//!
//! The derivative is smoothed at the fixed `d_cutoff`; the position at
//! `min_cutoff + beta · speed`.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use super::types::Point;

/// One-Euro tuning parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OneEuroConfig {
    /// Minimum cutoff frequency (Hz), lower = smoother at rest
    #[serde(default = "default_min_cutoff")]
    pub min_cutoff: f64,

    /// Speed coefficient, higher = less lag during fast motion
    #[serde(default = "default_beta")]
    pub beta: f64,

    /// Derivative cutoff frequency (Hz)
    #[serde(default = "default_d_cutoff")]
    pub d_cutoff: f64,
}

fn default_min_cutoff() -> f64 {
    1.5
}
fn default_beta() -> f64 {
    0.007
}
fn default_d_cutoff() -> f64 {
    1.0
}

impl Default for OneEuroConfig {
    fn default() -> Self {
        Self {
            min_cutoff: default_min_cutoff(),
            beta: default_beta(),
            d_cutoff: default_d_cutoff(),
        }
    }
}

/// Last filtered position, derivative and update time
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterState {
    /// Filtered x
    pub x: f64,
    /// Filtered y
    pub y: f64,
    /// Smoothed x derivative (px/s)
    pub dx: f64,
    /// Smoothed y derivative (px/s)
    pub dy: f64,
    /// Time of the last accepted update (ms)
    pub last_time_ms: i64,
}

/// alpha = 1 / (1 + tau/dt), tau = 1/(2*pi*cutoff)
fn smoothing_factor(dt: f64, cutoff: f64) -> f64 {
    let tau = 1.0 / (2.0 * PI * cutoff);
    1.0 / (1.0 + tau / dt)
}

/// Two-axis One-Euro filter sharing one clock and one speed estimate
#[derive(Debug, Clone)]
pub struct OneEuroFilter {
    config: OneEuroConfig,
    state: Option<FilterState>,
}

impl OneEuroFilter {
    /// Create a filter with no history
    pub fn new(config: OneEuroConfig) -> Self {
        Self {
            config,
            state: None,
        }
    }

    /// Filter one position observed at `timestamp_ms`.
    ///
    /// The first call passes the input through. A timestamp at or before
    /// the previous one returns the previous output and leaves the state
    /// untouched.
    pub fn filter(&mut self, x: f64, y: f64, timestamp_ms: i64) -> Point {
        let Some(state) = self.state.as_mut() else {
            self.state = Some(FilterState {
                x,
                y,
                dx: 0.0,
                dy: 0.0,
                last_time_ms: timestamp_ms,
            });
            return Point::new(x, y);
        };

        let dt = timestamp_ms.saturating_sub(state.last_time_ms) as f64 / 1000.0;
        if dt <= 0.0 {
            return Point::new(state.x, state.y);
        }

        // 1. Smoothed derivative
        let a_d = smoothing_factor(dt, self.config.d_cutoff);
        let raw_dx = (x - state.x) / dt;
        let raw_dy = (y - state.y) / dt;
        let dx = a_d * raw_dx + (1.0 - a_d) * state.dx;
        let dy = a_d * raw_dy + (1.0 - a_d) * state.dy;

        // 2. Adaptive cutoff from speed
        let speed = dx.hypot(dy);
        let cutoff = self.config.min_cutoff + self.config.beta * speed;
        let a = smoothing_factor(dt, cutoff);

        // 3. Position
        *state = FilterState {
            x: a * x + (1.0 - a) * state.x,
            y: a * y + (1.0 - a) * state.y,
            dx,
            dy,
            last_time_ms: timestamp_ms,
        };

        Point::new(state.x, state.y)
    }

    /// Current filter state, `None` before the first sample
    pub fn state(&self) -> Option<&FilterState> {
        self.state.as_ref()
    }

    /// Filter configuration
    pub fn config(&self) -> &OneEuroConfig {
        &self.config
    }

    /// Discard state; the next call passes through again
    pub fn reset(&mut self) {
        self.state = None;
    }
}

impl Default for OneEuroFilter {
    fn default() -> Self {
        Self::new(OneEuroConfig::default())
    }
}
