//! Remote Cursor Predictor
//!
//! Turns the jittery, intermittent sample stream of one remote cursor into
//! a smooth position for every rendered frame.
//!
//! # Render Pipeline
//!
//! ```text
//! now ─┬─> buffer empty?            -> last output or origin
//!      ├─> now - latest > max_extra -> freeze on latest, zero velocity
//!      ├─> target > latest          -> dead reckoning from latest
//!      └─> otherwise                -> interpolate at target
//!                                        │
//!      target = now - interpolation_delay │
//!                                        v
//!                          One-Euro filter -> per-frame displacement cap
//! ```
//!
//! The branch is derived from the buffer and `now` on every call and never
//! cached, so a missed render tick cannot desynchronise it. Staleness is
//! measured against `now`, not against the delayed render target.

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::buffer::SampleBuffer;
use super::interpolation::{catmull_rom_point, lerp_point, time_fraction};
use super::one_euro::{OneEuroConfig, OneEuroFilter};
use super::types::{Point, Sample, TimedPoint};

/// Render rate the per-frame displacement cap is derived from
const REFERENCE_FPS: f64 = 60.0;

/// Frames of travel at max speed allowed in one output step
const FRAME_CAP_FRAMES: f64 = 2.0;

/// Configuration for the remote cursor predictor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictorConfig {
    /// Render-time lag used to buffer jitter before interpolating (ms)
    #[serde(default = "default_interpolation_delay_ms")]
    pub interpolation_delay_ms: i64,

    /// Staleness ceiling beyond which the output freezes (ms)
    #[serde(default = "default_max_extrapolation_ms")]
    pub max_extrapolation_ms: i64,

    /// Hard cap on dead-reckoning velocity (pixels/second)
    #[serde(default = "default_max_speed")]
    pub max_speed_px_per_sec: f64,

    /// Cap on extrapolation acceleration (pixels/second²), reserved
    #[serde(default = "default_max_accel")]
    pub max_accel_px_per_sec2: f64,

    /// Sample buffer capacity
    #[serde(default = "default_buffer_size")]
    pub buffer_size: usize,

    /// Output filter tuning
    #[serde(default)]
    pub one_euro: OneEuroConfig,
}

fn default_interpolation_delay_ms() -> i64 {
    100
}
fn default_max_extrapolation_ms() -> i64 {
    150
}
fn default_max_speed() -> f64 {
    5000.0
}
fn default_max_accel() -> f64 {
    10000.0
}
fn default_buffer_size() -> usize {
    20
}

impl Default for PredictorConfig {
    fn default() -> Self {
        Self {
            interpolation_delay_ms: default_interpolation_delay_ms(),
            max_extrapolation_ms: default_max_extrapolation_ms(),
            max_speed_px_per_sec: default_max_speed(),
            max_accel_px_per_sec2: default_max_accel(),
            buffer_size: default_buffer_size(),
            one_euro: OneEuroConfig::default(),
        }
    }
}

impl PredictorConfig {
    /// Largest distance the output may move between two frames (pixels)
    pub fn max_frame_delta(&self) -> f64 {
        self.max_speed_px_per_sec / REFERENCE_FPS * FRAME_CAP_FRAMES
    }
}

/// Which path produced a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PredictionBranch {
    /// Nothing buffered yet
    NoData,
    /// Latest sample older than the extrapolation ceiling
    Stale,
    /// Render target is newer than every sample
    Extrapolate,
    /// Render target lies within buffered history
    Interpolate,
}

/// Raw (unfiltered) result of one branch
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct RawEstimate {
    pub(crate) branch: PredictionBranch,
    pub(crate) position: Point,
}

/// Per-entity predictor: sample buffer, output filter and motion state
#[derive(Debug, Clone)]
pub struct Predictor {
    config: PredictorConfig,
    buffer: SampleBuffer,
    filter: OneEuroFilter,

    /// Last value returned to the renderer
    last_position: Option<TimedPoint>,

    /// Last unfiltered branch output, for velocity derivation
    last_raw: Option<TimedPoint>,

    /// Dead-reckoning velocity (pixels/second)
    last_velocity: Point,
}

impl Predictor {
    /// Create a predictor with no data
    pub fn new(config: PredictorConfig) -> Self {
        Self {
            buffer: SampleBuffer::new(config.buffer_size),
            filter: OneEuroFilter::new(config.one_euro),
            config,
            last_position: None,
            last_raw: None,
            last_velocity: Point::ZERO,
        }
    }

    /// Feed one sample from the transport.
    ///
    /// Duplicates, stale sequence numbers and malformed coordinates are
    /// absorbed; the return value only reports whether it was buffered.
    pub fn push(&mut self, sample: Sample) -> bool {
        self.buffer.push(sample)
    }

    /// Position to render at `now_ms`
    pub fn get_position(&mut self, now_ms: i64) -> Point {
        let Some(raw) = self.estimate_raw(now_ms) else {
            return self.last_position.map_or(Point::ZERO, |p| p.point());
        };

        let filtered = self.filter.filter(raw.position.x, raw.position.y, now_ms);

        let output = match self.last_position {
            Some(last) => {
                let delta = Point::new(filtered.x - last.x, filtered.y - last.y)
                    .clamp_length(self.config.max_frame_delta());
                Point::new(last.x + delta.x, last.y + delta.y)
            }
            None => filtered,
        };

        trace!(
            "Cursor frame {:?}: raw=({:.1}, {:.1}) out=({:.1}, {:.1}) vel=({:.1}, {:.1})",
            raw.branch,
            raw.position.x,
            raw.position.y,
            output.x,
            output.y,
            self.last_velocity.x,
            self.last_velocity.y
        );

        self.last_position = Some(TimedPoint::new(output, now_ms));
        output
    }

    /// Classify `now_ms` without touching any state
    pub fn branch(&self, now_ms: i64) -> PredictionBranch {
        let Some(latest) = self.buffer.latest() else {
            return PredictionBranch::NoData;
        };

        if now_ms.saturating_sub(latest.arrive_ms) > self.config.max_extrapolation_ms {
            PredictionBranch::Stale
        } else if self.target_ms(now_ms) > latest.arrive_ms {
            PredictionBranch::Extrapolate
        } else {
            PredictionBranch::Interpolate
        }
    }

    /// Run the selected branch and update motion state.
    ///
    /// `None` only when nothing is buffered.
    pub(crate) fn estimate_raw(&mut self, now_ms: i64) -> Option<RawEstimate> {
        let branch = self.branch(now_ms);
        let latest = *self.buffer.latest()?;

        let position = match branch {
            PredictionBranch::NoData => return None,
            PredictionBranch::Stale => {
                self.last_velocity = Point::ZERO;
                latest.point()
            }
            PredictionBranch::Extrapolate => {
                let velocity = self
                    .last_velocity
                    .clamp_length(self.config.max_speed_px_per_sec);
                self.last_velocity = velocity;

                let elapsed =
                    self.target_ms(now_ms).saturating_sub(latest.arrive_ms) as f64 / 1000.0;
                Point::new(
                    latest.x + velocity.x * elapsed,
                    latest.y + velocity.y * elapsed,
                )
            }
            PredictionBranch::Interpolate => {
                let position = self.interpolate(self.target_ms(now_ms), &latest);
                self.update_velocity(position, now_ms);
                position
            }
        };

        self.last_raw = Some(TimedPoint::new(position, now_ms));
        Some(RawEstimate { branch, position })
    }

    fn target_ms(&self, now_ms: i64) -> i64 {
        now_ms.saturating_sub(self.config.interpolation_delay_ms)
    }

    fn interpolate(&self, target_ms: i64, latest: &Sample) -> Point {
        let window = self.buffer.surrounding(target_ms);

        match window.len() {
            0 => latest.point(),
            1 => window[0].point(),
            n => {
                // Upper sample of the bracketing pair
                let upper = window
                    .iter()
                    .position(|s| s.arrive_ms >= target_ms)
                    .unwrap_or(n - 1)
                    .max(1);
                let a = window[upper - 1];
                let b = window[upper];

                let Some(t) = time_fraction(a.arrive_ms, b.arrive_ms, target_ms) else {
                    return a.point();
                };

                if n < 4 {
                    return lerp_point(a.point(), b.point(), t);
                }

                // Missing outer control points repeat the endpoint
                let p0 = upper.checked_sub(2).map_or(a, |i| window[i]);
                let p3 = window.get(upper + 1).copied().unwrap_or(b);
                catmull_rom_point(p0.point(), a.point(), b.point(), p3.point(), t)
            }
        }
    }

    fn update_velocity(&mut self, position: Point, now_ms: i64) {
        let Some(last) = self.last_raw else {
            return;
        };

        let dt = now_ms.saturating_sub(last.time_ms) as f64 / 1000.0;
        if dt <= 0.0 {
            return;
        }

        self.last_velocity = Point::new((position.x - last.x) / dt, (position.y - last.y) / dt);
    }

    /// Clear all state back to "no data yet"
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.filter.reset();
        self.last_position = None;
        self.last_raw = None;
        self.last_velocity = Point::ZERO;
    }

    /// Last value returned by [`get_position`](Self::get_position)
    pub fn last_position(&self) -> Option<TimedPoint> {
        self.last_position
    }

    /// Current dead-reckoning velocity (pixels/second)
    pub fn last_velocity(&self) -> Point {
        self.last_velocity
    }

    /// Buffered samples
    pub fn buffer(&self) -> &SampleBuffer {
        &self.buffer
    }

    /// Predictor configuration
    pub fn config(&self) -> &PredictorConfig {
        &self.config
    }
}

impl Default for Predictor {
    fn default() -> Self {
        Self::new(PredictorConfig::default())
    }
}
