//! Remote cursor smoothing
//!
//! This module turns the position stream of a collaborator's pointer, as
//! delivered by a lossy broadcast channel, into a smooth position for every
//! locally rendered frame.
//!
//! # Strategies
//!
//! | Strategy | Technique | Cost | Use Case |
//! |----------|-----------|------|----------|
//! | Predictive | Buffered spline interpolation + dead reckoning + One-Euro | Medium | Default, visible cursors |
//! | Lightweight | EMA + short linear prediction | Lowest | Many cursors, thumbnails |
//!
//! # Architecture
//!
//! ```text
//! Transport (samples)
//!   └─> Predictor::push
//!       └─> SampleBuffer (ordered, deduplicated, bounded)
//!
//! Render loop (every frame)
//!   └─> Predictor::get_position(now)
//!       ├─> interpolate / extrapolate / freeze
//!       ├─> OneEuroFilter
//!       └─> per-frame displacement cap
//! ```
//!
//! Instances are single-owner: one per remote entity, never shared. The
//! caller serialises `push` and `get_position` for each entity.

mod buffer;
mod dead_zone;
mod interpolation;
mod one_euro;
mod predictor;
mod registry;
mod smoother;
mod strategy;
mod types;

pub use buffer::{SampleBuffer, INTERPOLATION_WINDOW, MIN_SAMPLE_SPACING_MS};
pub use dead_zone::{DeadZoneConfig, DeadZoneGate, OutboundPosition};
pub use interpolation::{catmull_rom, catmull_rom_point, lerp, lerp_point, time_fraction};
pub use one_euro::{FilterState, OneEuroConfig, OneEuroFilter};
pub use predictor::{PredictionBranch, Predictor, PredictorConfig};
pub use registry::RemoteCursors;
pub use smoother::{LightweightSmoother, SmootherConfig};
pub use strategy::{CursorSmoothing, StrategyKind};
pub use types::{Point, Sample, TimedPoint};
