//! # remote-cursor
//!
//! Smooth rendering of remote collaborators' pointers from sparse, jittery,
//! late-arriving position samples.
//!
//! The crate provides two interchangeable smoothing strategies behind one
//! interface:
//! - [`cursor::Predictor`] - buffered, delayed-time interpolation with
//!   bounded extrapolation and One-Euro filtering
//! - [`cursor::LightweightSmoother`] - exponential moving average with a
//!   short velocity lookahead
//!
//! # Architecture
//!
//! ```text
//! remote-cursor
//!   ├─> SampleBuffer (ordered, de-duplicated arrivals)
//!   ├─> Predictor (interpolate / extrapolate / freeze)
//!   │     └─> One-Euro filter + per-frame cap
//!   ├─> LightweightSmoother (EMA + lookahead)
//!   ├─> RemoteCursors (one strategy per collaborator)
//!   ├─> DeadZoneGate (sender-side throttling)
//!   └─> StageTransform (content ↔ stage coordinates)
//! ```
//!
//! # Data Flow
//!
//! **Receive Path:** network → `observe` → strategy buffer
//!
//! **Render Path:** frame clock → `position(now)` → `content_to_stage` → draw
//!
//! **Send Path:** local pointer → `DeadZoneGate::offer` → network

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Configuration loading and validation
pub mod config;

/// Content/stage coordinate mapping
pub mod coordinates;

/// Sample buffering, prediction and smoothing
pub mod cursor;

/// Error types
pub mod error;

/// Recorded trace replay
pub mod replay;

pub use config::Config;
pub use coordinates::StageTransform;
pub use cursor::{CursorSmoothing, Point, Predictor, RemoteCursors, Sample, StrategyKind};
pub use error::{Error, Result};
