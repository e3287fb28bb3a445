//! Shared cursor value types

use serde::{Deserialize, Serialize};

/// A 2D position or velocity in render pixels
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal component
    pub x: f64,
    /// Vertical component
    pub y: f64,
}

impl Point {
    /// The origin, also used as the zero vector
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Create a new point
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean length when treated as a vector
    pub fn length(&self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Euclidean distance to `other`
    pub fn distance(&self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Both components are finite
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Rescale the vector so its length is at most `max_length`.
    ///
    /// Direction is preserved; vectors already within the limit are
    /// returned unchanged.
    pub fn clamp_length(self, max_length: f64) -> Self {
        let length = self.length();
        if length > max_length && length > 0.0 {
            let scale = max_length / length;
            Self::new(self.x * scale, self.y * scale)
        } else {
            self
        }
    }
}

/// A position tagged with the local time (ms) it refers to
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimedPoint {
    /// Horizontal position
    pub x: f64,
    /// Vertical position
    pub y: f64,
    /// Local clock time in milliseconds
    pub time_ms: i64,
}

impl TimedPoint {
    /// Tag `point` with `time_ms`
    pub fn new(point: Point, time_ms: i64) -> Self {
        Self {
            x: point.x,
            y: point.y,
            time_ms,
        }
    }

    /// Drop the timestamp
    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// One observation of a remote cursor
///
/// `arrive_ms` is the local arrival time, never the sender's clock. `seq` is
/// the sender's per-entity counter when the transport provides one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Horizontal position
    pub x: f64,
    /// Vertical position
    pub y: f64,
    /// Local arrival time in milliseconds
    pub arrive_ms: i64,
    /// Sender-assigned sequence number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seq: Option<u64>,
}

impl Sample {
    /// Create an unsequenced sample
    pub fn new(x: f64, y: f64, arrive_ms: i64) -> Self {
        Self {
            x,
            y,
            arrive_ms,
            seq: None,
        }
    }

    /// Attach a sender sequence number
    pub fn with_seq(mut self, seq: u64) -> Self {
        self.seq = Some(seq);
        self
    }

    /// Sample position without its timing metadata
    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }
}
