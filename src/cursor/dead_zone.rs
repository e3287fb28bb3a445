//! Sender-side dead zone
//!
//! Decides which local pointer moves are worth broadcasting. Moves shorter
//! than the minimum distance, or arriving sooner than the minimum interval
//! after the last broadcast, are suppressed. Every emitted update carries
//! the next sequence number so receivers can discard reordered copies.

use serde::{Deserialize, Serialize};

use super::types::Point;

/// Configuration for the broadcast dead zone
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeadZoneConfig {
    /// Minimum movement since the last broadcast (pixels)
    #[serde(default = "default_min_distance")]
    pub min_distance_px: f64,

    /// Minimum time between broadcasts (ms), ~60 Hz by default
    #[serde(default = "default_min_interval")]
    pub min_interval_ms: i64,
}

fn default_min_distance() -> f64 {
    1.0
}
fn default_min_interval() -> i64 {
    16
}

impl Default for DeadZoneConfig {
    fn default() -> Self {
        Self {
            min_distance_px: default_min_distance(),
            min_interval_ms: default_min_interval(),
        }
    }
}

/// A position update approved for broadcast
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OutboundPosition {
    /// Horizontal position
    pub x: f64,
    /// Vertical position
    pub y: f64,
    /// Per-sender sequence number
    pub seq: u64,
}

/// Throttle for outgoing local cursor positions
#[derive(Debug, Clone)]
pub struct DeadZoneGate {
    config: DeadZoneConfig,
    last_sent: Option<(Point, i64)>,
    next_seq: u64,
}

impl DeadZoneGate {
    /// Create a gate that will pass the first position it is offered
    pub fn new(config: DeadZoneConfig) -> Self {
        Self {
            config,
            last_sent: None,
            next_seq: 0,
        }
    }

    /// Offer the local pointer position; `Some` when it should be sent
    pub fn offer(&mut self, x: f64, y: f64, now_ms: i64) -> Option<OutboundPosition> {
        let point = Point::new(x, y);
        if !point.is_finite() {
            return None;
        }

        if let Some((last, sent_at)) = self.last_sent {
            if now_ms.saturating_sub(sent_at) < self.config.min_interval_ms {
                return None;
            }
            if last.distance(point) < self.config.min_distance_px {
                return None;
            }
        }

        let seq = self.next_seq;
        self.next_seq = self.next_seq.wrapping_add(1);
        self.last_sent = Some((point, now_ms));

        Some(OutboundPosition { x, y, seq })
    }

    /// Forget the last broadcast so the next offer always passes.
    ///
    /// Sequence numbers keep increasing.
    pub fn reset(&mut self) {
        self.last_sent = None;
    }
}

impl Default for DeadZoneGate {
    fn default() -> Self {
        Self::new(DeadZoneConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_offer_passes() {
        let mut gate = DeadZoneGate::default();
        let out = gate.offer(5.0, 5.0, 0).unwrap();
        assert_eq!(out.seq, 0);
    }

    #[test]
    fn test_interval_and_distance_gating() {
        let mut gate = DeadZoneGate::default();
        gate.offer(0.0, 0.0, 0);

        // Too soon
        assert!(gate.offer(50.0, 0.0, 10).is_none());
        // Too small
        assert!(gate.offer(0.5, 0.0, 20).is_none());
        // Both satisfied
        let out = gate.offer(50.0, 0.0, 20).unwrap();
        assert_eq!(out.seq, 1);
    }

    #[test]
    fn test_reset_keeps_sequence() {
        let mut gate = DeadZoneGate::default();
        gate.offer(0.0, 0.0, 0);
        gate.reset();
        let out = gate.offer(0.0, 0.0, 1).unwrap();
        assert_eq!(out.seq, 1);
    }

    #[test]
    fn test_non_finite_rejected() {
        let mut gate = DeadZoneGate::default();
        assert!(gate.offer(f64::NAN, 0.0, 0).is_none());
        assert!(gate.offer(0.0, 0.0, 0).is_some());
    }
}
