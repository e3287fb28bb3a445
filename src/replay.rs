//! Trace replay
//!
//! Drives a smoothing strategy from a recorded sample trace at a fixed
//! render rate, the way a live render loop would. Traces are JSON lines,
//! one sample per line, in delivery order:
//!
//! ```text
//! {"x": 120.0, "y": 48.5, "arrive_ms": 1000, "seq": 1}
//! {"x": 124.0, "y": 50.0, "arrive_ms": 1017}
//! ```
//!
//! Blank lines and lines starting with `#` are ignored.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::cursor::{CursorSmoothing, Sample};
use crate::error::{Error, Result};

/// One rendered frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    /// Render time (ms)
    pub time_ms: i64,
    /// Rendered x
    pub x: f64,
    /// Rendered y
    pub y: f64,
    /// Samples delivered just before this frame
    pub delivered: usize,
}

/// Load a JSON-lines trace from `path`
pub fn load_trace<P: AsRef<Path>>(path: P) -> Result<Vec<Sample>> {
    let file = File::open(path.as_ref())?;
    let samples = parse_trace(BufReader::new(file))?;
    debug!(
        "Loaded {} samples from {}",
        samples.len(),
        path.as_ref().display()
    );
    Ok(samples)
}

/// Parse a JSON-lines trace
pub fn parse_trace<R: BufRead>(reader: R) -> Result<Vec<Sample>> {
    let mut samples = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let sample = serde_json::from_str(line).map_err(|source| Error::TraceParse {
            line: index + 1,
            source,
        })?;
        samples.push(sample);
    }

    Ok(samples)
}

/// Render `samples` through `strategy` at `fps`.
///
/// Frames start at the earliest arrival and continue `tail_ms` past the
/// latest. Before each frame, every not-yet-delivered sample that has
/// arrived is pushed, in trace order; a sample never overtakes one listed
/// before it.
pub fn replay(
    strategy: &mut dyn CursorSmoothing,
    samples: &[Sample],
    fps: u32,
    tail_ms: i64,
) -> Vec<Frame> {
    let (Some(start), Some(end)) = (
        samples.iter().map(|s| s.arrive_ms).min(),
        samples.iter().map(|s| s.arrive_ms).max(),
    ) else {
        return Vec::new();
    };

    let interval_ms = 1000.0 / fps.max(1) as f64;
    let end = end.saturating_add(tail_ms.max(0));

    let mut frames = Vec::new();
    let mut next = 0;

    for index in 0u64.. {
        let time_ms = start.saturating_add((index as f64 * interval_ms).round() as i64);
        if time_ms > end || frames.last().is_some_and(|f: &Frame| f.time_ms == time_ms) {
            break;
        }

        let mut delivered = 0;
        while let Some(sample) = samples.get(next) {
            if sample.arrive_ms > time_ms {
                break;
            }
            if !strategy.push(*sample) {
                trace!("Replay: sample {} dropped", next);
            }
            next += 1;
            delivered += 1;
        }

        let position = strategy.position(time_ms);
        frames.push(Frame {
            time_ms,
            x: position.x,
            y: position.y,
            delivered,
        });
    }

    debug!(
        "Replayed {} samples over {} frames ({})",
        next,
        frames.len(),
        strategy.kind()
    );
    frames
}
