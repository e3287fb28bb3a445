//! Coordinate Transformation
//!
//! Converts between content (world/canvas) coordinates, in which remote
//! cursor positions are exchanged, and stage (screen/render) coordinates,
//! in which they are drawn.
//!
//! ```text
//! stage   = content · scale + offset
//! content = (stage - offset) / scale
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cursor::Point;
use crate::error::{Error, Result};

/// Uniform scale plus translation between content and stage space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StageTransform {
    scale: f64,
    offset_x: f64,
    offset_y: f64,
}

impl StageTransform {
    /// Create a transform; `scale` must be finite and positive, the offset
    /// finite
    pub fn new(scale: f64, offset_x: f64, offset_y: f64) -> Result<Self> {
        validate_scale(scale)?;
        validate_offset(offset_x, offset_y)?;
        Ok(Self {
            scale,
            offset_x,
            offset_y,
        })
    }

    /// Content and stage space coincide
    pub const fn identity() -> Self {
        Self {
            scale: 1.0,
            offset_x: 0.0,
            offset_y: 0.0,
        }
    }

    /// Transform content coordinates to stage coordinates
    pub fn content_to_stage(&self, content: Point) -> Point {
        Point::new(
            content.x * self.scale + self.offset_x,
            content.y * self.scale + self.offset_y,
        )
    }

    /// Transform stage coordinates back to content coordinates
    pub fn stage_to_content(&self, stage: Point) -> Point {
        Point::new(
            (stage.x - self.offset_x) / self.scale,
            (stage.y - self.offset_y) / self.scale,
        )
    }

    /// Change the scale while keeping the content under `anchor` (a stage
    /// point) fixed on screen
    pub fn zoom_at(&mut self, anchor: Point, scale: f64) -> Result<()> {
        validate_scale(scale)?;

        let content = self.stage_to_content(anchor);
        self.scale = scale;
        self.offset_x = anchor.x - content.x * scale;
        self.offset_y = anchor.y - content.y * scale;

        debug!(
            "Stage zoom: scale={:.3} offset=({:.1}, {:.1})",
            self.scale, self.offset_x, self.offset_y
        );
        Ok(())
    }

    /// Replace the translation
    pub fn set_offset(&mut self, offset_x: f64, offset_y: f64) -> Result<()> {
        validate_offset(offset_x, offset_y)?;
        self.offset_x = offset_x;
        self.offset_y = offset_y;
        Ok(())
    }

    /// Current scale
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Current translation
    pub fn offset(&self) -> Point {
        Point::new(self.offset_x, self.offset_y)
    }
}

impl Default for StageTransform {
    fn default() -> Self {
        Self::identity()
    }
}

fn validate_scale(scale: f64) -> Result<()> {
    if scale.is_finite() && scale > 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidScale(scale))
    }
}

fn validate_offset(x: f64, y: f64) -> Result<()> {
    if x.is_finite() && y.is_finite() {
        Ok(())
    } else {
        Err(Error::InvalidOffset(x, y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Point, b: Point) -> bool {
        (a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9
    }

    #[test]
    fn test_content_to_stage() {
        let transform = StageTransform::new(2.0, 10.0, -20.0).unwrap();
        let stage = transform.content_to_stage(Point::new(5.0, 5.0));
        assert_eq!(stage, Point::new(20.0, -10.0));
    }

    #[test]
    fn test_stage_to_content_inverts() {
        let transform = StageTransform::new(0.75, 120.0, 48.0).unwrap();
        let content = Point::new(333.0, -91.5);
        let back = transform.stage_to_content(transform.content_to_stage(content));
        assert!(approx(back, content), "{:?} != {:?}", back, content);
    }

    #[test]
    fn test_invalid_scale_rejected() {
        assert!(matches!(
            StageTransform::new(0.0, 0.0, 0.0),
            Err(Error::InvalidScale(_))
        ));
        assert!(StageTransform::new(-1.0, 0.0, 0.0).is_err());
        assert!(StageTransform::new(f64::NAN, 0.0, 0.0).is_err());
        assert!(matches!(
            StageTransform::new(1.0, f64::INFINITY, 0.0),
            Err(Error::InvalidOffset(_, _))
        ));
    }

    #[test]
    fn test_zoom_keeps_anchor_fixed() {
        let mut transform = StageTransform::new(1.0, 50.0, 50.0).unwrap();
        let anchor = Point::new(400.0, 300.0);
        let under_anchor = transform.stage_to_content(anchor);

        transform.zoom_at(anchor, 2.5).unwrap();
        assert_eq!(transform.scale(), 2.5);
        assert!(approx(transform.content_to_stage(under_anchor), anchor));

        assert!(transform.zoom_at(anchor, 0.0).is_err());
        assert_eq!(transform.scale(), 2.5);
    }

    #[test]
    fn test_identity() {
        let transform = StageTransform::default();
        let p = Point::new(12.0, 34.0);
        assert_eq!(transform.content_to_stage(p), p);
        assert_eq!(transform.offset(), Point::ZERO);
    }
}
