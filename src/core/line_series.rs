use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Projected line segment in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineSegment {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

/// Pixel mapping of one resampled value array.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResampledProjection {
    /// Horizontal pixels covered by one bucket.
    pub sample_rate: f64,
    /// Sub-pixel pan shift of the first bucket.
    pub pixel_offset: f64,
    pub height: f64,
    /// Pixels per base-unit value.
    pub scale: f64,
}

impl ResampledProjection {
    fn validate(self) -> ChartResult<Self> {
        if !self.sample_rate.is_finite() || self.sample_rate <= 0.0 {
            return Err(ChartError::InvalidData(
                "sample rate must be finite and > 0".to_owned(),
            ));
        }
        if !self.pixel_offset.is_finite() || !self.height.is_finite() || !self.scale.is_finite() {
            return Err(ChartError::InvalidData(
                "projection parameters must be finite".to_owned(),
            ));
        }
        Ok(self)
    }

    #[must_use]
    pub fn x(self, slot: usize) -> f64 {
        slot as f64 * self.sample_rate - self.pixel_offset
    }

    #[must_use]
    pub fn y(self, value: f64) -> f64 {
        self.height - value * self.scale
    }
}

/// Projects a resampled value array into adjacent line segments.
///
/// Empty buckets break the line: no segment touches a `None` slot.
pub fn project_resampled_segments(
    values: &[Option<f64>],
    projection: ResampledProjection,
) -> ChartResult<Vec<LineSegment>> {
    let projection = projection.validate()?;
    if values.len() < 2 {
        return Ok(Vec::new());
    }

    let mut segments = Vec::with_capacity(values.len() - 1);
    for (slot, pair) in values.windows(2).enumerate() {
        if let (Some(left), Some(right)) = (pair[0], pair[1]) {
            segments.push(LineSegment {
                x1: projection.x(slot),
                y1: projection.y(left),
                x2: projection.x(slot + 1),
                y2: projection.y(right),
            });
        }
    }

    Ok(segments)
}
