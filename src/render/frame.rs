use serde::Serialize;

use crate::error::{ChartError, ChartResult};
use crate::render::Color;

/// Resampled values of one visible series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderSeries {
    pub title: String,
    pub color: Color,
    /// One slot per bucket; `None` marks an empty bucket.
    pub values: Vec<Option<f64>>,
}

/// Everything an external drawing surface needs for one draw tick.
///
/// Slot `i` of each series sits at `x = i * sample_rate - pixel_offset`;
/// a value `v` sits at `y = height - v * scale`. Labels are ordered top to
/// bottom and meant to be drawn at equal vertical spacing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderData {
    pub series: Vec<RenderSeries>,
    pub labels: Vec<String>,
    pub scale: f64,
    pub sample_rate: f64,
    pub pixel_offset: f64,
    pub width: f64,
    pub height: f64,
}

impl RenderData {
    pub fn validate(&self) -> ChartResult<()> {
        if !self.width.is_finite() || !self.height.is_finite() {
            return Err(ChartError::InvalidData(
                "render size must be finite".to_owned(),
            ));
        }
        if !self.scale.is_finite() || self.scale < 0.0 {
            return Err(ChartError::InvalidData(
                "render scale must be finite and >= 0".to_owned(),
            ));
        }
        for series in &self.series {
            series.color.validate()?;
            if series.values.iter().flatten().any(|value| !value.is_finite()) {
                return Err(ChartError::InvalidData(format!(
                    "series `{}` contains a non-finite value",
                    series.title
                )));
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.series.is_empty() && self.labels.is_empty()
    }

    pub fn to_json_string(&self) -> ChartResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}
