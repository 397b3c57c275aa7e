use serde::{Deserialize, Serialize};

use crate::core::{
    DEFAULT_LABEL_PRECISION, DEFAULT_MAX_VERTICAL_LABEL_NUM, DEFAULT_MIN_LABEL_VERTICAL_SPACING,
    MAX_LABEL_PRECISION,
};
use crate::error::{ChartError, ChartResult};

pub const DEFAULT_SAMPLE_RATE: f64 = 2.0;

/// Construction-time constants of a chart region.
///
/// This type is serializable so host applications can load chart setup from
/// JSON without inventing their own format. Missing fields take defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartRegionConfig {
    /// Horizontal pixels covered by one resampled bucket.
    #[serde(default = "default_sample_rate")]
    pub sample_rate: f64,
    #[serde(default = "default_min_label_vertical_spacing")]
    pub min_label_vertical_spacing: f64,
    #[serde(default = "default_max_vertical_label_num")]
    pub max_vertical_label_num: usize,
    /// Decimal places of the smallest label step.
    #[serde(default = "default_label_precision")]
    pub label_precision: u8,
}

impl Default for ChartRegionConfig {
    fn default() -> Self {
        Self {
            sample_rate: default_sample_rate(),
            min_label_vertical_spacing: default_min_label_vertical_spacing(),
            max_vertical_label_num: default_max_vertical_label_num(),
            label_precision: default_label_precision(),
        }
    }
}

impl ChartRegionConfig {
    #[must_use]
    pub fn with_sample_rate(mut self, sample_rate: f64) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    #[must_use]
    pub fn with_label_limits(mut self, min_vertical_spacing: f64, max_labels: usize) -> Self {
        self.min_label_vertical_spacing = min_vertical_spacing;
        self.max_vertical_label_num = max_labels;
        self
    }

    #[must_use]
    pub fn with_label_precision(mut self, precision: u8) -> Self {
        self.label_precision = precision;
        self
    }

    pub fn validate(self) -> ChartResult<Self> {
        if !self.sample_rate.is_finite() || self.sample_rate <= 0.0 {
            return Err(ChartError::InvalidConfig(
                "sample rate must be finite and > 0".to_owned(),
            ));
        }
        if !self.min_label_vertical_spacing.is_finite() || self.min_label_vertical_spacing < 0.0 {
            return Err(ChartError::InvalidConfig(
                "min label vertical spacing must be finite and >= 0".to_owned(),
            ));
        }
        if self.max_vertical_label_num < 2 {
            return Err(ChartError::InvalidConfig(
                "max vertical label count must be >= 2".to_owned(),
            ));
        }
        if self.label_precision > MAX_LABEL_PRECISION {
            return Err(ChartError::InvalidConfig(format!(
                "label precision must be <= {MAX_LABEL_PRECISION}"
            )));
        }
        Ok(self)
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(input)?;
        config.validate()
    }

    pub fn to_json_string(self) -> ChartResult<String> {
        Ok(serde_json::to_string(&self)?)
    }
}

fn default_sample_rate() -> f64 {
    DEFAULT_SAMPLE_RATE
}

fn default_min_label_vertical_spacing() -> f64 {
    DEFAULT_MIN_LABEL_VERTICAL_SPACING
}

fn default_max_vertical_label_num() -> usize {
    DEFAULT_MAX_VERTICAL_LABEL_NUM
}

fn default_label_precision() -> u8 {
    DEFAULT_LABEL_PRECISION
}
