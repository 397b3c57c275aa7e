use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Named measurement systems with a built-in unit table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitKind {
    Bytes,
    Frequency,
    Percent,
    Count,
}

impl UnitKind {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Bytes => "bytes",
            Self::Frequency => "frequency",
            Self::Percent => "percent",
            Self::Count => "count",
        }
    }
}

impl fmt::Display for UnitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for UnitKind {
    type Err = ChartError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "bytes" => Ok(Self::Bytes),
            "frequency" => Ok(Self::Frequency),
            "percent" => Ok(Self::Percent),
            "count" => Ok(Self::Count),
            _ => Err(ChartError::UnknownUnitKind(value.to_owned())),
        }
    }
}

/// Ordered unit names with a fixed multiplicative scale between neighbors.
///
/// `units[k]` represents `unit_scale^k` base units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitTable {
    units: Vec<String>,
    unit_scale: f64,
}

impl UnitTable {
    pub fn new<I, S>(units: I, unit_scale: f64) -> ChartResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            units: units.into_iter().map(Into::into).collect(),
            unit_scale,
        }
        .validate()
    }

    #[must_use]
    pub fn for_kind(kind: UnitKind) -> Self {
        let (units, unit_scale): (&[&str], f64) = match kind {
            UnitKind::Bytes => (&["B", "KB", "MB", "GB", "TB"], 1024.0),
            UnitKind::Frequency => (&["Hz", "kHz", "MHz", "GHz"], 1000.0),
            UnitKind::Percent => (&["%"], 100.0),
            UnitKind::Count => (&["", "K", "M", "G"], 1000.0),
        };
        Self {
            units: units.iter().map(|unit| (*unit).to_owned()).collect(),
            unit_scale,
        }
    }

    /// Checks the table invariants; tables deserialized from config go through here.
    pub fn validate(self) -> ChartResult<Self> {
        if self.units.is_empty() {
            return Err(ChartError::InvalidUnitTable(
                "at least one unit is required".to_owned(),
            ));
        }
        if !self.unit_scale.is_finite() || self.unit_scale <= 1.0 {
            return Err(ChartError::InvalidUnitTable(format!(
                "unit scale must be finite and > 1, got {}",
                self.unit_scale
            )));
        }
        Ok(self)
    }

    #[must_use]
    pub fn units(&self) -> &[String] {
        &self.units
    }

    #[must_use]
    pub fn unit_scale(&self) -> f64 {
        self.unit_scale
    }

    #[must_use]
    pub fn unit(&self, index: usize) -> &str {
        self.units.get(index).map_or("", String::as_str)
    }

    /// Promotes `value` to the largest unit that keeps it below `unit_scale`.
    ///
    /// Returns the unit index and the value expressed in that unit.
    #[must_use]
    pub fn promote(&self, value: f64) -> (usize, f64) {
        let mut index = 0;
        let mut scaled = value;
        while index + 1 < self.units.len() && scaled >= self.unit_scale {
            scaled /= self.unit_scale;
            index += 1;
        }
        (index, scaled)
    }

    /// Multiplier converting a value in unit `index` back to base units.
    #[must_use]
    pub fn base_multiplier(&self, index: usize) -> f64 {
        self.unit_scale.powi(index as i32)
    }
}
