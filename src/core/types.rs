use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::primitives::datetime_to_unix_millis;

/// One raw observation of a metric.
///
/// Time units are chosen by the producer; the `chrono` constructors use unix
/// milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub time: f64,
    pub value: f64,
}

impl Sample {
    #[must_use]
    pub fn new(time: f64, value: f64) -> Self {
        Self { time, value }
    }

    #[must_use]
    pub fn at(time: DateTime<Utc>, value: f64) -> Self {
        Self {
            time: datetime_to_unix_millis(time),
            value,
        }
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.time.is_finite() && self.value.is_finite()
    }
}
