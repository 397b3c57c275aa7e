use std::cell::RefCell;
use std::rc::Rc;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tracing::{trace, warn};

use crate::core::Sample;
use crate::core::primitives::{datetime_to_unix_millis, decimal_to_f64};
use crate::core::windowing::{
    first_sample_at_or_after, interpolate_value, samples_in_time_window, straddling_samples,
};
use crate::error::{ChartError, ChartResult};
use crate::render::Color;

/// Handle used by chart regions to share one store with its producer.
pub type SharedSeriesStore = Rc<RefCell<SeriesStore>>;

/// Runtime metrics exposed by the single-slot resample cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ResampleCacheStats {
    pub hits: u64,
    pub misses: u64,
    /// Number of times the sample history was actually walked.
    pub scans: u64,
}

#[derive(Debug, Clone, Copy)]
struct ResampleKey {
    start: f64,
    step: f64,
    count: usize,
}

impl PartialEq for ResampleKey {
    fn eq(&self, other: &Self) -> bool {
        self.start.to_bits() == other.start.to_bits()
            && self.step.to_bits() == other.step.to_bits()
            && self.count == other.count
    }
}

#[derive(Debug, Clone)]
struct ResampleMemo {
    key: ResampleKey,
    values: Vec<Option<f64>>,
    max_value: f64,
}

/// Append-only history of one metric plus its display metadata.
///
/// Queries are answered by bucket averaging and memoized for the last
/// `(start, step, count)` triple only; any accepted append drops the memo.
#[derive(Debug, Clone)]
pub struct SeriesStore {
    title: String,
    color: Color,
    visible: bool,
    samples: Vec<Sample>,
    memo: Option<ResampleMemo>,
    stats: ResampleCacheStats,
}

impl SeriesStore {
    #[must_use]
    pub fn new(title: impl Into<String>, color: Color) -> Self {
        Self {
            title: title.into(),
            color,
            visible: true,
            samples: Vec::new(),
            memo: None,
            stats: ResampleCacheStats::default(),
        }
    }

    /// Wraps a new store into the shared handle chart regions consume.
    #[must_use]
    pub fn shared(title: impl Into<String>, color: Color) -> SharedSeriesStore {
        Rc::new(RefCell::new(Self::new(title, color)))
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn color(&self) -> Color {
        self.color
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    #[must_use]
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    #[must_use]
    pub fn latest_sample(&self) -> Option<Sample> {
        self.samples.last().copied()
    }

    /// Time of the first and the last stored sample.
    #[must_use]
    pub fn time_range(&self) -> Option<(f64, f64)> {
        match (self.samples.first(), self.samples.last()) {
            (Some(first), Some(last)) => Some((first.time, last.time)),
            _ => None,
        }
    }

    /// Raw samples inside the inclusive window `[start, end]`.
    #[must_use]
    pub fn samples_in_window(&self, start: f64, end: f64) -> &[Sample] {
        samples_in_time_window(&self.samples, start, end)
    }

    #[must_use]
    pub fn cache_stats(&self) -> ResampleCacheStats {
        self.stats
    }

    /// Appends one sample, dropping it with a warning when malformed.
    ///
    /// Returns `true` when the sample was stored.
    pub fn append(&mut self, value: f64, time: f64) -> bool {
        match self.try_append(value, time) {
            Ok(()) => true,
            Err(err) => {
                warn!(
                    series = %self.title,
                    value,
                    time,
                    error = %err,
                    "dropping sample"
                );
                false
            }
        }
    }

    /// Appends one sample, reporting why a malformed one was rejected.
    pub fn try_append(&mut self, value: f64, time: f64) -> ChartResult<()> {
        let sample = Sample::new(time, value);
        if !sample.is_finite() {
            return Err(ChartError::InvalidData(
                "sample value and time must be finite".to_owned(),
            ));
        }
        if let Some(last) = self.samples.last() {
            if time < last.time {
                return Err(ChartError::InvalidData(format!(
                    "sample time {time} is older than latest time {}",
                    last.time
                )));
            }
        }

        self.samples.push(sample);
        self.memo = None;
        trace!(series = %self.title, count = self.samples.len(), "append sample");
        Ok(())
    }

    pub fn append_at(&mut self, value: f64, time: DateTime<Utc>) -> bool {
        let sample = Sample::at(time, value);
        self.append(sample.value, sample.time)
    }

    pub fn append_decimal(&mut self, value: Decimal, time: DateTime<Utc>) -> ChartResult<()> {
        let value = decimal_to_f64(value, "value")?;
        self.try_append(value, datetime_to_unix_millis(time))
    }

    /// Resamples the history into `count` buckets of width `step`.
    ///
    /// Slot `i` holds the mean of samples in `[start + i*step, start + (i+1)*step)`
    /// or `None` when that bucket is empty. Empty first and last slots are
    /// filled by interpolating between the real samples straddling their
    /// left boundary, when both exist.
    pub fn query(&mut self, start: f64, step: f64, count: usize) -> &[Option<f64>] {
        &self.resolve(start, step, count).values
    }

    /// Largest non-empty value of `query` for the same parameters, `0.0` if none.
    pub fn query_max(&mut self, start: f64, step: f64, count: usize) -> f64 {
        self.resolve(start, step, count).max_value
    }

    fn resolve(&mut self, start: f64, step: f64, count: usize) -> &ResampleMemo {
        let key = ResampleKey { start, step, count };
        match self.memo.take() {
            Some(memo) if memo.key == key => {
                self.stats.hits += 1;
                trace!(series = %self.title, start, step, count, "resample cache hit");
                self.memo.insert(memo)
            }
            _ => {
                self.stats.misses += 1;
                trace!(series = %self.title, start, step, count, "resample cache miss");
                let values = self.resample(key);
                let max_value = values
                    .iter()
                    .flatten()
                    .copied()
                    .reduce(f64::max)
                    .unwrap_or(0.0);
                self.memo.insert(ResampleMemo {
                    key,
                    values,
                    max_value,
                })
            }
        }
    }

    fn resample(&mut self, key: ResampleKey) -> Vec<Option<f64>> {
        let ResampleKey { start, step, count } = key;
        if count == 0 {
            return Vec::new();
        }
        if !start.is_finite() || !step.is_finite() || step <= 0.0 {
            return vec![None; count];
        }

        self.stats.scans += 1;
        let samples = &self.samples;
        let mut values = Vec::with_capacity(count);
        let mut index = first_sample_at_or_after(samples, start);
        for slot in 0..count {
            let bucket_end = start + (slot as f64 + 1.0) * step;
            let mut sum = 0.0;
            let mut taken = 0usize;
            while index < samples.len() && samples[index].time < bucket_end {
                sum += samples[index].value;
                taken += 1;
                index += 1;
            }
            values.push((taken > 0).then(|| sum / taken as f64));
        }

        let last = count - 1;
        for slot in [0, last] {
            if values[slot].is_none() {
                let boundary = start + slot as f64 * step;
                values[slot] = straddling_samples(samples, boundary)
                    .map(|(a, b)| interpolate_value(a, b, boundary));
            }
        }

        values
    }
}
