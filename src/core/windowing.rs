use crate::core::Sample;

/// Index of the first sample whose time is `>= time`.
///
/// `samples` must be sorted by non-decreasing time. Runs in `O(log n)`.
#[must_use]
pub fn first_sample_at_or_after(samples: &[Sample], time: f64) -> usize {
    samples.partition_point(|sample| sample.time < time)
}

/// Returns the real samples on both sides of `boundary`:
/// the last one strictly before it and the first one strictly after it.
#[must_use]
pub fn straddling_samples(samples: &[Sample], boundary: f64) -> Option<(Sample, Sample)> {
    let before_end = samples.partition_point(|sample| sample.time < boundary);
    let after_start = samples.partition_point(|sample| sample.time <= boundary);
    if before_end == 0 || after_start >= samples.len() {
        return None;
    }
    Some((samples[before_end - 1], samples[after_start]))
}

/// Linear interpolation of the value at `time` on the line through `a` and `b`.
#[must_use]
pub fn interpolate_value(a: Sample, b: Sample, time: f64) -> f64 {
    let span = b.time - a.time;
    if span == 0.0 {
        return a.value;
    }
    a.value + (b.value - a.value) * (time - a.time) / span
}

/// Returns samples whose time falls inside an inclusive time window.
#[must_use]
pub fn samples_in_time_window(samples: &[Sample], start: f64, end: f64) -> &[Sample] {
    let (min_t, max_t) = if start <= end {
        (start, end)
    } else {
        (end, start)
    };

    let lower = first_sample_at_or_after(samples, min_t);
    let upper = samples.partition_point(|sample| sample.time <= max_t);
    if lower >= upper {
        return &[];
    }
    &samples[lower..upper]
}
