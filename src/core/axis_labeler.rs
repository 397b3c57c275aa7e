use smallvec::SmallVec;
use tracing::debug;

use crate::core::units::{UnitKind, UnitTable};
use crate::error::ChartResult;

pub const DEFAULT_MIN_LABEL_VERTICAL_SPACING: f64 = 4.0;
pub const DEFAULT_MAX_VERTICAL_LABEL_NUM: usize = 6;
pub const DEFAULT_LABEL_PRECISION: u8 = 2;
/// Largest precision honored; higher requests are clamped to it.
pub const MAX_LABEL_PRECISION: u8 = 12;

const STEP_FACTORS: [f64; 3] = [1.0, 2.0, 5.0];
const INTERVAL_EPSILON: f64 = 1e-9;

type LabelVec<T> = SmallVec<[T; 8]>;

#[derive(Debug, Clone, Default)]
struct LabelLayout {
    labels: LabelVec<String>,
    values: LabelVec<f64>,
    step_size: f64,
    scale: f64,
}

/// Vertical axis label generator for one chart region.
///
/// The maximum value is promoted through the unit table first, then a
/// 1-2-5 step is picked so every label fits in the pixel height. The result
/// is cached until one of its inputs changes.
#[derive(Debug, Clone)]
pub struct AxisLabeler {
    units: UnitTable,
    max_value: f64,
    unit_index: usize,
    height: f64,
    font_height: f64,
    precision: u8,
    min_label_vertical_spacing: f64,
    max_vertical_label_num: usize,
    dirty: bool,
    recomputes: u64,
    layout: LabelLayout,
}

impl AxisLabeler {
    /// Builds a labeler over `units`, failing fast when the table is unusable.
    pub fn new(units: UnitTable) -> ChartResult<Self> {
        Ok(Self {
            units: units.validate()?,
            max_value: 0.0,
            unit_index: 0,
            height: 0.0,
            font_height: 0.0,
            precision: DEFAULT_LABEL_PRECISION,
            min_label_vertical_spacing: DEFAULT_MIN_LABEL_VERTICAL_SPACING,
            max_vertical_label_num: DEFAULT_MAX_VERTICAL_LABEL_NUM,
            dirty: true,
            recomputes: 0,
            layout: LabelLayout::default(),
        })
    }

    pub fn from_kind(kind: UnitKind) -> ChartResult<Self> {
        Self::new(UnitTable::for_kind(kind))
    }

    pub fn from_kind_name(name: &str) -> ChartResult<Self> {
        Self::from_kind(name.parse()?)
    }

    /// Overrides the label spacing limits; `max_labels` is raised to at least 2.
    #[must_use]
    pub fn with_label_limits(mut self, min_vertical_spacing: f64, max_labels: usize) -> Self {
        self.min_label_vertical_spacing = if min_vertical_spacing.is_finite() {
            min_vertical_spacing.max(0.0)
        } else {
            DEFAULT_MIN_LABEL_VERTICAL_SPACING
        };
        self.max_vertical_label_num = max_labels.max(2);
        self.dirty = true;
        self
    }

    #[must_use]
    pub fn units(&self) -> &UnitTable {
        &self.units
    }

    /// Maximum value expressed in the selected unit.
    #[must_use]
    pub fn max_value(&self) -> f64 {
        self.max_value
    }

    #[must_use]
    pub fn unit_index(&self) -> usize {
        self.unit_index
    }

    #[must_use]
    pub fn unit(&self) -> &str {
        self.units.unit(self.unit_index)
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.height
    }

    #[must_use]
    pub fn font_height(&self) -> f64 {
        self.font_height
    }

    #[must_use]
    pub fn precision(&self) -> u8 {
        self.precision
    }

    /// Number of times the label layout was actually recomputed.
    #[must_use]
    pub fn recompute_count(&self) -> u64 {
        self.recomputes
    }

    /// Sets the data maximum in base units and promotes it to a display unit.
    pub fn set_max_value(&mut self, value: f64) {
        let (unit_index, scaled) = if value.is_finite() && value > 0.0 {
            self.units.promote(value)
        } else {
            (0, 0.0)
        };
        if scaled == self.max_value && unit_index == self.unit_index {
            return;
        }
        self.max_value = scaled;
        self.unit_index = unit_index;
        self.dirty = true;
    }

    /// `precision` above `MAX_LABEL_PRECISION` is clamped.
    pub fn set_layout(&mut self, height: f64, font_height: f64, precision: u8) {
        let precision = precision.min(MAX_LABEL_PRECISION);
        if height == self.height && font_height == self.font_height && precision == self.precision
        {
            return;
        }
        self.height = height;
        self.font_height = font_height;
        self.precision = precision;
        self.dirty = true;
    }

    /// Tick labels from the top of the axis down to zero.
    pub fn labels(&mut self) -> &[String] {
        self.refresh();
        &self.layout.labels
    }

    /// Numeric tick values in the selected unit, matching `labels`.
    pub fn label_values(&mut self) -> &[f64] {
        self.refresh();
        &self.layout.values
    }

    /// Distance between adjacent ticks in the selected unit.
    pub fn step_size(&mut self) -> f64 {
        self.refresh();
        self.layout.step_size
    }

    /// Pixels per base-unit value, mapping the top label onto the full height.
    pub fn scale(&mut self) -> f64 {
        self.refresh();
        self.layout.scale
    }

    fn refresh(&mut self) {
        if !self.dirty {
            return;
        }
        self.layout = self.compute_layout();
        self.dirty = false;
        self.recomputes += 1;
        debug!(
            max_value = self.max_value,
            unit = self.unit(),
            labels = self.layout.labels.len(),
            step_size = self.layout.step_size,
            "recomputed axis labels"
        );
    }

    fn compute_layout(&self) -> LabelLayout {
        if self.max_value <= 0.0 || !self.height.is_finite() || self.height <= 0.0 {
            return LabelLayout::default();
        }

        let max_labels = max_label_count(
            self.height,
            self.font_height,
            self.min_label_vertical_spacing,
            self.max_vertical_label_num,
        );
        let quantum = 10f64.powi(-i32::from(self.precision));
        let max_in_quanta = self.max_value / quantum;
        if !max_in_quanta.is_finite() {
            return LabelLayout::default();
        }

        let (step_quanta, intervals) = select_step(max_in_quanta, max_labels);
        let step_size = step_quanta * quantum;
        let decimals = label_decimals(step_quanta, self.precision);
        let unit = self.unit();

        let mut layout = LabelLayout {
            step_size,
            ..LabelLayout::default()
        };
        for tick in (0..=intervals).rev() {
            let value = tick as f64 * step_size;
            layout.values.push(value);
            layout.labels.push(if unit.is_empty() {
                format!("{value:.decimals$}")
            } else {
                format!("{value:.decimals$} {unit}")
            });
        }

        let top_in_base_units =
            intervals as f64 * step_size * self.units.base_multiplier(self.unit_index);
        layout.scale = self.height / top_in_base_units;
        layout
    }
}

/// Number of labels that fit in `height` with `2 * font_height + spacing` each.
fn max_label_count(height: f64, font_height: f64, spacing: f64, max_labels: usize) -> usize {
    let per_label = 2.0 * font_height + spacing;
    if !per_label.is_finite() || per_label <= 0.0 {
        return max_labels;
    }
    let fitted = (height / per_label).floor();
    if fitted >= max_labels as f64 {
        max_labels
    } else {
        (fitted as usize).clamp(2, max_labels)
    }
}

/// Walks the 1-2-5 staircase until `ceil(max / step) + 1` labels fit.
///
/// Returns the step and the interval count, both in precision quanta.
fn select_step(max_in_quanta: f64, max_labels: usize) -> (f64, usize) {
    let mut decade = 1.0_f64;
    loop {
        for factor in STEP_FACTORS {
            let step = decade * factor;
            let intervals = ((max_in_quanta / step) - INTERVAL_EPSILON).ceil().max(1.0);
            if intervals + 1.0 <= max_labels as f64 {
                return (step, intervals as usize);
            }
        }
        decade *= 10.0;
    }
}

fn label_decimals(step_quanta: f64, precision: u8) -> usize {
    let magnitude = step_quanta.log10().floor().max(0.0) as usize;
    usize::from(precision).saturating_sub(magnitude)
}
