use std::rc::Rc;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::{
    AxisLabeler, LineSegment, ResampledProjection, SharedSeriesStore, UnitTable,
    project_resampled_segments,
};
use crate::error::{ChartError, ChartResult};
use crate::render::{Color, RenderData, RenderSeries, Renderer};

use super::ChartRegionConfig;

/// Upper bound on resampled points per series for one layout.
pub const MAX_QUERY_POINTS: usize = 1 << 20;

/// Viewport state a region is laid out for.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RegionLayout {
    pub width: f64,
    pub height: f64,
    pub font_height: f64,
    /// Time shown at pixel zero.
    pub start_time: f64,
    pub time_per_pixel: f64,
    /// Sub-pixel pan shift applied to the left edge.
    pub pixel_offset: f64,
}

impl RegionLayout {
    fn validate(self) -> ChartResult<Self> {
        if !self.width.is_finite()
            || !self.height.is_finite()
            || self.width < 0.0
            || self.height < 0.0
        {
            return Err(ChartError::InvalidData(format!(
                "region size must be finite and >= 0, got {}x{}",
                self.width, self.height
            )));
        }
        if !self.font_height.is_finite() || self.font_height < 0.0 {
            return Err(ChartError::InvalidData(
                "font height must be finite and >= 0".to_owned(),
            ));
        }
        if !self.start_time.is_finite() || !self.pixel_offset.is_finite() {
            return Err(ChartError::InvalidData(
                "start time and pixel offset must be finite".to_owned(),
            ));
        }
        if !self.time_per_pixel.is_finite() || self.time_per_pixel <= 0.0 {
            return Err(ChartError::InvalidData(
                "time per pixel must be finite and > 0".to_owned(),
            ));
        }
        Ok(self)
    }
}

/// Resampling parameters derived from the layout.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct QueryWindow {
    pub start_time: f64,
    pub step_size: f64,
    pub num_of_points: usize,
}

/// Line segments of one visible series in region pixel space.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectedSeries {
    pub title: String,
    pub color: Color,
    pub segments: Vec<LineSegment>,
}

/// One chart area: shared series, an owned axis labeler and the viewport policy.
///
/// Series are held by handle; the region never copies their samples.
#[derive(Debug)]
pub struct ChartRegion {
    config: ChartRegionConfig,
    series: Vec<SharedSeriesStore>,
    labeler: AxisLabeler,
    layout: RegionLayout,
    window: QueryWindow,
    max_value: f64,
}

impl ChartRegion {
    pub fn new(config: ChartRegionConfig, units: UnitTable) -> ChartResult<Self> {
        let config = config.validate()?;
        let labeler = AxisLabeler::new(units)?.with_label_limits(
            config.min_label_vertical_spacing,
            config.max_vertical_label_num,
        );
        Ok(Self {
            config,
            series: Vec::new(),
            labeler,
            layout: RegionLayout::default(),
            window: QueryWindow::default(),
            max_value: 0.0,
        })
    }

    #[must_use]
    pub fn config(&self) -> ChartRegionConfig {
        self.config
    }

    #[must_use]
    pub fn layout(&self) -> RegionLayout {
        self.layout
    }

    #[must_use]
    pub fn query_window(&self) -> QueryWindow {
        self.window
    }

    #[must_use]
    pub fn labeler(&self) -> &AxisLabeler {
        &self.labeler
    }

    #[must_use]
    pub fn series_count(&self) -> usize {
        self.series.len()
    }

    /// Maximum over visible series as of the last `update_max_value`.
    #[must_use]
    pub fn max_value(&self) -> f64 {
        self.max_value
    }

    /// Registers a series by handle. The same store may back several regions.
    pub fn add_series(&mut self, store: SharedSeriesStore) {
        if self.series.iter().any(|known| Rc::ptr_eq(known, &store)) {
            return;
        }
        self.series.push(store);
    }

    /// Applies a new viewport and derives the resampling window from it.
    ///
    /// A rejected layout leaves the previous one in place.
    pub fn set_layout(&mut self, layout: RegionLayout) -> ChartResult<()> {
        let layout = layout.validate()?;
        let sample_rate = self.config.sample_rate;
        let num_of_points = query_point_count(layout.width, sample_rate)?;
        self.window = QueryWindow {
            start_time: layout.start_time - layout.pixel_offset * layout.time_per_pixel,
            step_size: layout.time_per_pixel * sample_rate,
            num_of_points,
        };
        self.layout = layout;
        self.labeler.set_layout(
            layout.height,
            layout.font_height,
            self.config.label_precision,
        );
        debug!(
            width = layout.width,
            height = layout.height,
            start_time = self.window.start_time,
            step_size = self.window.step_size,
            num_of_points = self.window.num_of_points,
            "chart region layout"
        );
        Ok(())
    }

    /// Recomputes the maximum over visible series and forwards changes to the labeler.
    pub fn update_max_value(&mut self) {
        let QueryWindow {
            start_time,
            step_size,
            num_of_points,
        } = self.window;
        let max_value = self
            .series
            .iter()
            .filter_map(|store| {
                let mut store = store.borrow_mut();
                store
                    .is_visible()
                    .then(|| store.query_max(start_time, step_size, num_of_points))
            })
            .fold(0.0, f64::max);

        if max_value == self.max_value {
            return;
        }
        trace!(previous = self.max_value, max_value, "chart region max value");
        self.max_value = max_value;
        self.labeler.set_max_value(max_value);
    }

    /// Collects resampled values of visible series plus the axis labels.
    pub fn render_data(&mut self) -> RenderData {
        let QueryWindow {
            start_time,
            step_size,
            num_of_points,
        } = self.window;
        let series = self
            .series
            .iter()
            .filter_map(|store| {
                let mut store = store.borrow_mut();
                if !store.is_visible() {
                    return None;
                }
                let values = store.query(start_time, step_size, num_of_points).to_vec();
                Some(RenderSeries {
                    title: store.title().to_owned(),
                    color: store.color(),
                    values,
                })
            })
            .collect();

        RenderData {
            series,
            labels: self.labeler.labels().to_vec(),
            scale: self.labeler.scale(),
            sample_rate: self.config.sample_rate,
            pixel_offset: self.layout.pixel_offset,
            width: self.layout.width,
            height: self.layout.height,
        }
    }

    /// Projects visible series into pixel-space segments.
    pub fn project_series(&mut self) -> ChartResult<Vec<ProjectedSeries>> {
        let frame = self.render_data();
        let projection = ResampledProjection {
            sample_rate: frame.sample_rate,
            pixel_offset: frame.pixel_offset,
            height: frame.height,
            scale: frame.scale,
        };
        frame
            .series
            .into_iter()
            .map(|series| {
                Ok(ProjectedSeries {
                    segments: project_resampled_segments(&series.values, projection)?,
                    title: series.title,
                    color: series.color,
                })
            })
            .collect()
    }

    /// Runs one draw tick: refreshes the max value and hands the frame to `renderer`.
    pub fn render_with<R: Renderer>(&mut self, renderer: &mut R) -> ChartResult<()> {
        self.update_max_value();
        let frame = self.render_data();
        renderer.render(&frame)
    }
}

/// `floor(width / sample_rate) + 2`, the two extra points covering partial edge pixels.
fn query_point_count(width: f64, sample_rate: f64) -> ChartResult<usize> {
    let whole = (width / sample_rate).floor();
    if !whole.is_finite() || whole > MAX_QUERY_POINTS as f64 {
        return Err(ChartError::InvalidData(format!(
            "region width {width} needs more than {MAX_QUERY_POINTS} query points"
        )));
    }
    (whole as usize)
        .checked_add(2)
        .ok_or_else(|| ChartError::InvalidData(format!("region width {width} is too large")))
}
