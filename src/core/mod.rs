pub mod axis_labeler;
pub mod line_series;
pub mod primitives;
pub mod series_store;
pub mod types;
pub mod units;
pub mod windowing;

pub use axis_labeler::{
    AxisLabeler, DEFAULT_LABEL_PRECISION, DEFAULT_MAX_VERTICAL_LABEL_NUM,
    DEFAULT_MIN_LABEL_VERTICAL_SPACING, MAX_LABEL_PRECISION,
};
pub use line_series::{LineSegment, ResampledProjection, project_resampled_segments};
pub use series_store::{ResampleCacheStats, SeriesStore, SharedSeriesStore};
pub use types::Sample;
pub use units::{UnitKind, UnitTable};
