mod chart_region;
mod region_config;

pub use chart_region::{ChartRegion, MAX_QUERY_POINTS, ProjectedSeries, QueryWindow, RegionLayout};
pub use region_config::{ChartRegionConfig, DEFAULT_SAMPLE_RATE};
