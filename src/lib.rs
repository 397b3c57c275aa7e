//! linechart-rs: headless time-series line-chart engine.
//!
//! Samples are pushed into [`core::SeriesStore`]s, resampled per draw tick by
//! a [`api::ChartRegion`] and handed with axis labels to an external
//! [`render::Renderer`] that paints pixels.

pub mod api;
pub mod core;
pub mod error;
pub mod render;
pub mod telemetry;

pub use api::{ChartRegion, ChartRegionConfig, RegionLayout};
pub use self::core::{AxisLabeler, SeriesStore, SharedSeriesStore};
pub use error::{ChartError, ChartResult};
