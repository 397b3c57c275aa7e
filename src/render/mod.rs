mod frame;
mod null_renderer;
mod primitives;

pub use frame::{RenderData, RenderSeries};
pub use null_renderer::NullRenderer;
pub use primitives::Color;

use crate::error::ChartResult;

/// Contract implemented by any drawing surface.
///
/// Surfaces receive a fully materialized `RenderData` and own no chart state.
pub trait Renderer {
    fn render(&mut self, frame: &RenderData) -> ChartResult<()>;
}
