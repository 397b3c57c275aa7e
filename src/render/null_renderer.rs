use crate::error::ChartResult;
use crate::render::{RenderData, Renderer};

/// No-op renderer used by tests and headless usage.
///
/// It still validates frame content so tests catch bad output before a real
/// drawing surface sees it.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub frames: usize,
    pub last_series_count: usize,
    pub last_label_count: usize,
}

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &RenderData) -> ChartResult<()> {
        frame.validate()?;
        self.frames += 1;
        self.last_series_count = frame.series.len();
        self.last_label_count = frame.labels.len();
        Ok(())
    }
}
