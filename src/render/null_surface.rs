use crate::api::ChartSpec;
use crate::error::ChartResult;
use crate::render::ChartSurface;

/// No-op surface used by tests and headless builder usage.
///
/// It still validates the spec so tests catch misaligned series before a real
/// surface is attached.
#[derive(Debug, Default)]
pub struct NullSurface {
    pub present_count: usize,
    pub last_series_count: usize,
    pub last_title: Option<String>,
}

impl ChartSurface for NullSurface {
    fn present(&mut self, spec: &ChartSpec) -> ChartResult<()> {
        spec.validate()?;
        self.present_count += 1;
        self.last_series_count = spec.series.len();
        self.last_title = Some(spec.title.text.clone());
        Ok(())
    }
}
