mod null_surface;

pub use null_surface::NullSurface;

use crate::api::ChartSpec;
use crate::error::ChartResult;

/// Contract implemented by any charting surface.
///
/// Surfaces receive a fully assembled, validated-on-demand `ChartSpec` so
/// drawing stays isolated from grouping and aggregation.
pub trait ChartSurface {
    fn present(&mut self, spec: &ChartSpec) -> ChartResult<()>;
}
