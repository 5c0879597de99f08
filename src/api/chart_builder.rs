use std::sync::Arc;

use serde_json::Value;

use crate::core::DataField;
use crate::error::ChartResult;
use crate::render::ChartSurface;

use super::builder_state::{BuildStats, BuilderState};
use super::{AssemblerSettings, ChartConfig, ChartOptions};

/// Main orchestration facade consumed by host applications.
///
/// `ChartBuilder` owns the raw records, the chart configuration and the
/// presentation options, and recomputes the field list, the series and the
/// final spec only when one of their inputs changed.
pub struct ChartBuilder<S: ChartSurface> {
    pub(super) surface: S,
    pub(super) state: BuilderState,
}

impl<S: ChartSurface> ChartBuilder<S> {
    #[must_use]
    pub fn records(&self) -> &Arc<Vec<Value>> {
        &self.state.records
    }

    /// Fields available for the current records.
    ///
    /// The returned `Arc` is identical across calls until the records change.
    #[must_use]
    pub fn available_fields(&self) -> Arc<[DataField]> {
        Arc::clone(&self.state.fields)
    }

    #[must_use]
    pub fn config(&self) -> &ChartConfig {
        &self.state.config
    }

    #[must_use]
    pub fn options(&self) -> &ChartOptions {
        &self.state.options
    }

    #[must_use]
    pub fn assembler_settings(&self) -> &AssemblerSettings {
        &self.state.assembler
    }

    #[must_use]
    pub fn build_stats(&self) -> BuildStats {
        self.state.stats
    }

    /// Hands the current spec to the surface.
    pub fn render(&mut self) -> ChartResult<()> {
        let spec = self.chart_spec();
        self.surface.present(&spec)
    }

    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    #[must_use]
    pub fn into_surface(self) -> S {
        self.surface
    }
}
