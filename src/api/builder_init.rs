use std::sync::Arc;

use tracing::debug;

use crate::core::available_fields;
use crate::error::ChartResult;
use crate::extensions::{GeoIndex, WorldCountryIndex};
use crate::render::ChartSurface;

use super::builder_state::{BuildStats, BuilderState};
use super::validation::{validate_assembler_settings, validate_config};
use super::{ChartBuilder, ChartBuilderConfig};

impl<S: ChartSurface> ChartBuilder<S> {
    /// Creates a builder with default config and options and no records.
    pub fn new(surface: S) -> ChartResult<Self> {
        Self::with_config(surface, ChartBuilderConfig::default())
    }

    /// Creates a builder from an explicit bootstrap configuration.
    ///
    /// Field references are checked once records arrive; only the assembler
    /// tunables are validated here.
    pub fn with_config(surface: S, config: ChartBuilderConfig) -> ChartResult<Self> {
        let assembler = validate_assembler_settings(config.assembler)?;
        let records = Arc::new(Vec::new());
        let fields = available_fields(records.first());

        debug!(
            chart_type = %config.chart.chart_type,
            title = %config.options.title,
            "chart builder initialized"
        );
        Ok(Self {
            surface,
            state: BuilderState {
                records,
                fields,
                config: config.chart,
                options: config.options,
                assembler,
                geo_index: Arc::new(WorldCountryIndex),
                notifiers: Vec::new(),
                series_memo: None,
                spec_memo: None,
                stats: BuildStats::default(),
            },
        })
    }

    /// Replaces the geographic index used by map projection.
    #[must_use]
    pub fn with_geo_index(mut self, geo_index: Arc<dyn GeoIndex>) -> Self {
        self.state.geo_index = geo_index;
        self.state.invalidate();
        self
    }

    /// Checks the current config against the current field list without
    /// building anything.
    pub fn validate(&self) -> ChartResult<()> {
        validate_config(&self.state.config, &self.state.fields)
    }
}
