use std::sync::Arc;

use smallvec::SmallVec;
use tracing::{debug, trace, warn};

use crate::core::Zone;
use crate::error::ChartResult;
use crate::render::ChartSurface;

use super::builder_state::{SeriesMemo, SpecMemo};
use super::validation::missing_required_zones;
use super::{
    ChartBuilder, ChartSpec, ProcessedChartData, assemble_chart_spec, build_series,
    chart_type_rule,
};

impl<S: ChartSurface> ChartBuilder<S> {
    /// `true` once every zone the active chart type requires holds a
    /// compatible field.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.missing_required_zones().is_empty()
    }

    #[must_use]
    pub fn missing_required_zones(&self) -> SmallVec<[Zone; 4]> {
        missing_required_zones(&self.state.config, &self.state.fields)
    }

    /// Grouped and aggregated series for the current state.
    ///
    /// Returns `Ok(None)` while the builder is not ready; the series builder is
    /// never invoked in that case.
    pub fn processed_data(&mut self) -> ChartResult<Option<Arc<ProcessedChartData>>> {
        if !self.is_ready() {
            return Ok(None);
        }
        if let Some(memo) = self
            .state
            .series_memo
            .as_ref()
            .filter(|memo| memo.matches(&self.state))
        {
            return memo.result.clone().map(Some);
        }

        self.state.stats.series_builds += 1;
        let result = build_series(
            &self.state.records,
            &self.state.config,
            &self.state.fields,
            self.state.geo_index.as_ref(),
        )
        .map(Arc::new);
        self.state.series_memo = Some(SeriesMemo {
            records: Arc::clone(&self.state.records),
            fields: Arc::clone(&self.state.fields),
            config: self.state.config.clone(),
            result: result.clone(),
        });
        result.map(Some)
    }

    /// Renderer-ready spec for the current state.
    ///
    /// Never fails: build errors become an error spec, and a builder that is
    /// not ready yields a title-only placeholder.
    pub fn chart_spec(&mut self) -> Arc<ChartSpec> {
        if let Some(memo) = self
            .state
            .spec_memo
            .as_ref()
            .filter(|memo| memo.matches(&self.state))
        {
            self.state.stats.spec_cache_hits += 1;
            trace!("chart spec served from memo");
            return Arc::clone(&memo.spec);
        }

        let spec = Arc::new(self.build_spec());
        self.state.stats.spec_builds += 1;
        self.state.spec_memo = Some(SpecMemo {
            records: Arc::clone(&self.state.records),
            fields: Arc::clone(&self.state.fields),
            config: self.state.config.clone(),
            options: self.state.options.clone(),
            assembler: self.state.assembler.clone(),
            spec: Arc::clone(&spec),
        });
        spec
    }

    fn build_spec(&mut self) -> ChartSpec {
        match self.processed_data() {
            Ok(Some(data)) => {
                debug!(
                    chart_type = %data.chart_type,
                    series = data.series.len(),
                    "chart spec assembled"
                );
                assemble_chart_spec(&data, &self.state.options, &self.state.assembler)
            }
            Ok(None) => {
                let rule = chart_type_rule(self.state.config.chart_type);
                let missing: SmallVec<[&str; 4]> = self
                    .missing_required_zones()
                    .into_iter()
                    .map(|zone| rule.zone(zone).label)
                    .collect();
                ChartSpec::placeholder(&self.state.options, &missing)
            }
            Err(error) => {
                warn!(
                    error = %error,
                    zone = ?error.zone(),
                    chart_type = %self.state.config.chart_type,
                    "chart build failed"
                );
                ChartSpec::error(error.to_string())
            }
        }
    }
}
