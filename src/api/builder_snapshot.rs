use serde::{Deserialize, Serialize};

use crate::core::Zone;
use crate::render::ChartSurface;

use super::builder_state::BuildStats;
use super::{ChartBuilder, ChartConfig, ChartOptions};

/// Serializable builder state snapshot used by regression tests and debugging
/// tooling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuilderSnapshot {
    pub config: ChartConfig,
    pub options: ChartOptions,
    pub is_ready: bool,
    pub missing_zones: Vec<Zone>,
    pub record_count: usize,
    pub field_ids: Vec<String>,
    pub build_stats: BuildStats,
}

impl<S: ChartSurface> ChartBuilder<S> {
    #[must_use]
    pub fn snapshot(&self) -> BuilderSnapshot {
        let missing_zones = self.missing_required_zones().to_vec();
        BuilderSnapshot {
            config: self.state.config.clone(),
            options: self.state.options.clone(),
            is_ready: missing_zones.is_empty(),
            missing_zones,
            record_count: self.state.records.len(),
            field_ids: self
                .state
                .fields
                .iter()
                .map(|field| field.id.clone())
                .collect(),
            build_stats: self.state.stats,
        }
    }
}
