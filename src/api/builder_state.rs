use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::DataField;
use crate::error::ChartResult;
use crate::extensions::{ChartNotifier, GeoIndex};

use super::{AssemblerSettings, ChartConfig, ChartOptions, ChartSpec, ProcessedChartData};

/// Counters exposing how often the builder actually recomputed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildStats {
    /// Series builder invocations.
    pub series_builds: u64,
    /// Specs assembled from scratch (including placeholder and error specs).
    pub spec_builds: u64,
    /// `chart_spec` calls answered from the memo.
    pub spec_cache_hits: u64,
}

/// Series result keyed by the inputs it was derived from.
pub(super) struct SeriesMemo {
    pub records: Arc<Vec<Value>>,
    pub fields: Arc<[DataField]>,
    pub config: ChartConfig,
    pub result: ChartResult<Arc<ProcessedChartData>>,
}

impl SeriesMemo {
    pub fn matches(&self, state: &BuilderState) -> bool {
        Arc::ptr_eq(&self.records, &state.records)
            && Arc::ptr_eq(&self.fields, &state.fields)
            && self.config == state.config
    }
}

/// Final spec keyed by `[data, config, options, fields]` plus assembler tunables.
pub(super) struct SpecMemo {
    pub records: Arc<Vec<Value>>,
    pub fields: Arc<[DataField]>,
    pub config: ChartConfig,
    pub options: ChartOptions,
    pub assembler: AssemblerSettings,
    pub spec: Arc<ChartSpec>,
}

impl SpecMemo {
    pub fn matches(&self, state: &BuilderState) -> bool {
        Arc::ptr_eq(&self.records, &state.records)
            && Arc::ptr_eq(&self.fields, &state.fields)
            && self.config == state.config
            && self.options == state.options
            && self.assembler == state.assembler
    }
}

/// Mutable state owned by the builder; changed only through its API.
pub(super) struct BuilderState {
    pub records: Arc<Vec<Value>>,
    pub fields: Arc<[DataField]>,
    pub config: ChartConfig,
    pub options: ChartOptions,
    pub assembler: AssemblerSettings,
    pub geo_index: Arc<dyn GeoIndex>,
    pub notifiers: Vec<Box<dyn ChartNotifier>>,
    pub series_memo: Option<SeriesMemo>,
    pub spec_memo: Option<SpecMemo>,
    pub stats: BuildStats,
}

impl BuilderState {
    /// Drops both memos; used when a collaborator the keys do not cover changes.
    pub fn invalidate(&mut self) {
        self.series_memo = None;
        self.spec_memo = None;
    }
}
