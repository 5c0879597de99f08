//! Chart-building layer: rule table, configuration, validation, series
//! building, spec assembly and the `ChartBuilder` orchestrator.

mod builder_config;
mod builder_init;
mod builder_outputs;
mod builder_snapshot;
mod builder_state;
mod builder_updates;
mod chart_builder;
mod chart_config;
mod chart_data;
mod chart_rules;
mod chart_spec;
mod drop_events;
mod json_contract;
mod option_assembler;
mod series_builder;
mod validation;

pub use builder_config::ChartBuilderConfig;
pub use builder_snapshot::BuilderSnapshot;
pub use builder_state::BuildStats;
pub use chart_builder::ChartBuilder;
pub use chart_config::{
    ChartConfig, ChartConfigPatch, ChartOptions, ChartOptionsPatch, ZoneAssignment,
};
pub use chart_data::{
    AxisInfo, AxisKind, NamedValue, ProcessedChartData, ScatterCoord, ScatterPoint, SeriesData,
    SeriesValues, VisualScale,
};
pub use chart_rules::{ChartTypeRule, ZoneRule, chart_type_rule};
pub use chart_spec::{
    AxisLabelSpec, AxisSpec, ChartSpec, DataZoomKind, DataZoomSpec, ERROR_TITLE, GridSpec,
    LegendSpec, SeriesSpec, TitleSpec, ToolboxSpec, TooltipSpec, TooltipTrigger, VisualMapSpec,
    VisualRangeSpec,
};
pub use drop_events::{DropOutcome, FieldDrop};
pub use json_contract::{
    BUILDER_SNAPSHOT_JSON_SCHEMA_V1, BuilderSnapshotJsonContractV1, CHART_SPEC_JSON_SCHEMA_V1,
    ChartSpecJsonContractV1,
};
pub use option_assembler::{AssemblerSettings, assemble_chart_spec};
pub use series_builder::build_series;
pub use validation::{is_ready, missing_required_zones, validate_assignment, validate_config};
