use smallvec::SmallVec;
use tracing::debug;

use crate::core::{ChartType, DataField, Zone, find_field};
use crate::error::{ChartError, ChartResult};

use super::{AssemblerSettings, ChartConfig, chart_type_rule};

/// Checks that `field` may sit in `zone` for `chart_type`.
pub fn validate_assignment(chart_type: ChartType, zone: Zone, field: &DataField) -> ChartResult<()> {
    let rule = chart_type_rule(chart_type).zone(zone);
    if !rule.show {
        return Err(ChartError::ZoneNotApplicable { zone, chart_type });
    }
    if !rule.accepted.accepts(field.kind) {
        return Err(ChartError::ConfigValidation {
            zone,
            field_id: field.id.clone(),
            expected: rule.accepted,
            actual: field.kind,
        });
    }
    Ok(())
}

/// Validates every filled zone of `config` against the rule table.
///
/// Runs before any grouping so a mismatch costs nothing and names the zone.
pub fn validate_config(config: &ChartConfig, fields: &[DataField]) -> ChartResult<()> {
    for (zone, field_id) in config.assigned_zones() {
        let field = find_field(fields, field_id).ok_or_else(|| ChartError::UnknownField {
            zone,
            field_id: field_id.to_owned(),
        })?;
        validate_assignment(config.chart_type, zone, field)?;
    }
    Ok(())
}

/// Required zones of the active chart type that hold no compatible field.
///
/// A zone holding an unknown id or a field of the wrong kind counts as
/// missing, so a merged-in mismatch never reaches the series builder.
#[must_use]
pub fn missing_required_zones(config: &ChartConfig, fields: &[DataField]) -> SmallVec<[Zone; 4]> {
    chart_type_rule(config.chart_type)
        .required_zones()
        .into_iter()
        .filter(|zone| {
            match config.field_id(*zone).and_then(|id| find_field(fields, id)) {
                Some(field) => validate_assignment(config.chart_type, *zone, field).is_err(),
                None => true,
            }
        })
        .collect()
}

#[must_use]
pub fn is_ready(config: &ChartConfig, fields: &[DataField]) -> bool {
    missing_required_zones(config, fields).is_empty()
}

/// Clears zones the chart type hides or whose field kind it no longer accepts.
/// Unknown field ids are left for [`validate_config`] to report.
pub(super) fn prune_for_chart_type(
    config: &mut ChartConfig,
    fields: &[DataField],
) -> SmallVec<[Zone; 4]> {
    let stale: SmallVec<[Zone; 4]> = config
        .assigned_zones()
        .filter(|(zone, field_id)| match find_field(fields, field_id) {
            Some(field) => validate_assignment(config.chart_type, *zone, field).is_err(),
            None => !chart_type_rule(config.chart_type).zone(*zone).show,
        })
        .map(|(zone, _)| zone)
        .collect();
    for zone in &stale {
        debug!(zone = %zone, chart_type = %config.chart_type, "clearing incompatible zone");
        config.set_zone(*zone, None);
    }
    stale
}

pub(super) fn validate_assembler_settings(settings: AssemblerSettings) -> ChartResult<AssemblerSettings> {
    if settings.zoom_category_threshold == 0 {
        return Err(ChartError::InvalidData(
            "assembler `zoom_category_threshold` must be > 0".to_owned(),
        ));
    }
    if !settings.label_rotate_degrees.is_finite() || settings.label_rotate_degrees.abs() > 90.0 {
        return Err(ChartError::InvalidData(
            "assembler `label_rotate_degrees` must be finite and within [-90, 90]".to_owned(),
        ));
    }
    let [min_size, max_size] = settings.symbol_size_range;
    if !min_size.is_finite() || !max_size.is_finite() || min_size <= 0.0 || min_size > max_size {
        return Err(ChartError::InvalidData(
            "assembler `symbol_size_range` must be finite, positive and ordered".to_owned(),
        ));
    }
    if settings.map_name.trim().is_empty() {
        return Err(ChartError::InvalidData(
            "assembler `map_name` must not be empty".to_owned(),
        ));
    }
    Ok(settings)
}
