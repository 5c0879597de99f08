use indexmap::IndexMap;
#[cfg(feature = "parallel-projection")]
use rayon::prelude::*;
use serde_json::Value;
use tracing::{debug, trace};

use crate::core::{
    ChartType, DataField, FieldKind, FlattenedRecord, RepeatingGroup, UNKNOWN_CATEGORY, Zone,
    aggregate, find_field, flatten_by_repeating_group, group_by, unflattened_rows,
};
use crate::error::{ChartError, ChartResult};
use crate::extensions::GeoIndex;

use super::validation::validate_config;
use super::{
    AxisInfo, AxisKind, ChartConfig, NamedValue, ProcessedChartData, ScatterCoord, ScatterPoint,
    SeriesData, SeriesValues, VisualScale,
};

const STACK_GROUP: &str = "total";

/// Fields resolved from the config, one slot per zone.
#[derive(Debug, Clone, Copy)]
struct ZoneFields<'f> {
    chart_type: ChartType,
    x_axis: Option<&'f DataField>,
    y_axis: Option<&'f DataField>,
    color: Option<&'f DataField>,
    size: Option<&'f DataField>,
}

impl<'f> ZoneFields<'f> {
    fn resolve(config: &ChartConfig, fields: &'f [DataField]) -> Self {
        let lookup = |zone| config.field_id(zone).and_then(|id| find_field(fields, id));
        Self {
            chart_type: config.chart_type,
            x_axis: lookup(Zone::XAxis),
            y_axis: lookup(Zone::YAxis),
            color: lookup(Zone::Color),
            size: lookup(Zone::Size),
        }
    }

    fn get(&self, zone: Zone) -> Option<&'f DataField> {
        match zone {
            Zone::XAxis => self.x_axis,
            Zone::YAxis => self.y_axis,
            Zone::Color => self.color,
            Zone::Size => self.size,
        }
    }

    fn required(&self, zone: Zone) -> ChartResult<&'f DataField> {
        self.get(zone).ok_or(ChartError::AggregationData {
            zone,
            chart_type: self.chart_type,
        })
    }

    /// First repeating group any zone's field depends on.
    fn repeating_group(&self) -> Option<&'f RepeatingGroup> {
        let mut groups = Zone::ALL
            .into_iter()
            .filter_map(|zone| self.get(zone))
            .filter_map(DataField::repeating_group);
        let first = groups.next()?;
        if groups.any(|other| other != first) {
            debug!(
                group = first.name(),
                "config references several repeating groups; flattening by the first"
            );
        }
        Some(first)
    }
}

/// Validates `config`, groups and aggregates `records`, and lays the result
/// out as categories, series and legend for the active chart type.
pub fn build_series(
    records: &[Value],
    config: &ChartConfig,
    fields: &[DataField],
    geo_index: &dyn GeoIndex,
) -> ChartResult<ProcessedChartData> {
    validate_config(config, fields)?;
    let zones = ZoneFields::resolve(config, fields);

    let rows = match zones.repeating_group() {
        Some(group) => flatten_by_repeating_group(records, group),
        None => unflattened_rows(records),
    };
    trace!(
        chart_type = %config.chart_type,
        records = records.len(),
        rows = rows.len(),
        "building series"
    );

    match config.chart_type {
        ChartType::Bar | ChartType::Line => build_cartesian(&rows, zones),
        ChartType::Pie => build_pie(&rows, zones),
        ChartType::Scatter => build_scatter(&rows, zones),
        ChartType::Map => build_map(&rows, zones, geo_index),
        ChartType::Treemap => build_treemap(&rows, zones),
    }
}

fn axis(kind: AxisKind, field: &DataField) -> Option<AxisInfo> {
    Some(AxisInfo {
        kind,
        name: field.name.clone(),
    })
}

fn build_cartesian(rows: &[FlattenedRecord<'_>], zones: ZoneFields<'_>) -> ChartResult<ProcessedChartData> {
    let x = zones.required(Zone::XAxis)?;
    let y = zones.required(Zone::YAxis)?;

    let by_category = group_by(rows, x);
    let categories: Vec<String> = by_category.keys().cloned().collect();

    let (series, legend_data) = match zones.color {
        None => {
            let values: Vec<f64> = aggregate(&by_category, y).into_values().collect();
            let series = vec![SeriesData {
                name: y.name.clone(),
                chart_type: zones.chart_type,
                data: SeriesValues::Values(values),
                stack: None,
            }];
            (series, None)
        }
        Some(color) => {
            let by_color = group_by(rows, color);
            let legend: Vec<String> = by_color.keys().cloned().collect();
            let series: Vec<SeriesData> = by_color
                .iter()
                .map(|(legend_value, subset)| {
                    let per_category = aggregate(&group_by(subset, x), y);
                    let aligned: Vec<f64> = categories
                        .iter()
                        .map(|category| per_category.get(category).copied().unwrap_or(0.0))
                        .collect();
                    SeriesData {
                        name: legend_value.clone(),
                        chart_type: zones.chart_type,
                        data: SeriesValues::Values(aligned),
                        stack: Some(STACK_GROUP.to_owned()),
                    }
                })
                .collect();
            (series, Some(legend))
        }
    };

    Ok(ProcessedChartData {
        categories: Some(categories),
        series,
        legend_data,
        x_axis: axis(AxisKind::Category, x),
        y_axis: axis(AxisKind::Value, y),
        ..ProcessedChartData::empty(zones.chart_type)
    })
}

fn build_pie(rows: &[FlattenedRecord<'_>], zones: ZoneFields<'_>) -> ChartResult<ProcessedChartData> {
    let y = zones.required(Zone::YAxis)?;
    let color = zones.required(Zone::Color)?;

    let slices = aggregate(&group_by(rows, color), y);
    let legend: Vec<String> = slices.keys().cloned().collect();
    let data: Vec<NamedValue> = slices
        .into_iter()
        .map(|(name, value)| NamedValue::new(name, value))
        .collect();

    Ok(ProcessedChartData {
        series: vec![SeriesData {
            name: y.name.clone(),
            chart_type: ChartType::Pie,
            data: SeriesValues::Named(data),
            stack: None,
        }],
        legend_data: Some(legend),
        ..ProcessedChartData::empty(ChartType::Pie)
    })
}

/// Projects one row to a scatter point; rows without a usable x or y are
/// dropped rather than defaulted.
fn scatter_point(
    row: &FlattenedRecord<'_>,
    x: &DataField,
    y: &DataField,
    size: Option<&DataField>,
) -> Option<ScatterPoint> {
    let x_value = x.extract(row)?;
    let x_coord = match x.kind {
        FieldKind::Measure => ScatterCoord::Number(x_value.as_number()?),
        FieldKind::Dimension => ScatterCoord::Category(x_value.label()),
    };
    let y_value = y.extract(row)?.as_number()?;
    let size_value = size
        .and_then(|field| field.extract(row))
        .and_then(|value| value.as_number());
    Some(ScatterPoint {
        x: x_coord,
        y: y_value,
        size: size_value,
    })
}

fn project_scatter_points(
    rows: &[FlattenedRecord<'_>],
    x: &DataField,
    y: &DataField,
    size: Option<&DataField>,
) -> Vec<ScatterPoint> {
    // Ordered collect keeps the parallel output identical to the serial one.
    #[cfg(feature = "parallel-projection")]
    {
        rows.par_iter()
            .filter_map(|row| scatter_point(row, x, y, size))
            .collect()
    }

    #[cfg(not(feature = "parallel-projection"))]
    {
        rows.iter()
            .filter_map(|row| scatter_point(row, x, y, size))
            .collect()
    }
}

fn build_scatter(rows: &[FlattenedRecord<'_>], zones: ZoneFields<'_>) -> ChartResult<ProcessedChartData> {
    let x = zones.required(Zone::XAxis)?;
    let y = zones.required(Zone::YAxis)?;

    let (series, legend_data) = match zones.color {
        None => {
            let points = project_scatter_points(rows, x, y, zones.size);
            let series = vec![SeriesData {
                name: y.name.clone(),
                chart_type: ChartType::Scatter,
                data: SeriesValues::Points(points),
                stack: None,
            }];
            (series, None)
        }
        Some(color) => {
            let by_color = group_by(rows, color);
            let legend: Vec<String> = by_color.keys().cloned().collect();
            let series: Vec<SeriesData> = by_color
                .iter()
                .map(|(legend_value, subset)| SeriesData {
                    name: legend_value.clone(),
                    chart_type: ChartType::Scatter,
                    data: SeriesValues::Points(project_scatter_points(subset, x, y, zones.size)),
                    stack: None,
                })
                .collect();
            (series, Some(legend))
        }
    };

    let points = || {
        series.iter().flat_map(|series| match &series.data {
            SeriesValues::Points(points) => points.as_slice(),
            _ => &[][..],
        })
    };

    let (x_kind, categories) = match x.kind {
        FieldKind::Measure => (AxisKind::Value, None),
        FieldKind::Dimension => {
            let mut labels: Vec<String> = points()
                .filter_map(|point| match &point.x {
                    ScatterCoord::Category(label) => Some(label.clone()),
                    ScatterCoord::Number(_) => None,
                })
                .collect();
            labels.sort();
            labels.dedup();
            (AxisKind::Category, Some(labels))
        }
    };
    let visual_scale = zones
        .size
        .and_then(|_| VisualScale::from_values(points().filter_map(|point| point.size)));

    Ok(ProcessedChartData {
        categories,
        visual_scale,
        x_axis: axis(x_kind, x),
        y_axis: axis(AxisKind::Value, y),
        series,
        legend_data,
        ..ProcessedChartData::empty(ChartType::Scatter)
    })
}

fn build_map(
    rows: &[FlattenedRecord<'_>],
    zones: ZoneFields<'_>,
    geo_index: &dyn GeoIndex,
) -> ChartResult<ProcessedChartData> {
    let x = zones.required(Zone::XAxis)?;
    let y = zones.required(Zone::YAxis)?;

    let per_place = aggregate(&group_by(rows, x), y);
    // Resolvability only filters the projection; aggregation above saw every row.
    let data: Vec<NamedValue> = per_place
        .into_iter()
        .filter(|(name, _)| geo_index.is_recognized(name))
        .map(|(name, value)| NamedValue::new(name, value))
        .collect();
    let visual_scale = VisualScale::from_values(data.iter().map(|entry| entry.value));

    Ok(ProcessedChartData {
        series: vec![SeriesData {
            name: y.name.clone(),
            chart_type: ChartType::Map,
            data: SeriesValues::Named(data),
            stack: None,
        }],
        visual_scale,
        ..ProcessedChartData::empty(ChartType::Map)
    })
}

fn known_tiles(aggregated: IndexMap<String, f64>) -> Vec<NamedValue> {
    aggregated
        .into_iter()
        .filter(|(name, _)| name != UNKNOWN_CATEGORY)
        .map(|(name, value)| NamedValue::new(name, value))
        .collect()
}

fn build_treemap(rows: &[FlattenedRecord<'_>], zones: ZoneFields<'_>) -> ChartResult<ProcessedChartData> {
    let x = zones.required(Zone::XAxis)?;
    let y = zones.required(Zone::YAxis)?;

    let data: Vec<NamedValue> = match zones.color {
        None => known_tiles(aggregate(&group_by(rows, x), y)),
        Some(color) => group_by(rows, color)
            .iter()
            .filter(|(parent, _)| parent.as_str() != UNKNOWN_CATEGORY)
            .filter_map(|(parent, subset)| {
                let children = known_tiles(aggregate(&group_by(subset, x), y));
                if children.is_empty() {
                    return None;
                }
                let total = children.iter().map(|child| child.value).sum();
                Some(NamedValue::new(parent.clone(), total).with_children(children))
            })
            .collect(),
    };

    Ok(ProcessedChartData {
        series: vec![SeriesData {
            name: y.name.clone(),
            chart_type: ChartType::Treemap,
            data: SeriesValues::Named(data),
            stack: None,
        }],
        ..ProcessedChartData::empty(ChartType::Treemap)
    })
}
