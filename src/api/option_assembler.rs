use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::core::ChartType;

use super::{
    AxisInfo, AxisKind, AxisLabelSpec, AxisSpec, ChartOptions, ChartSpec, DataZoomKind,
    DataZoomSpec, GridSpec, LegendSpec, ProcessedChartData, SeriesData, SeriesSpec,
    ToolboxSpec, TooltipSpec, TooltipTrigger, VisualMapSpec, VisualRangeSpec,
};

const GRID_BOTTOM_BASE_PX: u32 = 20;
const LEGEND_BAND_PX: u32 = 30;
const ZOOM_SLIDER_BAND_PX: u32 = 40;
const ZOOM_SLIDER_MIN_BOTTOM_PX: u32 = 10;
const PIE_RADIUS: &str = "55%";
const CHOROPLETH_COLORS: [&str; 2] = ["#e0f3f8", "#4575b4"];

/// Tunables of the option assembler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssemblerSettings {
    /// Category axes with more labels than this get rotated, auto-thinned labels.
    #[serde(default = "default_label_rotate_threshold")]
    pub label_rotate_threshold: usize,
    #[serde(default = "default_label_rotate_degrees")]
    pub label_rotate_degrees: f64,
    /// Category axes with more categories than this get a range selector.
    #[serde(default = "default_zoom_category_threshold")]
    pub zoom_category_threshold: usize,
    #[serde(default = "default_symbol_size_range")]
    pub symbol_size_range: [f64; 2],
    #[serde(default = "default_map_name")]
    pub map_name: String,
}

impl Default for AssemblerSettings {
    fn default() -> Self {
        Self {
            label_rotate_threshold: default_label_rotate_threshold(),
            label_rotate_degrees: default_label_rotate_degrees(),
            zoom_category_threshold: default_zoom_category_threshold(),
            symbol_size_range: default_symbol_size_range(),
            map_name: default_map_name(),
        }
    }
}

fn default_label_rotate_threshold() -> usize {
    10
}

fn default_label_rotate_degrees() -> f64 {
    45.0
}

fn default_zoom_category_threshold() -> usize {
    20
}

fn default_symbol_size_range() -> [f64; 2] {
    [10.0, 50.0]
}

fn default_map_name() -> String {
    "world".to_owned()
}

const fn has_axes(chart_type: ChartType) -> bool {
    matches!(
        chart_type,
        ChartType::Bar | ChartType::Line | ChartType::Scatter
    )
}

/// Merges processed series with presentation options into a full spec.
#[must_use]
pub fn assemble_chart_spec(
    data: &ProcessedChartData,
    options: &ChartOptions,
    settings: &AssemblerSettings,
) -> ChartSpec {
    let mut spec = ChartSpec::titled(options.title.clone(), None);
    spec.tooltip = Some(TooltipSpec {
        trigger: match data.chart_type {
            ChartType::Bar | ChartType::Line => TooltipTrigger::Axis,
            _ => TooltipTrigger::Item,
        },
    });

    spec.legend = data
        .legend_data
        .as_ref()
        .filter(|legend| options.show_legend && !legend.is_empty())
        .map(|legend| LegendSpec {
            kind: "scroll".to_owned(),
            data: legend.clone(),
            bottom: 0,
        });
    let legend_shown = spec.legend.is_some();

    if options.show_toolbox {
        spec.toolbox = Some(toolbox());
    }

    if has_axes(data.chart_type) {
        spec.x_axis = data
            .x_axis
            .as_ref()
            .map(|info| x_axis_spec(info, data, settings));
        spec.y_axis = data.y_axis.as_ref().map(|info| AxisSpec {
            kind: AxisKind::Value,
            name: Some(info.name.clone()),
            data: None,
            axis_label: None,
        });

        let zoomable = match spec.x_axis.as_ref().map(|axis| axis.kind) {
            Some(AxisKind::Value) => true,
            Some(AxisKind::Category) => data.category_count() > settings.zoom_category_threshold,
            None => false,
        };
        if zoomable {
            spec.data_zoom = range_selector(legend_shown);
        }
        spec.grid = Some(GridSpec {
            left: "3%".to_owned(),
            right: "4%".to_owned(),
            bottom: grid_bottom(legend_shown, zoomable),
            contain_label: true,
        });
    }

    spec.visual_map = data.visual_scale.map(|scale| {
        let bubble = data.chart_type == ChartType::Scatter;
        VisualMapSpec {
            min: scale.min,
            max: scale.max,
            calculable: true,
            dimension: bubble.then_some(2),
            left: "left".to_owned(),
            bottom: if legend_shown { LEGEND_BAND_PX } else { GRID_BOTTOM_BASE_PX },
            in_range: if bubble {
                VisualRangeSpec {
                    symbol_size: Some(settings.symbol_size_range),
                    color: None,
                }
            } else {
                VisualRangeSpec {
                    symbol_size: None,
                    color: Some(CHOROPLETH_COLORS.iter().map(|c| (*c).to_owned()).collect()),
                }
            },
        }
    });

    spec.series = data
        .series
        .iter()
        .map(|series| series_spec(series, settings))
        .collect();
    spec
}

fn toolbox() -> ToolboxSpec {
    let mut feature = IndexMap::new();
    feature.insert("saveAsImage".to_owned(), json!({}));
    feature.insert("dataView".to_owned(), json!({ "readOnly": true }));
    feature.insert("restore".to_owned(), json!({}));
    ToolboxSpec {
        show: true,
        feature,
    }
}

fn x_axis_spec(info: &AxisInfo, data: &ProcessedChartData, settings: &AssemblerSettings) -> AxisSpec {
    match info.kind {
        AxisKind::Value => AxisSpec {
            kind: AxisKind::Value,
            name: Some(info.name.clone()),
            data: None,
            axis_label: None,
        },
        AxisKind::Category => {
            let crowded = data.category_count() > settings.label_rotate_threshold;
            AxisSpec {
                kind: AxisKind::Category,
                name: Some(info.name.clone()),
                data: Some(data.categories.clone().unwrap_or_default()),
                axis_label: Some(if crowded {
                    AxisLabelSpec {
                        rotate: settings.label_rotate_degrees,
                        interval: None,
                    }
                } else {
                    AxisLabelSpec {
                        rotate: 0.0,
                        interval: Some(0),
                    }
                }),
            }
        }
    }
}

/// Slider plus wheel/drag zoom on the primary axis. The slider sits above the
/// legend band when a legend is shown.
fn range_selector(legend_shown: bool) -> Vec<DataZoomSpec> {
    let slider_bottom = if legend_shown {
        LEGEND_BAND_PX
    } else {
        ZOOM_SLIDER_MIN_BOTTOM_PX
    };
    vec![
        DataZoomSpec {
            kind: DataZoomKind::Slider,
            x_axis_index: 0,
            bottom: Some(slider_bottom),
            start: 0.0,
            end: 100.0,
        },
        DataZoomSpec {
            kind: DataZoomKind::Inside,
            x_axis_index: 0,
            bottom: None,
            start: 0.0,
            end: 100.0,
        },
    ]
}

fn grid_bottom(legend_shown: bool, zoomable: bool) -> u32 {
    let mut bottom = GRID_BOTTOM_BASE_PX;
    if legend_shown {
        bottom += LEGEND_BAND_PX;
    }
    if zoomable {
        bottom += ZOOM_SLIDER_BAND_PX;
    }
    bottom
}

fn series_spec(series: &SeriesData, settings: &AssemblerSettings) -> SeriesSpec {
    let mut spec = SeriesSpec {
        name: series.name.clone(),
        kind: series.chart_type,
        data: series.data.clone(),
        stack: series.stack.clone(),
        radius: None,
        map: None,
        roam: None,
    };
    match series.chart_type {
        ChartType::Pie => spec.radius = Some(PIE_RADIUS.to_owned()),
        ChartType::Map => {
            spec.map = Some(settings.map_name.clone());
            spec.roam = Some(true);
        }
        ChartType::Treemap => spec.roam = Some(false),
        ChartType::Bar | ChartType::Line | ChartType::Scatter => {}
    }
    spec
}

#[cfg(test)]
mod tests {
    use super::grid_bottom;

    #[test]
    fn grid_bottom_reserves_legend_and_slider_bands() {
        assert_eq!(grid_bottom(false, false), 20);
        assert_eq!(grid_bottom(true, false), 50);
        assert_eq!(grid_bottom(false, true), 60);
        assert_eq!(grid_bottom(true, true), 90);
    }
}
