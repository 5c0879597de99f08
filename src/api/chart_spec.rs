use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::ChartType;
use crate::error::{ChartError, ChartResult};

use super::{AxisKind, ChartOptions, SeriesValues};

pub const ERROR_TITLE: &str = "Error Generating Chart";

/// Renderer-ready declarative chart specification.
///
/// Field names follow the option schema of the charting surface (camelCase,
/// `type` discriminators), so the serialized form can be handed over as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSpec {
    pub title: TitleSpec,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tooltip: Option<TooltipSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legend: Option<LegendSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub toolbox: Option<ToolboxSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grid: Option<GridSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x_axis: Option<AxisSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y_axis: Option<AxisSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visual_map: Option<VisualMapSpec>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub data_zoom: Vec<DataZoomSpec>,
    #[serde(default)]
    pub series: Vec<SeriesSpec>,
}

impl ChartSpec {
    /// Spec carrying only a title; no axes and no series.
    #[must_use]
    pub fn titled(text: impl Into<String>, subtext: Option<String>) -> Self {
        Self {
            title: TitleSpec {
                text: text.into(),
                subtext,
                left: TitleSpec::CENTER.to_owned(),
            },
            tooltip: None,
            legend: None,
            toolbox: None,
            grid: None,
            x_axis: None,
            y_axis: None,
            visual_map: None,
            data_zoom: Vec::new(),
            series: Vec::new(),
        }
    }

    /// Degenerate spec shown in place of a chart that failed to build.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self::titled(ERROR_TITLE, Some(message.into()))
    }

    /// Spec shown while required zones are still empty.
    #[must_use]
    pub fn placeholder(options: &ChartOptions, missing_labels: &[&str]) -> Self {
        let subtext = (!missing_labels.is_empty())
            .then(|| format!("Assign a field to: {}", missing_labels.join(", ")));
        Self::titled(options.title.clone(), subtext)
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        self.title.text == ERROR_TITLE && self.series.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TitleSpec {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtext: Option<String>,
    pub left: String,
}

impl TitleSpec {
    pub const CENTER: &'static str = "center";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TooltipTrigger {
    Axis,
    Item,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TooltipSpec {
    pub trigger: TooltipTrigger,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegendSpec {
    #[serde(rename = "type")]
    pub kind: String,
    pub data: Vec<String>,
    pub bottom: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolboxSpec {
    pub show: bool,
    pub feature: IndexMap<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridSpec {
    pub left: String,
    pub right: String,
    pub bottom: u32,
    pub contain_label: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AxisLabelSpec {
    pub rotate: f64,
    /// `Some(0)` shows every label; `None` lets the surface thin them out.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AxisSpec {
    #[serde(rename = "type")]
    pub kind: AxisKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub axis_label: Option<AxisLabelSpec>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualRangeSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol_size: Option<[f64; 2]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualMapSpec {
    pub min: f64,
    pub max: f64,
    pub calculable: bool,
    /// Data dimension the scale reads (2 = bubble size of `[x, y, size]`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimension: Option<u32>,
    pub left: String,
    pub bottom: u32,
    pub in_range: VisualRangeSpec,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataZoomKind {
    Slider,
    Inside,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataZoomSpec {
    #[serde(rename = "type")]
    pub kind: DataZoomKind,
    pub x_axis_index: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bottom: Option<u32>,
    pub start: f64,
    pub end: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesSpec {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ChartType,
    pub data: SeriesValues,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub map: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roam: Option<bool>,
}

impl ChartSpec {
    /// Checks the structural guarantees a surface relies on: category-aligned
    /// value arrays and finite numbers.
    pub fn validate(&self) -> ChartResult<()> {
        let category_count = self
            .x_axis
            .as_ref()
            .filter(|axis| axis.kind == AxisKind::Category)
            .and_then(|axis| axis.data.as_ref())
            .map(Vec::len);

        for series in &self.series {
            let finite = match &series.data {
                SeriesValues::Values(values) => {
                    if let Some(expected) = category_count {
                        if values.len() != expected {
                            return Err(ChartError::InvalidData(format!(
                                "series `{}` has {} values for {expected} categories",
                                series.name,
                                values.len()
                            )));
                        }
                    }
                    values.iter().all(|value| value.is_finite())
                }
                SeriesValues::Named(values) => values.iter().all(|entry| entry.value.is_finite()),
                SeriesValues::Points(points) => points.iter().all(|point| {
                    point.y.is_finite() && point.size.is_none_or(f64::is_finite)
                }),
            };
            if !finite {
                return Err(ChartError::InvalidData(format!(
                    "series `{}` contains non-finite values",
                    series.name
                )));
            }
        }
        Ok(())
    }
}
