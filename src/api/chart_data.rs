use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::core::ChartType;
use crate::error::ChartError;

/// Slice, region or tile value; tiles may nest children.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedValue {
    pub name: String,
    pub value: f64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NamedValue>,
}

impl NamedValue {
    #[must_use]
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value,
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_children(mut self, children: Vec<NamedValue>) -> Self {
        self.children = children;
        self
    }
}

/// One coordinate of a scatter point: numeric on a value axis, a label on a
/// category axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScatterCoord {
    Number(f64),
    Category(String),
}

/// Scatter point serialized as `[x, y]` or `[x, y, size]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<ScatterCoord>", into = "Vec<ScatterCoord>")]
pub struct ScatterPoint {
    pub x: ScatterCoord,
    pub y: f64,
    pub size: Option<f64>,
}

impl From<ScatterPoint> for Vec<ScatterCoord> {
    fn from(point: ScatterPoint) -> Self {
        let mut coords = vec![point.x, ScatterCoord::Number(point.y)];
        if let Some(size) = point.size {
            coords.push(ScatterCoord::Number(size));
        }
        coords
    }
}

impl TryFrom<Vec<ScatterCoord>> for ScatterPoint {
    type Error = ChartError;

    fn try_from(coords: Vec<ScatterCoord>) -> Result<Self, Self::Error> {
        let mut coords = coords.into_iter();
        let (Some(x), Some(ScatterCoord::Number(y))) = (coords.next(), coords.next()) else {
            return Err(ChartError::InvalidData(
                "scatter point needs an x and a numeric y".to_owned(),
            ));
        };
        let size = match coords.next() {
            None => None,
            Some(ScatterCoord::Number(size)) => Some(size),
            Some(ScatterCoord::Category(_)) => {
                return Err(ChartError::InvalidData(
                    "scatter point size must be numeric".to_owned(),
                ));
            }
        };
        if coords.next().is_some() {
            return Err(ChartError::InvalidData(
                "scatter point has more than three coordinates".to_owned(),
            ));
        }
        Ok(Self { x, y, size })
    }
}

/// Data array of one series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SeriesValues {
    /// Positionally aligned with the category list.
    Values(Vec<f64>),
    Named(Vec<NamedValue>),
    Points(Vec<ScatterPoint>),
}

impl SeriesValues {
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Values(values) => values.len(),
            Self::Named(values) => values.len(),
            Self::Points(points) => points.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesData {
    pub name: String,
    pub chart_type: ChartType,
    pub data: SeriesValues,
    pub stack: Option<String>,
}

/// Explicit range of a continuous visual scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VisualScale {
    pub min: f64,
    pub max: f64,
}

impl VisualScale {
    /// Range of `values`; `None` when empty or degenerate (`min == max`).
    #[must_use]
    pub fn from_values(values: impl IntoIterator<Item = f64>) -> Option<Self> {
        let finite: Vec<OrderedFloat<f64>> = values
            .into_iter()
            .filter(|value| value.is_finite())
            .map(OrderedFloat)
            .collect();
        let min = finite.iter().min()?.into_inner();
        let max = finite.iter().max()?.into_inner();
        (min < max).then_some(Self { min, max })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisKind {
    Category,
    Value,
}

/// Axis metadata gathered while building series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisInfo {
    pub kind: AxisKind,
    pub name: String,
}

/// Output of the series builder; derived, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessedChartData {
    pub chart_type: ChartType,
    pub categories: Option<Vec<String>>,
    pub series: Vec<SeriesData>,
    pub legend_data: Option<Vec<String>>,
    pub visual_scale: Option<VisualScale>,
    pub x_axis: Option<AxisInfo>,
    pub y_axis: Option<AxisInfo>,
}

impl ProcessedChartData {
    #[must_use]
    pub(crate) fn empty(chart_type: ChartType) -> Self {
        Self {
            chart_type,
            categories: None,
            series: Vec::new(),
            legend_data: None,
            visual_scale: None,
            x_axis: None,
            y_axis: None,
        }
    }

    #[must_use]
    pub fn category_count(&self) -> usize {
        self.categories.as_ref().map_or(0, Vec::len)
    }
}
