use std::fmt;

use serde::{Deserialize, Serialize};

/// Role a field plays in a chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// Categorical value used for grouping and axis categories.
    Dimension,
    /// Numeric value reduced with an [`AggregationKind`].
    Measure,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Dimension => "dimension",
            Self::Measure => "measure",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AggregationKind {
    Count,
    Sum,
    Average,
}

impl fmt::Display for AggregationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Count => "count",
            Self::Sum => "sum",
            Self::Average => "average",
        })
    }
}

/// Field kinds a zone accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AcceptedKind {
    Dimension,
    Measure,
    Any,
}

impl AcceptedKind {
    #[must_use]
    pub const fn accepts(self, kind: FieldKind) -> bool {
        matches!(
            (self, kind),
            (Self::Any, _)
                | (Self::Dimension, FieldKind::Dimension)
                | (Self::Measure, FieldKind::Measure)
        )
    }
}

impl fmt::Display for AcceptedKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Dimension => "dimension",
            Self::Measure => "measure",
            Self::Any => "dimension or measure",
        })
    }
}

/// Named configuration slot accepting one field reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Zone {
    XAxis,
    YAxis,
    Color,
    Size,
}

impl Zone {
    pub const ALL: [Zone; 4] = [Zone::XAxis, Zone::YAxis, Zone::Color, Zone::Size];

    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::XAxis => "xAxis",
            Self::YAxis => "yAxis",
            Self::Color => "color",
            Self::Size => "size",
        }
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    #[default]
    Bar,
    Line,
    Pie,
    Scatter,
    Map,
    Treemap,
}

impl ChartType {
    pub const ALL: [ChartType; 6] = [
        ChartType::Bar,
        ChartType::Line,
        ChartType::Pie,
        ChartType::Scatter,
        ChartType::Map,
        ChartType::Treemap,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bar => "bar",
            Self::Line => "line",
            Self::Pie => "pie",
            Self::Scatter => "scatter",
            Self::Map => "map",
            Self::Treemap => "treemap",
        }
    }
}

impl fmt::Display for ChartType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
