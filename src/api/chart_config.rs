use serde::{Deserialize, Serialize};

use crate::core::{ChartType, Zone};
use crate::error::{ChartError, ChartResult};

/// Field reference held by one zone.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneAssignment {
    #[serde(default)]
    pub field_id: Option<String>,
}

impl ZoneAssignment {
    #[must_use]
    pub fn field(field_id: impl Into<String>) -> Self {
        Self {
            field_id: Some(field_id.into()),
        }
    }

    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }
}

/// Chart type plus the field assigned to each zone.
///
/// Serializable so hosts can hand a configuration across a process boundary;
/// it is never persisted by the builder.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartConfig {
    #[serde(default)]
    pub chart_type: ChartType,
    #[serde(default)]
    pub x_axis: ZoneAssignment,
    #[serde(default)]
    pub y_axis: ZoneAssignment,
    #[serde(default)]
    pub color: ZoneAssignment,
    #[serde(default)]
    pub size: ZoneAssignment,
}

impl ChartConfig {
    #[must_use]
    pub fn new(chart_type: ChartType) -> Self {
        Self {
            chart_type,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_zone(mut self, zone: Zone, field_id: impl Into<String>) -> Self {
        self.set_zone(zone, Some(field_id.into()));
        self
    }

    #[must_use]
    pub fn zone(&self, zone: Zone) -> &ZoneAssignment {
        match zone {
            Zone::XAxis => &self.x_axis,
            Zone::YAxis => &self.y_axis,
            Zone::Color => &self.color,
            Zone::Size => &self.size,
        }
    }

    #[must_use]
    pub fn field_id(&self, zone: Zone) -> Option<&str> {
        self.zone(zone).field_id.as_deref()
    }

    /// Replaces exactly one zone.
    pub fn set_zone(&mut self, zone: Zone, field_id: Option<String>) {
        let slot = match zone {
            Zone::XAxis => &mut self.x_axis,
            Zone::YAxis => &mut self.y_axis,
            Zone::Color => &mut self.color,
            Zone::Size => &mut self.size,
        };
        slot.field_id = field_id;
    }

    /// Filled zones in panel order.
    pub fn assigned_zones(&self) -> impl Iterator<Item = (Zone, &str)> {
        Zone::ALL
            .into_iter()
            .filter_map(|zone| self.field_id(zone).map(|id| (zone, id)))
    }

    /// Merges `patch`; only the fields it carries change.
    pub fn merge(&mut self, patch: ChartConfigPatch) {
        if let Some(chart_type) = patch.chart_type {
            self.chart_type = chart_type;
        }
        for (zone, assignment) in [
            (Zone::XAxis, patch.x_axis),
            (Zone::YAxis, patch.y_axis),
            (Zone::Color, patch.color),
            (Zone::Size, patch.size),
        ] {
            if let Some(assignment) = assignment {
                self.set_zone(zone, assignment.field_id);
            }
        }
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse chart config: {e}")))
    }
}

/// Partial update of a [`ChartConfig`]; `None` leaves the target untouched.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartConfigPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chart_type: Option<ChartType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x_axis: Option<ZoneAssignment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y_axis: Option<ZoneAssignment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<ZoneAssignment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<ZoneAssignment>,
}

impl ChartConfigPatch {
    #[must_use]
    pub fn with_chart_type(mut self, chart_type: ChartType) -> Self {
        self.chart_type = Some(chart_type);
        self
    }

    /// Sets (`Some`) or clears (`None`) one zone.
    #[must_use]
    pub fn with_zone(mut self, zone: Zone, field_id: Option<&str>) -> Self {
        let assignment = Some(ZoneAssignment {
            field_id: field_id.map(str::to_owned),
        });
        match zone {
            Zone::XAxis => self.x_axis = assignment,
            Zone::YAxis => self.y_axis = assignment,
            Zone::Color => self.color = assignment,
            Zone::Size => self.size = assignment,
        }
        self
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse chart config patch: {e}")))
    }
}

/// Presentation options layered on top of the computed series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartOptions {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_true")]
    pub show_legend: bool,
    #[serde(default = "default_true")]
    pub show_toolbox: bool,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            title: default_title(),
            show_legend: true,
            show_toolbox: true,
        }
    }
}

impl ChartOptions {
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn merge(&mut self, patch: ChartOptionsPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(show_legend) = patch.show_legend {
            self.show_legend = show_legend;
        }
        if let Some(show_toolbox) = patch.show_toolbox {
            self.show_toolbox = show_toolbox;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartOptionsPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_legend: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_toolbox: Option<bool>,
}

impl ChartOptionsPatch {
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn with_show_legend(mut self, show_legend: bool) -> Self {
        self.show_legend = Some(show_legend);
        self
    }

    #[must_use]
    pub fn with_show_toolbox(mut self, show_toolbox: bool) -> Self {
        self.show_toolbox = Some(show_toolbox);
        self
    }
}

fn default_title() -> String {
    "Conference Analysis".to_owned()
}

fn default_true() -> bool {
    true
}
