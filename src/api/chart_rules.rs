use smallvec::SmallVec;

use crate::core::{AcceptedKind, ChartType, Zone};

/// How one chart type treats one zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZoneRule {
    pub show: bool,
    pub required: bool,
    pub accepted: AcceptedKind,
    pub label: &'static str,
}

impl ZoneRule {
    const HIDDEN: Self = Self {
        show: false,
        required: false,
        accepted: AcceptedKind::Any,
        label: "",
    };

    const fn required(accepted: AcceptedKind, label: &'static str) -> Self {
        Self {
            show: true,
            required: true,
            accepted,
            label,
        }
    }

    const fn optional(accepted: AcceptedKind, label: &'static str) -> Self {
        Self {
            show: true,
            required: false,
            accepted,
            label,
        }
    }
}

/// Zone rules of a chart type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartTypeRule {
    pub chart_type: ChartType,
    pub x_axis: ZoneRule,
    pub y_axis: ZoneRule,
    pub color: ZoneRule,
    pub size: ZoneRule,
}

impl ChartTypeRule {
    #[must_use]
    pub const fn zone(&self, zone: Zone) -> ZoneRule {
        match zone {
            Zone::XAxis => self.x_axis,
            Zone::YAxis => self.y_axis,
            Zone::Color => self.color,
            Zone::Size => self.size,
        }
    }

    /// Zones the chart type renders, in panel order.
    #[must_use]
    pub fn visible_zones(&self) -> SmallVec<[Zone; 4]> {
        Zone::ALL
            .into_iter()
            .filter(|zone| self.zone(*zone).show)
            .collect()
    }

    #[must_use]
    pub fn required_zones(&self) -> SmallVec<[Zone; 4]> {
        Zone::ALL
            .into_iter()
            .filter(|zone| self.zone(*zone).required)
            .collect()
    }
}

const BAR_LIKE_X: ZoneRule = ZoneRule::required(AcceptedKind::Dimension, "X-Axis (Category)");
const BAR_LIKE_Y: ZoneRule = ZoneRule::required(AcceptedKind::Measure, "Y-Axis (Value)");
const BAR_LIKE_COLOR: ZoneRule = ZoneRule::optional(AcceptedKind::Dimension, "Color (Series)");

static CHART_TYPE_RULES: [ChartTypeRule; 6] = [
    ChartTypeRule {
        chart_type: ChartType::Bar,
        x_axis: BAR_LIKE_X,
        y_axis: BAR_LIKE_Y,
        color: BAR_LIKE_COLOR,
        size: ZoneRule::HIDDEN,
    },
    ChartTypeRule {
        chart_type: ChartType::Line,
        x_axis: BAR_LIKE_X,
        y_axis: BAR_LIKE_Y,
        color: BAR_LIKE_COLOR,
        size: ZoneRule::HIDDEN,
    },
    ChartTypeRule {
        chart_type: ChartType::Pie,
        x_axis: ZoneRule::HIDDEN,
        y_axis: ZoneRule::required(AcceptedKind::Measure, "Slice Value"),
        color: ZoneRule::required(AcceptedKind::Dimension, "Slice Category"),
        size: ZoneRule::HIDDEN,
    },
    ChartTypeRule {
        chart_type: ChartType::Scatter,
        x_axis: ZoneRule::required(AcceptedKind::Any, "X-Axis"),
        y_axis: ZoneRule::required(AcceptedKind::Measure, "Y-Axis"),
        color: ZoneRule::optional(AcceptedKind::Dimension, "Color (Group)"),
        size: ZoneRule::optional(AcceptedKind::Measure, "Bubble Size"),
    },
    ChartTypeRule {
        chart_type: ChartType::Map,
        x_axis: ZoneRule::required(AcceptedKind::Dimension, "Region (Place Name)"),
        y_axis: ZoneRule::required(AcceptedKind::Measure, "Value"),
        color: ZoneRule::HIDDEN,
        size: ZoneRule::HIDDEN,
    },
    ChartTypeRule {
        chart_type: ChartType::Treemap,
        x_axis: ZoneRule::required(AcceptedKind::Dimension, "Hierarchy Key"),
        y_axis: ZoneRule::required(AcceptedKind::Measure, "Area Size"),
        color: ZoneRule::optional(AcceptedKind::Dimension, "Parent Group"),
        size: ZoneRule::HIDDEN,
    },
];

/// Rule table entry for `chart_type`.
#[must_use]
pub fn chart_type_rule(chart_type: ChartType) -> &'static ChartTypeRule {
    match chart_type {
        ChartType::Bar => &CHART_TYPE_RULES[0],
        ChartType::Line => &CHART_TYPE_RULES[1],
        ChartType::Pie => &CHART_TYPE_RULES[2],
        ChartType::Scatter => &CHART_TYPE_RULES[3],
        ChartType::Map => &CHART_TYPE_RULES[4],
        ChartType::Treemap => &CHART_TYPE_RULES[5],
    }
}

#[cfg(test)]
mod tests {
    use super::chart_type_rule;
    use crate::core::{ChartType, Zone};

    #[test]
    fn rule_lookup_matches_chart_type() {
        for chart_type in ChartType::ALL {
            assert_eq!(chart_type_rule(chart_type).chart_type, chart_type);
        }
    }

    #[test]
    fn hidden_zones_are_never_required() {
        for chart_type in ChartType::ALL {
            let rule = chart_type_rule(chart_type);
            for zone in Zone::ALL {
                let zone_rule = rule.zone(zone);
                assert!(zone_rule.show || !zone_rule.required, "{chart_type} {zone}");
            }
        }
    }
}
