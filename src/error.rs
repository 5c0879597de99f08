use thiserror::Error;

use crate::core::{AcceptedKind, ChartType, FieldKind, Zone};

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ChartError {
    #[error("zone `{zone}` expects a {expected} field, but `{field_id}` is a {actual}")]
    ConfigValidation {
        zone: Zone,
        field_id: String,
        expected: AcceptedKind,
        actual: FieldKind,
    },

    #[error("zone `{zone}` is not used by {chart_type} charts")]
    ZoneNotApplicable { zone: Zone, chart_type: ChartType },

    #[error("zone `{zone}` references unknown field `{field_id}`")]
    UnknownField { zone: Zone, field_id: String },

    #[error("required zone `{zone}` is empty for {chart_type} chart")]
    AggregationData { zone: Zone, chart_type: ChartType },

    #[error("invalid data: {0}")]
    InvalidData(String),
}

impl ChartError {
    /// Returns `true` for zone/field assignment problems that the user can fix
    /// by re-assigning a field.
    #[must_use]
    pub fn is_config_validation(&self) -> bool {
        matches!(
            self,
            Self::ConfigValidation { .. } | Self::ZoneNotApplicable { .. } | Self::UnknownField { .. }
        )
    }

    /// Zone the error is attached to, if any.
    #[must_use]
    pub fn zone(&self) -> Option<Zone> {
        match self {
            Self::ConfigValidation { zone, .. }
            | Self::ZoneNotApplicable { zone, .. }
            | Self::UnknownField { zone, .. }
            | Self::AggregationData { zone, .. } => Some(*zone),
            Self::InvalidData(_) => None,
        }
    }
}
