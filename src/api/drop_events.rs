use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{Zone, find_field};
use crate::extensions::{BuilderNotice, ZoneWarning};
use crate::render::ChartSurface;

use super::{ChartBuilder, chart_type_rule};

/// A field dropped onto a zone by the configuration panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDrop {
    pub field_id: String,
    pub zone: Zone,
}

impl FieldDrop {
    #[must_use]
    pub fn new(field_id: impl Into<String>, zone: Zone) -> Self {
        Self {
            field_id: field_id.into(),
            zone,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropOutcome {
    Assigned,
    Rejected(ZoneWarning),
}

impl DropOutcome {
    #[must_use]
    pub fn is_assigned(&self) -> bool {
        matches!(self, Self::Assigned)
    }
}

impl<S: ChartSurface> ChartBuilder<S> {
    /// Applies one drop as a single zone replacement.
    ///
    /// A rejected drop leaves the config untouched and sends a
    /// [`BuilderNotice::DropRejected`] to every registered notifier.
    pub fn dispatch_drop(&mut self, drop: FieldDrop) -> DropOutcome {
        match self.set_zone(drop.zone, Some(drop.field_id.as_str())) {
            Ok(()) => DropOutcome::Assigned,
            Err(error) => {
                let warning = self.zone_warning(&drop);
                debug!(
                    field_id = %drop.field_id,
                    zone = %drop.zone,
                    error = %error,
                    "field drop rejected"
                );
                self.notify(&BuilderNotice::DropRejected(warning.clone()));
                DropOutcome::Rejected(warning)
            }
        }
    }

    /// Applies drops in order; each one sees the config left by the previous.
    pub fn dispatch_drops<I>(&mut self, drops: I) -> Vec<DropOutcome>
    where
        I: IntoIterator<Item = FieldDrop>,
    {
        drops
            .into_iter()
            .map(|drop| self.dispatch_drop(drop))
            .collect()
    }

    fn zone_warning(&self, drop: &FieldDrop) -> ZoneWarning {
        let field = find_field(&self.state.fields, &drop.field_id);
        let rule = chart_type_rule(self.state.config.chart_type).zone(drop.zone);
        ZoneWarning {
            field_id: drop.field_id.clone(),
            field_name: field.map_or_else(|| drop.field_id.clone(), |field| field.name.clone()),
            field_kind: field.map(|field| field.kind),
            zone: drop.zone,
            zone_label: if rule.show {
                rule.label.to_owned()
            } else {
                drop.zone.to_string()
            },
            accepted: rule.show.then_some(rule.accepted),
        }
    }
}
