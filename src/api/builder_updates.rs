use std::sync::Arc;

use serde_json::Value;
use smallvec::SmallVec;
use tracing::debug;

use crate::core::{Zone, available_fields, find_field};
use crate::error::{ChartError, ChartResult};
use crate::extensions::{BuilderNotice, ChartNotifier};
use crate::render::ChartSurface;

use super::validation::{prune_for_chart_type, validate_assembler_settings, validate_assignment};
use super::{AssemblerSettings, ChartBuilder, ChartConfigPatch, ChartOptionsPatch};

impl<S: ChartSurface> ChartBuilder<S> {
    /// Replaces the raw records.
    pub fn set_records(&mut self, records: Vec<Value>) {
        self.set_records_shared(Arc::new(records));
    }

    /// Replaces the raw records with a shared list.
    ///
    /// Passing the list already held is a no-op, so hosts may call this on
    /// every refresh without losing memoized results.
    pub fn set_records_shared(&mut self, records: Arc<Vec<Value>>) {
        if Arc::ptr_eq(&self.state.records, &records) {
            return;
        }
        self.state.fields = available_fields(records.first());
        debug!(
            records = records.len(),
            fields = self.state.fields.len(),
            "records replaced"
        );
        self.state.records = records;
    }

    /// Merges a partial config. When the chart type changes, zones the new type
    /// hides or whose accepted kind no longer matches are cleared and returned.
    pub fn update_config(&mut self, patch: ChartConfigPatch) -> SmallVec<[Zone; 4]> {
        let previous_type = self.state.config.chart_type;
        self.state.config.merge(patch);
        debug!(
            chart_type = %self.state.config.chart_type,
            assigned = self.state.config.assigned_zones().count(),
            "config merged"
        );

        if self.state.config.chart_type == previous_type {
            return SmallVec::new();
        }
        let cleared = prune_for_chart_type(&mut self.state.config, &self.state.fields);
        if !cleared.is_empty() {
            self.notify(&BuilderNotice::ZonesCleared {
                zones: cleared.to_vec(),
            });
        }
        cleared
    }

    pub fn update_options(&mut self, patch: ChartOptionsPatch) {
        self.state.options.merge(patch);
        debug!(title = %self.state.options.title, "options merged");
    }

    pub fn set_assembler_settings(&mut self, settings: AssemblerSettings) -> ChartResult<()> {
        self.state.assembler = validate_assembler_settings(settings)?;
        Ok(())
    }

    /// Assigns (`Some`) or clears (`None`) a single zone.
    ///
    /// The field must exist and be accepted by the zone for the active chart
    /// type; on error the config is left untouched.
    pub fn set_zone(&mut self, zone: Zone, field_id: Option<&str>) -> ChartResult<()> {
        let Some(field_id) = field_id else {
            self.state.config.set_zone(zone, None);
            debug!(zone = %zone, "zone cleared");
            return Ok(());
        };
        let field = find_field(&self.state.fields, field_id).ok_or_else(|| {
            ChartError::UnknownField {
                zone,
                field_id: field_id.to_owned(),
            }
        })?;
        validate_assignment(self.state.config.chart_type, zone, field)?;
        self.state.config.set_zone(zone, Some(field_id.to_owned()));
        debug!(zone = %zone, field_id, "zone assigned");
        Ok(())
    }

    /// Adds a notifier for rejected drops and cleared zones. Ids are the
    /// handle for [`Self::unregister_notifier`] and must be unique.
    pub fn register_notifier(&mut self, notifier: Box<dyn ChartNotifier>) -> ChartResult<()> {
        let id = notifier.id();
        if id.is_empty() {
            return Err(ChartError::InvalidData(
                "notifier id must not be empty".to_owned(),
            ));
        }
        if self.has_notifier(id) {
            return Err(ChartError::InvalidData(format!(
                "notifier `{id}` is already registered"
            )));
        }
        debug!(notifier = id, "notifier registered");
        self.state.notifiers.push(notifier);
        Ok(())
    }

    /// Returns `true` when a notifier with `id` was removed.
    pub fn unregister_notifier(&mut self, id: &str) -> bool {
        self.notifier_index(id)
            .map(|index| self.state.notifiers.remove(index))
            .is_some()
    }

    #[must_use]
    pub fn notifier_count(&self) -> usize {
        self.state.notifiers.len()
    }

    #[must_use]
    pub fn has_notifier(&self, id: &str) -> bool {
        self.notifier_index(id).is_some()
    }

    fn notifier_index(&self, id: &str) -> Option<usize> {
        self.state
            .notifiers
            .iter()
            .position(|notifier| notifier.id() == id)
    }

    pub(super) fn notify(&mut self, notice: &BuilderNotice) {
        for notifier in &mut self.state.notifiers {
            notifier.notify(notice);
        }
    }
}
