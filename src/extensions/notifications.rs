use serde::{Deserialize, Serialize};

use crate::core::{AcceptedKind, FieldKind, Zone};

/// User-facing warning for a rejected field drop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneWarning {
    pub field_id: String,
    pub field_name: String,
    /// `None` when the dropped id is not a known field.
    pub field_kind: Option<FieldKind>,
    pub zone: Zone,
    pub zone_label: String,
    /// `None` when the zone is not used by the active chart type.
    pub accepted: Option<AcceptedKind>,
}

impl ZoneWarning {
    #[must_use]
    pub fn message(&self) -> String {
        match (self.field_kind, self.accepted) {
            (Some(kind), Some(accepted)) => format!(
                "\"{}\" is a {kind} field; {} accepts {accepted} fields only.",
                self.field_name, self.zone_label
            ),
            (Some(_), None) => format!(
                "{} is not available for this chart type.",
                self.zone_label
            ),
            (None, _) => format!("Unknown field \"{}\".", self.field_id),
        }
    }
}

/// Notices emitted by the builder to its notifiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BuilderNotice {
    DropRejected(ZoneWarning),
    ZonesCleared { zones: Vec<Zone> },
}

/// Notification collaborator (toasts, status bars, logs).
pub trait ChartNotifier {
    fn id(&self) -> &str;
    fn notify(&mut self, notice: &BuilderNotice);
}

/// Notifier that keeps every notice; used by tests and headless hosts.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    id: String,
    notices: std::sync::Arc<std::sync::Mutex<Vec<BuilderNotice>>>,
}

impl RecordingNotifier {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            notices: Default::default(),
        }
    }

    /// Notices received so far, across every clone of this notifier.
    #[must_use]
    pub fn notices(&self) -> Vec<BuilderNotice> {
        self.notices
            .lock()
            .map(|notices| notices.clone())
            .unwrap_or_default()
    }
}

impl ChartNotifier for RecordingNotifier {
    fn id(&self) -> &str {
        &self.id
    }

    fn notify(&mut self, notice: &BuilderNotice) {
        if let Ok(mut notices) = self.notices.lock() {
            notices.push(notice.clone());
        }
    }
}
