//! Field registry for conference records.
//!
//! The registry is a static template: it is built once and every caller with a
//! sample record receives the same `Arc`, so identity-based memoization
//! downstream keeps hitting.

use std::sync::{Arc, OnceLock};

use serde_json::Value;

use super::field::{DataField, DateAnchor, DateBound, Extractor};
use super::flatten::RepeatingGroup;
use super::record::RecordPath;
use super::types::{AggregationKind, FieldKind};

pub const RECORD_COUNT_FIELD_ID: &str = "count.records";

const CONFERENCE_DATES: &str = "conferenceDates";
const SUBMISSION_DATE: &str = "submissionDate";
const NOTIFICATION_DATE: &str = "notificationDate";
const CAMERA_READY_DATE: &str = "cameraReadyDate";

/// Fields available for records shaped like `sample`; empty without a sample.
#[must_use]
pub fn available_fields(sample: Option<&Value>) -> Arc<[DataField]> {
    static EMPTY: OnceLock<Arc<[DataField]>> = OnceLock::new();
    match sample {
        Some(_) => Arc::clone(conference_fields()),
        None => Arc::clone(EMPTY.get_or_init(|| Arc::from(Vec::new()))),
    }
}

/// The canonical conference field set.
#[must_use]
pub fn conference_fields() -> &'static Arc<[DataField]> {
    static FIELDS: OnceLock<Arc<[DataField]>> = OnceLock::new();
    FIELDS.get_or_init(|| Arc::from(build_conference_fields()))
}

/// Repeating group holding the per-source rank entries.
#[must_use]
pub fn ranks_group() -> RepeatingGroup {
    RepeatingGroup::new("ranks", RecordPath::root().key("ranks"))
}

#[must_use]
pub fn find_field<'a>(fields: &'a [DataField], id: &str) -> Option<&'a DataField> {
    fields.iter().find(|field| field.id == id)
}

pub fn fields_of_kind(fields: &[DataField], kind: FieldKind) -> impl Iterator<Item = &DataField> {
    fields.iter().filter(move |field| field.kind == kind)
}

fn path(keys: &[&str]) -> RecordPath {
    keys.iter()
        .fold(RecordPath::root(), |path, key| path.key(*key))
}

fn rank_member(member: &str) -> Extractor {
    Extractor::GroupMember {
        group: ranks_group(),
        member: path(&[member]),
    }
}

fn date_span(from: (&str, DateBound), to: (&str, DateBound), inclusive: bool) -> Extractor {
    Extractor::DateSpan {
        entries: path(&["dates"]),
        from: DateAnchor::new(from.0, from.1),
        to: DateAnchor::new(to.0, to.1),
        inclusive,
    }
}

fn build_conference_fields() -> Vec<DataField> {
    vec![
        DataField::dimension(
            "location.continent",
            "Continent",
            Extractor::Path(path(&["location", "continent"])),
        ),
        DataField::dimension(
            "location.country",
            "Country",
            Extractor::Path(path(&["location", "country"])),
        ),
        DataField::dimension(
            "location.cityStateProvince",
            "City / State",
            Extractor::Path(path(&["location", "cityStateProvince"])),
        ),
        DataField::dimension("year", "Year", Extractor::Path(path(&["year"]))),
        DataField::dimension(
            "accessType",
            "Access Type",
            Extractor::Path(path(&["accessType"])),
        ),
        DataField::dimension("status", "Status", Extractor::Path(path(&["status"]))),
        DataField::dimension("title", "Title", Extractor::Path(path(&["title"]))),
        DataField::dimension("acronym", "Acronym", Extractor::Path(path(&["acronym"]))),
        DataField::dimension("rank.value", "Rank", rank_member("rank")),
        DataField::dimension("rank.source", "Rank Source", rank_member("source")),
        DataField::dimension(
            "rank.researchField",
            "Research Field",
            rank_member("researchField"),
        ),
        DataField::measure(
            RECORD_COUNT_FIELD_ID,
            "Record Count",
            AggregationKind::Count,
            Extractor::RecordCount,
        ),
        DataField::measure(
            "count.topics",
            "Topic Count",
            AggregationKind::Sum,
            Extractor::Length(path(&["topics"])),
        ),
        DataField::measure(
            "duration.conference",
            "Conference Duration (days)",
            AggregationKind::Average,
            date_span(
                (CONFERENCE_DATES, DateBound::From),
                (CONFERENCE_DATES, DateBound::To),
                true,
            ),
        ),
        DataField::measure(
            "duration.notification",
            "Notification Duration (days)",
            AggregationKind::Average,
            date_span(
                (SUBMISSION_DATE, DateBound::From),
                (NOTIFICATION_DATE, DateBound::From),
                false,
            ),
        ),
        DataField::measure(
            "duration.cameraReady",
            "Camera-Ready Prep Time (days)",
            AggregationKind::Average,
            date_span(
                (NOTIFICATION_DATE, DateBound::From),
                (CAMERA_READY_DATE, DateBound::From),
                false,
            ),
        ),
    ]
}
