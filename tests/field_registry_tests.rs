use std::sync::Arc;

use approx::assert_relative_eq;
use chart_builder::core::{
    AggregationKind, FieldKind, FlattenedRecord, RECORD_COUNT_FIELD_ID, available_fields,
    fields_of_kind, find_field,
};
use serde_json::{Value, json};

fn conference() -> Value {
    json!({
        "title": "International Conference on Software Engineering",
        "acronym": "ICSE",
        "status": "Upcoming",
        "year": 2024,
        "accessType": "Offline",
        "topics": ["testing", "maintenance", "tooling"],
        "location": {
            "continent": "Europe",
            "country": "Portugal",
            "cityStateProvince": "Lisbon"
        },
        "ranks": [{ "rank": "A*", "source": "CORE2023", "researchField": "SE" }],
        "dates": [
            { "type": "conferenceDates", "fromDate": "2024-04-14", "toDate": "2024-04-20" },
            { "type": "submissionDate", "fromDate": "2024-01-10T00:00:00.000Z", "toDate": null },
            { "type": "notificationDate", "fromDate": "2024-03-01", "toDate": "2024-03-01" },
            { "type": "cameraReadyDate", "fromDate": "2024-03-15", "toDate": "2024-03-15" }
        ]
    })
}

fn number_of(record: &Value, field_id: &str) -> Option<f64> {
    let fields = available_fields(Some(record));
    let field = find_field(&fields, field_id).expect("known field");
    field
        .extract(&FlattenedRecord::unflattened(record))
        .and_then(|value| value.as_number())
}

#[test]
fn no_sample_means_no_fields() {
    assert!(available_fields(None).is_empty());
}

#[test]
fn registry_is_a_stable_singleton() {
    let record = conference();
    let first = available_fields(Some(&record));
    let second = available_fields(Some(&json!({ "title": "other" })));
    assert!(Arc::ptr_eq(&first, &second));
    assert!(Arc::ptr_eq(&available_fields(None), &available_fields(None)));
}

#[test]
fn registry_partitions_dimensions_and_measures() {
    let fields = available_fields(Some(&conference()));
    assert_eq!(fields.len(), 16);

    let measures: Vec<&str> = fields_of_kind(&fields, FieldKind::Measure)
        .map(|field| field.id.as_str())
        .collect();
    assert_eq!(
        measures,
        vec![
            RECORD_COUNT_FIELD_ID,
            "count.topics",
            "duration.conference",
            "duration.notification",
            "duration.cameraReady",
        ]
    );
    assert_eq!(fields_of_kind(&fields, FieldKind::Dimension).count(), 11);
    assert!(
        fields_of_kind(&fields, FieldKind::Dimension).all(|field| field.aggregation.is_none())
    );
}

#[test]
fn measure_fields_carry_their_aggregation() {
    let fields = available_fields(Some(&conference()));
    let aggregation = |id: &str| find_field(&fields, id).and_then(|field| field.aggregation);
    assert_eq!(aggregation(RECORD_COUNT_FIELD_ID), Some(AggregationKind::Count));
    assert_eq!(aggregation("count.topics"), Some(AggregationKind::Sum));
    assert_eq!(aggregation("duration.conference"), Some(AggregationKind::Average));
    assert!(find_field(&fields, "missing.field").is_none());
}

#[test]
fn conference_duration_is_inclusive() {
    assert_relative_eq!(number_of(&conference(), "duration.conference").unwrap(), 7.0);
}

#[test]
fn notification_duration_spans_submission_to_notification() {
    assert_relative_eq!(number_of(&conference(), "duration.notification").unwrap(), 51.0);
}

#[test]
fn camera_ready_duration_spans_notification_to_camera_ready() {
    assert_relative_eq!(number_of(&conference(), "duration.cameraReady").unwrap(), 14.0);
}

#[test]
fn missing_dates_make_durations_absent() {
    let mut record = conference();
    record["dates"] = json!([
        { "type": "conferenceDates", "fromDate": "not a date", "toDate": "2024-04-20" }
    ]);
    assert_eq!(number_of(&record, "duration.conference"), None);
    assert_eq!(number_of(&record, "duration.notification"), None);
}

#[test]
fn topic_count_is_array_length() {
    assert_relative_eq!(number_of(&conference(), "count.topics").unwrap(), 3.0);
    let record = json!({ "title": "no topics" });
    assert_eq!(number_of(&record, "count.topics"), None);
}

#[test]
fn record_count_is_one_per_row() {
    assert_relative_eq!(number_of(&json!({}), RECORD_COUNT_FIELD_ID).unwrap(), 1.0);
}

#[test]
fn descriptors_serialize_for_configuration_panels() {
    let fields = available_fields(Some(&conference()));
    let descriptor = find_field(&fields, "duration.conference")
        .expect("duration field")
        .descriptor();
    let encoded = serde_json::to_value(&descriptor).expect("descriptor json");
    assert_eq!(encoded["id"], json!("duration.conference"));
    assert_eq!(encoded["kind"], json!("measure"));
    assert_eq!(encoded["aggregation"], json!("average"));
}
