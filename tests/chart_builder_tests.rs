use std::sync::Arc;

use chart_builder::api::{
    BuildStats, ChartBuilder, ChartBuilderConfig, ChartConfig, ChartConfigPatch,
    ChartOptionsPatch, DropOutcome, FieldDrop, SeriesValues,
};
use chart_builder::core::{ChartType, RECORD_COUNT_FIELD_ID, Zone};
use chart_builder::error::ChartError;
use chart_builder::extensions::{
    BuilderNotice, ChartNotifier, RecordingNotifier, StaticGeoIndex,
};
use chart_builder::render::NullSurface;
use serde_json::{Value, json};

fn records() -> Vec<Value> {
    vec![
        json!({ "accessType": "open", "year": 2023, "location": { "country": "Spain" } }),
        json!({ "accessType": "closed", "year": 2023, "location": { "country": "France" } }),
        json!({ "accessType": "open", "year": 2024, "location": { "country": "Spain" } }),
    ]
}

fn builder() -> ChartBuilder<NullSurface> {
    let mut builder = ChartBuilder::new(NullSurface::default()).expect("builder init");
    builder.set_records(records());
    builder
}

fn ready_bar() -> ChartBuilder<NullSurface> {
    let mut builder = builder();
    builder.update_config(
        ChartConfigPatch::default()
            .with_zone(Zone::XAxis, Some("year"))
            .with_zone(Zone::YAxis, Some(RECORD_COUNT_FIELD_ID)),
    );
    builder
}

#[test]
fn not_ready_builder_serves_placeholder_without_building_series() {
    let mut builder = builder();
    builder.update_config(ChartConfigPatch::default().with_zone(Zone::XAxis, Some("year")));

    assert!(!builder.is_ready());
    assert_eq!(builder.missing_required_zones().as_slice(), &[Zone::YAxis]);
    assert_eq!(builder.processed_data().expect("not ready"), None);

    let spec = builder.chart_spec();
    assert!(!spec.is_error());
    assert!(spec.series.is_empty());
    assert_eq!(spec.title.text, "Conference Analysis");
    assert_eq!(
        spec.title.subtext.as_deref(),
        Some("Assign a field to: Y-Axis (Value)")
    );
    assert_eq!(builder.build_stats().series_builds, 0);
}

#[test]
fn incompatible_required_zone_keeps_builder_not_ready() {
    let mut builder = builder();
    builder.update_config(
        ChartConfigPatch::default()
            .with_zone(Zone::XAxis, Some(RECORD_COUNT_FIELD_ID))
            .with_zone(Zone::YAxis, Some(RECORD_COUNT_FIELD_ID)),
    );

    assert!(!builder.is_ready());
    assert_eq!(builder.missing_required_zones().as_slice(), &[Zone::XAxis]);
    assert_eq!(builder.processed_data().expect("not ready"), None);
    let spec = builder.chart_spec();
    assert!(!spec.is_error());
    assert!(spec.series.is_empty());
    assert_eq!(builder.build_stats().series_builds, 0);

    builder.update_config(ChartConfigPatch::default().with_zone(Zone::XAxis, Some("no.such.field")));
    assert!(!builder.is_ready());
    assert_eq!(builder.build_stats().series_builds, 0);

    builder.update_config(ChartConfigPatch::default().with_zone(Zone::XAxis, Some("year")));
    assert!(builder.is_ready());
    assert_eq!(builder.chart_spec().series.len(), 1);
    assert_eq!(builder.build_stats().series_builds, 1);
}

#[test]
fn update_config_merges_and_keeps_other_zones() {
    let mut builder = ready_bar();
    builder.update_config(ChartConfigPatch::default().with_zone(Zone::Color, Some("accessType")));

    let config = builder.config();
    assert_eq!(config.field_id(Zone::XAxis), Some("year"));
    assert_eq!(config.field_id(Zone::YAxis), Some(RECORD_COUNT_FIELD_ID));
    assert_eq!(config.field_id(Zone::Color), Some("accessType"));

    builder.update_config(ChartConfigPatch::default().with_zone(Zone::Color, None));
    assert_eq!(builder.config().field_id(Zone::Color), None);
    assert_eq!(builder.config().field_id(Zone::XAxis), Some("year"));
}

#[test]
fn chart_type_switch_prunes_incompatible_zones() {
    let mut builder = ready_bar();
    let notifier = RecordingNotifier::new("toasts");
    builder
        .register_notifier(Box::new(notifier.clone()))
        .expect("register notifier");
    builder.update_config(ChartConfigPatch::default().with_zone(Zone::Color, Some("accessType")));

    let cleared = builder.update_config(ChartConfigPatch::default().with_chart_type(ChartType::Pie));

    assert_eq!(cleared.as_slice(), &[Zone::XAxis]);
    assert_eq!(builder.config().chart_type, ChartType::Pie);
    assert_eq!(builder.config().field_id(Zone::Color), Some("accessType"));
    assert!(builder.is_ready());
    assert_eq!(
        notifier.notices(),
        vec![BuilderNotice::ZonesCleared {
            zones: vec![Zone::XAxis]
        }]
    );
}

#[test]
fn spec_is_memoized_until_an_input_changes() {
    let mut builder = ready_bar();

    let first = builder.chart_spec();
    let second = builder.chart_spec();
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(
        builder.build_stats(),
        BuildStats {
            series_builds: 1,
            spec_builds: 1,
            spec_cache_hits: 1,
        }
    );

    builder.update_options(ChartOptionsPatch::default().with_title("Per year"));
    let retitled = builder.chart_spec();
    assert!(!Arc::ptr_eq(&first, &retitled));
    assert_eq!(retitled.title.text, "Per year");
    // Options do not feed the series builder.
    assert_eq!(builder.build_stats().series_builds, 1);
    assert_eq!(builder.build_stats().spec_builds, 2);

    builder.update_config(ChartConfigPatch::default().with_zone(Zone::Color, Some("accessType")));
    let colored = builder.chart_spec();
    assert_eq!(colored.series.len(), 2);
    assert_eq!(builder.build_stats().series_builds, 2);
}

#[test]
fn re_setting_the_same_shared_records_keeps_the_memo() {
    let mut builder = ChartBuilder::new(NullSurface::default()).expect("builder init");
    let shared = Arc::new(records());
    builder.set_records_shared(Arc::clone(&shared));
    builder.update_config(
        ChartConfigPatch::default()
            .with_zone(Zone::XAxis, Some("year"))
            .with_zone(Zone::YAxis, Some(RECORD_COUNT_FIELD_ID)),
    );
    let fields = builder.available_fields();

    let first = builder.chart_spec();
    builder.set_records_shared(Arc::clone(&shared));
    let second = builder.chart_spec();
    assert!(Arc::ptr_eq(&first, &second));
    assert!(Arc::ptr_eq(&fields, &builder.available_fields()));

    builder.set_records(records());
    let third = builder.chart_spec();
    assert!(!Arc::ptr_eq(&first, &third));
    assert_eq!(*first, *third);
    // The registry singleton survives a data refresh.
    assert!(Arc::ptr_eq(&fields, &builder.available_fields()));
}

#[test]
fn set_zone_validates_and_leaves_config_untouched_on_error() {
    let mut builder = builder();

    builder
        .set_zone(Zone::XAxis, Some("accessType"))
        .expect("dimension on x");
    let error = builder
        .set_zone(Zone::XAxis, Some(RECORD_COUNT_FIELD_ID))
        .expect_err("measure on x");
    assert!(matches!(error, ChartError::ConfigValidation { .. }));
    assert_eq!(builder.config().field_id(Zone::XAxis), Some("accessType"));

    let error = builder
        .set_zone(Zone::Size, Some(RECORD_COUNT_FIELD_ID))
        .expect_err("bar has no size zone");
    assert_eq!(
        error,
        ChartError::ZoneNotApplicable {
            zone: Zone::Size,
            chart_type: ChartType::Bar,
        }
    );

    let error = builder
        .set_zone(Zone::YAxis, Some("nope"))
        .expect_err("unknown field");
    assert!(error.is_config_validation());

    builder.set_zone(Zone::XAxis, None).expect("clear zone");
    assert_eq!(builder.config().field_id(Zone::XAxis), None);
}

#[test]
fn rejected_drop_notifies_with_zone_warning() {
    let mut builder = builder();
    let notifier = RecordingNotifier::new("toasts");
    builder
        .register_notifier(Box::new(notifier.clone()))
        .expect("register notifier");

    let outcome = builder.dispatch_drop(FieldDrop::new(RECORD_COUNT_FIELD_ID, Zone::XAxis));

    let DropOutcome::Rejected(warning) = outcome else {
        panic!("measure on bar x must be rejected");
    };
    assert_eq!(
        warning.message(),
        "\"Record Count\" is a measure field; X-Axis (Category) accepts dimension fields only."
    );
    assert_eq!(builder.config().field_id(Zone::XAxis), None);
    assert_eq!(notifier.notices(), vec![BuilderNotice::DropRejected(warning)]);
}

#[test]
fn drop_messages_cover_hidden_zones_and_unknown_fields() {
    let mut builder = builder();
    builder.update_config(ChartConfigPatch::default().with_chart_type(ChartType::Map));

    let outcomes = builder.dispatch_drops([
        FieldDrop::new("accessType", Zone::Color),
        FieldDrop::new("ghost", Zone::XAxis),
        FieldDrop::new("location.country", Zone::XAxis),
    ]);

    let messages: Vec<String> = outcomes
        .iter()
        .filter_map(|outcome| match outcome {
            DropOutcome::Rejected(warning) => Some(warning.message()),
            DropOutcome::Assigned => None,
        })
        .collect();
    assert_eq!(
        messages,
        vec![
            "color is not available for this chart type.".to_owned(),
            "Unknown field \"ghost\".".to_owned(),
        ]
    );
    assert!(outcomes[2].is_assigned());
    assert_eq!(builder.config().field_id(Zone::XAxis), Some("location.country"));
}

#[test]
fn drops_can_arrive_through_a_channel() {
    let mut builder = builder();
    let (sender, receiver) = std::sync::mpsc::channel();
    sender
        .send(FieldDrop::new("year", Zone::XAxis))
        .expect("send drop");
    sender
        .send(FieldDrop::new(RECORD_COUNT_FIELD_ID, Zone::YAxis))
        .expect("send drop");
    drop(sender);

    let outcomes = builder.dispatch_drops(receiver);

    assert!(outcomes.iter().all(DropOutcome::is_assigned));
    assert!(builder.is_ready());
    let spec = builder.chart_spec();
    assert_eq!(spec.series[0].data, SeriesValues::Values(vec![2.0, 1.0]));
}

#[test]
fn notifier_ids_must_be_unique_and_non_empty() {
    struct Silent(&'static str);

    impl ChartNotifier for Silent {
        fn id(&self) -> &str {
            self.0
        }

        fn notify(&mut self, _notice: &BuilderNotice) {}
    }

    let mut builder = builder();
    builder
        .register_notifier(Box::new(Silent("status-bar")))
        .expect("first registration");
    assert!(builder.register_notifier(Box::new(Silent("status-bar"))).is_err());
    assert!(builder.register_notifier(Box::new(Silent(""))).is_err());
    assert_eq!(builder.notifier_count(), 1);

    assert!(builder.unregister_notifier("status-bar"));
    assert!(!builder.unregister_notifier("status-bar"));
    assert!(!builder.has_notifier("status-bar"));
}

#[test]
fn geo_index_replacement_invalidates_the_memo() {
    let mut builder = builder();
    builder.update_config(
        ChartConfigPatch::default()
            .with_chart_type(ChartType::Map)
            .with_zone(Zone::XAxis, Some("location.country"))
            .with_zone(Zone::YAxis, Some(RECORD_COUNT_FIELD_ID)),
    );
    assert_eq!(builder.chart_spec().series[0].data.len(), 2);

    let mut builder = builder.with_geo_index(Arc::new(StaticGeoIndex::new(["Spain"])));
    assert_eq!(builder.chart_spec().series[0].data.len(), 1);
}

#[test]
fn builder_bootstraps_from_json_config() {
    let config = ChartBuilderConfig::from_json_str(
        r#"{
            "chart": { "chartType": "pie", "color": { "fieldId": "accessType" },
                       "yAxis": { "fieldId": "count.records" } },
            "options": { "title": "Access types", "showLegend": false },
            "assembler": { "zoomCategoryThreshold": 5 }
        }"#,
    )
    .expect("parse builder config");
    assert_eq!(config.assembler.label_rotate_threshold, 10);
    assert!(config.options.show_toolbox);

    let mut builder = ChartBuilder::with_config(NullSurface::default(), config).expect("init");
    builder.set_records(records());

    let spec = builder.chart_spec();
    assert_eq!(spec.title.text, "Access types");
    assert!(spec.legend.is_none());
    assert_eq!(spec.series[0].data.len(), 2);
    builder.render().expect("render");
}

#[test]
fn invalid_assembler_settings_are_rejected() {
    let mut config = ChartBuilderConfig::new(ChartConfig::new(ChartType::Bar));
    config.assembler.symbol_size_range = [50.0, 10.0];
    let error = ChartBuilder::with_config(NullSurface::default(), config)
        .err()
        .expect("reversed symbol size range");
    assert!(matches!(error, ChartError::InvalidData(_)));

    let mut builder = builder();
    let mut settings = builder.assembler_settings().clone();
    settings.zoom_category_threshold = 0;
    assert!(builder.set_assembler_settings(settings).is_err());
    assert_eq!(builder.assembler_settings().zoom_category_threshold, 20);
}

#[test]
fn snapshot_reports_state_and_counters() {
    let mut builder = ready_bar();
    let _ = builder.chart_spec();

    let snapshot = builder.snapshot();
    assert!(snapshot.is_ready);
    assert!(snapshot.missing_zones.is_empty());
    assert_eq!(snapshot.record_count, 3);
    assert_eq!(snapshot.field_ids.len(), 16);
    assert_eq!(snapshot.build_stats.series_builds, 1);
    assert_eq!(snapshot.config.field_id(Zone::XAxis), Some("year"));
}
