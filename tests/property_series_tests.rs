use chart_builder::api::{ChartConfig, SeriesValues, build_series};
use chart_builder::core::{ChartType, Zone, available_fields, flatten_by_repeating_group, ranks_group};
use chart_builder::extensions::WorldCountryIndex;
use proptest::prelude::*;
use serde_json::{Value, json};

fn conference_strategy() -> impl Strategy<Value = Vec<Value>> {
    prop::collection::vec(
        (
            prop::option::of(prop::sample::select(vec!["Asia", "Europe", "Africa"])),
            prop::option::of(prop::sample::select(vec!["open", "closed", "hybrid"])),
            0usize..6,
            prop::collection::vec(prop::sample::select(vec!["A*", "A", "B"]), 0..3),
        ),
        1..48,
    )
    .prop_map(|entries| {
        entries
            .into_iter()
            .map(|(continent, access, topics, ranks)| {
                let ranks: Vec<Value> = ranks.into_iter().map(|rank| json!({ "rank": rank })).collect();
                json!({
                    "location": { "continent": continent },
                    "accessType": access,
                    "topics": vec!["t"; topics],
                    "ranks": ranks,
                })
            })
            .collect()
    })
}

fn series_values(data: &SeriesValues) -> Vec<f64> {
    match data {
        SeriesValues::Values(values) => values.clone(),
        SeriesValues::Named(values) => values.iter().map(|entry| entry.value).collect(),
        SeriesValues::Points(points) => points.iter().map(|point| point.y).collect(),
    }
}

proptest! {
    #[test]
    fn colored_series_are_aligned_and_conserve_the_total(records in conference_strategy()) {
        let fields = available_fields(records.first());
        let plain = ChartConfig::new(ChartType::Bar)
            .with_zone(Zone::XAxis, "location.continent")
            .with_zone(Zone::YAxis, "count.topics");
        let colored = plain.clone().with_zone(Zone::Color, "accessType");

        let plain_data = build_series(&records, &plain, &fields, &WorldCountryIndex).expect("plain");
        let colored_data = build_series(&records, &colored, &fields, &WorldCountryIndex).expect("colored");

        let categories = colored_data.categories.clone().unwrap_or_default();
        prop_assert_eq!(&plain_data.categories, &colored_data.categories);
        prop_assert_eq!(
            colored_data.legend_data.as_ref().map(Vec::len),
            Some(colored_data.series.len())
        );

        let mut stacked = vec![0.0; categories.len()];
        for series in &colored_data.series {
            let values = series_values(&series.data);
            prop_assert_eq!(values.len(), categories.len());
            for (slot, value) in stacked.iter_mut().zip(values) {
                *slot += value;
            }
        }
        let plain_values = series_values(&plain_data.series[0].data);
        for (stacked, plain) in stacked.iter().zip(plain_values) {
            prop_assert!((stacked - plain).abs() <= 1e-9);
        }
    }

    #[test]
    fn pie_slices_conserve_the_record_count(records in conference_strategy()) {
        let fields = available_fields(records.first());
        let config = ChartConfig::new(ChartType::Pie)
            .with_zone(Zone::Color, "accessType")
            .with_zone(Zone::YAxis, "count.records");

        let data = build_series(&records, &config, &fields, &WorldCountryIndex).expect("pie");
        let total: f64 = series_values(&data.series[0].data).iter().sum();
        prop_assert_eq!(total as usize, records.len());

        let legend = data.legend_data.unwrap_or_default();
        let mut sorted = legend.clone();
        sorted.sort();
        prop_assert_eq!(legend, sorted);
    }

    #[test]
    fn flattening_never_drops_a_record(records in conference_strategy()) {
        let group = ranks_group();
        let rows = flatten_by_repeating_group(&records, &group);
        let expected: usize = records
            .iter()
            .map(|record| record["ranks"].as_array().map_or(0, Vec::len).max(1))
            .sum();
        prop_assert_eq!(rows.len(), expected);

        let fields = available_fields(records.first());
        let config = ChartConfig::new(ChartType::Bar)
            .with_zone(Zone::XAxis, "rank.value")
            .with_zone(Zone::YAxis, "count.records");
        let data = build_series(&records, &config, &fields, &WorldCountryIndex).expect("bar");
        let total: f64 = series_values(&data.series[0].data).iter().sum();
        prop_assert_eq!(total as usize, expected);
    }

    #[test]
    fn treemap_never_shows_unknown(records in conference_strategy()) {
        let fields = available_fields(records.first());
        let config = ChartConfig::new(ChartType::Treemap)
            .with_zone(Zone::XAxis, "accessType")
            .with_zone(Zone::YAxis, "count.records")
            .with_zone(Zone::Color, "location.continent");

        let data = build_series(&records, &config, &fields, &WorldCountryIndex).expect("treemap");
        let SeriesValues::Named(parents) = &data.series[0].data else {
            panic!("treemap data must be named");
        };
        for parent in parents {
            prop_assert_ne!(parent.name.as_str(), "Unknown");
            prop_assert!(!parent.children.is_empty());
            let children_total: f64 = parent.children.iter().map(|child| child.value).sum();
            prop_assert!((children_total - parent.value).abs() <= 1e-9);
            for child in &parent.children {
                prop_assert_ne!(child.name.as_str(), "Unknown");
            }
        }
    }
}
