use indexmap::IndexMap;

use super::field::DataField;
use super::flatten::FlattenedRecord;
use super::types::AggregationKind;

/// Rows grouped by category label, keys sorted ascending.
pub type GroupedRows<'a> = IndexMap<String, Vec<FlattenedRecord<'a>>>;

/// Groups rows by the category label of `field`; absent values land in
/// `Unknown`. Keys come back sorted ascending so category order is
/// deterministic.
#[must_use]
pub fn group_by<'a>(rows: &[FlattenedRecord<'a>], field: &DataField) -> GroupedRows<'a> {
    let mut groups: GroupedRows<'a> = IndexMap::new();
    for row in rows {
        groups.entry(field.label(row)).or_default().push(*row);
    }
    groups.sort_keys();
    groups
}

/// Reduces one group of rows to a single number.
///
/// - `Count`: number of rows.
/// - `Sum`: numeric-coercible values summed; anything else contributes 0.
/// - `Average`: mean over numeric-coercible values only; 0 when none exist.
#[must_use]
pub fn aggregate_rows(rows: &[FlattenedRecord<'_>], measure: &DataField) -> f64 {
    match measure.aggregation_kind() {
        AggregationKind::Count => rows.len() as f64,
        AggregationKind::Sum => rows
            .iter()
            .filter_map(|row| measure.extract(row).and_then(|value| value.as_number()))
            .sum(),
        AggregationKind::Average => {
            let (total, valid) = rows
                .iter()
                .filter_map(|row| measure.extract(row).and_then(|value| value.as_number()))
                .fold((0.0_f64, 0_usize), |(total, valid), value| {
                    (total + value, valid + 1)
                });
            if valid == 0 { 0.0 } else { total / valid as f64 }
        }
    }
}

/// Aggregates every group with `measure`, preserving key order.
#[must_use]
pub fn aggregate(groups: &GroupedRows<'_>, measure: &DataField) -> IndexMap<String, f64> {
    groups
        .iter()
        .map(|(key, rows)| (key.clone(), aggregate_rows(rows, measure)))
        .collect()
}
