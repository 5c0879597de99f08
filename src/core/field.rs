use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::coercion::{UNKNOWN_CATEGORY, category_label, coerce_number};
use super::flatten::{FlattenedRecord, RepeatingGroup};
use super::primitives::{days_between, parse_record_date};
use super::record::RecordPath;
use super::types::{AggregationKind, FieldKind};

const DATE_ENTRY_TYPE_KEY: &str = "type";
const DATE_FROM_KEY: &str = "fromDate";
const DATE_TO_KEY: &str = "toDate";

/// Value produced by a field extractor. Absence is expressed as `None` by the
/// caller, never as a variant here.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    Raw(&'a Value),
    Number(f64),
}

impl FieldValue<'_> {
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Raw(value) => coerce_number(value),
            Self::Number(number) => Some(*number).filter(|n| n.is_finite()),
        }
    }

    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Raw(value) => category_label(Some(value)),
            Self::Number(number) if number.is_finite() => {
                if number.fract() == 0.0 && number.abs() < 1e15 {
                    format!("{number:.0}")
                } else {
                    number.to_string()
                }
            }
            Self::Number(_) => UNKNOWN_CATEGORY.to_owned(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateBound {
    From,
    To,
}

/// Selects one date out of a typed date-entry list, e.g. the `fromDate` of the
/// entry whose `type` is `submissionDate`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DateAnchor {
    pub entry_type: String,
    pub bound: DateBound,
}

impl DateAnchor {
    #[must_use]
    pub fn new(entry_type: impl Into<String>, bound: DateBound) -> Self {
        Self {
            entry_type: entry_type.into(),
            bound,
        }
    }

    fn resolve<'a>(&self, entries: &'a Value) -> Option<&'a Value> {
        let entry = entries.as_array()?.iter().find(|entry| {
            entry.get(DATE_ENTRY_TYPE_KEY).and_then(Value::as_str) == Some(self.entry_type.as_str())
        })?;
        let key = match self.bound {
            DateBound::From => DATE_FROM_KEY,
            DateBound::To => DATE_TO_KEY,
        };
        entry.get(key).filter(|value| !value.is_null())
    }
}

/// Extraction strategy of a field.
#[derive(Debug, Clone, PartialEq)]
pub enum Extractor {
    /// Every row counts as one; used by record-count measures.
    RecordCount,
    Path(RecordPath),
    /// Member of a repeating sub-list. Flattened rows read their own element,
    /// unflattened rows read the first element.
    GroupMember {
        group: RepeatingGroup,
        member: RecordPath,
    },
    /// Length of an array.
    Length(RecordPath),
    /// Day span between two anchored dates; absent when either date is.
    DateSpan {
        entries: RecordPath,
        from: DateAnchor,
        to: DateAnchor,
        inclusive: bool,
    },
}

impl Extractor {
    #[must_use]
    pub fn extract<'a>(&self, row: &FlattenedRecord<'a>) -> Option<FieldValue<'a>> {
        match self {
            Self::RecordCount => Some(FieldValue::Number(1.0)),
            Self::Path(path) => path.resolve(row.record()).map(FieldValue::Raw),
            Self::GroupMember { group, member } => {
                row.group_member(group, member).map(FieldValue::Raw)
            }
            Self::Length(path) => path
                .resolve(row.record())
                .and_then(Value::as_array)
                .map(|items| FieldValue::Number(items.len() as f64)),
            Self::DateSpan {
                entries,
                from,
                to,
                inclusive,
            } => {
                let entries = entries.resolve(row.record())?;
                let start = parse_record_date(from.resolve(entries)?)?;
                let end = parse_record_date(to.resolve(entries)?)?;
                let days = days_between(start, end) + i64::from(*inclusive);
                Some(FieldValue::Number(days as f64))
            }
        }
    }

    #[must_use]
    pub fn repeating_group(&self) -> Option<&RepeatingGroup> {
        match self {
            Self::GroupMember { group, .. } => Some(group),
            _ => None,
        }
    }
}

/// Field exposed to the configuration panel.
#[derive(Debug, Clone, PartialEq)]
pub struct DataField {
    pub id: String,
    pub name: String,
    pub kind: FieldKind,
    pub aggregation: Option<AggregationKind>,
    pub extractor: Extractor,
}

impl DataField {
    #[must_use]
    pub fn dimension(id: impl Into<String>, name: impl Into<String>, extractor: Extractor) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind: FieldKind::Dimension,
            aggregation: None,
            extractor,
        }
    }

    #[must_use]
    pub fn measure(
        id: impl Into<String>,
        name: impl Into<String>,
        aggregation: AggregationKind,
        extractor: Extractor,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind: FieldKind::Measure,
            aggregation: Some(aggregation),
            extractor,
        }
    }

    #[must_use]
    pub fn extract<'a>(&self, row: &FlattenedRecord<'a>) -> Option<FieldValue<'a>> {
        self.extractor.extract(row)
    }

    /// Category label of this field for `row`; absent values become `Unknown`.
    #[must_use]
    pub fn label(&self, row: &FlattenedRecord<'_>) -> String {
        self.extract(row)
            .map_or_else(|| UNKNOWN_CATEGORY.to_owned(), |value| value.label())
    }

    /// Aggregation used when this field is reduced; dimensions count rows.
    #[must_use]
    pub fn aggregation_kind(&self) -> AggregationKind {
        self.aggregation.unwrap_or(AggregationKind::Count)
    }

    #[must_use]
    pub fn repeating_group(&self) -> Option<&RepeatingGroup> {
        self.extractor.repeating_group()
    }

    #[must_use]
    pub fn descriptor(&self) -> FieldDescriptor {
        FieldDescriptor {
            id: self.id.clone(),
            name: self.name.clone(),
            kind: self.kind,
            aggregation: self.aggregation,
        }
    }
}

/// Serializable summary of a [`DataField`] for configuration panels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDescriptor {
    pub id: String,
    pub name: String,
    pub kind: FieldKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aggregation: Option<AggregationKind>,
}
