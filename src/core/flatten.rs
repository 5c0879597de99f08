use serde_json::Value;
use tracing::trace;

use super::record::RecordPath;

/// Named one-to-many sub-list of a record, e.g. the `ranks` entries.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepeatingGroup {
    name: String,
    path: RecordPath,
}

impl RepeatingGroup {
    #[must_use]
    pub fn new(name: impl Into<String>, path: RecordPath) -> Self {
        Self {
            name: name.into(),
            path,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn path(&self) -> &RecordPath {
        &self.path
    }

    fn elements<'a>(&self, record: &'a Value) -> &'a [Value] {
        match self.path.resolve(record) {
            Some(Value::Array(items)) => items,
            Some(single) => std::slice::from_ref(single),
            None => &[],
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Expansion<'a> {
    group: &'a RepeatingGroup,
    element: Option<&'a Value>,
}

/// A raw record, optionally paired with one element of a repeating group.
#[derive(Debug, Clone, Copy)]
pub struct FlattenedRecord<'a> {
    record: &'a Value,
    expansion: Option<Expansion<'a>>,
}

impl<'a> FlattenedRecord<'a> {
    #[must_use]
    pub fn unflattened(record: &'a Value) -> Self {
        Self {
            record,
            expansion: None,
        }
    }

    #[must_use]
    pub fn record(&self) -> &'a Value {
        self.record
    }

    #[must_use]
    pub fn is_expanded(&self) -> bool {
        self.expansion.is_some()
    }

    /// Resolves `member` inside the element of `group` this row stands for.
    ///
    /// A row expanded over `group` answers from its own element (absent for the
    /// placeholder row of a record without the group). Any other row answers
    /// from the first element of the group.
    #[must_use]
    pub fn group_member(&self, group: &RepeatingGroup, member: &RecordPath) -> Option<&'a Value> {
        match self.expansion {
            Some(expansion) if expansion.group == group => {
                expansion.element.and_then(|element| member.resolve(element))
            }
            _ => group
                .elements(self.record)
                .first()
                .and_then(|element| member.resolve(element)),
        }
    }
}

/// Wraps records without expansion.
#[must_use]
pub fn unflattened_rows(records: &[Value]) -> Vec<FlattenedRecord<'_>> {
    records.iter().map(FlattenedRecord::unflattened).collect()
}

/// Emits one row per element of `group`. Records lacking the group still emit
/// exactly one placeholder row, so no record is dropped.
#[must_use]
pub fn flatten_by_repeating_group<'a>(
    records: &'a [Value],
    group: &'a RepeatingGroup,
) -> Vec<FlattenedRecord<'a>> {
    let mut rows = Vec::with_capacity(records.len());
    for record in records {
        let elements = group.elements(record);
        if elements.is_empty() {
            rows.push(FlattenedRecord {
                record,
                expansion: Some(Expansion {
                    group,
                    element: None,
                }),
            });
            continue;
        }
        rows.extend(elements.iter().map(|element| FlattenedRecord {
            record,
            expansion: Some(Expansion {
                group,
                element: Some(element),
            }),
        }));
    }
    trace!(
        group = group.name(),
        records = records.len(),
        rows = rows.len(),
        "flattened records by repeating group"
    );
    rows
}
