pub mod aggregate;
pub mod coercion;
pub mod field;
pub mod flatten;
pub mod primitives;
pub mod record;
pub mod registry;
pub mod types;

pub use aggregate::{GroupedRows, aggregate, aggregate_rows, group_by};
pub use coercion::{UNKNOWN_CATEGORY, category_label, coerce_number};
pub use field::{DataField, DateAnchor, DateBound, Extractor, FieldDescriptor, FieldValue};
pub use flatten::{FlattenedRecord, RepeatingGroup, flatten_by_repeating_group, unflattened_rows};
pub use record::{PathSegment, RecordPath};
pub use registry::{
    RECORD_COUNT_FIELD_ID, available_fields, conference_fields, fields_of_kind, find_field,
    ranks_group,
};
pub use types::{AcceptedKind, AggregationKind, ChartType, FieldKind, Zone};
