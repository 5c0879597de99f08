use std::fmt;

use serde_json::Value;

use crate::error::{ChartError, ChartResult};

/// One step of a [`RecordPath`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

/// Explicit path into a nested record, e.g. `location.country` or `ranks[0].rank`.
///
/// Resolution never panics: a missing key, an out-of-range index, a segment
/// applied to the wrong container kind, or a JSON `null` all resolve to `None`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct RecordPath {
    segments: Vec<PathSegment>,
}

impl RecordPath {
    /// Empty path; resolves to the record itself.
    #[must_use]
    pub fn root() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.segments.push(PathSegment::Key(key.into()));
        self
    }

    #[must_use]
    pub fn index(mut self, index: usize) -> Self {
        self.segments.push(PathSegment::Index(index));
        self
    }

    /// Parses dotted path text with optional `[n]` indices.
    pub fn parse(text: &str) -> ChartResult<Self> {
        let mut path = Self::root();
        if text.is_empty() {
            return Ok(path);
        }

        for part in text.split('.') {
            let (name, mut rest) = match part.find('[') {
                Some(open) => part.split_at(open),
                None => (part, ""),
            };
            if name.is_empty() && rest.is_empty() {
                return Err(ChartError::InvalidData(format!(
                    "record path `{text}` contains an empty segment"
                )));
            }
            if !name.is_empty() {
                path = path.key(name);
            }
            while !rest.is_empty() {
                let close = rest.find(']').ok_or_else(|| {
                    ChartError::InvalidData(format!("record path `{text}` has an unclosed index"))
                })?;
                let index = rest[1..close].parse::<usize>().map_err(|_| {
                    ChartError::InvalidData(format!(
                        "record path `{text}` has a non-numeric index `{}`",
                        &rest[1..close]
                    ))
                })?;
                path = path.index(index);
                rest = &rest[close + 1..];
                if !rest.is_empty() && !rest.starts_with('[') {
                    return Err(ChartError::InvalidData(format!(
                        "record path `{text}` has trailing characters after an index"
                    )));
                }
            }
        }
        Ok(path)
    }

    #[must_use]
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    #[must_use]
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Walks the path; `None` means the value is absent.
    #[must_use]
    pub fn resolve<'a>(&self, record: &'a Value) -> Option<&'a Value> {
        let mut current = record;
        for segment in &self.segments {
            current = match (segment, current) {
                (PathSegment::Key(key), Value::Object(map)) => map.get(key)?,
                (PathSegment::Index(index), Value::Array(items)) => items.get(*index)?,
                _ => return None,
            };
        }
        if current.is_null() { None } else { Some(current) }
    }
}

impl fmt::Display for RecordPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for segment in &self.segments {
            match segment {
                PathSegment::Key(key) => {
                    if !first {
                        f.write_str(".")?;
                    }
                    f.write_str(key)?;
                }
                PathSegment::Index(index) => write!(f, "[{index}]")?,
            }
            first = false;
        }
        Ok(())
    }
}
