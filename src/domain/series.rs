//! Schemas, decoded records and time series.
//!
//! A feed's shape is declared once as a `Schema` (a static list of column rules)
//! instead of being rebuilt inline for every feed type. Everything the parser
//! produces is immutable afterwards.

use std::collections::BTreeMap;

use serde::Serialize;

/// Field name used for the period label of time-indexed feeds.
pub const DATE_FIELD: &str = "date";

/// How a raw column is coerced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    Integer,
    Float,
    Text,
}

/// One column extraction rule: raw column `column` feeds output field `field`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ColumnRule {
    pub column: usize,
    pub field: &'static str,
    pub kind: ValueKind,
    /// Substituted when a numeric column does not coerce.
    pub default: f64,
}

impl ColumnRule {
    pub const fn date(column: usize) -> Self {
        Self {
            column,
            field: DATE_FIELD,
            kind: ValueKind::Text,
            default: 0.0,
        }
    }

    pub const fn int(column: usize, field: &'static str) -> Self {
        Self {
            column,
            field,
            kind: ValueKind::Integer,
            default: 0.0,
        }
    }

    pub const fn float(column: usize, field: &'static str) -> Self {
        Self {
            column,
            field,
            kind: ValueKind::Float,
            default: 0.0,
        }
    }

    pub const fn text(column: usize, field: &'static str) -> Self {
        Self {
            column,
            field,
            kind: ValueKind::Text,
            default: 0.0,
        }
    }

    pub const fn with_default(mut self, default: f64) -> Self {
        self.default = default;
        self
    }
}

/// Declarative column-to-field mapping for one feed type.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Schema {
    pub id: &'static str,
    pub rules: &'static [ColumnRule],
}

impl Schema {
    pub const fn new(id: &'static str, rules: &'static [ColumnRule]) -> Self {
        Self { id, rules }
    }

    /// Rows with fewer columns than this are dropped by the parser.
    pub fn min_columns(&self) -> usize {
        self.rules.iter().map(|r| r.column + 1).max().unwrap_or(0)
    }

    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.rules.iter().map(|r| r.field)
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.rules.iter().any(|r| r.field == field)
    }

    /// Snapshot feeds (e.g. a holder count) have no date column.
    pub fn is_time_indexed(&self) -> bool {
        self.has_field(DATE_FIELD)
    }
}

/// A decoded cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Int(i64),
    Float(f64),
    Text(String),
}

impl Value {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(v) => Some(*v as f64),
            Value::Float(v) => Some(*v),
            Value::Text(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Int(v) => write!(f, "{v}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Text(s) => write!(f, "{s}"),
        }
    }
}

/// One decoded row: field name -> value. The field set is the schema's.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct Record {
    fields: BTreeMap<String, Value>,
}

impl Record {
    pub fn from_fields<I, K>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        Self {
            fields: fields.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Numeric value of `field`, `None` when missing or textual.
    pub fn number(&self, field: &str) -> Option<f64> {
        self.get(field).and_then(Value::as_f64)
    }

    pub fn date(&self) -> Option<&str> {
        self.get(DATE_FIELD).and_then(Value::as_str)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Records in source row order. The last record is the latest period.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct TimeSeries {
    records: Vec<Record>,
}

impl TimeSeries {
    pub const EMPTY: TimeSeries = TimeSeries { records: Vec::new() };

    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn get(&self, idx: usize) -> Option<&Record> {
        self.records.get(idx)
    }

    pub fn last(&self) -> Option<&Record> {
        self.records.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    /// Numeric column as a vector; non-numeric cells read as `0`.
    pub fn values(&self, field: &str) -> Vec<f64> {
        self.records
            .iter()
            .map(|r| r.number(field).unwrap_or(0.0))
            .collect()
    }
}

impl<'a> IntoIterator for &'a TimeSeries {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// One external feed to ingest. `url: None` means "not configured".
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedDescriptor {
    pub id: String,
    pub url: Option<String>,
    pub schema: Schema,
}

impl FeedDescriptor {
    pub fn new(id: impl Into<String>, url: Option<String>, schema: Schema) -> Self {
        Self {
            id: id.into(),
            url,
            schema,
        }
    }
}

/// Outcome of one feed. A failure never carries partial data.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "data", rename_all = "lowercase")]
pub enum FeedResult {
    Success(TimeSeries),
    Failure(String),
}

impl FeedResult {
    pub fn series(&self) -> Option<&TimeSeries> {
        match self {
            FeedResult::Success(s) => Some(s),
            FeedResult::Failure(_) => None,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, FeedResult::Success(_))
    }

    pub fn failure_reason(&self) -> Option<&str> {
        match self {
            FeedResult::Success(_) => None,
            FeedResult::Failure(reason) => Some(reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RULES: &[ColumnRule] = &[ColumnRule::date(0), ColumnRule::int(7, "total")];

    #[test]
    fn min_columns_follows_highest_referenced_index() {
        let schema = Schema::new("sparse", RULES);
        assert_eq!(schema.min_columns(), 8);
        assert!(schema.is_time_indexed());
        assert!(schema.has_field("total"));
        assert!(!schema.has_field("value"));
    }

    #[test]
    fn snapshot_schema_is_not_time_indexed() {
        const SNAPSHOT: &[ColumnRule] = &[ColumnRule::int(0, "total")];
        let schema = Schema::new("holders", SNAPSHOT);
        assert!(!schema.is_time_indexed());
        assert_eq!(schema.min_columns(), 1);
    }

    #[test]
    fn record_accessors() {
        let rec = Record::from_fields([
            ("date", Value::Text("2024-01-01".to_string())),
            ("total", Value::Int(42)),
        ]);
        assert_eq!(rec.date(), Some("2024-01-01"));
        assert_eq!(rec.number("total"), Some(42.0));
        assert_eq!(rec.number("date"), None);
        assert_eq!(rec.number("missing"), None);
    }

    #[test]
    fn feed_result_serializes_with_status_tag() {
        let failed = FeedResult::Failure("boom".to_string());
        let json = serde_json::to_value(&failed).unwrap();
        assert_eq!(json["status"], "failure");
        assert_eq!(json["data"], "boom");
        assert!(failed.series().is_none());
    }
}
