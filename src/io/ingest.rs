//! Feed text decoding.
//!
//! Turns the raw body of a tabular feed into a `TimeSeries` under a `Schema`.
//!
//! - The first line is a header and is discarded without validation.
//! - Rows shorter than the schema requires are dropped, never half-decoded.
//! - Numeric cells that do not coerce take the rule's default; parsing never fails.
//! - Row order is preserved (no sorting, no de-duplication).

use csv::StringRecord;
use tracing::debug;

use crate::domain::{ColumnRule, Record, Schema, TimeSeries, Value, ValueKind};

/// Counts gathered while parsing one body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ParseStats {
    pub rows_read: usize,
    pub rows_dropped: usize,
}

impl ParseStats {
    pub fn rows_used(&self) -> usize {
        self.rows_read - self.rows_dropped
    }
}

/// Decode `raw` under `schema`.
pub fn parse(raw: &str, schema: &Schema) -> TimeSeries {
    parse_with_stats(raw, schema).0
}

/// Decode `raw` under `schema`, also reporting how many rows were dropped.
pub fn parse_with_stats(raw: &str, schema: &Schema) -> (TimeSeries, ParseStats) {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        // Every physical line is a row and every comma a delimiter.
        .quoting(false)
        .trim(csv::Trim::All)
        .from_reader(raw.as_bytes());

    let min_columns = schema.min_columns();
    let mut records = Vec::new();
    let mut stats = ParseStats::default();

    for (idx, result) in reader.records().enumerate() {
        // +2: records() starts after the header, lines are 1-based.
        let line = idx + 2;
        stats.rows_read += 1;

        let row = match result {
            Ok(r) => r,
            Err(e) => {
                debug!(schema = schema.id, line, error = %e, "dropping unreadable row");
                stats.rows_dropped += 1;
                continue;
            }
        };

        if row.len() < min_columns {
            debug!(
                schema = schema.id,
                line,
                columns = row.len(),
                required = min_columns,
                "dropping short row"
            );
            stats.rows_dropped += 1;
            continue;
        }

        records.push(decode_row(&row, schema.rules));
    }

    (TimeSeries::new(records), stats)
}

fn decode_row(row: &StringRecord, rules: &[ColumnRule]) -> Record {
    Record::from_fields(rules.iter().map(|rule| {
        // Callers guarantee the row is long enough.
        let cell = row.get(rule.column).unwrap_or("");
        (rule.field, coerce(cell, rule))
    }))
}

fn coerce(cell: &str, rule: &ColumnRule) -> Value {
    match rule.kind {
        ValueKind::Text => Value::Text(cell.to_string()),
        ValueKind::Integer => Value::Int(parse_int_prefix(cell).unwrap_or(rule.default as i64)),
        ValueKind::Float => Value::Float(parse_float_prefix(cell).unwrap_or(rule.default)),
    }
}

/// Parse the leading `[+-]digits` of `s` (`"12.7"` -> 12, `"7 units"` -> 7).
///
/// Digit runs beyond the `i64` range saturate.
fn parse_int_prefix(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    if end == digits_start {
        return None;
    }
    let digits = &s[..end];
    match digits.parse::<i64>() {
        Ok(v) => Some(v),
        Err(_) if digits.starts_with('-') => Some(i64::MIN),
        Err(_) => Some(i64::MAX),
    }
}

/// Parse the longest leading decimal literal of `s` (`"3.5kg"` -> 3.5, `"1e3x"` -> 1000).
fn parse_float_prefix(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }

    let mut mantissa_digits = 0;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
        mantissa_digits += 1;
    }
    if end < bytes.len() && bytes[end] == b'.' {
        let mut frac_end = end + 1;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
            mantissa_digits += 1;
        }
        end = frac_end;
    }
    if mantissa_digits == 0 {
        return None;
    }

    // Exponent only counts when at least one digit follows it.
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    let v = s[..end].parse::<f64>().ok()?;
    if v.is_finite() { Some(v) } else { None }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOTAL: &[ColumnRule] = &[ColumnRule::date(0), ColumnRule::int(1, "total")];
    const STACKED: &[ColumnRule] = &[
        ColumnRule::date(0),
        ColumnRule::float(1, "algo"),
        ColumnRule::float(2, "stable"),
        ColumnRule::float(6, "hafn"),
        ColumnRule::float(3, "total"),
    ];

    fn total_schema() -> Schema {
        Schema::new("test/total", TOTAL)
    }

    #[test]
    fn parses_the_reference_feed() {
        let raw = "date,total\n2024-01-01,500\n2024-02-01,1500\n";
        let series = parse(raw, &total_schema());

        assert_eq!(series.len(), 2);
        assert_eq!(series.records()[0].date(), Some("2024-01-01"));
        assert_eq!(series.records()[0].get("total"), Some(&Value::Int(500)));
        assert_eq!(series.records()[1].date(), Some("2024-02-01"));
        assert_eq!(series.records()[1].get("total"), Some(&Value::Int(1500)));
        // Only schema fields are present.
        assert_eq!(series.records()[0].len(), 2);
    }

    #[test]
    fn empty_bodies_yield_empty_series() {
        assert!(parse("", &total_schema()).is_empty());
        assert!(parse("date,total", &total_schema()).is_empty());
        assert!(parse("date,total\n", &total_schema()).is_empty());
    }

    #[test]
    fn short_rows_are_dropped_not_partially_decoded() {
        let raw = "date,total\n2024-01-01,5\n2024-02-01\n2024-03-01,7\n";
        let (series, stats) = parse_with_stats(raw, &total_schema());

        assert_eq!(series.len(), 2);
        assert_eq!(series.values("total"), vec![5.0, 7.0]);
        assert_eq!(stats.rows_read, 3);
        assert_eq!(stats.rows_dropped, 1);
        assert_eq!(stats.rows_used(), 2);
    }

    #[test]
    fn non_adjacent_columns_map_by_index() {
        let raw = "date,algo,stable,total,x,y,hafn\n2024-01-01,1.5,2.5,10,_,_,6.25\n";
        let series = parse(raw, &Schema::new("test/stacked", STACKED));

        let rec = &series.records()[0];
        assert_eq!(rec.number("algo"), Some(1.5));
        assert_eq!(rec.number("stable"), Some(2.5));
        assert_eq!(rec.number("hafn"), Some(6.25));
        assert_eq!(rec.number("total"), Some(10.0));
    }

    #[test]
    fn rows_missing_a_sparse_column_are_dropped() {
        let raw = "date,algo,stable,total\n2024-01-01,1,2,3\n";
        let series = parse(raw, &Schema::new("test/stacked", STACKED));
        assert!(series.is_empty());
    }

    #[test]
    fn bad_numbers_take_the_rule_default() {
        const WITH_DEFAULT: &[ColumnRule] = &[
            ColumnRule::date(0),
            ColumnRule::int(1, "a"),
            ColumnRule::float(2, "b").with_default(-1.0),
        ];
        let raw = "date,a,b\n2024-01-01,n/a,\n2024-02-01,,oops\n";
        let series = parse(raw, &Schema::new("test/defaults", WITH_DEFAULT));

        assert_eq!(series.len(), 2);
        for rec in series.iter() {
            assert_eq!(rec.get("a"), Some(&Value::Int(0)));
            assert_eq!(rec.get("b"), Some(&Value::Float(-1.0)));
        }
    }

    #[test]
    fn numeric_cells_use_their_leading_prefix() {
        assert_eq!(parse_int_prefix("12.7"), Some(12));
        assert_eq!(parse_int_prefix("-42 units"), Some(-42));
        assert_eq!(parse_int_prefix("+7"), Some(7));
        assert_eq!(parse_int_prefix("abc"), None);
        assert_eq!(parse_int_prefix("-"), None);

        assert_eq!(parse_float_prefix("3.5kg"), Some(3.5));
        assert_eq!(parse_float_prefix(".5"), Some(0.5));
        assert_eq!(parse_float_prefix("1e3x"), Some(1000.0));
        assert_eq!(parse_float_prefix("2e"), Some(2.0));
        assert_eq!(parse_float_prefix("."), None);
        assert_eq!(parse_float_prefix(""), None);
    }

    #[test]
    fn stray_quote_does_not_swallow_following_rows() {
        let raw = "date,total\n2024-01-01,\"5\n2024-02-01,6\n2024-03-01,7\n";
        let series = parse(raw, &total_schema());

        assert_eq!(series.len(), 3);
        assert_eq!(series.values("total"), vec![0.0, 6.0, 7.0]);
        assert_eq!(series.last().unwrap().date(), Some("2024-03-01"));
    }

    #[test]
    fn commas_inside_quotes_still_split_columns() {
        const THIRD: &[ColumnRule] = &[ColumnRule::date(0), ColumnRule::int(2, "total")];
        let raw = "date,a,total\n\"2024,01\",1,9\n";
        let series = parse(raw, &Schema::new("test/third", THIRD));

        assert_eq!(series.len(), 1);
        assert_eq!(series.records()[0].date(), Some("\"2024"));
        assert_eq!(series.records()[0].number("total"), Some(1.0));
    }

    #[test]
    fn oversized_integers_saturate() {
        assert_eq!(parse_int_prefix("99999999999999999999"), Some(i64::MAX));
        assert_eq!(parse_int_prefix("-99999999999999999999 units"), Some(i64::MIN));

        let series = parse("date,total\n2024-01-01,123456789012345678901234\n", &total_schema());
        assert_eq!(series.records()[0].get("total"), Some(&Value::Int(i64::MAX)));
    }

    #[test]
    fn preserves_source_order_and_duplicates() {
        let raw = "date,total\n2024-03-01,3\n2024-01-01,1\n2024-01-01,1\n";
        let series = parse(raw, &total_schema());
        let dates: Vec<_> = series.iter().filter_map(|r| r.date()).collect();
        assert_eq!(dates, vec!["2024-03-01", "2024-01-01", "2024-01-01"]);
    }

    #[test]
    fn parsing_is_a_pure_function_of_input() {
        let raw = "date,total\r\n2024-01-01,1\r\nbad\r\n2024-02-01,2\r\n";
        assert_eq!(parse(raw, &total_schema()), parse(raw, &total_schema()));
        assert_eq!(parse(raw, &total_schema()).len(), 2);
    }

    #[test]
    fn snapshot_feeds_decode_without_a_date() {
        const HOLDERS: &[ColumnRule] = &[ColumnRule::int(0, "total")];
        let series = parse("holders\n42\n", &Schema::new("test/holders", HOLDERS));

        assert_eq!(series.len(), 1);
        assert_eq!(series.records()[0].number("total"), Some(42.0));
        assert_eq!(series.records()[0].date(), None);
    }
}
