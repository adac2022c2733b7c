use crate::domain::{DeltaPolicy, KpiSummary, TimeSeries};

/// Summarize `value_field` of `series` under `policy`.
///
/// Pure read of the series. An empty series yields `0` with no delta, and a
/// comparison point that is missing, zero, or out of range leaves the delta
/// undefined rather than failing.
pub fn summarize(
    metric_id: &str,
    series: &TimeSeries,
    value_field: &str,
    policy: DeltaPolicy,
) -> KpiSummary {
    let value_at = |idx: usize| series.get(idx).and_then(|r| r.number(value_field)).unwrap_or(0.0);

    let Some(last_idx) = series.len().checked_sub(1) else {
        return KpiSummary {
            metric_id: metric_id.to_string(),
            current_value: 0.0,
            delta: None,
            delta_window: policy,
        };
    };

    let current = value_at(last_idx);
    let previous_idx = match policy {
        DeltaPolicy::Adjacent => last_idx.checked_sub(1),
        DeltaPolicy::LookbackN(n) => last_idx.checked_sub(n),
        DeltaPolicy::None => None,
    };
    let delta = previous_idx.and_then(|idx| relative_change(current, value_at(idx)));

    KpiSummary {
        metric_id: metric_id.to_string(),
        current_value: current,
        delta,
        delta_window: policy,
    }
}

fn relative_change(current: f64, previous: f64) -> Option<f64> {
    if previous == 0.0 || !previous.is_finite() {
        return None;
    }
    let delta = current / previous - 1.0;
    delta.is_finite().then_some(delta)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Record, Value};

    fn series(values: &[i64]) -> TimeSeries {
        TimeSeries::new(
            values
                .iter()
                .enumerate()
                .map(|(i, v)| {
                    Record::from_fields([
                        ("date", Value::Text(format!("2024-01-{:02}", i + 1))),
                        ("total", Value::Int(*v)),
                    ])
                })
                .collect(),
        )
    }

    #[test]
    fn adjacent_compares_last_two_records() {
        let kpi = summarize("tx", &series(&[10, 20, 40]), "total", DeltaPolicy::Adjacent);
        assert_eq!(kpi.metric_id, "tx");
        assert_eq!(kpi.current_value, 40.0);
        assert_eq!(kpi.delta, Some(1.0));
        assert_eq!(kpi.delta_window, DeltaPolicy::Adjacent);
    }

    #[test]
    fn adjacent_on_a_single_record_has_no_delta() {
        let kpi = summarize("tx", &series(&[10]), "total", DeltaPolicy::Adjacent);
        assert_eq!(kpi.current_value, 10.0);
        assert_eq!(kpi.delta, None);
    }

    #[test]
    fn zero_previous_leaves_delta_undefined() {
        let kpi = summarize("tx", &series(&[0, 5]), "total", DeltaPolicy::Adjacent);
        assert_eq!(kpi.current_value, 5.0);
        assert_eq!(kpi.delta, None);
    }

    #[test]
    fn lookback_uses_positional_offset() {
        let s = series(&[10, 20, 40]);

        let kpi = summarize("mc", &s, "total", DeltaPolicy::LookbackN(2));
        assert_eq!(kpi.delta, Some(3.0));

        // Index len-1-3 is negative.
        let kpi = summarize("mc", &s, "total", DeltaPolicy::LookbackN(3));
        assert_eq!(kpi.current_value, 40.0);
        assert_eq!(kpi.delta, None);
    }

    #[test]
    fn lookback_thirty_needs_thirty_one_records() {
        let mut values: Vec<i64> = (1..=30).collect();
        let kpi = summarize("mc", &series(&values), "total", DeltaPolicy::LookbackN(30));
        assert_eq!(kpi.delta, None);

        values.push(62);
        let kpi = summarize("mc", &series(&values), "total", DeltaPolicy::LookbackN(30));
        assert_eq!(kpi.delta, Some(61.0));
    }

    #[test]
    fn none_policy_never_has_a_delta() {
        let snapshot = TimeSeries::new(vec![Record::from_fields([("total", Value::Int(42))])]);
        let kpi = summarize("holders", &snapshot, "total", DeltaPolicy::None);
        assert_eq!(kpi.current_value, 42.0);
        assert_eq!(kpi.delta, None);

        let kpi = summarize("holders", &series(&[1, 2, 3]), "total", DeltaPolicy::None);
        assert_eq!(kpi.current_value, 3.0);
        assert_eq!(kpi.delta, None);
    }

    #[test]
    fn empty_series_is_zero_without_delta() {
        for policy in [DeltaPolicy::Adjacent, DeltaPolicy::LookbackN(30), DeltaPolicy::None] {
            let kpi = summarize("x", &TimeSeries::empty(), "total", policy);
            assert_eq!(kpi.current_value, 0.0);
            assert_eq!(kpi.delta, None);
            assert_eq!(kpi.delta_window, policy);
        }
    }

    #[test]
    fn negative_change_is_reported() {
        let kpi = summarize("tx", &series(&[200, 150]), "total", DeltaPolicy::Adjacent);
        assert_eq!(kpi.delta, Some(-0.25));
    }

    #[test]
    fn missing_value_field_reads_as_zero() {
        let kpi = summarize("tx", &series(&[1, 2]), "volume", DeltaPolicy::Adjacent);
        assert_eq!(kpi.current_value, 0.0);
        assert_eq!(kpi.delta, None);
    }
}
