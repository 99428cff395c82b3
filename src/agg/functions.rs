use super::{stream::Aggregation, DayBucket};
use crate::Value;

/// Sum of the day's values.
#[derive(Clone, Copy, Debug, Default)]
pub struct Sum;

impl Aggregation for Sum {}

/// Number of records on the day.
#[derive(Clone, Copy, Debug, Default)]
pub struct Count;

impl Aggregation for Count {
    fn init(_: Value) -> Value {
        1.0
    }

    fn transform(accu: Value, _: Value) -> Value {
        accu + 1.0
    }
}

/// Arithmetic mean of the day's values.
#[derive(Clone, Copy, Debug, Default)]
pub struct Avg;

impl Aggregation for Avg {
    #[allow(clippy::cast_precision_loss)]
    fn finish(bucket: &DayBucket) -> Value {
        bucket.total / bucket.len as Value
    }
}

/// Smallest of the day's values.
#[derive(Clone, Copy, Debug, Default)]
pub struct Min;

impl Aggregation for Min {
    fn transform(accu: Value, x: Value) -> Value {
        accu.min(x)
    }
}

/// Largest of the day's values.
#[derive(Clone, Copy, Debug, Default)]
pub struct Max;

impl Aggregation for Max {
    fn transform(accu: Value, x: Value) -> Value {
        accu.max(x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{agg::stream::Aggregator, label::IsoDate, DayKey, TimestampedValue, Window};
    use chrono::NaiveDate;
    use chrono_tz::Tz;
    use test_log::test;

    /// Folds `values` onto the middle day of a 3-day window.
    fn run<A: Aggregation>(values: &[Value]) -> Vec<DayBucket> {
        let today = DayKey::from_ymd(2024, 1, 10).unwrap();
        let keys = Window::days(3).unwrap().keys(today).unwrap();
        let mut agg = Aggregator::<A>::new(Tz::UTC, &keys, &IsoDate).unwrap();

        let day = NaiveDate::from_ymd_opt(2024, 1, 9).unwrap();
        for (idx, &value) in values.iter().enumerate() {
            let ts = day.and_hms_opt(u32::try_from(idx).unwrap(), 0, 0).unwrap();
            agg.push(&TimestampedValue::new(ts, value));
        }

        agg.finish()
    }

    fn totals(buckets: &[DayBucket]) -> Vec<Value> {
        buckets.iter().map(|b| b.total).collect()
    }

    #[test]
    fn agg_sum() {
        assert_eq!(vec![0.0, 150.0, 0.0], totals(&run::<Sum>(&[100.0, 50.0])));
    }

    #[test]
    fn agg_count() {
        assert_eq!(vec![0.0, 3.0, 0.0], totals(&run::<Count>(&[7.0, -2.0, 7.0])));
    }

    #[test]
    fn agg_avg() {
        assert_eq!(vec![0.0, 4.0, 0.0], totals(&run::<Avg>(&[2.0, 4.0, 6.0])));
    }

    #[test]
    fn agg_min_max() {
        let values = [5.0, -3.0, 12.0, 1.0];
        assert_eq!(vec![0.0, -3.0, 0.0], totals(&run::<Min>(&values)));
        assert_eq!(vec![0.0, 12.0, 0.0], totals(&run::<Max>(&values)));
    }

    #[test]
    fn agg_min_max_single_value() {
        assert_eq!(vec![0.0, 42.0, 0.0], totals(&run::<Min>(&[42.0])));
        assert_eq!(vec![0.0, -42.0, 0.0], totals(&run::<Max>(&[-42.0])));
    }
}
