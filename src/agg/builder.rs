use super::{group::GroupedAggregation, stream::Aggregation, DayBucket};
use crate::{
    agg::stream::Aggregator, record::RawRecord, time::timestamp, Bucketizer, DayKey, Error,
    Timestamp, TimestampedValue, Window,
};
use std::{borrow::Borrow, marker::PhantomData};

/// Result of aggregating raw feed rows.
#[derive(Clone, Debug, PartialEq)]
pub struct RawAggregation {
    /// One bucket per day of the window, oldest first
    pub buckets: Vec<DayBucket>,

    /// Errors of the rows that were skipped because their timestamp did not parse
    pub skipped: Vec<Error>,
}

/// Configures and runs one aggregation over a window of days.
pub struct Builder<'a, A: Aggregation> {
    pub(crate) phantom: PhantomData<A>,

    /// Time zone and labels to use
    pub(crate) bucketizer: &'a Bucketizer,

    /// Number of trailing days to produce
    pub(crate) window: Window,

    /// Anchor of the window, "now" if unset
    pub(crate) reference_time: Option<Timestamp>,
}

impl<'a, A: Aggregation> Clone for Builder<'a, A> {
    fn clone(&self) -> Self {
        Self {
            phantom: PhantomData,
            bucketizer: self.bucketizer,
            window: self.window,
            reference_time: self.reference_time,
        }
    }
}

impl<'a, A: Aggregation> Builder<'a, A> {
    pub(crate) fn new(bucketizer: &'a Bucketizer, window: Window) -> Self {
        Self {
            phantom: PhantomData,
            bucketizer,
            window,
            reference_time: None,
        }
    }

    /// Sets the window length.
    #[must_use]
    pub fn window(mut self, window: Window) -> Self {
        self.window = window;
        self
    }

    /// Sets the reference time whose calendar day ends the window.
    ///
    /// Defaults to the moment the aggregation runs.
    #[must_use]
    pub fn reference_time<T: Into<Timestamp>>(mut self, ts: T) -> Self {
        self.reference_time = Some(ts.into());
        self
    }

    /// Returns the last day of the window.
    #[must_use]
    pub fn today(&self) -> DayKey {
        self.bucketizer
            .today(self.reference_time.unwrap_or_else(timestamp))
    }

    /// Creates an empty streaming aggregator for the window.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidWindow`] if the window reaches outside the
    /// representable calendar.
    pub fn aggregator(&self) -> crate::Result<Aggregator<A>> {
        let keys = self.window.keys(self.today())?;

        Aggregator::new(self.bucketizer.time_zone(), &keys, self.bucketizer.labeler())
            .ok_or(Error::InvalidWindow(self.window.len()))
    }

    /// Aggregates `records` into one bucket per day of the window.
    ///
    /// Records outside of the window are discarded.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidWindow`] if the window reaches outside the
    /// representable calendar.
    pub fn run<I>(self, records: I) -> crate::Result<Vec<DayBucket>>
    where
        I: IntoIterator,
        I::Item: Borrow<TimestampedValue>,
    {
        let mut aggregator = self.aggregator()?;
        let folded = aggregator.extend(records);

        log::debug!(
            "aggregated {folded} records into {} days starting {}",
            aggregator.len(),
            aggregator.first_day(),
        );

        Ok(aggregator.finish())
    }

    /// Aggregates raw feed rows, skipping rows whose timestamp does not parse.
    ///
    /// A malformed row never discards the rest of the window's data; the
    /// errors of skipped rows are returned alongside the buckets.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidWindow`] if the window reaches outside the
    /// representable calendar.
    pub fn run_raw<'r, I, R>(self, rows: I) -> crate::Result<RawAggregation>
    where
        I: IntoIterator<Item = R>,
        R: Into<RawRecord<'r>>,
    {
        let mut aggregator = self.aggregator()?;
        let mut skipped = vec![];

        for row in rows {
            let row: RawRecord<'r> = row.into();

            match TimestampedValue::try_from(row) {
                Ok(record) => {
                    aggregator.push(&record);
                }
                Err(e) => {
                    log::warn!("skipping row: {e}");
                    skipped.push(e);
                }
            }
        }

        Ok(RawAggregation {
            buckets: aggregator.finish(),
            skipped,
        })
    }

    /// Aggregates `(group, record)` pairs, giving every group its own full window.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidWindow`] if the window reaches outside the
    /// representable calendar.
    pub fn run_grouped<I, G>(self, rows: I) -> crate::Result<GroupedAggregation<A>>
    where
        I: IntoIterator<Item = (G, TimestampedValue)>,
        G: AsRef<str>,
    {
        let template = self.aggregator()?;

        let mut map: crate::HashMap<String, Aggregator<A>> = crate::HashMap::default();

        for (group, record) in rows {
            let group = group.as_ref();

            if let Some(aggregator) = map.get_mut(group) {
                aggregator.push(&record);
            } else {
                let mut aggregator = template.clone();
                aggregator.push(&record);
                map.insert(group.to_owned(), aggregator);
            }
        }

        log::debug!("aggregated {} groups", map.len());

        Ok(GroupedAggregation(map))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{agg::functions::Sum, Value};
    use chrono::{NaiveDate, TimeZone, Utc};
    use chrono_tz::Tz;
    use test_log::test;

    fn bucketizer() -> Bucketizer {
        Bucketizer::builder().time_zone("UTC").build().unwrap()
    }

    fn reference() -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 10, 12, 0, 0).unwrap()
    }

    fn at(day: u32, hour: u32, value: Value) -> TimestampedValue {
        TimestampedValue::new(
            NaiveDate::from_ymd_opt(2024, 1, day)
                .unwrap()
                .and_hms_opt(hour, 0, 0)
                .unwrap(),
            value,
        )
    }

    fn keys(buckets: &[DayBucket]) -> Vec<String> {
        buckets.iter().map(|b| b.key.to_string()).collect()
    }

    fn totals(buckets: &[DayBucket]) -> Vec<Value> {
        buckets.iter().map(|b| b.total).collect()
    }

    #[test]
    fn builder_empty_records() {
        let bucketizer = bucketizer();

        let buckets = bucketizer
            .sum(Window::days(3).unwrap())
            .reference_time(reference())
            .run(Vec::<TimestampedValue>::new())
            .unwrap();

        assert_eq!(vec!["2024-01-08", "2024-01-09", "2024-01-10"], keys(&buckets));
        assert_eq!(vec![0.0, 0.0, 0.0], totals(&buckets));
    }

    #[test]
    fn builder_discards_out_of_window() {
        let bucketizer = bucketizer();

        let records = vec![at(9, 8, 100.0), at(9, 20, 50.0), at(5, 0, 999.0)];

        let buckets = bucketizer
            .sum(Window::days(3).unwrap())
            .reference_time(reference())
            .run(&records)
            .unwrap();

        assert_eq!(vec![0.0, 150.0, 0.0], totals(&buckets));
        assert_eq!(
            vec!["08/01", "09/01", "10/01"],
            buckets.iter().map(|b| b.label.as_str()).collect::<Vec<_>>()
        );
    }

    #[test]
    fn builder_window_override() {
        let bucketizer = bucketizer();

        let builder = bucketizer
            .sum(Window::WEEK)
            .window(Window::days(2).unwrap())
            .reference_time(reference());

        assert_eq!(DayKey::from_ymd(2024, 1, 10).unwrap(), builder.today());
        assert_eq!(2, builder.run(&[at(9, 0, 1.0)]).unwrap().len());
    }

    #[test]
    fn builder_today_follows_zone() {
        let bucketizer = Bucketizer::builder().tz(Tz::America__Sao_Paulo).build().unwrap();

        // 2024-01-10T01:00Z is 2024-01-09T22:00 in Sao Paulo
        let builder = bucketizer
            .sum(Window::WEEK)
            .reference_time(Utc.with_ymd_and_hms(2024, 1, 10, 1, 0, 0).unwrap());

        assert_eq!(DayKey::from_ymd(2024, 1, 9).unwrap(), builder.today());
    }

    #[test]
    fn builder_raw_skips_malformed_rows() {
        let bucketizer = bucketizer();

        let rows = [
            ("2024-01-09T08:00:00+00:00", 100.0),
            ("garbage", 1_000.0),
            ("2024-01-09T20:00:00Z", 50.0),
            ("", 1.0),
            ("2024-01-10", 7.5),
        ];

        let result = bucketizer
            .sum(Window::days(3).unwrap())
            .reference_time(reference())
            .run_raw(rows)
            .unwrap();

        assert_eq!(vec![0.0, 150.0, 7.5], totals(&result.buckets));
        assert_eq!(2, result.skipped.len());
        assert!(result
            .skipped
            .iter()
            .all(|e| matches!(e, Error::InvalidTimestamp { .. })));
    }

    #[test]
    fn builder_grouped() {
        let bucketizer = bucketizer();

        let rows = vec![
            ("pix", at(9, 8, 100.0)),
            ("card", at(10, 9, 20.0)),
            ("pix", at(10, 9, 30.0)),
            ("pix", at(1, 9, 30.0)),
            ("cash", at(2, 9, 5.0)),
        ];

        let groups = bucketizer
            .sum(Window::days(3).unwrap())
            .reference_time(reference())
            .run_grouped(rows)
            .unwrap();

        assert_eq!(3, groups.len());

        let groups = groups.collect();
        assert_eq!(vec![0.0, 100.0, 30.0], totals(&groups["pix"]));
        assert_eq!(vec![0.0, 0.0, 20.0], totals(&groups["card"]));
        assert_eq!(vec![0.0, 0.0, 0.0], totals(&groups["cash"]));

        for buckets in groups.values() {
            assert_eq!(vec!["2024-01-08", "2024-01-09", "2024-01-10"], keys(buckets));
        }
    }

    #[test]
    fn builder_is_idempotent() {
        let bucketizer = bucketizer();
        let records = vec![at(8, 1, 1.5), at(10, 23, 2.25), at(9, 12, -1.0)];

        let builder = bucketizer
            .aggregate::<Sum>(Window::days(5).unwrap())
            .reference_time(reference());

        assert_eq!(
            builder.clone().run(&records).unwrap(),
            builder.run(&records).unwrap()
        );
    }
}
