use super::DayBucket;
use crate::{label::Labeler, DayKey, TimestampedValue, Value};
use chrono_tz::Tz;
use std::{borrow::Borrow, marker::PhantomData};

/// Defines an aggregation.
///
/// - `init` turns the first value of a day into the accumulator (default: Identity)
///
/// - `transform` defines what to do with each further value (default: Add)
///
/// - `finish` can transform the result value (default: Identity)
///
/// Days without records skip all three and keep a value of 0.
pub trait Aggregation {
    /// Starts the accumulator from the first value of a day.
    fn init(value: Value) -> Value {
        value
    }

    /// Folds another value of the same day into the accumulator.
    fn transform(accu: Value, x: Value) -> Value {
        accu + x
    }

    /// Produces the final value of a non-empty day.
    fn finish(bucket: &DayBucket) -> Value {
        bucket.total
    }
}

/// A streaming aggregator over a fixed window of calendar days.
///
/// Records can be pushed in any order, one at a time; records outside of
/// the window are discarded.
pub struct Aggregator<A: Aggregation> {
    time_zone: Tz,
    first: DayKey,
    buckets: Vec<DayBucket>,
    phantom: PhantomData<A>,
}

impl<A: Aggregation> Clone for Aggregator<A> {
    fn clone(&self) -> Self {
        Self {
            time_zone: self.time_zone,
            first: self.first,
            buckets: self.buckets.clone(),
            phantom: PhantomData,
        }
    }
}

impl<A: Aggregation> std::fmt::Debug for Aggregator<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Aggregator")
            .field("time_zone", &self.time_zone)
            .field("first", &self.first)
            .field("buckets", &self.buckets)
            .finish()
    }
}

impl<A: Aggregation> Aggregator<A> {
    /// `keys` must be contiguous and non-empty.
    pub(crate) fn new(time_zone: Tz, keys: &[DayKey], labeler: &dyn Labeler) -> Option<Self> {
        let first = *keys.first()?;

        let buckets = keys
            .iter()
            .map(|&key| DayBucket::empty(key, labeler.label(key)))
            .collect();

        Some(Self {
            time_zone,
            first,
            buckets,
            phantom: PhantomData,
        })
    }

    /// Oldest day of the window.
    #[must_use]
    pub fn first_day(&self) -> DayKey {
        self.first
    }

    /// Number of days in the window.
    #[must_use]
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    /// Folds a record into its day.
    ///
    /// Returns `false` if the record falls outside of the window.
    pub fn push(&mut self, record: &TimestampedValue) -> bool {
        let key = record.ts.day_key(&self.time_zone);

        let Some(bucket) = usize::try_from(key.days_since(self.first))
            .ok()
            .and_then(|idx| self.buckets.get_mut(idx))
        else {
            log::trace!("discarding record on {key}, outside of window starting {}", self.first);
            return false;
        };

        if bucket.len == 0 {
            bucket.total = A::init(record.value);
        } else {
            bucket.total = A::transform(bucket.total, record.value);
        }
        bucket.len += 1;

        true
    }

    /// Folds all records, returning how many fell inside the window.
    pub fn extend<I>(&mut self, records: I) -> usize
    where
        I: IntoIterator,
        I::Item: Borrow<TimestampedValue>,
    {
        let mut folded = 0;

        for record in records {
            if self.push(record.borrow()) {
                folded += 1;
            }
        }

        folded
    }

    /// Finishes the aggregation, returning one bucket per day, oldest first.
    #[must_use]
    pub fn finish(self) -> Vec<DayBucket> {
        let mut buckets = self.buckets;

        for bucket in buckets.iter_mut().filter(|b| !b.is_empty()) {
            bucket.total = A::finish(bucket);
        }

        buckets
    }
}
