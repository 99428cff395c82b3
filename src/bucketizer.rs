use crate::{
    agg::{
        builder::Builder,
        functions::{Avg, Count, Max, Min, Sum},
        stream::Aggregation,
        DayBucket,
    },
    config,
    label::{Labeler, ShortDate},
    tz::DEFAULT_TIME_ZONE,
    DayKey, Timestamp, TimestampedValue, Window,
};
use chrono_tz::Tz;
use std::{borrow::Borrow, sync::Arc};

/// Buckets time-stamped values into calendar days of a time zone.
///
/// Cheap to clone; holds no state besides its configuration.
#[derive(Clone)]
pub struct Bucketizer {
    time_zone: Tz,
    labeler: Arc<dyn Labeler>,
}

impl std::fmt::Debug for Bucketizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bucketizer")
            .field("time_zone", &self.time_zone.name())
            .finish_non_exhaustive()
    }
}

impl Default for Bucketizer {
    /// `America/Sao_Paulo` with `pt-BR` day/month labels.
    fn default() -> Self {
        Self {
            time_zone: DEFAULT_TIME_ZONE,
            labeler: Arc::new(ShortDate::default()),
        }
    }
}

impl Bucketizer {
    /// Creates a new bucketizer builder to set the time zone and labels.
    #[must_use]
    pub fn builder() -> config::Builder {
        config::Builder::new()
    }

    pub(crate) fn from_parts(time_zone: Tz, labeler: Arc<dyn Labeler>) -> Self {
        Self {
            time_zone,
            labeler,
        }
    }

    /// Time zone in which calendar days are resolved.
    #[must_use]
    pub fn time_zone(&self) -> Tz {
        self.time_zone
    }

    pub(crate) fn labeler(&self) -> &dyn Labeler {
        self.labeler.as_ref()
    }

    /// Formats the label of a day.
    #[must_use]
    pub fn label(&self, day: DayKey) -> String {
        self.labeler.label(day)
    }

    /// Returns the calendar day of `reference` in the configured time zone.
    #[must_use]
    pub fn today<T: Into<Timestamp>>(&self, reference: T) -> DayKey {
        reference.into().day_key(&self.time_zone)
    }

    /// Starts an aggregation of any [`Aggregation`] over `window`.
    #[must_use]
    pub fn aggregate<A: Aggregation>(&self, window: Window) -> Builder<'_, A> {
        Builder::new(self, window)
    }

    /// Sums values per day.
    ///
    /// ```
    /// use chrono::{NaiveDate, TimeZone, Utc};
    /// use daybucket::{Bucketizer, TimestampedValue, Window};
    ///
    /// let bucketizer = Bucketizer::builder()
    ///     .time_zone("America/Sao_Paulo")
    ///     .locale("pt-BR")
    ///     .build()?;
    ///
    /// let sale = NaiveDate::from_ymd_opt(2024, 1, 9).unwrap().and_hms_opt(8, 0, 0).unwrap();
    ///
    /// let buckets = bucketizer
    ///     .sum(Window::days(3)?)
    ///     .reference_time(Utc.with_ymd_and_hms(2024, 1, 10, 15, 0, 0).unwrap())
    ///     .run(&[TimestampedValue::new(sale, 100.0)])?;
    ///
    /// assert_eq!(3, buckets.len());
    /// assert_eq!("09/01", buckets[1].label);
    /// assert_eq!(100.0, buckets[1].total);
    /// #
    /// # Ok::<(), daybucket::Error>(())
    /// ```
    #[must_use]
    pub fn sum(&self, window: Window) -> Builder<'_, Sum> {
        self.aggregate(window)
    }

    /// Counts records per day.
    #[must_use]
    pub fn count(&self, window: Window) -> Builder<'_, Count> {
        self.aggregate(window)
    }

    /// Averages values per day.
    #[must_use]
    pub fn avg(&self, window: Window) -> Builder<'_, Avg> {
        self.aggregate(window)
    }

    /// Takes the smallest value per day.
    #[must_use]
    pub fn min(&self, window: Window) -> Builder<'_, Min> {
        self.aggregate(window)
    }

    /// Takes the largest value per day.
    #[must_use]
    pub fn max(&self, window: Window) -> Builder<'_, Max> {
        self.aggregate(window)
    }
}

/// Sums `records` per calendar day over the `window_days` days ending at
/// `reference_time`, using the default [`Bucketizer`].
///
/// Returns exactly `window_days` buckets, oldest first; days without
/// records have a total of 0 and records outside of the window are ignored.
///
/// # Errors
///
/// Returns [`crate::Error::InvalidWindow`] if `window_days` is 0.
pub fn aggregate<I, T>(
    records: I,
    window_days: u32,
    reference_time: T,
) -> crate::Result<Vec<DayBucket>>
where
    I: IntoIterator,
    I::Item: Borrow<TimestampedValue>,
    T: Into<Timestamp>,
{
    Bucketizer::default()
        .sum(Window::days(window_days)?)
        .reference_time(reference_time)
        .run(records)
}
