use crate::DayKey;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

/// A point in time attached to a value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Timestamp {
    /// An instant with a known UTC offset.
    ///
    /// Converted into the bucketizer's time zone before taking its date.
    Absolute(DateTime<FixedOffset>),

    /// A wall-clock time without offset.
    ///
    /// Read as local time in the bucketizer's time zone, so its date is
    /// used as is.
    Floating(NaiveDateTime),
}

impl Timestamp {
    /// Returns the calendar day this timestamp falls on in `tz`.
    #[must_use]
    pub fn day_key(&self, tz: &Tz) -> DayKey {
        match self {
            Self::Absolute(dt) => DayKey::new(dt.with_timezone(tz).date_naive()),
            Self::Floating(dt) => DayKey::new(dt.date()),
        }
    }
}

impl<Z: TimeZone> From<DateTime<Z>> for Timestamp {
    fn from(value: DateTime<Z>) -> Self {
        Self::Absolute(value.fixed_offset())
    }
}

impl From<NaiveDateTime> for Timestamp {
    fn from(value: NaiveDateTime) -> Self {
        Self::Floating(value)
    }
}

impl From<NaiveDate> for Timestamp {
    fn from(value: NaiveDate) -> Self {
        Self::Floating(value.and_time(chrono::NaiveTime::MIN))
    }
}

impl std::str::FromStr for Timestamp {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::parser::parse_timestamp(s)
    }
}

/// Returns the current time.
#[must_use]
pub fn timestamp() -> Timestamp {
    Utc::now().into()
}
