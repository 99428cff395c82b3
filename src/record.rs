use crate::{parser::parse_timestamp, Timestamp, Value};

/// A value observed at a point in time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimestampedValue {
    /// When the value was observed
    pub ts: Timestamp,

    /// The observed value
    pub value: Value,
}

impl TimestampedValue {
    /// Creates a record.
    pub fn new<T: Into<Timestamp>>(ts: T, value: Value) -> Self {
        Self {
            ts: ts.into(),
            value,
        }
    }
}

/// A row as delivered by a data feed, with its timestamp still a string.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RawRecord<'a> {
    /// Unparsed timestamp, e.g. `2024-01-09T08:00:00+00:00`
    pub timestamp: &'a str,

    /// The observed value
    pub value: Value,
}

impl<'a> From<(&'a str, Value)> for RawRecord<'a> {
    fn from((timestamp, value): (&'a str, Value)) -> Self {
        Self { timestamp, value }
    }
}

impl TryFrom<RawRecord<'_>> for TimestampedValue {
    type Error = crate::Error;

    fn try_from(raw: RawRecord<'_>) -> Result<Self, Self::Error> {
        Ok(Self {
            ts: parse_timestamp(raw.timestamp)?,
            value: raw.value,
        })
    }
}
