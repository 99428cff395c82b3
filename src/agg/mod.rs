pub(crate) mod builder;
pub(crate) mod functions;
pub(crate) mod group;
pub(crate) mod stream;

use crate::{DayKey, Value};

/// One calendar day of an aggregated window.
#[derive(Clone, Debug, PartialEq)]
pub struct DayBucket {
    /// The calendar day
    pub key: DayKey,

    /// Human-readable label of the day (e.g. `09/01`)
    pub label: String,

    /// Aggregated value of the day, 0 if no record fell on it
    pub total: Value,

    /// Number of records folded into the bucket
    pub len: usize,
}

impl DayBucket {
    pub(crate) fn empty(key: DayKey, label: String) -> Self {
        Self {
            key,
            label,
            total: 0.0,
            len: 0,
        }
    }

    /// Returns `true` if no record fell on this day.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}
