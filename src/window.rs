use crate::{DayKey, Error};
use chrono::Days;

/// A trailing span of calendar days ending at "today".
///
/// Always at least one day long.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Window(u32);

impl Window {
    /// The last 7 days, today included.
    pub const WEEK: Self = Self(7);

    /// The last 30 days, today included.
    pub const MONTH: Self = Self(30);

    /// Creates a window of `n` days.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidWindow`] if `n` is zero.
    pub fn days(n: u32) -> crate::Result<Self> {
        if n == 0 {
            Err(Error::InvalidWindow(n))
        } else {
            Ok(Self(n))
        }
    }

    /// Number of days in the window.
    #[must_use]
    #[allow(clippy::len_without_is_empty)]
    pub const fn len(&self) -> u32 {
        self.0
    }

    /// Returns the oldest day of the window ending at `today`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidWindow`] if the window would start before the
    /// earliest representable date.
    pub fn first_day(&self, today: DayKey) -> crate::Result<DayKey> {
        today
            .date()
            .checked_sub_days(Days::new(u64::from(self.0 - 1)))
            .map(DayKey::new)
            .ok_or(Error::InvalidWindow(self.0))
    }

    /// Returns every day of the window ending at `today`, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidWindow`] if the window would start before the
    /// earliest representable date.
    pub fn keys(&self, today: DayKey) -> crate::Result<Vec<DayKey>> {
        let first = self.first_day(today)?.date();

        Ok(first
            .iter_days()
            .take(self.0 as usize)
            .map(DayKey::new)
            .collect())
    }
}

impl TryFrom<u32> for Window {
    type Error = Error;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::days(value)
    }
}
