use crate::{DayKey, Error};
use chrono::{Locale, NaiveDate};
use std::fmt::Write;

/// Locale used for labels when none is configured.
pub const DEFAULT_LOCALE: &str = "pt-BR";

/// Turns a day key into a human-readable label.
///
/// Implemented for [`ShortDate`], [`IsoDate`] and any
/// `Fn(DayKey) -> String` closure.
pub trait Labeler: Send + Sync {
    /// Formats the label for `day`.
    fn label(&self, day: DayKey) -> String;
}

impl<F> Labeler for F
where
    F: Fn(DayKey) -> String + Send + Sync,
{
    fn label(&self, day: DayKey) -> String {
        self(day)
    }
}

/// Labels a day with its key, e.g. `2024-01-09`.
#[derive(Clone, Copy, Debug, Default)]
pub struct IsoDate;

impl Labeler for IsoDate {
    fn label(&self, day: DayKey) -> String {
        day.to_string()
    }
}

/// Short day/month label in the order and with the separator a locale uses,
/// e.g. `09/01` for `pt-BR` or `01/09` for `en-US`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShortDate {
    day_first: bool,
    separator: String,
}

impl Default for ShortDate {
    fn default() -> Self {
        Self {
            day_first: true,
            separator: "/".into(),
        }
    }
}

impl ShortDate {
    /// Creates a labeler for a locale identifier, either `pt-BR` or `pt_BR` style.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownLocale`] if the locale is not known.
    pub fn new(locale: &str) -> crate::Result<Self> {
        let normalized = locale.trim().replace('-', "_");

        let locale_id = Locale::try_from(normalized.as_str())
            .map_err(|_| Error::UnknownLocale(locale.to_owned()))?;

        Ok(Self::from_locale(locale_id))
    }

    /// Derives day/month order and separator from the locale's date format.
    #[must_use]
    pub fn from_locale(locale: Locale) -> Self {
        // Day and month are distinct two-digit numbers that don't occur in the year
        let mut sample = String::new();
        if let Some(date) = NaiveDate::from_ymd_opt(1999, 12, 31) {
            if write!(sample, "{}", date.format_localized("%x", locale)).is_err() {
                log::debug!("cannot render {locale:?} date format, using default");
                return Self::default();
            }
        }

        let (Some(day_pos), Some(month_pos)) = (sample.find("31"), sample.find("12")) else {
            log::debug!("no numeric day/month in {locale:?} date format {sample:?}, using default");
            return Self::default();
        };

        let day_first = day_pos < month_pos;
        let (first_end, second_start) = if day_first {
            (day_pos + 2, month_pos)
        } else {
            (month_pos + 2, day_pos)
        };

        // Non-numeric markers (e.g. 月, 월) come with a suffix we don't carry
        let separator = sample
            .get(first_end..second_start)
            .filter(|s| {
                !s.is_empty() && s.chars().all(|c| c.is_ascii_punctuation() || c.is_whitespace())
            })
            .unwrap_or("/");

        Self {
            day_first,
            separator: separator.to_owned(),
        }
    }
}

impl Labeler for ShortDate {
    fn label(&self, day: DayKey) -> String {
        if self.day_first {
            format!("{:02}{}{:02}", day.day(), self.separator, day.month())
        } else {
            format!("{:02}{}{:02}", day.month(), self.separator, day.day())
        }
    }
}
