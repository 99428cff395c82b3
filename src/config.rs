use crate::{
    label::{Labeler, ShortDate, DEFAULT_LOCALE},
    tz::{parse_tz, DEFAULT_TIME_ZONE},
    Bucketizer,
};
use chrono_tz::Tz;
use std::sync::Arc;

enum TimeZone {
    Name(String),
    Resolved(Tz),
}

/// Builder for [`Bucketizer`].
pub struct Builder {
    time_zone: TimeZone,
    locale: String,
    labeler: Option<Arc<dyn Labeler>>,
}

impl Builder {
    pub(crate) fn new() -> Self {
        Self {
            time_zone: TimeZone::Resolved(DEFAULT_TIME_ZONE),
            locale: DEFAULT_LOCALE.to_owned(),
            labeler: None,
        }
    }

    /// Sets the IANA time zone in which calendar days are resolved.
    ///
    /// Default = `America/Sao_Paulo`
    #[must_use]
    pub fn time_zone(mut self, name: &str) -> Self {
        self.time_zone = TimeZone::Name(name.to_owned());
        self
    }

    /// Sets the time zone from an already resolved [`Tz`].
    #[must_use]
    pub fn tz(mut self, tz: Tz) -> Self {
        self.time_zone = TimeZone::Resolved(tz);
        self
    }

    /// Sets the locale of the day/month labels, e.g. `pt-BR` or `en_US`.
    ///
    /// Default = `pt-BR`
    #[must_use]
    pub fn locale(mut self, locale: &str) -> Self {
        locale.clone_into(&mut self.locale);
        self
    }

    /// Uses a custom labeler instead of the locale's day/month format.
    #[must_use]
    pub fn labeler<L: Labeler + 'static>(mut self, labeler: L) -> Self {
        self.labeler = Some(Arc::new(labeler));
        self
    }

    /// Resolves the time zone and locale.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::UnknownTimeZone`] or [`crate::Error::UnknownLocale`]
    /// if a name cannot be resolved.
    pub fn build(self) -> crate::Result<Bucketizer> {
        let time_zone = match &self.time_zone {
            TimeZone::Name(name) => parse_tz(name)?,
            TimeZone::Resolved(tz) => *tz,
        };

        let labeler = match self.labeler {
            Some(labeler) => labeler,
            None => Arc::new(ShortDate::new(&self.locale)?),
        };

        log::debug!(
            "bucketizing in time zone {} with locale {:?}",
            time_zone.name(),
            self.locale
        );

        Ok(Bucketizer::from_parts(time_zone, labeler))
    }
}
