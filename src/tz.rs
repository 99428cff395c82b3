use crate::Error;
use chrono_tz::Tz;

/// Time zone used when none is configured.
pub const DEFAULT_TIME_ZONE: Tz = Tz::America__Sao_Paulo;

/// Resolves an IANA time zone name, e.g. `America/Sao_Paulo`.
///
/// # Errors
///
/// Returns [`Error::UnknownTimeZone`] if the name is not in the tz database.
pub fn parse_tz(name: &str) -> crate::Result<Tz> {
    name.trim()
        .parse::<Tz>()
        .map_err(|_| Error::UnknownTimeZone(name.to_owned()))
}
