//! Lenient parser for the timestamp strings found in raw data feeds.
//!
//! Accepted shapes:
//!
//! - `2024-01-09` (floating, midnight)
//! - `2024-01-09T08:00`, `2024-01-09 08:00:15.25` (floating)
//! - any of the above with a time, followed by `Z`, `±HH`, `±HHMM` or `±HH:MM` (absolute)

use crate::{Error, Timestamp};
use chrono::{FixedOffset, NaiveDate, NaiveTime};
use nom::{
    branch::alt,
    bytes::complete::{take_while1, take_while_m_n},
    character::complete::{char, one_of, space0},
    combinator::{eof, map, map_opt, map_res, opt},
    error::ErrorKind,
    sequence::{preceded, tuple},
    IResult,
};
use nom_locate::LocatedSpan;

type RawSpan<'a> = LocatedSpan<&'a str>;

type ParseResult<'a, T> = IResult<RawSpan<'a>, T>;

/// Parses a located span into a value.
trait Parse<'a>: Sized {
    fn parse(input: RawSpan<'a>) -> ParseResult<'a, Self>;

    fn parse_from_raw(input: &'a str) -> ParseResult<'a, Self> {
        Self::parse(LocatedSpan::new(input))
    }
}

/// Exactly `digits` ASCII digits.
fn number<'a>(digits: usize) -> impl FnMut(RawSpan<'a>) -> ParseResult<'a, u32> {
    map_res(
        take_while_m_n(digits, digits, |c: char| c.is_ascii_digit()),
        |s: RawSpan<'a>| s.fragment().parse::<u32>(),
    )
}

fn date(input: RawSpan) -> ParseResult<NaiveDate> {
    map_opt(
        tuple((number(4), char('-'), number(2), char('-'), number(2))),
        |(year, _, month, _, day)| NaiveDate::from_ymd_opt(i32::try_from(year).ok()?, month, day),
    )(input)
}

/// Fractional seconds as nanoseconds; digits past the 9th are truncated.
fn fraction(input: RawSpan) -> ParseResult<u32> {
    map(
        preceded(char('.'), take_while1(|c: char| c.is_ascii_digit())),
        |s: RawSpan| {
            let digits = s.fragment().bytes().take(9).collect::<Vec<_>>();

            let nanos = digits
                .iter()
                .fold(0u32, |acc, b| acc * 10 + u32::from(b - b'0'));

            #[allow(clippy::cast_possible_truncation)]
            let scale = 10u32.pow(9 - digits.len() as u32);

            nanos * scale
        },
    )(input)
}

fn time(input: RawSpan) -> ParseResult<NaiveTime> {
    map_opt(
        tuple((
            one_of("Tt "),
            number(2),
            preceded(char(':'), number(2)),
            opt(preceded(char(':'), number(2))),
            opt(fraction),
        )),
        |(_, hour, minute, second, nanos)| {
            NaiveTime::from_hms_nano_opt(hour, minute, second.unwrap_or(0), nanos.unwrap_or(0))
        },
    )(input)
}

fn offset(input: RawSpan) -> ParseResult<FixedOffset> {
    alt((
        map_opt(one_of("Zz"), |_| FixedOffset::east_opt(0)),
        map_opt(
            tuple((
                one_of("+-"),
                number(2),
                opt(preceded(opt(char(':')), number(2))),
            )),
            |(sign, hours, minutes)| {
                let secs = i32::try_from(hours * 3_600 + minutes.unwrap_or(0) * 60).ok()?;
                FixedOffset::east_opt(if sign == '-' { -secs } else { secs })
            },
        ),
    ))(input)
}

impl<'a> Parse<'a> for Timestamp {
    fn parse(input: RawSpan<'a>) -> ParseResult<'a, Self> {
        let (input, _) = space0(input)?;
        let (input, day) = date(input)?;
        let (input, clock) = opt(tuple((time, opt(offset))))(input)?;
        let (input, _) = space0(input)?;
        let (input, _) = eof(input)?;

        let ts = match clock {
            None => Self::Floating(day.and_time(NaiveTime::MIN)),
            Some((time, None)) => Self::Floating(day.and_time(time)),
            Some((time, Some(offset))) => {
                let Some(dt) = day.and_time(time).and_local_timezone(offset).single() else {
                    return Err(nom::Err::Error(nom::error::Error::new(
                        input,
                        ErrorKind::Verify,
                    )));
                };
                Self::Absolute(dt)
            }
        };

        Ok((input, ts))
    }
}

/// Parses a timestamp string.
///
/// Strings without a UTC offset become [`Timestamp::Floating`].
///
/// # Errors
///
/// Returns [`Error::InvalidTimestamp`] with the column where parsing stopped.
pub fn parse_timestamp(s: &str) -> crate::Result<Timestamp> {
    match Timestamp::parse_from_raw(s) {
        Ok((_, ts)) => Ok(ts),
        Err(nom::Err::Error(e) | nom::Err::Failure(e)) => Err(Error::InvalidTimestamp {
            input: s.to_owned(),
            column: e.input.get_column(),
        }),
        Err(nom::Err::Incomplete(_)) => Err(Error::InvalidTimestamp {
            input: s.to_owned(),
            column: s.len() + 1,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDateTime, TimeZone, Utc};
    use test_log::test;

    fn naive(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, s)
            .unwrap()
    }

    #[test]
    fn parse_date_only() {
        assert_eq!(
            Timestamp::Floating(naive(2024, 1, 9, 0, 0, 0)),
            parse_timestamp("2024-01-09").unwrap()
        );
    }

    #[test]
    fn parse_floating_time() {
        assert_eq!(
            Timestamp::Floating(naive(2024, 1, 9, 8, 0, 0)),
            parse_timestamp("2024-01-09T08:00").unwrap()
        );
        assert_eq!(
            Timestamp::Floating(naive(2024, 1, 9, 20, 0, 15)),
            parse_timestamp("2024-01-09 20:00:15").unwrap()
        );
    }

    #[test]
    fn parse_fraction() {
        let Timestamp::Floating(dt) = parse_timestamp("2024-01-09T20:00:15.5").unwrap() else {
            panic!("expected floating timestamp");
        };
        assert_eq!(500_000_000, dt.and_utc().timestamp_subsec_nanos());

        let Timestamp::Floating(dt) = parse_timestamp("2024-01-09T20:00:15.1234567891").unwrap()
        else {
            panic!("expected floating timestamp");
        };
        assert_eq!(123_456_789, dt.and_utc().timestamp_subsec_nanos());
    }

    #[test]
    fn parse_utc() {
        let expected = Utc.with_ymd_and_hms(2024, 1, 9, 23, 0, 0).unwrap();

        for s in [
            "2024-01-09T23:00:00Z",
            "2024-01-09T23:00Z",
            "2024-01-09T23:00:00+00:00",
            "2024-01-09 23:00:00+00",
            "  2024-01-09T23:00:00z  ",
        ] {
            assert_eq!(Timestamp::from(expected), parse_timestamp(s).unwrap(), "{s}");
        }
    }

    #[test]
    fn parse_offset() {
        let Timestamp::Absolute(dt) = parse_timestamp("2024-01-09T21:30:00.123456-03:00").unwrap()
        else {
            panic!("expected absolute timestamp");
        };
        assert_eq!(-3 * 3_600, dt.offset().local_minus_utc());
        assert_eq!(
            Utc.with_ymd_and_hms(2024, 1, 10, 0, 30, 0).unwrap(),
            dt.with_timezone(&Utc) - chrono::Duration::microseconds(123_456)
        );

        let Timestamp::Absolute(dt) = parse_timestamp("2024-01-09T08:00+0530").unwrap() else {
            panic!("expected absolute timestamp");
        };
        assert_eq!(5 * 3_600 + 30 * 60, dt.offset().local_minus_utc());
    }

    #[test]
    fn parse_invalid() {
        for s in ["", "yesterday", "2024-13-01", "2024-02-30", "24-01-09"] {
            assert!(
                matches!(parse_timestamp(s), Err(Error::InvalidTimestamp { column: 1, .. })),
                "{s}"
            );
        }
    }

    #[test]
    fn parse_invalid_reports_column() {
        assert!(matches!(
            parse_timestamp("2024/01/09"),
            Err(Error::InvalidTimestamp { column: 5, .. })
        ));
        assert_eq!(
            Err(Error::InvalidTimestamp {
                input: "2024-01-09x".into(),
                column: 11
            }),
            parse_timestamp("2024-01-09x")
        );
        assert_eq!(
            Err(Error::InvalidTimestamp {
                input: "2024-01-09T25:00".into(),
                column: 11
            }),
            parse_timestamp("2024-01-09T25:00")
        );
        assert_eq!(
            Err(Error::InvalidTimestamp {
                input: "2024-01-09T08:00+".into(),
                column: 17
            }),
            parse_timestamp("2024-01-09T08:00+")
        );
    }
}
