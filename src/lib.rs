//! Calendar-day bucketing of time-stamped values.
//!
//! Given a stream of `(timestamp, value)` records and a trailing window of N days
//! anchored to a reference time, produces exactly one bucket per calendar day,
//! oldest first, including days on which no record fell.
//!
//! Each bucket carries a sortable day key (`2024-01-09`), a short locale-formatted
//! label (`09/01` in `pt-BR`) and the aggregated total.
//!
//! Calendar days are resolved in an explicit time zone, and labels are produced by a
//! swappable [`Labeler`], so results do not depend on the machine's locale or zone.
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use daybucket::{Bucketizer, TimestampedValue, Window};
//!
//! let bucketizer = Bucketizer::builder()
//!     .time_zone("America/Sao_Paulo")
//!     .locale("pt-BR")
//!     .build()?;
//!
//! let records = [
//!     TimestampedValue::new("2024-01-09T08:00:00-03:00".parse::<daybucket::Timestamp>()?, 100.0),
//!     TimestampedValue::new("2024-01-09T20:00:00-03:00".parse::<daybucket::Timestamp>()?, 50.0),
//!     // out of window, ignored
//!     TimestampedValue::new("2024-01-05T00:00:00-03:00".parse::<daybucket::Timestamp>()?, 999.0),
//! ];
//!
//! let buckets = bucketizer
//!   .sum(Window::days(3)?)
//!   // defaults to now
//!   .reference_time(Utc.with_ymd_and_hms(2024, 1, 10, 12, 0, 0).unwrap())
//!   .run(&records)?;
//!
//! let totals: Vec<_> = buckets.iter().map(|b| (b.key.to_string(), b.total)).collect();
//!
//! assert_eq!(
//!     vec![
//!         ("2024-01-08".to_string(), 0.0),
//!         ("2024-01-09".to_string(), 150.0),
//!         ("2024-01-10".to_string(), 0.0),
//!     ],
//!     totals,
//! );
//!
//! # Ok::<(), daybucket::Error>(())
//! ```
//!
//! Rows from a data feed, with timestamps still as strings, can be aggregated with
//! [`AggregationBuilder::run_raw`]: rows whose timestamp does not parse are skipped
//! and reported, and never discard the rest of the window.

#![forbid(unsafe_code)]
#![deny(clippy::all, missing_docs, clippy::cargo)]
#![deny(clippy::unwrap_used)]
#![warn(clippy::indexing_slicing)]
#![warn(clippy::pedantic, clippy::nursery)]
#![warn(clippy::expect_used)]
#![allow(clippy::missing_const_for_fn)]
#![warn(clippy::multiple_crate_versions)]
#![warn(clippy::result_unit_err)]

mod agg;
mod bucketizer;
mod config;
mod day_key;
mod error;
mod label;
mod parser;
mod record;
mod time;
mod tz;
mod window;

type HashMap<K, V> = std::collections::HashMap<K, V, rustc_hash::FxBuildHasher>;

pub use agg::{
    builder::{Builder as AggregationBuilder, RawAggregation},
    functions::{Avg, Count, Max, Min, Sum},
    group::GroupedAggregation,
    stream::{Aggregation, Aggregator},
    DayBucket,
};
pub use bucketizer::{aggregate, Bucketizer};
pub use config::Builder as BucketizerBuilder;
pub use day_key::DayKey;
pub use error::{Error, Result};
pub use label::{IsoDate, Labeler, ShortDate, DEFAULT_LOCALE};
pub use parser::parse_timestamp;
pub use record::{RawRecord, TimestampedValue};
pub use time::{timestamp, Timestamp};
pub use tz::{parse_tz, DEFAULT_TIME_ZONE};
pub use window::Window;

/// Value used in buckets
pub type Value = f64;
