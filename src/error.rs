/// Error type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The window length was zero, or the window reaches outside the
    /// representable calendar.
    InvalidWindow(u32),

    /// The name is not a known IANA time zone.
    UnknownTimeZone(String),

    /// The identifier is not a known locale.
    UnknownLocale(String),

    /// A timestamp string could not be parsed.
    InvalidTimestamp {
        /// The offending input.
        input: String,

        /// 1-based column where parsing stopped.
        column: usize,
    },
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidWindow(days) => {
                write!(f, "InvalidWindow({days} days)")
            }
            Self::UnknownTimeZone(name) => {
                write!(f, "UnknownTimeZone({name:?})")
            }
            Self::UnknownLocale(name) => {
                write!(f, "UnknownLocale({name:?})")
            }
            Self::InvalidTimestamp { input, column } => {
                write!(f, "InvalidTimestamp({input:?} at column {column})")
            }
        }
    }
}

impl std::error::Error for Error {}

/// Result helper type
pub type Result<T> = std::result::Result<T, Error>;
