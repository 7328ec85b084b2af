use chrono::NaiveDate;
use thiserror::Error;

/// Why a directory name was rejected as a snapshot.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("'{name}' does not start with '{prefix}-'")]
    NotPrefixed { name: String, prefix: String },

    #[error("'{name}' is not of the form '{prefix}-YYYY-MM-DD-HH'")]
    MalformedSuffix { name: String, prefix: String },

    #[error("'{date}' in '{name}' is not a valid YYYY-MM-DD date")]
    InvalidDate { name: String, date: String },
}

/// A snapshot directory name decoded into its calendar day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedSnapshot {
    pub raw_name: String,
    pub calendar_date: NaiveDate,
    pub date_key: String,
}

impl DecodedSnapshot {
    fn new(raw_name: &str, calendar_date: NaiveDate) -> Self {
        Self {
            raw_name: raw_name.to_string(),
            calendar_date,
            date_key: calendar_date.format("%Y-%m-%d").to_string(),
        }
    }
}

/// Decode `<prefix>-YYYY-MM-DD-<hour>` into a [`DecodedSnapshot`].
///
/// The hour marker must be present and non-empty but is otherwise opaque.
pub fn parse(name: &str, prefix: &str) -> Result<DecodedSnapshot, ParseError> {
    let rest = name
        .strip_prefix(prefix)
        .and_then(|r| r.strip_prefix('-'))
        .ok_or_else(|| ParseError::NotPrefixed {
            name: name.to_string(),
            prefix: prefix.to_string(),
        })?;

    let parts: Vec<&str> = rest.split('-').collect();
    if parts.len() != 4 || parts[3].is_empty() {
        return Err(ParseError::MalformedSuffix {
            name: name.to_string(),
            prefix: prefix.to_string(),
        });
    }

    let date_str = parts[..3].join("-");
    let date = parse_strict_date(parts[0], parts[1], parts[2]).ok_or_else(|| {
        ParseError::InvalidDate {
            name: name.to_string(),
            date: date_str,
        }
    })?;

    Ok(DecodedSnapshot::new(name, date))
}

// Exactly 4-2-2 ASCII digits; chrono alone would accept unpadded fields.
fn parse_strict_date(year: &str, month: &str, day: &str) -> Option<NaiveDate> {
    let digits = |s: &str, len: usize| s.len() == len && s.bytes().all(|b| b.is_ascii_digit());
    if !(digits(year, 4) && digits(month, 2) && digits(day, 2)) {
        return None;
    }
    NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, day.parse().ok()?)
}
