use chrono::{DateTime, Months, NaiveDate, Utc};

use crate::error::{DateFormatError, DateFormatReason};
use crate::types::ReleaseInfo;

pub const DEFAULT_LOOKAHEAD_MONTHS: u32 = 6;
pub const EOL_DATE_FORMAT: &str = "%Y-%m-%d";

/// How far ahead of "now" an end-of-life date counts as near.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LookaheadWindow {
    pub months: u32,
}

impl LookaheadWindow {
    pub fn months(months: u32) -> Self {
        Self { months }
    }

    /// First date that is no longer considered near. Adding months clamps to the
    /// end of the target month, so Aug 31 + 6 months is the last day of February.
    pub fn deadline(&self, now: DateTime<Utc>) -> NaiveDate {
        let today = now.date_naive();
        today
            .checked_add_months(Months::new(self.months))
            .unwrap_or(NaiveDate::MAX)
    }
}

impl Default for LookaheadWindow {
    fn default() -> Self {
        Self::months(DEFAULT_LOOKAHEAD_MONTHS)
    }
}

// chrono accepts unpadded fields, short or signed years and leading spaces for
// `%Y-%m-%d`, so the exact `YYYY-MM-DD` layout is checked first.
fn has_date_shape(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

pub fn parse_eol_date(value: &str) -> Result<NaiveDate, DateFormatError> {
    let invalid = |source| DateFormatError {
        value: value.to_string(),
        source,
    };
    if !has_date_shape(value) {
        return Err(invalid(DateFormatReason::Shape));
    }
    NaiveDate::parse_from_str(value, EOL_DATE_FORMAT).map_err(|e| invalid(DateFormatReason::Parse(e)))
}

/// True when the end-of-life date is strictly before `now + window`. Dates in the
/// past are near as well.
pub fn is_near_end_of_life(
    info: &ReleaseInfo,
    now: DateTime<Utc>,
    window: LookaheadWindow,
) -> Result<bool, DateFormatError> {
    let eol = parse_eol_date(&info.end_of_life_date)?;
    Ok(eol < window.deadline(now))
}
