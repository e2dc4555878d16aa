//! PointInTime — момент времени с точностью до секунды и его каноническое имя файла.
//!
//! Грамматика спецификации (позиционная, после удаления всех не-цифр):
//! - `[0:4]` год, `[4:6]` месяц, `[6:8]` день — обязательны (минимум 8 цифр);
//! - если цифр 8..9 — время 23:59:59 (дата целиком, "всё, что записано за день");
//! - если цифр >= 10 — `[8:10]` час, `[10:12]` минута, `[12:14]` секунда;
//!   отсутствующие минута/секунда после явного часа равны 0;
//! - всё после 14-й цифры игнорируется.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, NaiveDateTime, SubsecRound, Timelike};

use crate::clock::{Clock, SystemClock};
use crate::consts::{
    DATE_ONLY_HOUR, DATE_ONLY_MINUTE, DATE_ONLY_SECOND, MIN_YEAR, PIT_FILENAME_LEN, PIT_FORMAT,
    SPEC_MAX_DIGITS, SPEC_MIN_DIGITS,
};
use crate::error::{PitError, Result};

/// A calendar date and time with second resolution.
///
/// Ordering is chronological. `Display` yields the canonical snapshot
/// filename (`YYYY.MM.DD-HH:MM:SS`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PointInTime(NaiveDateTime);

impl PointInTime {
    /// Parse a spec, or take `clock.now()` when the spec is absent.
    pub fn parse(spec: Option<&str>, clock: &dyn Clock) -> Result<Self> {
        match spec {
            None => Ok(Self::from_datetime(clock.now())),
            Some(s) => Self::parse_spec(s),
        }
    }

    /// Parse an explicit spec (no "now" default).
    pub fn parse_spec(spec: &str) -> Result<Self> {
        let digits: Vec<u32> = spec
            .chars()
            .filter_map(|c| c.to_digit(10))
            .take(SPEC_MAX_DIGITS)
            .collect();
        let n = digits.len();
        if n < SPEC_MIN_DIGITS {
            return Err(PitError::invalid_spec(
                spec,
                format!("need at least {SPEC_MIN_DIGITS} digits (YYYYMMDD), got {n}"),
            ));
        }

        let field =
            |from: usize, to: usize| digits[from..to].iter().fold(0u32, |acc, d| acc * 10 + d);

        let year = field(0, 4) as i32;
        let month = field(4, 6);
        let day = field(6, 8);
        let (hh, mm, ss) = if n >= 10 {
            let mm = if n >= 12 { field(10, 12) } else { 0 };
            let ss = if n >= 14 { field(12, 14) } else { 0 };
            (field(8, 10), mm, ss)
        } else {
            (DATE_ONLY_HOUR, DATE_ONLY_MINUTE, DATE_ONLY_SECOND)
        };

        if year < MIN_YEAR {
            return Err(PitError::invalid_spec(spec, format!("bad year {year:04}")));
        }
        let date = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
            PitError::invalid_spec(spec, format!("bad date {year:04}-{month:02}-{day:02}"))
        })?;
        let at = date.and_hms_opt(hh, mm, ss).ok_or_else(|| {
            PitError::invalid_spec(spec, format!("bad time {hh:02}:{mm:02}:{ss:02}"))
        })?;
        Ok(PointInTime(at))
    }

    /// Strictly parse a canonical snapshot filename.
    ///
    /// Only the exact zero-padded layout is accepted, so lexicographic order
    /// of accepted names is chronological order.
    pub fn from_filename(name: &str) -> Option<Self> {
        if name.len() != PIT_FILENAME_LEN {
            return None;
        }
        let at = NaiveDateTime::parse_from_str(name, PIT_FORMAT).ok()?;
        // chrono принимает :60 как leap second, год 0000 — как пролептический
        if at.year() < MIN_YEAR || at.nanosecond() >= 1_000_000_000 {
            return None;
        }
        let pit = PointInTime(at);
        if pit.filename() != name {
            return None;
        }
        Some(pit)
    }

    /// Wrap a datetime, discarding any sub-second part.
    pub fn from_datetime(at: NaiveDateTime) -> Self {
        PointInTime(at.trunc_subsecs(0))
    }

    pub fn as_datetime(&self) -> NaiveDateTime {
        self.0
    }

    /// Canonical filename.
    pub fn filename(&self) -> String {
        self.0.format(PIT_FORMAT).to_string()
    }
}

impl fmt::Display for PointInTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(PIT_FORMAT))
    }
}

impl FromStr for PointInTime {
    type Err = PitError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse_spec(s)
    }
}

impl From<PointInTime> for NaiveDateTime {
    fn from(p: PointInTime) -> Self {
        p.0
    }
}

/// Parse a spec against the local system clock.
pub fn parse_point_in_time(spec: Option<&str>) -> Result<PointInTime> {
    PointInTime::parse(spec, &SystemClock)
}
