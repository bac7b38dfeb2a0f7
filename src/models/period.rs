//! Period keys, bucketing modes and reference windows
//!
//! A [`Window`] is an inclusive date range (a year, a month, or a span of
//! months). A [`BucketMode`] decides how that range is cut into
//! [`PeriodKey`]s.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{self, Write as _};
use std::str::FromStr;

use crate::error::{TallyError, TallyResult};

/// English weekday names, Monday first
pub const WEEKDAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// How transactions are grouped into buckets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BucketMode {
    /// One bucket per calendar day
    Day,
    /// Seven buckets, one per day of the week
    Weekday,
    /// One bucket per calendar month (default)
    #[default]
    Month,
    /// One bucket per calendar year
    Year,
}

impl BucketMode {
    /// All modes in display order
    pub fn all() -> &'static [Self] {
        &[Self::Day, Self::Weekday, Self::Month, Self::Year]
    }

    /// Whether consecutive keys of this mode follow the calendar
    pub fn is_chronological(&self) -> bool {
        !matches!(self, Self::Weekday)
    }
}

impl fmt::Display for BucketMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Day => write!(f, "day"),
            Self::Weekday => write!(f, "weekday"),
            Self::Month => write!(f, "month"),
            Self::Year => write!(f, "year"),
        }
    }
}

impl FromStr for BucketMode {
    type Err = TallyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "day" | "daily" => Ok(Self::Day),
            "weekday" | "dow" => Ok(Self::Weekday),
            "month" | "monthly" => Ok(Self::Month),
            "year" | "yearly" => Ok(Self::Year),
            other => Err(TallyError::Validation(format!(
                "unknown bucket mode '{}' (expected day, weekday, month or year)",
                other
            ))),
        }
    }
}

/// Identifies one bucket
///
/// Keys of the same mode order chronologically (weekday keys order Monday
/// to Sunday).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PeriodKey {
    /// A calendar day ("2025-01-15")
    Day(NaiveDate),
    /// A weekday class, 0 = Monday ("Monday")
    Weekday(u8),
    /// A calendar month ("2025-01")
    Month { year: i32, month: u32 },
    /// A calendar year ("2025")
    Year(i32),
}

impl PeriodKey {
    /// The key a date falls under for the given mode
    pub fn for_date(mode: BucketMode, date: NaiveDate) -> Self {
        match mode {
            BucketMode::Day => Self::Day(date),
            BucketMode::Weekday => Self::Weekday(date.weekday().num_days_from_monday() as u8),
            BucketMode::Month => Self::Month {
                year: date.year(),
                month: date.month(),
            },
            BucketMode::Year => Self::Year(date.year()),
        }
    }

    /// Create a month key
    pub fn month(year: i32, month: u32) -> Self {
        Self::Month { year, month }
    }

    /// The bucketing mode this key belongs to
    pub fn mode(&self) -> BucketMode {
        match self {
            Self::Day(_) => BucketMode::Day,
            Self::Weekday(_) => BucketMode::Weekday,
            Self::Month { .. } => BucketMode::Month,
            Self::Year(_) => BucketMode::Year,
        }
    }

    /// Calendar month (1-12) of this key, if it has one
    pub fn calendar_month(&self) -> Option<u32> {
        match self {
            Self::Day(date) => Some(date.month()),
            Self::Month { month, .. } => Some(*month),
            Self::Weekday(_) | Self::Year(_) => None,
        }
    }

    /// First calendar day covered by this key (none for weekday classes)
    pub fn start_date(&self) -> Option<NaiveDate> {
        match self {
            Self::Day(date) => Some(*date),
            Self::Month { year, month } => NaiveDate::from_ymd_opt(*year, *month, 1),
            Self::Year(year) => NaiveDate::from_ymd_opt(*year, 1, 1),
            Self::Weekday(_) => None,
        }
    }

    /// The following period, or `None` for weekday classes
    pub fn next(&self) -> Option<Self> {
        match self {
            Self::Day(date) => date.succ_opt().map(Self::Day),
            Self::Month { year, month } => Some(if *month == 12 {
                Self::Month {
                    year: *year + 1,
                    month: 1,
                }
            } else {
                Self::Month {
                    year: *year,
                    month: *month + 1,
                }
            }),
            Self::Year(year) => Some(Self::Year(*year + 1)),
            Self::Weekday(_) => None,
        }
    }

    /// The preceding period, or `None` for weekday classes
    pub fn prev(&self) -> Option<Self> {
        match self {
            Self::Day(date) => date.pred_opt().map(Self::Day),
            Self::Month { year, month } => Some(if *month == 1 {
                Self::Month {
                    year: *year - 1,
                    month: 12,
                }
            } else {
                Self::Month {
                    year: *year,
                    month: *month - 1,
                }
            }),
            Self::Year(year) => Some(Self::Year(*year - 1)),
            Self::Weekday(_) => None,
        }
    }

    /// Human-readable label using a chrono format string
    ///
    /// Weekday keys ignore the format and use their English name.
    pub fn label(&self, format: &str) -> String {
        match self {
            Self::Weekday(_) => self.to_string(),
            _ => match self.start_date() {
                Some(date) => {
                    // A bad specifier makes chrono's formatter return an error
                    let mut label = String::new();
                    match write!(label, "{}", date.format(format)) {
                        Ok(()) => label,
                        Err(_) => self.to_string(),
                    }
                }
                None => self.to_string(),
            },
        }
    }
}

impl fmt::Display for PeriodKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Day(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            Self::Weekday(index) => {
                let name = WEEKDAY_NAMES.get(*index as usize).copied().unwrap_or("?");
                write!(f, "{}", name)
            }
            Self::Month { year, month } => write!(f, "{:04}-{:02}", year, month),
            Self::Year(year) => write!(f, "{:04}", year),
        }
    }
}

impl FromStr for PeriodKey {
    type Err = TallyError;

    /// Parse "YYYY-MM-DD", "YYYY-MM", "YYYY" or an English weekday name
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let invalid = || TallyError::Validation(format!("Invalid period key: {}", s));

        if let Some(index) = WEEKDAY_NAMES
            .iter()
            .position(|name| name.eq_ignore_ascii_case(s))
        {
            return Ok(Self::Weekday(index as u8));
        }

        let parts: Vec<&str> = s.split('-').collect();
        match parts.len() {
            3 => NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .map(Self::Day)
                .map_err(|_| invalid()),
            2 => {
                let (year, month) = parse_year_month(s)?;
                Ok(Self::Month { year, month })
            }
            1 => s.parse::<i32>().map(Self::Year).map_err(|_| invalid()),
            _ => Err(invalid()),
        }
    }
}

impl Serialize for PeriodKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PeriodKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Inclusive date range that bucketing is restricted to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Window {
    start: NaiveDate,
    end: NaiveDate,
}

impl Window {
    /// Window over a year, or one month of it
    pub fn new(year: i32, month: Option<u32>) -> TallyResult<Self> {
        match month {
            Some(month) => Self::month(year, month),
            None => Self::year(year),
        }
    }

    /// The whole calendar year
    pub fn year(year: i32) -> TallyResult<Self> {
        let start = NaiveDate::from_ymd_opt(year, 1, 1)
            .ok_or_else(|| TallyError::Validation(format!("Invalid year: {}", year)))?;
        let end = NaiveDate::from_ymd_opt(year, 12, 31)
            .ok_or_else(|| TallyError::Validation(format!("Invalid year: {}", year)))?;
        Ok(Self { start, end })
    }

    /// One calendar month
    pub fn month(year: i32, month: u32) -> TallyResult<Self> {
        Self::months((year, month), (year, month))
    }

    /// The dates covered by one chronological period key
    pub fn period(key: PeriodKey) -> TallyResult<Self> {
        match key {
            PeriodKey::Day(date) => Self::range(date, date),
            PeriodKey::Month { year, month } => Self::month(year, month),
            PeriodKey::Year(year) => Self::year(year),
            PeriodKey::Weekday(_) => Err(TallyError::Validation(format!(
                "{} is not a calendar period",
                key
            ))),
        }
    }

    /// Every month from `from` to `to`, both inclusive
    pub fn months(from: (i32, u32), to: (i32, u32)) -> TallyResult<Self> {
        let start = first_day_of_month(from.0, from.1)?;
        let end = last_day_of_month(to.0, to.1)?;
        Self::range(start, end)
    }

    /// The `count` months ending with (and including) `end`
    pub fn trailing_months(end: (i32, u32), count: u32) -> TallyResult<Self> {
        if count == 0 {
            return Err(TallyError::Validation(
                "history must span at least one month".into(),
            ));
        }

        let mut key = PeriodKey::month(end.0, end.1);
        for _ in 1..count {
            key = key
                .prev()
                .ok_or_else(|| TallyError::Validation("month underflow".into()))?;
        }

        match key {
            PeriodKey::Month { year, month } => Self::months((year, month), end),
            _ => Err(TallyError::Validation("month underflow".into())),
        }
    }

    /// Arbitrary inclusive date range
    pub fn range(start: NaiveDate, end: NaiveDate) -> TallyResult<Self> {
        if end < start {
            return Err(TallyError::Validation(format!(
                "window ends ({}) before it starts ({})",
                end, start
            )));
        }
        Ok(Self { start, end })
    }

    /// First day of the window
    pub fn start_date(&self) -> NaiveDate {
        self.start
    }

    /// Last day of the window (inclusive)
    pub fn end_date(&self) -> NaiveDate {
        self.end
    }

    /// Check if a date falls within this window
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Number of days in the window
    pub fn num_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// Every period key of `mode` inside the window, in order
    pub fn period_keys(&self, mode: BucketMode) -> Vec<PeriodKey> {
        match mode {
            BucketMode::Day => self
                .start
                .iter_days()
                .take_while(|d| *d <= self.end)
                .map(PeriodKey::Day)
                .collect(),
            BucketMode::Weekday => (0..7).map(PeriodKey::Weekday).collect(),
            BucketMode::Month => {
                let last = PeriodKey::for_date(BucketMode::Month, self.end);
                let mut keys = Vec::new();
                let mut key = Some(PeriodKey::for_date(BucketMode::Month, self.start));
                while let Some(k) = key {
                    if k > last {
                        break;
                    }
                    keys.push(k);
                    key = k.next();
                }
                keys
            }
            BucketMode::Year => (self.start.year()..=self.end.year())
                .map(PeriodKey::Year)
                .collect(),
        }
    }
}

impl fmt::Display for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole_months = self.start.day() == 1 && (self.end + Duration::days(1)).day() == 1;

        if whole_months
            && self.start.month() == 1
            && self.end.month() == 12
            && self.start.year() == self.end.year()
        {
            write!(f, "{:04}", self.start.year())
        } else if whole_months
            && self.start.year() == self.end.year()
            && self.start.month() == self.end.month()
        {
            write!(f, "{:04}-{:02}", self.start.year(), self.start.month())
        } else {
            write!(
                f,
                "{}..{}",
                self.start.format("%Y-%m-%d"),
                self.end.format("%Y-%m-%d")
            )
        }
    }
}

/// Parse a "YYYY-MM" string
pub fn parse_year_month(s: &str) -> TallyResult<(i32, u32)> {
    let s = s.trim();
    let invalid =
        || TallyError::Validation(format!("Invalid month format: {} (expected YYYY-MM)", s));

    let (year, month) = s.split_once('-').ok_or_else(invalid)?;
    let year: i32 = year.parse().map_err(|_| invalid())?;
    let month: u32 = month.parse().map_err(|_| invalid())?;

    if !(1..=12).contains(&month) {
        return Err(TallyError::Validation(format!("Invalid month: {}", month)));
    }

    Ok((year, month))
}

/// Number of days in a calendar month
pub fn days_in_month(year: i32, month: u32) -> TallyResult<u32> {
    Ok(last_day_of_month(year, month)?.day())
}

fn first_day_of_month(year: i32, month: u32) -> TallyResult<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| TallyError::Validation(format!("Invalid month: {:04}-{:02}", year, month)))
}

fn last_day_of_month(year: i32, month: u32) -> TallyResult<NaiveDate> {
    let first = first_day_of_month(year, month)?;
    let next_month = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    next_month
        .and_then(|d| d.pred_opt())
        .ok_or_else(|| TallyError::Validation(format!("Invalid month: {}", first.format("%Y-%m"))))
}
