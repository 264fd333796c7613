use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Ordering applied to the filtered bookmark list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// Newest first.
    #[default]
    DateDesc,
    /// Oldest first.
    DateAsc,
    /// Alphabetical by title.
    Title,
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "date_desc" => Ok(SortKey::DateDesc),
            "date_asc" => Ok(SortKey::DateAsc),
            "title" => Ok(SortKey::Title),
            other => Err(format!("unknown sort key: {}", other)),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortKey::DateDesc => write!(f, "date_desc"),
            SortKey::DateAsc => write!(f, "date_asc"),
            SortKey::Title => write!(f, "title"),
        }
    }
}

/// Inclusive creation-date bounds. Filtering only applies when both are set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

impl DateRange {
    pub fn new(from: DateTime<Utc>, to: DateTime<Utc>) -> Self {
        Self {
            from: Some(from),
            to: Some(to),
        }
    }

    /// Returns the bounds only when both are present.
    pub fn bounds(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        match (self.from, self.to) {
            (Some(from), Some(to)) => Some((from, to)),
            _ => None,
        }
    }
}

/// Quick date filters offered next to the custom range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DatePreset {
    #[default]
    All,
    Today,
    Week,
    Month,
    Custom {
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    },
}

impl DatePreset {
    /// Resolves the preset into concrete bounds relative to `now`.
    ///
    /// Weeks start on Sunday. Custom bounds are taken at the start of their day.
    pub fn resolve(&self, now: DateTime<Utc>) -> DateRange {
        let today = start_of_day(now.date_naive());
        match self {
            DatePreset::All => DateRange::default(),
            DatePreset::Today => {
                DateRange::new(today, today + Duration::milliseconds(86_399_999))
            }
            DatePreset::Week => {
                let back = now.weekday().num_days_from_sunday() as i64;
                DateRange::new(today - Duration::days(back), now)
            }
            DatePreset::Month => {
                let first = now.date_naive().with_day(1).unwrap_or(now.date_naive());
                DateRange::new(start_of_day(first), now)
            }
            DatePreset::Custom { from, to } => DateRange {
                from: from.map(start_of_day),
                to: to.map(start_of_day),
            },
        }
    }
}

impl FromStr for DatePreset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(DatePreset::All),
            "today" => Ok(DatePreset::Today),
            "week" => Ok(DatePreset::Week),
            "month" => Ok(DatePreset::Month),
            "custom" => Ok(DatePreset::Custom { from: None, to: None }),
            other => Err(format!("unknown date range: {}", other)),
        }
    }
}

fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_time(chrono::NaiveTime::MIN))
}

/// Everything the filter engine needs besides the list itself.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub search: String,
    pub date_range: DateRange,
    pub sort: SortKey,
}
