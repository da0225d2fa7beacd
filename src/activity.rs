//! Activity and metric identifiers
//!
//! Fitbit exports name every document section `activities-<name>`; these enums
//! pin the names this crate knows how to tabulate.

use crate::error::TabulateError;
use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Activities exported at sub-daily resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntradayActivity {
    Heart,
    Calories,
    Steps,
    Distance,
    Floors,
    Elevation,
}

impl IntradayActivity {
    pub const ALL: [IntradayActivity; 6] = [
        IntradayActivity::Heart,
        IntradayActivity::Calories,
        IntradayActivity::Steps,
        IntradayActivity::Distance,
        IntradayActivity::Floors,
        IntradayActivity::Elevation,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            IntradayActivity::Heart => "heart",
            IntradayActivity::Calories => "calories",
            IntradayActivity::Steps => "steps",
            IntradayActivity::Distance => "distance",
            IntradayActivity::Floors => "floors",
            IntradayActivity::Elevation => "elevation",
        }
    }

    /// Heart rate samples are instantaneous and carry no end time
    pub fn has_end_time(&self) -> bool {
        !matches!(self, IntradayActivity::Heart)
    }

    /// Key of the per-day summary list
    pub fn summary_key(&self) -> String {
        format!("activities-{}", self.as_str())
    }

    /// Flattened key prefix of the intraday section
    pub fn intraday_key(&self, field: &str) -> String {
        format!("activities-{}-intraday.{}", self.as_str(), field)
    }
}

impl fmt::Display for IntradayActivity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IntradayActivity {
    type Err = TabulateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        IntradayActivity::ALL
            .into_iter()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| TabulateError::UnknownActivity(s.to_string()))
    }
}

/// Metrics exported as one value per day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DailyMetric {
    Calories,
    #[serde(rename = "caloriesBMR")]
    CaloriesBmr,
    Steps,
    Distance,
    Floors,
    Elevation,
    MinutesSedentary,
    MinutesLightlyActive,
    MinutesFairlyActive,
    MinutesVeryActive,
    ActivityCalories,
}

impl DailyMetric {
    pub const ALL: [DailyMetric; 11] = [
        DailyMetric::Calories,
        DailyMetric::CaloriesBmr,
        DailyMetric::Steps,
        DailyMetric::Distance,
        DailyMetric::Floors,
        DailyMetric::Elevation,
        DailyMetric::MinutesSedentary,
        DailyMetric::MinutesLightlyActive,
        DailyMetric::MinutesFairlyActive,
        DailyMetric::MinutesVeryActive,
        DailyMetric::ActivityCalories,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DailyMetric::Calories => "calories",
            DailyMetric::CaloriesBmr => "caloriesBMR",
            DailyMetric::Steps => "steps",
            DailyMetric::Distance => "distance",
            DailyMetric::Floors => "floors",
            DailyMetric::Elevation => "elevation",
            DailyMetric::MinutesSedentary => "minutesSedentary",
            DailyMetric::MinutesLightlyActive => "minutesLightlyActive",
            DailyMetric::MinutesFairlyActive => "minutesFairlyActive",
            DailyMetric::MinutesVeryActive => "minutesVeryActive",
            DailyMetric::ActivityCalories => "activityCalories",
        }
    }

    /// Match a top-level document key of the form `activities-<metric>`
    pub fn from_summary_key(key: &str) -> Option<DailyMetric> {
        let name = key.strip_prefix("activities-")?;
        DailyMetric::ALL.into_iter().find(|m| m.as_str() == name)
    }
}

impl fmt::Display for DailyMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DailyMetric {
    type Err = TabulateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DailyMetric::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| TabulateError::UnknownActivity(s.to_string()))
    }
}

/// Sampling unit of an intraday dataset (`datasetType`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntervalUnit {
    Second,
    Minute,
    Hour,
    Day,
    Week,
}

impl IntervalUnit {
    pub fn parse(unit: &str) -> Result<Self, TabulateError> {
        let singular = unit.strip_suffix('s').unwrap_or(unit);
        match singular {
            "second" => Ok(IntervalUnit::Second),
            "minute" => Ok(IntervalUnit::Minute),
            "hour" => Ok(IntervalUnit::Hour),
            "day" => Ok(IntervalUnit::Day),
            "week" => Ok(IntervalUnit::Week),
            _ => Err(TabulateError::UnsupportedIntervalUnit(unit.to_string())),
        }
    }

    /// Duration of `count` units
    pub fn duration(&self, count: i64) -> Result<Duration, TabulateError> {
        let duration = match self {
            IntervalUnit::Second => Duration::try_seconds(count),
            IntervalUnit::Minute => Duration::try_minutes(count),
            IntervalUnit::Hour => Duration::try_hours(count),
            IntervalUnit::Day => Duration::try_days(count),
            IntervalUnit::Week => Duration::try_weeks(count),
        };
        duration.ok_or_else(|| TabulateError::IntervalOutOfRange(format!("{count} {self:?}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intraday_keys() {
        let a = IntradayActivity::Steps;
        assert_eq!(a.summary_key(), "activities-steps");
        assert_eq!(a.intraday_key("dataset"), "activities-steps-intraday.dataset");
        assert!(a.has_end_time());
        assert!(!IntradayActivity::Heart.has_end_time());
    }

    #[test]
    fn test_activity_from_str() {
        assert_eq!("floors".parse::<IntradayActivity>().unwrap(), IntradayActivity::Floors);
        assert!("swimming".parse::<IntradayActivity>().is_err());
        assert_eq!("caloriesBMR".parse::<DailyMetric>().unwrap(), DailyMetric::CaloriesBmr);
    }

    #[test]
    fn test_daily_metric_from_summary_key() {
        assert_eq!(
            DailyMetric::from_summary_key("activities-minutesVeryActive"),
            Some(DailyMetric::MinutesVeryActive)
        );
        assert_eq!(DailyMetric::from_summary_key("activities-heart"), None);
        assert_eq!(DailyMetric::from_summary_key("steps"), None);
    }

    #[test]
    fn test_daily_metric_serde_names() {
        let json = serde_json::to_string(&DailyMetric::CaloriesBmr).unwrap();
        assert_eq!(json, "\"caloriesBMR\"");
        let metric: DailyMetric = serde_json::from_str("\"minutesSedentary\"").unwrap();
        assert_eq!(metric, DailyMetric::MinutesSedentary);
    }

    #[test]
    fn test_interval_unit() {
        assert_eq!(IntervalUnit::parse("minute").unwrap(), IntervalUnit::Minute);
        assert_eq!(IntervalUnit::parse("seconds").unwrap(), IntervalUnit::Second);
        assert_eq!(IntervalUnit::Minute.duration(15).unwrap(), Duration::seconds(900));
        assert!(matches!(
            IntervalUnit::Minute.duration(i64::MAX),
            Err(TabulateError::IntervalOutOfRange(_))
        ));
        assert!(matches!(
            IntervalUnit::parse("fortnight"),
            Err(TabulateError::UnsupportedIntervalUnit(_))
        ));
    }
}
