//! Date range helpers
//!
//! GA4 date ranges are plain strings on the wire ("2024-01-01", "today",
//! "yesterday", "7daysAgo"). This module carries them as-is and provides
//! helpers for the common "last N days" construction.

use chrono::{Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ReportError, Result};

/// A date range for a report request (both endpoints inclusive)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    /// Start date ("YYYY-MM-DD" or a relative string the API accepts)
    pub start_date: String,
    /// End date (same formats)
    pub end_date: String,
    /// Optional range name, echoed in responses with multiple ranges
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl DateRange {
    /// Create a date range; strings are passed through to the API unchanged
    pub fn new(start_date: impl Into<String>, end_date: impl Into<String>) -> Self {
        Self {
            start_date: start_date.into(),
            end_date: end_date.into(),
            name: None,
        }
    }

    /// Name this range
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// The last `days` calendar days ending today (inclusive of today)
    ///
    /// `last_days(7)` spans today plus the six previous days.
    pub fn last_days(days: i64) -> Self {
        Self::span_ending(days, Utc::now().date_naive())
    }

    /// The last `days` calendar days ending at an anchor date
    ///
    /// The anchor is "today", "yesterday", or an explicit "YYYY-MM-DD" date.
    pub fn last_days_ending(days: i64, end: &str) -> Result<Self> {
        Ok(Self::span_ending(days, parse_anchor(end)?))
    }

    fn span_ending(days: i64, end: NaiveDate) -> Self {
        // Both endpoints count, so a 7-day span starts 6 days before the end.
        let start = end - Duration::days(days.max(1) - 1);
        Self::new(
            start.format("%Y-%m-%d").to_string(),
            end.format("%Y-%m-%d").to_string(),
        )
    }
}

fn parse_anchor(s: &str) -> Result<NaiveDate> {
    let today = Utc::now().date_naive();
    match s.trim().to_lowercase().as_str() {
        "today" => Ok(today),
        "yesterday" => Ok(today - Duration::days(1)),
        other => NaiveDate::parse_from_str(other, "%Y-%m-%d")
            .map_err(|_| ReportError::InvalidDate(s.to_string())),
    }
}
