use chrono::{Days, NaiveDate};
use thiserror::Error;

use super::settings::DigestConfig;

pub const DEFAULT_LOOKUP_WINDOW_DAYS: u32 = 7;
pub const DEFAULT_RETENTION_DAYS: u32 = 30;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ContextError {
    #[error("Lookup window ({lookup} days) exceeds retention window ({retention} days)")]
    LookupExceedsRetention { lookup: u32, retention: u32 },
}

/// History cannot look further back than it keeps.
pub fn check_windows(lookup_window_days: u32, retention_days: u32) -> Result<(), ContextError> {
    if lookup_window_days > retention_days {
        return Err(ContextError::LookupExceedsRetention {
            lookup: lookup_window_days,
            retention: retention_days,
        });
    }
    Ok(())
}

/// Everything a run needs to know about "now".
///
/// Built once at the boundary and passed by reference into history and
/// lifecycle operations. Nothing in the crate reads the clock on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunContext {
    today: NaiveDate,
    lookup_window_days: u32,
    retention_days: u32,
}

impl RunContext {
    pub fn new(
        today: NaiveDate,
        lookup_window_days: u32,
        retention_days: u32,
    ) -> Result<Self, ContextError> {
        check_windows(lookup_window_days, retention_days)?;
        Ok(Self {
            today,
            lookup_window_days,
            retention_days,
        })
    }

    /// 7-day lookup, 30-day retention.
    pub fn with_defaults(today: NaiveDate) -> Self {
        Self {
            today,
            lookup_window_days: DEFAULT_LOOKUP_WINDOW_DAYS,
            retention_days: DEFAULT_RETENTION_DAYS,
        }
    }

    pub fn from_config(today: NaiveDate, config: &DigestConfig) -> Result<Self, ContextError> {
        Self::new(today, config.lookup_window_days, config.retention_days)
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn today_key(&self) -> String {
        date_key(self.today)
    }

    pub fn lookup_window_days(&self) -> u32 {
        self.lookup_window_days
    }

    pub fn retention_days(&self) -> u32 {
        self.retention_days
    }

    /// Oldest date key still considered "recently used".
    pub fn lookup_cutoff(&self) -> String {
        cutoff_key(self.today, self.lookup_window_days)
    }

    /// Oldest date key kept in history after a commit.
    pub fn retention_cutoff(&self) -> String {
        cutoff_key(self.today, self.retention_days)
    }
}

/// Zero-padded ISO 8601 date, so lexicographic order is chronological order.
pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn cutoff_key(today: NaiveDate, days: u32) -> String {
    let cutoff = today
        .checked_sub_days(Days::new(u64::from(days)))
        .unwrap_or(NaiveDate::MIN);
    date_key(cutoff)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn cutoffs_cross_month_boundaries() {
        let ctx = RunContext::with_defaults(day(2024, 3, 5));
        assert_eq!(ctx.lookup_cutoff(), "2024-02-27");
        assert_eq!(ctx.retention_cutoff(), "2024-02-04");
        assert_eq!(ctx.today_key(), "2024-03-05");
    }

    #[test]
    fn lookup_may_not_exceed_retention() {
        let err = RunContext::new(day(2024, 1, 1), 31, 30).unwrap_err();
        assert_eq!(
            err,
            ContextError::LookupExceedsRetention {
                lookup: 31,
                retention: 30
            }
        );
        assert!(RunContext::new(day(2024, 1, 1), 30, 30).is_ok());
    }
}
