use std::collections::BTreeMap;

use chrono::{Days, NaiveDate};
use serde::Serialize;

use super::repo::RepositoryRecord;

/// Minimum updates on a day for it to count as active.
pub const ACTIVE_THRESHOLD: usize = 1;
/// Minimum updates on a day for it to count as very active.
pub const VERY_ACTIVE_THRESHOLD: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActivityLevel {
    Inactive,
    Active,
    VeryActive,
}

impl ActivityLevel {
    pub fn from_count(count: usize) -> Self {
        if count >= VERY_ACTIVE_THRESHOLD {
            ActivityLevel::VeryActive
        } else if count >= ACTIVE_THRESHOLD {
            ActivityLevel::Active
        } else {
            ActivityLevel::Inactive
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ActivityLevel::Inactive => "inactive",
            ActivityLevel::Active => "active",
            ActivityLevel::VeryActive => "very-active",
        }
    }
}

/// Count records per calendar day of their last update. Records without a
/// parseable date are skipped.
pub fn daily_counts(records: &[RepositoryRecord]) -> BTreeMap<NaiveDate, usize> {
    let mut counts = BTreeMap::new();
    for date in records.iter().filter_map(RepositoryRecord::updated_date) {
        *counts.entry(date).or_default() += 1;
    }
    counts
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActivityDay {
    pub date: NaiveDate,
    pub count: usize,
    pub level: ActivityLevel,
}

impl ActivityDay {
    /// Hover text, e.g. `Nov 2: 3 updates` or `Nov 2: No activity`.
    pub fn tooltip(&self) -> String {
        let day = self.date.format("%b %-d");
        match self.count {
            0 => format!("{}: No activity", day),
            1 => format!("{}: 1 update", day),
            n => format!("{}: {} updates", day, n),
        }
    }
}

/// A trailing window of days ending today, oldest first.
#[derive(Debug, Clone, Serialize)]
pub struct ActivityGrid {
    days: Vec<ActivityDay>,
}

impl ActivityGrid {
    pub fn build(records: &[RepositoryRecord], today: NaiveDate, days: usize) -> Self {
        let counts = daily_counts(records);
        let days = (0..days as u64)
            .rev()
            .filter_map(|back| today.checked_sub_days(Days::new(back)))
            .map(|date| {
                let count = counts.get(&date).copied().unwrap_or(0);
                ActivityDay {
                    date,
                    count,
                    level: ActivityLevel::from_count(count),
                }
            })
            .collect();
        Self { days }
    }

    pub fn days(&self) -> &[ActivityDay] {
        &self.days
    }

    pub fn day(&self, date: NaiveDate) -> Option<&ActivityDay> {
        self.days.iter().find(|d| d.date == date)
    }

    /// Seven-day columns, oldest first.
    pub fn weeks(&self) -> impl Iterator<Item = &[ActivityDay]> {
        self.days.chunks(7)
    }

    pub fn active_days(&self) -> usize {
        self.days
            .iter()
            .filter(|d| d.level != ActivityLevel::Inactive)
            .count()
    }

    pub fn total_updates(&self) -> usize {
        self.days.iter().map(|d| d.count).sum()
    }
}
