//! Subscription tiers and monthly usage counting.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A subscription tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    #[default]
    Free,
    Starter,
    Pro,
    Coach,
    Team,
}

impl Tier {
    pub const ALL: [Tier; 5] = [Tier::Free, Tier::Starter, Tier::Pro, Tier::Coach, Tier::Team];

    /// Analyses allowed per calendar month.
    pub fn monthly_limit(self) -> u32 {
        match self {
            Tier::Free => 3,
            Tier::Starter => 15,
            Tier::Pro => 50,
            Tier::Coach => 200,
            Tier::Team => 9999,
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tier::Free => write!(f, "free"),
            Tier::Starter => write!(f, "starter"),
            Tier::Pro => write!(f, "pro"),
            Tier::Coach => write!(f, "coach"),
            Tier::Team => write!(f, "team"),
        }
    }
}

impl FromStr for Tier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "free" => Ok(Tier::Free),
            "starter" => Ok(Tier::Starter),
            "pro" => Ok(Tier::Pro),
            "coach" => Ok(Tier::Coach),
            "team" => Ok(Tier::Team),
            other => Err(format!("unknown tier: {other}")),
        }
    }
}

/// Billing period key for a timestamp, e.g. `2026-10`.
pub fn month_key(at: DateTime<Utc>) -> String {
    at.format("%Y-%m").to_string()
}

/// The current billing period.
pub fn current_month() -> String {
    month_key(Utc::now())
}

/// One user's analysis count for a single month.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageCounter {
    pub month: String,
    pub count: u32,
}

impl UsageCounter {
    /// Analyses used in `month`. Counts from other months do not carry over.
    pub fn used(&self, month: &str) -> u32 {
        if self.month == month {
            self.count
        } else {
            0
        }
    }

    /// Count one analysis in `month`, resetting if the month rolled over.
    pub fn record(&mut self, month: &str) {
        if self.month != month {
            self.month = month.to_string();
            self.count = 0;
        }
        self.count = self.count.saturating_add(1);
    }
}
