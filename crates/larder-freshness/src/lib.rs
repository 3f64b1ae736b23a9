//! Freshness classification for food expiry dates.
//!
//! Derives a freshness status from an expiry date and a reference instant.
//! Expiry dates are calendar dates; the distance to "now" is measured in
//! whole days with fractional differences rounding up, so an item expiring
//! later today still counts as having 0 days left.
//!
//! # Example
//!
//! ```rust
//! use chrono::{NaiveDate, TimeZone, Utc};
//! use larder_freshness::{classify, FreshnessStatus};
//!
//! let now = Utc.with_ymd_and_hms(2026, 8, 4, 12, 0, 0).unwrap();
//! let expiry = NaiveDate::from_ymd_opt(2026, 8, 6).unwrap();
//! assert_eq!(classify(expiry, now), FreshnessStatus::ExpiringSoon);
//! ```

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

/// Items with at most this many days left are classified as expiring soon.
pub const EXPIRING_SOON_WINDOW_DAYS: i64 = 3;

const SECS_PER_DAY: i64 = 86_400;

/// Freshness status derived from an expiry date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FreshnessStatus {
    /// More than the expiring-soon window left.
    Fresh,
    /// Expires within the expiring-soon window (including today).
    ExpiringSoon,
    /// Expiry date has passed.
    Expired,
}

impl FreshnessStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fresh => "fresh",
            Self::ExpiringSoon => "expiring_soon",
            Self::Expired => "expired",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "fresh" => Some(Self::Fresh),
            "expiring_soon" => Some(Self::ExpiringSoon),
            "expired" => Some(Self::Expired),
            _ => None,
        }
    }

    pub fn all() -> &'static [Self] {
        &[Self::Fresh, Self::ExpiringSoon, Self::Expired]
    }
}

impl std::fmt::Display for FreshnessStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Whole days until the expiry date, rounding fractional days up.
///
/// The expiry date is taken at 00:00 UTC. Returns 0 for an item expiring
/// later today and negative values once the date has passed.
pub fn days_until_expiry(expiry: NaiveDate, now: DateTime<Utc>) -> i64 {
    let expiry_start = expiry.and_time(NaiveTime::MIN).and_utc();
    let delta_secs = (expiry_start - now).num_seconds();
    div_ceil(delta_secs, SECS_PER_DAY)
}

/// Classify an expiry date relative to `now`.
pub fn classify(expiry: NaiveDate, now: DateTime<Utc>) -> FreshnessStatus {
    let days = days_until_expiry(expiry, now);
    if days < 0 {
        FreshnessStatus::Expired
    } else if days <= EXPIRING_SOON_WINDOW_DAYS {
        FreshnessStatus::ExpiringSoon
    } else {
        FreshnessStatus::Fresh
    }
}

/// Whether the expiry date falls within the next `window_days` days.
///
/// Expired items are excluded; an item expiring today is included. Call
/// sites that need a wider alert window than the classifier (e.g. "expiring
/// this week") pass their own window instead of re-deriving the arithmetic.
pub fn is_expiring_within(expiry: NaiveDate, now: DateTime<Utc>, window_days: i64) -> bool {
    let days = days_until_expiry(expiry, now);
    (0..=window_days).contains(&days)
}

/// Aggregate freshness counts over a collection of expiry dates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpiryStats {
    pub total: usize,
    pub fresh: usize,
    pub expiring_soon: usize,
    pub expired: usize,
}

impl ExpiryStats {
    /// Tally every date into exactly one bucket; the buckets sum to `total`.
    pub fn tally<I>(dates: I, now: DateTime<Utc>) -> Self
    where
        I: IntoIterator<Item = NaiveDate>,
    {
        let mut stats = Self::default();
        for date in dates {
            stats.total += 1;
            match classify(date, now) {
                FreshnessStatus::Fresh => stats.fresh += 1,
                FreshnessStatus::ExpiringSoon => stats.expiring_soon += 1,
                FreshnessStatus::Expired => stats.expired += 1,
            }
        }
        stats
    }
}

/// Ceiling division for signed operands with a positive divisor.
fn div_ceil(a: i64, b: i64) -> i64 {
    let quot = a / b;
    if a % b != 0 && (a > 0) == (b > 0) {
        quot + 1
    } else {
        quot
    }
}
