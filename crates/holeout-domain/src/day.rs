//! Calendar-day bucketing for per-day uniqueness rules.
//!
//! Every "once per day" rule (one shot per course, one credit redemption, one
//! prize claim) is keyed on the calendar day of a server-side instant in a single
//! configured business timezone. Client-asserted timestamps never feed a bucket.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;

/// Default business timezone for a UK-based operator.
pub const DEFAULT_TIMEZONE: Tz = chrono_tz::Europe::London;

/// Maps instants to calendar days in the configured timezone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusinessCalendar {
    tz: Tz,
}

impl BusinessCalendar {
    pub fn new(tz: Tz) -> Self {
        Self { tz }
    }

    pub fn utc() -> Self {
        Self { tz: Tz::UTC }
    }

    pub fn timezone(&self) -> Tz {
        self.tz
    }

    /// Calendar day containing `at`, local midnight to midnight.
    pub fn day_of(&self, at: DateTime<Utc>) -> NaiveDate {
        at.with_timezone(&self.tz).date_naive()
    }
}

impl Default for BusinessCalendar {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEZONE)
    }
}

impl fmt::Display for BusinessCalendar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tz.name())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown timezone: {0}")]
pub struct UnknownTimezone(pub String);

impl FromStr for BusinessCalendar {
    type Err = UnknownTimezone;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<Tz>()
            .map(Self::new)
            .map_err(|_| UnknownTimezone(s.to_owned()))
    }
}
