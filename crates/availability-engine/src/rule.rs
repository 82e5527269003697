//! Weekly recurring availability rules.
//!
//! A rule covers a half-open wall-clock window `[from, to)` on one weekday in
//! one timezone, optionally limited to an inclusive range of calendar dates in
//! that timezone. Windows that cross midnight are split into two rules when
//! they are built, so matching never has to deal with wraparound.

use std::fmt;
use std::hash::{Hash, Hasher};

use chrono::{Datelike, NaiveDate, Timelike, Weekday};
use chrono_tz::Tz;

use crate::instant::TimeInstant;
use crate::tier::Tier;

/// Wall-clock time of day with minute resolution. `24:00` is the end of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WallTime {
    hour: u8,
    minute: u8,
}

impl WallTime {
    pub const MIDNIGHT: WallTime = WallTime { hour: 0, minute: 0 };
    pub const END_OF_DAY: WallTime = WallTime {
        hour: 24,
        minute: 0,
    };

    /// Returns `None` unless `hour` is 0–23 with `minute` 0–59, or exactly `24:00`.
    pub fn new(hour: u8, minute: u8) -> Option<Self> {
        let valid = match hour {
            0..=23 => minute < 60,
            24 => minute == 0,
            _ => false,
        };
        valid.then_some(WallTime { hour, minute })
    }

    pub fn hour(self) -> u8 {
        self.hour
    }

    pub fn minute(self) -> u8 {
        self.minute
    }

    /// Hour and minute of a local date-time.
    pub fn of<T: Timelike>(time: &T) -> Self {
        // chrono guarantees hour < 24 and minute < 60.
        WallTime {
            hour: time.hour() as u8,
            minute: time.minute() as u8,
        }
    }
}

impl fmt::Display for WallTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

/// Optional inclusive calendar-date bounds, evaluated in the rule's timezone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct DateBounds {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl DateBounds {
    pub fn new(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        DateBounds { from, to }
    }

    pub fn unbounded() -> Self {
        DateBounds::default()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from.is_none_or(|from| date >= from) && self.to.is_none_or(|to| date <= to)
    }
}

/// One recurring weekly availability window.
///
/// Invariant: `from <= to`, with `to` at most `24:00`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailabilityRule {
    timezone: Tz,
    weekday: Weekday,
    from: WallTime,
    to: WallTime,
    tier: Tier,
    dates: DateBounds,
}

impl AvailabilityRule {
    /// Build the rules for a window that starts on `weekday`.
    ///
    /// A `to` of `00:00` means the end of the day. When `to` is still earlier
    /// than `from` the window runs overnight and is returned as two rules:
    /// `[from, 24:00)` on `weekday` and `[00:00, to)` on the following day,
    /// both with the same tier and date bounds.
    pub fn weekly(
        timezone: Tz,
        weekday: Weekday,
        from: WallTime,
        to: WallTime,
        tier: Tier,
        dates: DateBounds,
    ) -> Vec<AvailabilityRule> {
        let to = if to == WallTime::MIDNIGHT {
            WallTime::END_OF_DAY
        } else {
            to
        };

        let rule = |weekday, from, to| AvailabilityRule {
            timezone,
            weekday,
            from,
            to,
            tier,
            dates,
        };

        if to < from {
            vec![
                rule(weekday, from, WallTime::END_OF_DAY),
                rule(weekday.succ(), WallTime::MIDNIGHT, to),
            ]
        } else {
            vec![rule(weekday, from, to)]
        }
    }

    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    pub fn weekday(&self) -> Weekday {
        self.weekday
    }

    pub fn from(&self) -> WallTime {
        self.from
    }

    pub fn to(&self) -> WallTime {
        self.to
    }

    pub fn tier(&self) -> Tier {
        self.tier
    }

    pub fn dates(&self) -> DateBounds {
        self.dates
    }

    /// Whether this rule covers `ts`, judged on the wall clock of the rule's timezone.
    pub fn matches(&self, ts: &TimeInstant) -> bool {
        let local = ts.in_timezone(self.timezone);

        if !self.dates.contains(local.date_naive()) {
            return false;
        }
        if local.weekday() != self.weekday {
            return false;
        }

        let now = WallTime::of(&local);
        self.from <= now && now < self.to
    }
}

// Tz is hashed by its IANA name so the rule set does not depend on how
// chrono-tz represents zones internally.
impl Hash for AvailabilityRule {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.timezone.name().hash(state);
        self.weekday.hash(state);
        self.from.hash(state);
        self.to.hash(state);
        self.tier.hash(state);
        self.dates.hash(state);
    }
}
