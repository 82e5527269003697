//! A single instant with a memoized projection into each timezone queried.
//!
//! During simulation the same minute is projected into every rule's timezone
//! and every report column's timezone; the cache makes each distinct
//! timezone cost one conversion per instant.

use std::cell::RefCell;
use std::collections::HashMap;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

#[derive(Debug, Clone)]
pub struct TimeInstant {
    utc: DateTime<Utc>,
    projections: RefCell<HashMap<&'static str, DateTime<Tz>>>,
}

impl TimeInstant {
    pub fn new(utc: DateTime<Utc>) -> Self {
        TimeInstant {
            utc,
            projections: RefCell::new(HashMap::new()),
        }
    }

    /// The absolute instant.
    pub fn utc(&self) -> DateTime<Utc> {
        self.utc
    }

    /// Local wall-clock time of this instant in `tz`.
    pub fn in_timezone(&self, tz: Tz) -> DateTime<Tz> {
        self.projections
            .borrow_mut()
            .entry(tz.name())
            .or_insert_with(|| self.utc.with_timezone(&tz))
            .clone()
    }
}

impl From<DateTime<Utc>> for TimeInstant {
    fn from(utc: DateTime<Utc>) -> Self {
        TimeInstant::new(utc)
    }
}
