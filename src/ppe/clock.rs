use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// Source of the current time
///
/// Injected into the record store and the notification planner so both stay
/// deterministic under test.
pub trait Clock: Send + Sync {
    /// Current instant, used for `createdAt` stamps and id assignment
    fn now(&self) -> DateTime<Utc>;

    /// Current local wall-clock time, used for whole-day arithmetic
    fn local_now(&self) -> NaiveDateTime {
        self.now().with_timezone(&Local).naive_local()
    }

    /// Today's date on the local calendar
    fn today(&self) -> NaiveDate {
        self.local_now().date()
    }
}

/// Clock backed by the system time
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock frozen at a given local wall-clock time
///
/// `now()` reports the same wall-clock reading interpreted as UTC; creation
/// stamps are informational only, so no time zone is consulted.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    local: NaiveDateTime,
}

impl FixedClock {
    pub fn new(local: NaiveDateTime) -> Self {
        Self { local }
    }

    /// Frozen at local midnight of `date`
    pub fn at_midnight(date: NaiveDate) -> Self {
        Self::new(date.and_time(chrono::NaiveTime::MIN))
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        Utc.from_utc_datetime(&self.local)
    }

    fn local_now(&self) -> NaiveDateTime {
        self.local
    }
}
