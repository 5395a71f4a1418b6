use chrono::{Days, NaiveDate, NaiveDateTime, NaiveTime};

/// Whole days elapsed between local midnight of `date` and `now`
///
/// Partial days are floored. A date in the future yields 0, never a negative count.
pub fn elapsed_days(date: NaiveDate, now: NaiveDateTime) -> i64 {
    let midnight = date.and_time(NaiveTime::MIN);
    // num_days truncates toward zero, which is a floor for the non-negative case
    (now - midnight).num_days().max(0)
}

/// Date on which an item replaced on `last_replaced` becomes overdue
///
/// `None` when that date lies past the last representable calendar date.
pub fn due_date(last_replaced: NaiveDate, interval_days: u32) -> Option<NaiveDate> {
    last_replaced.checked_add_days(Days::new(u64::from(interval_days)))
}
