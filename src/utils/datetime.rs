//! Date and time helpers.

use chrono::{DateTime, NaiveTime, Offset, TimeZone, Utc};

/// The first instant of the calendar day `now` falls on, in `now`'s own
/// time zone.
///
/// When local midnight is ambiguous (clocks turned back) the earlier instant
/// is used. When it does not exist (clocks turned forward over midnight) the
/// midnight wall-clock time is taken at `now`'s current offset.
pub fn start_of_day<Tz: TimeZone>(now: &DateTime<Tz>) -> DateTime<Utc> {
    let midnight = now.date_naive().and_time(NaiveTime::MIN);

    match now.timezone().from_local_datetime(&midnight).earliest() {
        Some(start) => start.with_timezone(&Utc),
        None => {
            let offset = now.offset().fix();
            Utc.from_utc_datetime(&(midnight - offset))
        }
    }
}
