use chrono::{DateTime, NaiveTime, TimeDelta, Utc};

/// Energy day: from 07:00:00 UTC until 06:59:59 UTC next day, both ends inclusive.
#[must_use]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct DayWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DayWindow {
    const START_HOUR: i64 = 7;

    /// Window which the moment falls into.
    ///
    /// Before 07:00 the moment still belongs to the previous energy day. Keep it that way:
    /// today's window would start in the future and always integrate to zero.
    pub fn containing(now: DateTime<Utc>) -> Self {
        let mut start = now.date_naive().and_time(NaiveTime::MIN).and_utc()
            + TimeDelta::hours(Self::START_HOUR);
        if start > now {
            start -= TimeDelta::days(1);
        }
        Self { start, end: start + TimeDelta::days(1) - TimeDelta::seconds(1) }
    }
}
