//! English relative-time phrases such as "3 hours ago" or "2 weeks from now".

use chrono::{DateTime, Utc};

const MINUTE: u64 = 60;
const HOUR: u64 = 60 * MINUTE;
const DAY: u64 = 24 * HOUR;
const WEEK: u64 = 7 * DAY;
const MONTH: u64 = 30 * DAY;
const YEAR: u64 = 12 * MONTH;
const LONG_TIME: u64 = 37 * YEAR;

#[derive(Debug, Clone, Copy)]
enum Phrase {
    Now,
    Fixed(&'static str),
    Count { unit: &'static str, per: u64 },
}

/// Upper bounds (exclusive, in seconds) and the phrase used below each.
const MAGNITUDES: [(u64, Phrase); 16] = [
    (1, Phrase::Now),
    (2, Phrase::Fixed("1 second")),
    (MINUTE, Phrase::Count { unit: "seconds", per: 1 }),
    (2 * MINUTE, Phrase::Fixed("1 minute")),
    (HOUR, Phrase::Count { unit: "minutes", per: MINUTE }),
    (2 * HOUR, Phrase::Fixed("1 hour")),
    (DAY, Phrase::Count { unit: "hours", per: HOUR }),
    (2 * DAY, Phrase::Fixed("1 day")),
    (WEEK, Phrase::Count { unit: "days", per: DAY }),
    (2 * WEEK, Phrase::Fixed("1 week")),
    (MONTH, Phrase::Count { unit: "weeks", per: WEEK }),
    (2 * MONTH, Phrase::Fixed("1 month")),
    (YEAR, Phrase::Count { unit: "months", per: MONTH }),
    (18 * MONTH, Phrase::Fixed("1 year")),
    (2 * YEAR, Phrase::Fixed("2 years")),
    (LONG_TIME, Phrase::Count { unit: "years", per: YEAR }),
];

/// Describes `instant` relative to `now`.
///
/// Past instants end in "ago", future ones in "from now". Anything under a
/// second away is "now"; 37 years or more is "a long while".
#[must_use]
pub fn relative_time(instant: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let (elapsed, suffix) = if instant > now {
        (instant - now, "from now")
    } else {
        (now - instant, "ago")
    };
    let seconds = elapsed.num_seconds().unsigned_abs();

    let phrase = MAGNITUDES
        .iter()
        .find(|(bound, _)| seconds < *bound)
        .map_or(Phrase::Fixed("a long while"), |(_, phrase)| *phrase);

    match phrase {
        Phrase::Now => "now".to_owned(),
        Phrase::Fixed(text) => format!("{text} {suffix}"),
        Phrase::Count { unit, per } => {
            let count = seconds.checked_div(per).unwrap_or_default();
            format!("{count} {unit} {suffix}")
        }
    }
}
