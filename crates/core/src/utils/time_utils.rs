use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;

use crate::constants::DISPLAY_DATE_FORMAT;

/// Timezone of the exchange whose calendar we report.
/// Ex-dividend dates are Toronto business dates, so "today" is too.
pub const MARKET_TZ: Tz = chrono_tz::America::Toronto;

/// Converts a UTC instant to a market date in the given timezone.
pub fn market_date_from_utc(instant: DateTime<Utc>, tz: Tz) -> NaiveDate {
    instant.with_timezone(&tz).date_naive()
}

/// Today's date on the exchange calendar.
pub fn market_date_today() -> NaiveDate {
    market_date_from_utc(Utc::now(), MARKET_TZ)
}

/// Signed number of calendar days from `from` to `to`.
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}

pub fn format_display_date(date: NaiveDate) -> String {
    date.format(DISPLAY_DATE_FORMAT).to_string()
}
