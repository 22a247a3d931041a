use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

use crate::model::card::StayStatus;

/// Parse an ISO-8601 checkin/checkout value.
/// Offsets are honoured; floating date-times and bare dates are read as local time in `tz`.
/// Anything else yields None.
pub fn parse_stay_date(s: &str, tz: Tz) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    for pat in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"].iter() {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, pat) {
            return Some(localize(naive, tz));
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| localize(naive, tz))
}

/// Short display form such as "Jan 5, 2025", rendered in `tz`.
pub fn format_short_date(dt: &DateTime<Utc>, tz: Tz) -> String {
    dt.with_timezone(&tz).format("%b %-d, %Y").to_string()
}

/// Interpret a wall-clock time in `tz`. Ambiguous times take the earlier instant;
/// times skipped by a DST jump move forward to the first wall-clock time that exists.
pub fn localize(naive: NaiveDateTime, tz: Tz) -> DateTime<Utc> {
    // Gaps are at most a few hours and aligned to quarter hours
    (0..=4 * 24)
        .map(|step| naive + Duration::minutes(15 * step))
        .find_map(|candidate| tz.from_local_datetime(&candidate).earliest())
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|| Utc.from_utc_datetime(&naive))
}

/// First and last millisecond of the local day containing `now`.
pub fn day_bounds(now: DateTime<Utc>, tz: Tz) -> (DateTime<Utc>, DateTime<Utc>) {
    let today = now.with_timezone(&tz).date_naive();
    let midnight = |d: NaiveDate| {
        d.and_hms_opt(0, 0, 0)
            .map(|naive| localize(naive, tz))
            .unwrap_or(now)
    };
    let start = midnight(today);
    let end = today
        .succ_opt()
        .map(|next| midnight(next) - Duration::milliseconds(1))
        .unwrap_or(now);
    (start, end)
}

/// Classify a stay against the local day containing `now`.
/// The stay interval is inclusive, so a stay checking out today is still current.
pub fn classify_stay(
    checkin: Option<DateTime<Utc>>,
    checkout: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
    tz: Tz,
) -> StayStatus {
    let (start_of_day, end_of_day) = day_bounds(now, tz);
    let is_current = match (checkin, checkout) {
        (Some(ci), Some(co)) => start_of_day <= co && end_of_day >= ci,
        _ => false,
    };
    let is_past = checkout.map(|co| co < start_of_day).unwrap_or(false);
    StayStatus { is_past, is_current }
}
