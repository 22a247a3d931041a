use std::sync::LazyLock;

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use icalendar::Component;
use regex::Regex;
use tracing::{error, info, info_span, instrument, warn};

use crate::dates::localize;
use crate::images::to_direct_image_url;
use crate::model::reservation::RawReservationEvent;

static URL_IN_TEXT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)(https?://[^\s)\\]+)").unwrap());

/// Booking calendar published as ICS (e.g. an Airbnb export imported into Google Calendar).
pub struct ReservationCalendar {
    pub calendar: icalendar::Calendar,
}

/// DTSTART/DTEND value: either a whole day or a point in time.
#[derive(Clone, Copy, Debug, PartialEq)]
enum CalTime {
    Date(NaiveDate),
    Floating(NaiveDateTime),
    Instant(DateTime<Utc>),
}

impl ReservationCalendar {
    /// GET the feed at `url` and parse it.
    #[instrument(level = "info")]
    pub fn from_url(url: &str) -> Result<Self, String> {
        let response_result = {
            let _span = info_span!("ics_fetch", url = %url).entered();
            ureq::get(url).call()
        };
        let resp = response_result.map_err(|e| {
            error!(error = %e, url = %url, "Calendar request failed");
            format!("Calendar request failed: {}", e)
        })?;
        let code = resp.status().as_u16();
        let body = resp.into_body().read_to_string().map_err(|e| {
            error!(error = %e, "Failed to read calendar body");
            format!("Failed to read calendar body: {}", e)
        })?;
        if !(200..300).contains(&code) {
            let snippet: String = body.chars().take(200).collect();
            error!(status = code, "Calendar returned non-success status");
            return Err(format!("HTTP {}: {}", code, snippet));
        }
        Self::from_ics(&body)
    }

    /// Parse a raw ICS document (no network).
    pub fn from_ics(ics: &str) -> Result<Self, String> {
        let unfolded = icalendar::parser::unfold(ics);
        let parsed = icalendar::parser::read_calendar(&unfolded).map_err(|e| {
            error!(error = %e, "ICS parse error");
            format!("ICS parse error: {}", e)
        })?;
        Ok(Self { calendar: parsed.into() })
    }

    /// Reserved stays in the feed, sorted by checkin, with times rendered in `tz`.
    /// Entries lacking a UID or usable start/end are skipped.
    #[instrument(level = "info", skip(self))]
    pub fn reservations(&self, tz: Tz) -> Vec<RawReservationEvent> {
        let mut rows: Vec<(DateTime<Utc>, RawReservationEvent)> = Vec::new();

        for comp in &self.calendar.components {
            let icalendar::CalendarComponent::Event(e) = comp else {
                continue;
            };
            let summary = e.property_value("SUMMARY").unwrap_or("").trim();
            if !summary.to_lowercase().contains("reserved") {
                continue;
            }
            let uid = e.property_value("UID").unwrap_or("").trim();
            if uid.is_empty() {
                continue;
            }

            let start = e.property_value("DTSTART").and_then(parse_cal_time);
            let end = e.property_value("DTEND").and_then(parse_cal_time);
            let (Some(start), Some(end)) = (start, end) else {
                warn!(uid = %uid, "Skipping reservation without usable DTSTART/DTEND");
                continue;
            };

            let checkin = to_instant(start, tz);
            let checkout = match (start, end) {
                // All-day DTEND is exclusive; the guest leaves the day before.
                (CalTime::Date(_), CalTime::Date(d)) => to_instant(CalTime::Date(d - Duration::days(1)), tz),
                _ => to_instant(end, tz),
            };

            let description = e.property_value("DESCRIPTION").unwrap_or("");
            let reservation_url = first_url(description);
            // ATTACH may repeat, so the parser files it under multi_properties
            let image = e
                .multi_properties()
                .get("ATTACH")
                .and_then(|attached| attached.iter().map(|p| p.value().trim()).find(|v| !v.is_empty()))
                .map(to_direct_image_url)
                .or_else(|| reservation_url.as_deref().map(to_direct_image_url));

            rows.push((
                checkin,
                RawReservationEvent {
                    event: Some(uid.to_string()),
                    title: Some(summary.to_string()),
                    checkin: Some(checkin.with_timezone(&tz).to_rfc3339()),
                    checkout: Some(checkout.with_timezone(&tz).to_rfc3339()),
                    image,
                    reservation_url,
                },
            ));
        }

        rows.sort_by_key(|(checkin, _)| *checkin);
        info!(count = rows.len(), "Collected reserved stays");
        rows.into_iter().map(|(_, row)| row).collect()
    }
}

fn parse_cal_time(s: &str) -> Option<CalTime> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Some(utc) = s.strip_suffix('Z') {
        for pat in ["%Y%m%dT%H%M%S", "%Y%m%dT%H%M"].iter() {
            if let Ok(dt) = NaiveDateTime::parse_from_str(utc, pat) {
                return Some(CalTime::Instant(Utc.from_utc_datetime(&dt)));
            }
        }
        return None;
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y%m%d") {
        return Some(CalTime::Date(date));
    }
    for pat in ["%Y%m%dT%H%M%S", "%Y%m%dT%H%M"].iter() {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, pat) {
            return Some(CalTime::Floating(dt));
        }
    }
    None
}

fn to_instant(t: CalTime, tz: Tz) -> DateTime<Utc> {
    match t {
        CalTime::Instant(dt) => dt,
        CalTime::Floating(naive) => localize(naive, tz),
        CalTime::Date(d) => localize(d.and_time(NaiveTime::MIN), tz),
    }
}

fn first_url(text: &str) -> Option<String> {
    URL_IN_TEXT.captures(text).and_then(|c| c.get(1)).map(|m| m.as_str().to_string())
}
