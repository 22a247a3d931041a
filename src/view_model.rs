use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::dates::{classify_stay, day_bounds, format_short_date, parse_stay_date};
use crate::images::resolve_image_src;
use crate::model::card::{ClassifiedCard, GuestStayCard, StayStatus};
use crate::model::reservation::RawReservationEvent;
use crate::names::extract_guest_name;
use crate::portraits::PortraitRegistry;

/// Turns raw calendar entries into guest stay cards for one host's reservation list.
/// Holds only read-only context; every call is a pure function of its arguments.
#[derive(Debug, Clone, Copy)]
pub struct ReservationViewModel<'a> {
    portraits: &'a PortraitRegistry,
    tz: Tz,
}

impl<'a> ReservationViewModel<'a> {
    pub fn new(portraits: &'a PortraitRegistry, tz: Tz) -> Self {
        Self { portraits, tz }
    }

    /// One card per event, in the order received.
    #[instrument(level = "debug", skip_all, fields(events = raw_events.len()))]
    pub fn build_cards(&self, raw_events: &[RawReservationEvent]) -> Vec<GuestStayCard> {
        raw_events.iter().map(|r| self.build_card(r)).collect()
    }

    pub fn build_card(&self, raw: &RawReservationEvent) -> GuestStayCard {
        // Untitled entries show their calendar id instead
        let title = raw.title.as_deref().filter(|t| !t.is_empty()).or(raw.event.as_deref());
        let guest_name = extract_guest_name(title);
        let image_src = resolve_image_src(
            &guest_name,
            raw.image.as_deref(),
            raw.reservation_url.as_deref(),
            self.portraits,
        );

        let checkin_date = raw.checkin.as_deref().and_then(|s| parse_stay_date(s, self.tz));
        let checkout_date = raw.checkout.as_deref().and_then(|s| parse_stay_date(s, self.tz));
        if raw.checkin.is_some() && checkin_date.is_none() {
            debug!(checkin = ?raw.checkin, "Unparsable checkin, leaving blank");
        }
        if raw.checkout.is_some() && checkout_date.is_none() {
            debug!(checkout = ?raw.checkout, "Unparsable checkout, leaving blank");
        }

        let key = raw
            .event
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        GuestStayCard {
            key,
            guest_name,
            checkin_text: self.date_text(checkin_date.as_ref()),
            checkout_text: self.date_text(checkout_date.as_ref()),
            checkin_date,
            checkout_date,
            image_src,
        }
    }

    fn date_text(&self, dt: Option<&DateTime<Utc>>) -> String {
        dt.map(|d| format_short_date(d, self.tz)).unwrap_or_default()
    }

    pub fn classify(&self, card: &GuestStayCard, now: DateTime<Utc>) -> StayStatus {
        classify_stay(card.checkin_date, card.checkout_date, now, self.tz)
    }

    /// Index the list should open scrolled to: the first stay in progress,
    /// else the first stay starting after today, else 0 (also for an empty list).
    pub fn initial_focus_index(&self, cards: &[GuestStayCard], now: DateTime<Utc>) -> usize {
        if let Some(idx) = cards.iter().position(|c| self.classify(c, now).is_current) {
            return idx;
        }
        let (_, end_of_day) = day_bounds(now, self.tz);
        cards
            .iter()
            .position(|c| c.checkin_date.map(|ci| ci > end_of_day).unwrap_or(false))
            .unwrap_or(0)
    }

    /// Attach past/current flags to each card.
    pub fn classify_all(&self, cards: Vec<GuestStayCard>, now: DateTime<Utc>) -> Vec<ClassifiedCard> {
        cards
            .into_iter()
            .map(|card| {
                let status = self.classify(&card, now);
                ClassifiedCard { card, status, badge: status.badge() }
            })
            .collect()
    }
}
