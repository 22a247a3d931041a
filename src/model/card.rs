use chrono::{DateTime, Utc};
use serde::Serialize;

pub const NO_NAME_LABEL: &str = "(No name in event)";
pub const NO_DATE_LABEL: &str = "—";
pub const CURRENT_BADGE: &str = "Currently hosting";

/// Display-ready form of one reservation. Rebuilt on every render, never stored.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GuestStayCard {
    pub key: String,
    pub guest_name: String,
    pub checkin_date: Option<DateTime<Utc>>,
    pub checkout_date: Option<DateTime<Utc>>,
    pub checkin_text: String,
    pub checkout_text: String,
    pub image_src: String,
}

impl GuestStayCard {
    pub fn display_name(&self) -> &str {
        if self.guest_name.is_empty() { NO_NAME_LABEL } else { &self.guest_name }
    }

    pub fn checkin_label(&self) -> &str {
        if self.checkin_text.is_empty() { NO_DATE_LABEL } else { &self.checkin_text }
    }

    pub fn checkout_label(&self) -> &str {
        if self.checkout_text.is_empty() { NO_DATE_LABEL } else { &self.checkout_text }
    }
}

/// Where a stay sits relative to today. Neither flag set means upcoming.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct StayStatus {
    pub is_past: bool,
    pub is_current: bool,
}

impl StayStatus {
    pub fn is_upcoming(&self) -> bool {
        !self.is_past && !self.is_current
    }

    pub fn badge(&self) -> Option<&'static str> {
        self.is_current.then_some(CURRENT_BADGE)
    }
}

/// A card together with its classification, as returned to the caller.
#[derive(Clone, Debug, Serialize)]
pub struct ClassifiedCard {
    #[serde(flatten)]
    pub card: GuestStayCard,
    #[serde(flatten)]
    pub status: StayStatus,
    pub badge: Option<&'static str>,
}
