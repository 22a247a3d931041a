use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use lambda_runtime::{Error, LambdaEvent};
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument};

use crate::config::Config;
use crate::ical::ReservationCalendar;
use crate::model::card::ClassifiedCard;
use crate::model::reservation::RawReservationEvent;
use crate::portraits::PortraitRegistry;
use crate::view_model::ReservationViewModel;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Request {
    /// Overrides the configured calendar feed
    #[serde(default)]
    pub ical_url: Option<String>,
    /// IANA timezone used for day boundaries and display
    #[serde(default)]
    pub tz: Option<String>,
    /// Moment to classify against; defaults to the invocation time
    #[serde(default)]
    pub now: Option<DateTime<Utc>>,
    /// Already fetched events; when present no feed is read
    #[serde(default)]
    pub events: Option<Vec<RawReservationEvent>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Response {
    pub cards: Vec<ClassifiedCard>,
    pub focus_index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[instrument(skip(event, config))]
pub async fn handler(event: LambdaEvent<Request>, config: &Config) -> Result<Response, Error> {
    let payload = event.payload; // Derived from the Lambda event
    let tz = config.resolve_tz(payload.tz.as_deref());
    let now = payload.now.unwrap_or_else(Utc::now);

    let (events, fetch_error) = match payload.events {
        Some(events) => (events, None),
        None => match payload.ical_url.or_else(|| config.ics_url.clone()) {
            Some(url) => {
                // spawn_blocking needs owned inputs; ureq blocks the thread.
                let fetched = tokio::task::spawn_blocking(move || fetch_reservations(&url, tz)).await;
                match fetched {
                    Ok(Ok(events)) => (events, None),
                    Ok(Err(e)) => (Vec::new(), Some(e)),
                    Err(e) => {
                        error!(error = %e, "Calendar task join error");
                        (Vec::new(), Some(format!("Calendar task join error: {}", e)))
                    }
                }
            }
            None => (Vec::new(), Some("No reservation calendar configured".to_string())),
        },
    };

    Ok(render(&events, &config.portraits, tz, now, fetch_error))
}

/// Fetch the feed and pull out reserved stays.
pub fn fetch_reservations(url: &str, tz: Tz) -> Result<Vec<RawReservationEvent>, String> {
    let calendar = ReservationCalendar::from_url(url)?;
    Ok(calendar.reservations(tz))
}

/// Build the full response for an already resolved event list.
/// A source failure arrives as `error` with an empty list and is passed through untouched.
pub fn render(
    events: &[RawReservationEvent],
    portraits: &PortraitRegistry,
    tz: Tz,
    now: DateTime<Utc>,
    error: Option<String>,
) -> Response {
    let view_model = ReservationViewModel::new(portraits, tz);
    let cards = view_model.build_cards(events);
    let focus_index = view_model.initial_focus_index(&cards, now);
    let cards = view_model.classify_all(cards, now);
    let current = cards.iter().filter(|c| c.status.is_current).count();
    info!(cards = cards.len(), current, focus_index, failed = error.is_some(), "Rendered reservation list");
    Response { cards, focus_index, error }
}
