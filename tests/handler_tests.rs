use chrono::{TimeZone, Utc};
use lambda_runtime::{Context, LambdaEvent};

use guest_stay_lambda_rust::config::Config;
use guest_stay_lambda_rust::handler::{handler, render, Request};
use guest_stay_lambda_rust::model::reservation::RawReservationEvent;
use guest_stay_lambda_rust::portraits::PortraitRegistry;

fn test_config() -> Config {
    Config::new(None, chrono_tz::UTC, PortraitRegistry::bundled().unwrap())
}

#[test]
fn request_deserializes_with_all_fields_optional() {
    let req: Request = serde_json::from_value(serde_json::json!({})).unwrap();
    assert!(req.ical_url.is_none());
    assert!(req.tz.is_none());
    assert!(req.now.is_none());
    assert!(req.events.is_none());

    let req2: Request = serde_json::from_value(serde_json::json!({
        "tz": "America/New_York",
        "now": "2025-01-03T12:00:00Z",
        "events": [
            { "event": "uid-1", "title": "Reserved - Jane Doe", "checkin": "2025-01-01", "checkout": "2025-01-05" },
            { "title": "Reservada - María", "image": null }
        ]
    }))
    .unwrap();
    assert_eq!(req2.now, Some(Utc.with_ymd_and_hms(2025, 1, 3, 12, 0, 0).unwrap()));
    let events = req2.events.unwrap();
    assert_eq!(events.len(), 2);
    assert_eq!(events[1].event, None);
}

#[test]
fn render_serializes_flags_and_focus() {
    let portraits = PortraitRegistry::bundled().unwrap();
    let events = vec![
        RawReservationEvent {
            event: Some("old".to_string()),
            title: Some("Reserved - Luis".to_string()),
            checkin: Some("2024-12-01".to_string()),
            checkout: Some("2024-12-03".to_string()),
            ..Default::default()
        },
        RawReservationEvent {
            event: Some("now".to_string()),
            title: Some("Reserved - Jane Doe".to_string()),
            checkin: Some("2025-01-01".to_string()),
            checkout: Some("2025-01-05".to_string()),
            ..Default::default()
        },
    ];
    let now = Utc.with_ymd_and_hms(2025, 1, 3, 12, 0, 0).unwrap();

    let resp = render(&events, &portraits, chrono_tz::UTC, now, None);
    assert_eq!(resp.focus_index, 1);

    let json = serde_json::to_value(&resp).unwrap();
    assert!(json.get("error").is_none(), "json was: {}", json);
    let cards = json["cards"].as_array().unwrap();
    assert_eq!(cards[0]["key"], "old");
    assert_eq!(cards[0]["guest_name"], "Luis");
    assert_eq!(cards[0]["image_src"], "/assets/img/Luis.jpg");
    assert_eq!(cards[0]["is_past"], true);
    assert_eq!(cards[0]["is_current"], false);
    assert_eq!(cards[1]["is_current"], true);
    assert_eq!(cards[1]["badge"], "Currently hosting");
    assert_eq!(cards[1]["checkout_text"], "Jan 5, 2025");
}

#[test]
fn source_error_is_passed_through_with_empty_list() {
    let portraits = PortraitRegistry::default();
    let now = Utc.with_ymd_and_hms(2025, 1, 3, 12, 0, 0).unwrap();
    let resp = render(&[], &portraits, chrono_tz::UTC, now, Some("HTTP 500: boom".to_string()));
    assert!(resp.cards.is_empty());
    assert_eq!(resp.focus_index, 0);
    assert_eq!(resp.error.as_deref(), Some("HTTP 500: boom"));
}

#[tokio::test]
async fn handler_uses_inline_events_without_network() {
    let config = test_config();
    let request = Request {
        now: Some(Utc.with_ymd_and_hms(2025, 1, 3, 12, 0, 0).unwrap()),
        events: Some(vec![RawReservationEvent {
            event: Some("uid-1".to_string()),
            title: Some("Reserved - Jane Doe".to_string()),
            checkin: Some("2025-01-01".to_string()),
            checkout: Some("2025-01-05".to_string()),
            ..Default::default()
        }]),
        ..Default::default()
    };

    let resp = handler(LambdaEvent::new(request, Context::default()), &config).await.unwrap();
    assert_eq!(resp.cards.len(), 1);
    assert!(resp.cards[0].status.is_current);
    assert!(resp.error.is_none());
}

#[tokio::test]
async fn handler_reports_missing_calendar_instead_of_failing() {
    let config = test_config();
    let resp = handler(LambdaEvent::new(Request::default(), Context::default()), &config)
        .await
        .unwrap();
    assert!(resp.cards.is_empty());
    assert_eq!(resp.error.as_deref(), Some("No reservation calendar configured"));
}

#[test]
fn unknown_request_timezone_falls_back_to_default() {
    let config = test_config();
    assert_eq!(config.resolve_tz(Some("Mars/Olympus_Mons")), chrono_tz::UTC);
    assert_eq!(config.resolve_tz(Some("Europe/Madrid")), chrono_tz::Europe::Madrid);
    assert_eq!(config.resolve_tz(None), chrono_tz::UTC);
}
