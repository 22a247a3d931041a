use serde::{Deserialize, Serialize};

/// One calendar entry as served by the reservation calendar endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawReservationEvent {
    /// Calendar UID of the entry
    #[serde(default)]
    pub event: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub checkin: Option<String>,
    #[serde(default)]
    pub checkout: Option<String>,
    /// Image already resolved by the source
    #[serde(default)]
    pub image: Option<String>,
    /// Link found in the event description, often a drive share link
    #[serde(default)]
    pub reservation_url: Option<String>,
}
