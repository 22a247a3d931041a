use std::env;
use std::path::PathBuf;

use chrono_tz::Tz;
use tracing::{info, warn};

use crate::portraits::PortraitRegistry;

pub const DEFAULT_TIMEZONE: Tz = chrono_tz::America::New_York;

/// Settings read once at cold start and handed to every invocation.
#[derive(Debug, Clone)]
pub struct Config {
    /// Feed used when a request brings neither events nor its own URL
    pub ics_url: Option<String>,
    pub default_tz: Tz,
    pub portraits: PortraitRegistry,
}

impl Config {
    pub fn new(ics_url: Option<String>, default_tz: Tz, portraits: PortraitRegistry) -> Self {
        Self { ics_url, default_tz, portraits }
    }

    /// RESERVATIONS_ICS_URL, DEFAULT_TIMEZONE and PORTRAITS_PATH, all optional.
    /// A PORTRAITS_PATH that cannot be loaded is an error; without it the bundled table is used.
    pub fn from_env() -> Result<Self, String> {
        let ics_url = env::var("RESERVATIONS_ICS_URL")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        let default_tz = match env::var("DEFAULT_TIMEZONE") {
            Ok(name) => parse_tz(&name).ok_or_else(|| format!("Invalid DEFAULT_TIMEZONE: {}", name))?,
            Err(_) => DEFAULT_TIMEZONE,
        };

        let portraits = match env::var("PORTRAITS_PATH") {
            Ok(path) => PortraitRegistry::from_path(&PathBuf::from(path))?,
            Err(_) => PortraitRegistry::bundled()?,
        };

        if ics_url.is_none() {
            warn!("RESERVATIONS_ICS_URL not set; requests must carry ical_url or events");
        }
        info!(tz = %default_tz, portraits = portraits.len(), "Loaded configuration");
        Ok(Self { ics_url, default_tz, portraits })
    }

    /// Timezone for a request: the requested one if valid, otherwise the default.
    pub fn resolve_tz(&self, requested: Option<&str>) -> Tz {
        match requested {
            Some(name) => parse_tz(name).unwrap_or_else(|| {
                warn!(tz = %name, fallback = %self.default_tz, "Unknown timezone, using default");
                self.default_tz
            }),
            None => self.default_tz,
        }
    }
}

pub fn parse_tz(name: &str) -> Option<Tz> {
    name.trim().parse::<Tz>().ok()
}
