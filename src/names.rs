use std::sync::LazyLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

/// Booking prefixes the calendar puts in front of the guest name, tried in order.
static RESERVATION_PREFIXES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [r"(?i)^Reserved\s*[-–—]\s*", r"(?i)^Reserva(do|da)?\s*[-–—]\s*"]
        .iter()
        .map(|p| Regex::new(p).unwrap())
        .collect()
});

/// Guest name from an event title: the first matching booking prefix is stripped,
/// repeatedly until none matches, and the rest trimmed.
/// Titles without a known prefix are kept whole.
pub fn extract_guest_name(title: Option<&str>) -> String {
    let mut name = title.unwrap_or("").trim().to_string();
    while let Some(re) = RESERVATION_PREFIXES.iter().find(|re| re.is_match(&name)) {
        name = re.replace(&name, "").trim().to_string();
    }
    name
}

/// Lookup key for a name: lowercase, diacritics dropped, only ASCII letters and digits.
/// "María José" becomes "mariajose".
pub fn normalize_key(name: &str) -> String {
    name.to_lowercase()
        .nfkd()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        .collect()
}
