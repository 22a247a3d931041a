use std::sync::LazyLock;

use regex::Regex;

use crate::portraits::PortraitRegistry;

pub const PLACEHOLDER_IMAGE: &str = "https://picsum.photos/seed/guest/600/400";

static DRIVE_FILE_VIEW: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)https?://drive\.google\.com/file/d/([^/]+)/view").unwrap());
static DRIVE_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)https?://drive\.google\.com/open\?id=([^&]+)").unwrap());
static DRIVE_UC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)https?://drive\.google\.com/uc\?(?:export=\w+&)?id=([^&]+)").unwrap());

/// Rewrite a drive share link into a URL that serves the file directly.
/// Only the file id survives; returns None for anything that is not a known share link.
pub fn to_drive_direct(url: &str) -> Option<String> {
    let url = url.trim();
    if url.is_empty() {
        return None;
    }
    [&*DRIVE_FILE_VIEW, &*DRIVE_OPEN, &*DRIVE_UC]
        .iter()
        .find_map(|re| re.captures(url))
        .and_then(|caps| caps.get(1))
        .map(|id| format!("https://drive.google.com/uc?export=view&id={}", id.as_str()))
}

/// Drive links become direct links; any other URL is passed through.
pub fn to_direct_image_url(url: &str) -> String {
    to_drive_direct(url).unwrap_or_else(|| url.trim().to_string())
}

/// Pick the image for a guest card, first hit wins:
/// registry portrait, event image, converted reservation link, placeholder.
pub fn resolve_image_src(
    guest_name: &str,
    image: Option<&str>,
    reservation_url: Option<&str>,
    portraits: &PortraitRegistry,
) -> String {
    if let Some(portrait) = portraits.lookup(guest_name) {
        return portrait.to_string();
    }
    if let Some(img) = image.map(str::trim).filter(|s| !s.is_empty()) {
        return img.to_string();
    }
    reservation_url
        .and_then(to_drive_direct)
        .unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string())
}
