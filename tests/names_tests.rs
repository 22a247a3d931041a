use guest_stay_lambda_rust::images::{to_direct_image_url, to_drive_direct};
use guest_stay_lambda_rust::names::{extract_guest_name, normalize_key};
use guest_stay_lambda_rust::portraits::PortraitRegistry;

#[test]
fn strips_known_reservation_prefixes() {
    assert_eq!(extract_guest_name(Some("Reserved - Jane Doe")), "Jane Doe");
    assert_eq!(extract_guest_name(Some("Reservada - María")), "María");
    assert_eq!(extract_guest_name(Some("reservado – Luis ")), "Luis");
    assert_eq!(extract_guest_name(Some("RESERVA—Ana")), "Ana");
    assert_eq!(extract_guest_name(Some("  Reserved -   ")), "");
}

#[test]
fn doubled_prefixes_are_all_stripped() {
    assert_eq!(extract_guest_name(Some("Reserved - Reserved - Bob")), "Bob");
    assert_eq!(extract_guest_name(Some("Reserved - Bob")), "Bob");
    assert_eq!(extract_guest_name(Some("Reservado - Reserved – Ana")), "Ana");
}

#[test]
fn unknown_titles_are_kept_trimmed() {
    assert_eq!(extract_guest_name(Some("  Airbnb (Not available) ")), "Airbnb (Not available)");
    assert_eq!(extract_guest_name(Some("Reserved")), "Reserved");
    assert_eq!(extract_guest_name(None), "");
}

#[test]
fn stripping_twice_changes_nothing() {
    for title in ["Reserved - Jane Doe", "Reservada - María", "Plain Name", "", "Reserved - Reserved - Bob", "Reservado - Reserved – Ana"] {
        let once = extract_guest_name(Some(title));
        assert_eq!(extract_guest_name(Some(&once)), once, "title was: {}", title);
    }
}

#[test]
fn normalized_key_drops_case_accents_and_punctuation() {
    assert_eq!(normalize_key("María José"), "mariajose");
    assert_eq!(normalize_key("Andrés"), "andres");
    assert_eq!(normalize_key("O'Neil-Smith 2"), "oneilsmith2");
    assert_eq!(normalize_key(""), "");
}

#[test]
fn drive_share_links_become_direct_links() {
    let expected = Some("https://drive.google.com/uc?export=view&id=ABC123".to_string());
    assert_eq!(to_drive_direct("https://drive.google.com/file/d/ABC123/view?usp=sharing"), expected);
    assert_eq!(to_drive_direct("https://drive.google.com/open?id=ABC123"), expected);
    assert_eq!(to_drive_direct("https://drive.google.com/open?id=ABC123&usp=drive_fs"), expected);
    assert_eq!(to_drive_direct("https://drive.google.com/uc?export=download&id=ABC123"), expected);
    assert_eq!(to_drive_direct("HTTPS://DRIVE.GOOGLE.COM/uc?id=ABC123"), expected);
}

#[test]
fn non_drive_links_are_not_rewritten() {
    assert_eq!(to_drive_direct("https://example.com/open?id=ABC123"), None);
    assert_eq!(to_drive_direct(""), None);
    assert_eq!(to_direct_image_url("https://example.com/a.png"), "https://example.com/a.png");
}

#[test]
fn portrait_table_normalizes_keys_on_load() {
    let registry = PortraitRegistry::from_json(r#"{ "Zoë": "zoe.jpg", "??": "ignored.jpg" }"#).unwrap();
    assert_eq!(registry.len(), 1);
    assert_eq!(registry.lookup("ZOE"), Some("zoe.jpg"));
    assert_eq!(registry.get("zoe"), Some("zoe.jpg"));
    assert_eq!(registry.lookup("Nobody"), None);
}

#[test]
fn bundled_portraits_load() {
    let registry = PortraitRegistry::bundled().unwrap();
    assert_eq!(registry.len(), 14);
    assert_eq!(registry.lookup("Jessica"), Some("/assets/img/Jessica.jpg"));
}

#[test]
fn malformed_portrait_table_is_an_error() {
    assert!(PortraitRegistry::from_json("[1, 2, 3]").is_err());
}
