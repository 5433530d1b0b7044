// Integration tests for package inquiries, site surveys and the snapshot writer

use blueprint::catalog::{Cabling, PackageInquiry, TrackOptions, packages};
use blueprint::message::{decode_component, maps_link, tel_link};
use blueprint::navigation::{NAV_ITEMS, SectionId, SectionLayout, active_section, scroll_target};
use blueprint::survey::{PreferredTime, SurveyRequest};
use blueprint::writer::{verify_snapshot, write_snapshot};
use blueprint::{Channel, ContactConfig, OutboundMessage, Size, SpaceType, Track};
use tempfile::TempDir;

#[test]
fn test_package_inquiry_link_for_each_track() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.json");
    std::fs::write(&config_path, r#"{ "whatsapp_number": "+92 300 1234567" }"#).unwrap();
    let contact = ContactConfig::load(&config_path).unwrap().unwrap();

    for track in Track::ALL {
        let package = &packages(track)[2];
        let inquiry = PackageInquiry {
            space: Some(SpaceType::Office),
            size: Some(Size::Large),
            ..PackageInquiry::new(track)
        }
        .with_package(package.id)
        .unwrap();

        let outbound = inquiry.outbound().unwrap();
        let link = outbound.link(Channel::WhatsApp, &contact);
        assert!(link.starts_with("https://wa.me/923001234567?text="));

        let (_, encoded) = link.split_once("?text=").unwrap();
        let decoded = decode_component(encoded);
        assert_eq!(decoded, outbound.body);
        assert!(decoded.contains(package.name));
        for item in package.includes {
            assert!(decoded.contains(item), "{item} missing from {track} inquiry");
        }
    }
}

#[test]
fn test_wireless_security_inquiry_email() {
    let inquiry = PackageInquiry {
        space: Some(SpaceType::Home),
        size: Some(Size::Small),
        ..PackageInquiry::new(Track::Security)
    }
    .with_package("essential-security")
    .unwrap()
    .with_options(TrackOptions::Security {
        budget: None,
        cabling: Some(Cabling::Wireless),
    })
    .unwrap();

    assert!(inquiry.is_complete());
    let link = inquiry
        .outbound()
        .unwrap()
        .link(Channel::Email, &ContactConfig::default());
    assert!(link.starts_with(
        "mailto:upedgetech111@gmail.com?subject=SECURITY%20System%20Inquiry%20-%20Essential%20Security&body="
    ));
    assert!(decode_component(&link).contains("*Recommended:* Wi-Fi cameras (no wiring needed)"));
}

#[test]
fn test_survey_request_whatsapp() {
    let request = SurveyRequest {
        space: Some(SpaceType::Shop),
        location: Some("Main Bazaar & Co #2".to_string()),
        preferred_time: Some(PreferredTime::Morning),
        note: None,
    };
    let contact = ContactConfig::default();
    let link = request
        .outbound(&contact.business_name)
        .link(Channel::WhatsApp, &contact);

    let (_, encoded) = link.split_once("?text=").unwrap();
    assert!(!encoded.contains(['&', '#', '\n']));
    assert!(decode_component(encoded).contains("Location: Main Bazaar & Co #2"));
}

#[test]
fn test_snapshot_export_and_verify() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("tables.jsonl");

    let count = write_snapshot(&path).unwrap();
    let lines = std::fs::read_to_string(&path).unwrap().lines().count();
    assert_eq!(count, lines);
    assert!(verify_snapshot(&path).unwrap().is_empty());

    // Drop the first cell and the snapshot no longer matches
    let content = std::fs::read_to_string(&path).unwrap();
    let trimmed: Vec<&str> = content.lines().skip(1).collect();
    std::fs::write(&path, trimmed.join("\n")).unwrap();
    assert_eq!(verify_snapshot(&path).unwrap().len(), 1);
}

#[test]
fn test_nav_scroll_and_highlight() {
    let layouts: Vec<SectionLayout> = NAV_ITEMS
        .iter()
        .enumerate()
        .map(|(i, item)| SectionLayout {
            id: item.id,
            top: i as f64 * 900.0 - 1800.0,
            height: 900.0,
        })
        .collect();

    // Home and Solutions are above the viewport, Blueprint starts at 0
    assert_eq!(
        active_section(&layouts, 1000.0, None),
        Some(SectionId::Blueprint)
    );
    assert_eq!(
        scroll_target(&layouts, SectionId::Services, 1800.0),
        Some(900.0 + 1800.0 - 82.0)
    );
    assert_eq!(scroll_target(&layouts, SectionId::Gallery, 0.0), None);
}

#[test]
fn test_contact_links_follow_config() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.json");
    std::fs::write(
        &config_path,
        r#"{
            "business_name": "Hill Tech",
            "phone": "0300 1112223",
            "address": "Main Mall #4, Murree"
        }"#,
    )
    .unwrap();
    let contact = ContactConfig::load(&config_path).unwrap().unwrap();

    assert_eq!(tel_link(&contact.phone), "tel:0300 1112223");
    let maps = maps_link(&contact.address);
    let (_, query) = maps.split_once("&query=").unwrap();
    assert!(!query.contains(['#', ' ', ',']));
    assert_eq!(decode_component(query), "Main Mall #4, Murree");

    let digital = OutboundMessage::digital_solutions(&contact);
    assert!(digital.body.starts_with("Hi Hill Tech, I need a digital solution"));
    let email = digital.link(Channel::Email, &contact);
    assert!(!email.contains("%0D"));
}
