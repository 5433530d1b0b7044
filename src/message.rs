//! Outbound messages and the WhatsApp / email links that carry them.
//!
//! Message text is percent-encoded with the same character set as the
//! browser's `encodeURIComponent`, so line breaks and reserved characters
//! survive the trip into the recipient's compose box.

use itertools::Itertools;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};
use serde::{Deserialize, Serialize};

use crate::blueprint::{FacetSelection, RecommendationResult};
use crate::config::ContactConfig;

pub const BLUEPRINT_HEADER: &str = "*BLUEPRINT REQUEST*";
pub const BLUEPRINT_CLOSING: &str = "Please suggest the right setup and a site survey time.";

const WHATSAPP_BASE_URL: &str = "https://wa.me/";
const MAPS_SEARCH_URL: &str = "https://www.google.com/maps/search/?api=1&query=";

/// Characters left as-is by `encodeURIComponent`; everything else is escaped.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encode a string for use as a URL query component.
pub fn encode_component(text: &str) -> String {
    utf8_percent_encode(text, URI_COMPONENT).to_string()
}

/// Reverse [`encode_component`]. Invalid UTF-8 sequences are replaced.
pub fn decode_component(encoded: &str) -> String {
    percent_decode_str(encoded).decode_utf8_lossy().into_owned()
}

/// Strip everything but digits from a phone number, as `wa.me` expects.
pub fn whatsapp_digits(number: &str) -> String {
    number.chars().filter(char::is_ascii_digit).collect()
}

/// `https://wa.me/<digits>?text=<encoded>`
pub fn whatsapp_link(number: &str, text: &str) -> String {
    format!(
        "{}{}?text={}",
        WHATSAPP_BASE_URL,
        whatsapp_digits(number),
        encode_component(text)
    )
}

/// How line breaks in an email body are sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineEnding {
    #[default]
    Lf,
    Crlf,
}

/// `mailto:<address>?subject=<encoded>&body=<encoded>`
///
/// Line breaks in the body are sent as CRLF, which mail clients expect.
pub fn mailto_link(address: &str, subject: &str, body: &str) -> String {
    mailto_link_with(address, subject, body, LineEnding::Crlf)
}

pub fn mailto_link_with(address: &str, subject: &str, body: &str, endings: LineEnding) -> String {
    let mut body = encode_component(body);
    if endings == LineEnding::Crlf {
        body = body.replace("%0A", "%0D%0A");
    }
    format!(
        "mailto:{}?subject={}&body={}",
        address,
        encode_component(subject),
        body
    )
}

/// `tel:<phone>` for the contact card.
pub fn tel_link(phone: &str) -> String {
    format!("tel:{}", phone.trim())
}

/// Google Maps search for an address.
pub fn maps_link(address: &str) -> String {
    format!("{}{}", MAPS_SEARCH_URL, encode_component(address))
}

/// The open-ended WhatsApp template from the digital solutions section.
/// The bracketed hints and blank are left for the customer to fill in.
pub fn digital_solutions_message(business_name: &str) -> String {
    format!(
        "Hi {business_name}, I need a digital solution for my business.\n\
         Business type: (Shop/Medical Store/Grocery/Other)\n\
         I need: (POS/Inventory/Pharmacy/eCommerce/Website)\n\
         Location/City: __\n\
         Please guide me with the best setup."
    )
}

/// One `*Label:* value` line in WhatsApp bold markup.
pub fn field_line(label: &str, value: impl std::fmt::Display) -> String {
    format!("*{label}:* {value}")
}

/// Format the Blueprint message for a selection and its recommendation.
///
/// Lines: header, blank, track, space, size, priority, primary metric, each
/// secondary attribute, blank, closing call to action.
pub fn format(selection: &FacetSelection, result: &RecommendationResult) -> String {
    format_with_location(selection, result, None)
}

/// Same as [`format`], with an optional location line after the attributes.
/// Blank locations are left out.
pub fn format_with_location(
    selection: &FacetSelection,
    result: &RecommendationResult,
    location: Option<&str>,
) -> String {
    let facets = [
        field_line("Track", selection.track()),
        field_line("Space", selection.space()),
        field_line("Size", selection.size()),
        field_line("Priority", selection.priority()),
    ];
    let attributes = result
        .attributes()
        .map(|attribute| field_line(&attribute.label, &attribute.value));
    let location = location
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(|l| field_line("Location", l));

    let body = facets.into_iter().chain(attributes).chain(location).join("\n");
    format!("{BLUEPRINT_HEADER}\n\n{body}\n\n{BLUEPRINT_CLOSING}")
}

/// A message ready to be handed off to WhatsApp or email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboundMessage {
    pub subject: String,
    pub body: String,
    #[serde(default)]
    pub email_line_ending: LineEnding,
}

impl OutboundMessage {
    pub fn new(subject: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            body: body.into(),
            email_line_ending: LineEnding::Lf,
        }
    }

    /// Send line breaks as CRLF when handed off to email.
    pub fn with_crlf_email(self) -> Self {
        Self {
            email_line_ending: LineEnding::Crlf,
            ..self
        }
    }

    /// The Blueprint hand-off for a resolved selection.
    pub fn blueprint(
        selection: &FacetSelection,
        result: &RecommendationResult,
        location: Option<&str>,
    ) -> Self {
        Self::new(
            format!("{} Blueprint Request", selection.track()),
            format_with_location(selection, result, location),
        )
        .with_crlf_email()
    }

    pub fn digital_solutions(contact: &ContactConfig) -> Self {
        Self::new(
            format!("Digital Solutions Inquiry - {}", contact.business_name),
            digital_solutions_message(&contact.business_name),
        )
    }

    pub fn whatsapp_link(&self, contact: &ContactConfig) -> String {
        whatsapp_link(&contact.whatsapp_number, &self.body)
    }

    pub fn mailto_link(&self, contact: &ContactConfig) -> String {
        mailto_link_with(&contact.email, &self.subject, &self.body, self.email_line_ending)
    }

    pub fn link(&self, channel: Channel, contact: &ContactConfig) -> String {
        match channel {
            Channel::WhatsApp => self.whatsapp_link(contact),
            Channel::Email => self.mailto_link(contact),
        }
    }
}

/// Where a message is handed off to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    #[value(name = "whatsapp")]
    WhatsApp,
    Email,
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Channel::WhatsApp => write!(f, "WhatsApp"),
            Channel::Email => write!(f, "Email"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blueprint::{FacetSelection, Priority, SecurityPriority, Size, SpaceType, resolve};

    fn night_selection() -> FacetSelection {
        FacetSelection::new(
            SpaceType::Warehouse,
            Size::Medium,
            Priority::Security(SecurityPriority::Night),
        )
    }

    #[test]
    fn test_encode_matches_uri_component_rules() {
        assert_eq!(encode_component("a b"), "a%20b");
        assert_eq!(encode_component("line\nbreak"), "line%0Abreak");
        assert_eq!(encode_component("R&D #1 100%"), "R%26D%20%231%20100%25");
        assert_eq!(encode_component("*bold*"), "*bold*");
        assert_eq!(encode_component("(4MP+)"), "(4MP%2B)");
        assert_eq!(encode_component("-_.!~'"), "-_.!~'");
        assert_eq!(encode_component("✓"), "%E2%9C%93");
    }

    #[test]
    fn test_decode_reverses_encode() {
        let text = "Hi!\nR&D #1: 4-8 cameras (50% off?) ✓";
        assert_eq!(decode_component(&encode_component(text)), text);
    }

    #[test]
    fn test_whatsapp_digits_strips_formatting() {
        assert_eq!(whatsapp_digits("+92 312-0518266"), "923120518266");
        assert_eq!(whatsapp_digits(""), "");
    }

    #[test]
    fn test_whatsapp_link_shape() {
        let link = whatsapp_link("+923120518266", "Hello there");
        assert_eq!(link, "https://wa.me/923120518266?text=Hello%20there");
    }

    #[test]
    fn test_mailto_uses_crlf() {
        let link = mailto_link("a@b.c", "Hi & bye", "one\ntwo");
        assert_eq!(link, "mailto:a@b.c?subject=Hi%20%26%20bye&body=one%0D%0Atwo");
    }

    #[test]
    fn test_format_fixed_order() {
        let selection = night_selection();
        let message = format(&selection, &resolve(&selection));
        let lines: Vec<&str> = message.lines().collect();

        assert_eq!(
            lines,
            vec![
                "*BLUEPRINT REQUEST*",
                "",
                "*Track:* Security",
                "*Space:* Warehouse",
                "*Size:* Medium",
                "*Priority:* Night Vision",
                "*Cameras:* 4-8",
                "*Camera Type:* Starlight + IR Cameras",
                "*Storage:* 14-30 days",
                "*Recorder:* 8-Channel NVR",
                "",
                "Please suggest the right setup and a site survey time.",
            ]
        );
    }

    #[test]
    fn test_location_line_only_when_present() {
        let selection = night_selection();
        let result = resolve(&selection);

        let with = format_with_location(&selection, &result, Some("  Mansehra Road "));
        assert!(with.contains("*Location:* Mansehra Road\n\n"));

        let blank = format_with_location(&selection, &result, Some("   "));
        assert_eq!(blank, format(&selection, &result));
    }

    #[test]
    fn test_blueprint_links_use_contact_config() {
        let selection = night_selection();
        let message = OutboundMessage::blueprint(&selection, &resolve(&selection), None);
        let contact = ContactConfig::default();

        let whatsapp = message.link(Channel::WhatsApp, &contact);
        assert!(whatsapp.starts_with("https://wa.me/923120518266?text=*BLUEPRINT%20REQUEST*"));

        let email = message.link(Channel::Email, &contact);
        assert!(email.starts_with(
            "mailto:upedgetech111@gmail.com?subject=Security%20Blueprint%20Request&body="
        ));
        assert!(email.contains("%0D%0A"));
    }

    #[test]
    fn test_plain_messages_keep_lf_in_email() {
        let message = OutboundMessage::new("Hello", "line one\nline two");
        let email = message.mailto_link(&ContactConfig::default());
        assert!(email.ends_with("&body=line%20one%0Aline%20two"));

        let crlf = message.with_crlf_email().mailto_link(&ContactConfig::default());
        assert!(crlf.ends_with("&body=line%20one%0D%0Aline%20two"));
    }

    #[test]
    fn test_tel_and_maps_links() {
        assert_eq!(tel_link("03120518266"), "tel:03120518266");
        assert_eq!(
            maps_link("Abbottabad, Pakistan"),
            "https://www.google.com/maps/search/?api=1&query=Abbottabad%2C%20Pakistan"
        );
    }

    #[test]
    fn test_digital_solutions_template() {
        let contact = ContactConfig::default();
        let message = OutboundMessage::digital_solutions(&contact);
        assert_eq!(
            message.body.lines().collect::<Vec<_>>(),
            vec![
                "Hi UpEdge Technologies, I need a digital solution for my business.",
                "Business type: (Shop/Medical Store/Grocery/Other)",
                "I need: (POS/Inventory/Pharmacy/eCommerce/Website)",
                "Location/City: __",
                "Please guide me with the best setup.",
            ]
        );

        let link = message.whatsapp_link(&contact);
        assert!(link.starts_with("https://wa.me/923120518266?text=Hi%20UpEdge%20Technologies%2C"));
        assert!(link.contains("(POS%2FInventory%2FPharmacy%2FeCommerce%2FWebsite)"));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::blueprint::{domain, resolve};
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn prop_encoded_text_has_no_reserved_characters(text in "\\PC*") {
            let encoded = encode_component(&text);
            prop_assert!(!encoded.contains(['\n', '\r', '&', '#', ' ', '?', '=', '+']));
            prop_assert_eq!(decode_component(&encoded), text);
        }

        #[test]
        fn prop_location_survives_round_trip(location in "[^\\n]{1,40}") {
            let selection = domain().next().unwrap();
            let result = resolve(&selection);
            let message = format_with_location(&selection, &result, Some(&location));
            let decoded = decode_component(&encode_component(&message));
            let expected = field_line("Location", location.trim());
            if location.trim().is_empty() {
                prop_assert!(!decoded.contains("*Location:*"));
            } else {
                prop_assert!(decoded.contains(&expected));
            }
        }
    }
}
