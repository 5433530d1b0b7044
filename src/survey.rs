use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::BlueprintError;
use crate::blueprint::SpaceType;
use crate::message::OutboundMessage;

pub const SURVEY_GREETING: &str = "Hi! I'd like to request a site survey.";
pub const SURVEY_CLOSING: &str = "Please suggest a recommended setup and survey time.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PreferredTime {
    Morning,
    Afternoon,
    Evening,
}

impl std::fmt::Display for PreferredTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PreferredTime::Morning => write!(f, "Morning"),
            PreferredTime::Afternoon => write!(f, "Afternoon"),
            PreferredTime::Evening => write!(f, "Evening"),
        }
    }
}

impl FromStr for PreferredTime {
    type Err = BlueprintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "morning" => Ok(PreferredTime::Morning),
            "afternoon" => Ok(PreferredTime::Afternoon),
            "evening" => Ok(PreferredTime::Evening),
            _ => Err(BlueprintError::invalid(
                "time",
                format!("'{s}' is not one of morning, afternoon, evening"),
            )),
        }
    }
}

/// A request for someone to visit the premises. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurveyRequest {
    pub space: Option<SpaceType>,
    pub location: Option<String>,
    pub preferred_time: Option<PreferredTime>,
    pub note: Option<String>,
}

fn present(text: &Option<String>) -> Option<&str> {
    text.as_deref().map(str::trim).filter(|t| !t.is_empty())
}

impl SurveyRequest {
    /// A blank line follows the greeting only when a space type is given.
    pub fn message(&self) -> String {
        let mut parts = vec![SURVEY_GREETING.to_string()];

        if let Some(space) = self.space {
            parts.push(format!("\n📍 Space Type: {space}"));
        }
        if let Some(location) = present(&self.location) {
            parts.push(format!("📌 Location: {location}"));
        }
        if let Some(time) = self.preferred_time {
            parts.push(format!("⏰ Preferred Time: {time}"));
        }
        if let Some(note) = present(&self.note) {
            parts.push(format!("📝 Note: {note}"));
        }

        parts.push(format!("\n{SURVEY_CLOSING}"));
        parts.join("\n")
    }

    pub fn subject(business_name: &str) -> String {
        format!("Site Survey Request - {business_name}")
    }

    pub fn outbound(&self, business_name: &str) -> OutboundMessage {
        OutboundMessage::new(Self::subject(business_name), self.message())
    }
}
