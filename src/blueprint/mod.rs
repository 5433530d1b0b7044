use std::str::FromStr;

use itertools::iproduct;
use serde::{Deserialize, Serialize};

use crate::BlueprintError;

pub mod tables;

/// Number of secondary attributes every recommendation carries.
pub const SECONDARY_ATTRIBUTES: usize = 3;

/// Top-level service category a blueprint is configured for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Track {
    /// CCTV cameras and recorders
    Security,
    /// Routers, switches, access points and cabling
    Networking,
    /// Solar panels, inverters and batteries
    Solar,
    /// Websites, POS and business software
    Digital,
}

impl Track {
    pub const ALL: [Track; 4] = [
        Track::Security,
        Track::Networking,
        Track::Solar,
        Track::Digital,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Track::Security => "security",
            Track::Networking => "networking",
            Track::Solar => "solar",
            Track::Digital => "digital",
        }
    }

    /// The priority a selection falls back to when this track is picked.
    pub fn default_priority(&self) -> Priority {
        self.priorities()[0]
    }

    /// Every priority that is valid for this track, default first.
    pub fn priorities(&self) -> [Priority; 4] {
        match self {
            Track::Security => SecurityPriority::ALL.map(Priority::Security),
            Track::Networking => NetworkingPriority::ALL.map(Priority::Networking),
            Track::Solar => SolarPriority::ALL.map(Priority::Solar),
            Track::Digital => DigitalPriority::ALL.map(Priority::Digital),
        }
    }
}

impl std::fmt::Display for Track {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Track::Security => write!(f, "Security"),
            Track::Networking => write!(f, "Networking"),
            Track::Solar => write!(f, "Solar"),
            Track::Digital => write!(f, "Digital"),
        }
    }
}

impl FromStr for Track {
    type Err = BlueprintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Track::ALL
            .into_iter()
            .find(|track| track.key().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                BlueprintError::invalid(
                    "track",
                    format!("'{s}' is not one of security, networking, solar, digital"),
                )
            })
    }
}

/// The kind of premises the visitor wants covered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpaceType {
    Home,
    Shop,
    Office,
    School,
    Warehouse,
    Other,
}

impl SpaceType {
    pub const ALL: [SpaceType; 6] = [
        SpaceType::Home,
        SpaceType::Shop,
        SpaceType::Office,
        SpaceType::School,
        SpaceType::Warehouse,
        SpaceType::Other,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            SpaceType::Home => "home",
            SpaceType::Shop => "shop",
            SpaceType::Office => "office",
            SpaceType::School => "school",
            SpaceType::Warehouse => "warehouse",
            SpaceType::Other => "other",
        }
    }
}

impl std::fmt::Display for SpaceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SpaceType::Home => write!(f, "Home"),
            SpaceType::Shop => write!(f, "Shop"),
            SpaceType::Office => write!(f, "Office"),
            SpaceType::School => write!(f, "School"),
            SpaceType::Warehouse => write!(f, "Warehouse"),
            SpaceType::Other => write!(f, "Other"),
        }
    }
}

impl FromStr for SpaceType {
    type Err = BlueprintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        // "retail" and "educational" are accepted as aliases used in older copy
        let wanted = match wanted.to_ascii_lowercase().as_str() {
            "retail" => "shop",
            "educational" | "education" => "school",
            _ => wanted,
        };
        SpaceType::ALL
            .into_iter()
            .find(|space| space.key().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                BlueprintError::invalid(
                    "space",
                    format!("'{s}' is not one of home, shop, office, school, warehouse, other"),
                )
            })
    }
}

/// How large the premises (or business) is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Size {
    Small,
    Medium,
    Large,
}

impl Size {
    pub const ALL: [Size; 3] = [Size::Small, Size::Medium, Size::Large];

    pub fn key(&self) -> &'static str {
        match self {
            Size::Small => "small",
            Size::Medium => "medium",
            Size::Large => "large",
        }
    }

    /// Column of this size in the decision tables.
    pub(crate) fn index(&self) -> usize {
        match self {
            Size::Small => 0,
            Size::Medium => 1,
            Size::Large => 2,
        }
    }
}

impl std::fmt::Display for Size {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Size::Small => write!(f, "Small"),
            Size::Medium => write!(f, "Medium"),
            Size::Large => write!(f, "Large"),
        }
    }
}

impl FromStr for Size {
    type Err = BlueprintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Size::ALL
            .into_iter()
            .find(|size| size.key().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                BlueprintError::invalid("size", format!("'{s}' is not one of small, medium, large"))
            })
    }
}

/// What matters most for a security system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SecurityPriority {
    /// Clear footage in the dark
    Night,
    /// Recognizable faces
    Face,
    /// Doors, gates and entry points
    Entry,
    /// Lowest cost
    Budget,
}

impl SecurityPriority {
    pub const ALL: [SecurityPriority; 4] = [
        SecurityPriority::Night,
        SecurityPriority::Face,
        SecurityPriority::Entry,
        SecurityPriority::Budget,
    ];
}

/// What matters most for a network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkingPriority {
    Stability,
    Coverage,
    Speed,
    Budget,
}

impl NetworkingPriority {
    pub const ALL: [NetworkingPriority; 4] = [
        NetworkingPriority::Stability,
        NetworkingPriority::Coverage,
        NetworkingPriority::Speed,
        NetworkingPriority::Budget,
    ];
}

/// What matters most for a solar installation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SolarPriority {
    /// Power during load shedding
    Backup,
    /// Lower electricity bill
    Savings,
    /// Limited roof space
    Roof,
    Budget,
}

impl SolarPriority {
    pub const ALL: [SolarPriority; 4] = [
        SolarPriority::Backup,
        SolarPriority::Savings,
        SolarPriority::Roof,
        SolarPriority::Budget,
    ];
}

/// The main goal of a digital project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DigitalPriority {
    Visibility,
    Manage,
    Automation,
    Budget,
}

impl DigitalPriority {
    pub const ALL: [DigitalPriority; 4] = [
        DigitalPriority::Visibility,
        DigitalPriority::Manage,
        DigitalPriority::Automation,
        DigitalPriority::Budget,
    ];
}

/// A priority tagged with the track it belongs to.
///
/// Because the track is carried by the variant, a priority can never be
/// paired with a track it is not valid for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "track", content = "priority", rename_all = "lowercase")]
pub enum Priority {
    Security(SecurityPriority),
    Networking(NetworkingPriority),
    Solar(SolarPriority),
    Digital(DigitalPriority),
}

impl Priority {
    pub fn track(&self) -> Track {
        match self {
            Priority::Security(_) => Track::Security,
            Priority::Networking(_) => Track::Networking,
            Priority::Solar(_) => Track::Solar,
            Priority::Digital(_) => Track::Digital,
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            Priority::Security(SecurityPriority::Night) => "night",
            Priority::Security(SecurityPriority::Face) => "face",
            Priority::Security(SecurityPriority::Entry) => "entry",
            Priority::Security(SecurityPriority::Budget) => "budget",
            Priority::Networking(NetworkingPriority::Stability) => "stability",
            Priority::Networking(NetworkingPriority::Coverage) => "coverage",
            Priority::Networking(NetworkingPriority::Speed) => "speed",
            Priority::Networking(NetworkingPriority::Budget) => "budget",
            Priority::Solar(SolarPriority::Backup) => "backup",
            Priority::Solar(SolarPriority::Savings) => "savings",
            Priority::Solar(SolarPriority::Roof) => "roof",
            Priority::Solar(SolarPriority::Budget) => "budget",
            Priority::Digital(DigitalPriority::Visibility) => "visibility",
            Priority::Digital(DigitalPriority::Manage) => "manage",
            Priority::Digital(DigitalPriority::Automation) => "automation",
            Priority::Digital(DigitalPriority::Budget) => "budget",
        }
    }

    /// Row of this priority in its track's decision table.
    pub(crate) fn index(&self) -> usize {
        self.track()
            .priorities()
            .iter()
            .position(|p| p == self)
            .unwrap_or(0)
    }

    /// Parse a priority name in the context of a track.
    ///
    /// Names like "budget" exist on every track, so the track decides which
    /// variant is meant. A name that belongs to a different track is rejected.
    pub fn parse_for(track: Track, s: &str) -> Result<Self, BlueprintError> {
        track
            .priorities()
            .into_iter()
            .find(|priority| priority.key().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                let valid = track.priorities().map(|p| p.key());
                BlueprintError::invalid(
                    "priority",
                    format!(
                        "'{s}' is not valid for the {} track (expected one of {})",
                        track.key(),
                        valid.join(", ")
                    ),
                )
            })
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Priority::Security(SecurityPriority::Night) => write!(f, "Night Vision"),
            Priority::Security(SecurityPriority::Face) => write!(f, "Face Detail"),
            Priority::Security(SecurityPriority::Entry) => write!(f, "Entry Points"),
            Priority::Networking(NetworkingPriority::Stability) => write!(f, "Stability"),
            Priority::Networking(NetworkingPriority::Coverage) => write!(f, "Coverage"),
            Priority::Networking(NetworkingPriority::Speed) => write!(f, "Speed"),
            Priority::Solar(SolarPriority::Backup) => write!(f, "Backup"),
            Priority::Solar(SolarPriority::Savings) => write!(f, "Bill Savings"),
            Priority::Solar(SolarPriority::Roof) => write!(f, "Limited Roof Space"),
            Priority::Digital(DigitalPriority::Visibility) => write!(f, "Online Visibility"),
            Priority::Digital(DigitalPriority::Manage) => write!(f, "Manage Sales"),
            Priority::Digital(DigitalPriority::Automation) => write!(f, "Full Automation"),
            Priority::Security(SecurityPriority::Budget)
            | Priority::Networking(NetworkingPriority::Budget)
            | Priority::Solar(SolarPriority::Budget)
            | Priority::Digital(DigitalPriority::Budget) => write!(f, "Budget"),
        }
    }
}

/// The visitor's current answers in the Blueprint configurator.
///
/// The track is derived from the priority, so the selection always holds a
/// priority that is valid for its track. Transitions return a new value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FacetSelection {
    space: SpaceType,
    size: Size,
    priority: Priority,
}

impl FacetSelection {
    pub fn new(space: SpaceType, size: Size, priority: Priority) -> Self {
        Self {
            space,
            size,
            priority,
        }
    }

    /// A fresh selection for a track, with that track's default priority.
    pub fn for_track(track: Track) -> Self {
        Self::new(SpaceType::Home, Size::Small, track.default_priority())
    }

    /// Build a selection from raw strings, as typed on the command line.
    ///
    /// A missing priority falls back to the track default.
    pub fn parse(
        track: &str,
        space: &str,
        size: &str,
        priority: Option<&str>,
    ) -> Result<Self, BlueprintError> {
        let track: Track = track.parse()?;
        let priority = match priority {
            Some(p) => Priority::parse_for(track, p)?,
            None => track.default_priority(),
        };
        Ok(Self::new(space.parse()?, size.parse()?, priority))
    }

    pub fn track(&self) -> Track {
        self.priority.track()
    }

    pub fn space(&self) -> SpaceType {
        self.space
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    /// Switch track. Picking a different track resets the priority to that
    /// track's default; re-picking the current track keeps it.
    pub fn with_track(self, track: Track) -> Self {
        if track == self.track() {
            return self;
        }
        Self {
            priority: track.default_priority(),
            ..self
        }
    }

    pub fn with_space(self, space: SpaceType) -> Self {
        Self { space, ..self }
    }

    pub fn with_size(self, size: Size) -> Self {
        Self { size, ..self }
    }

    /// Change the priority within the current track.
    pub fn with_priority(self, priority: Priority) -> Result<Self, BlueprintError> {
        if priority.track() != self.track() {
            return Err(BlueprintError::invalid(
                "priority",
                format!(
                    "'{}' belongs to the {} track, current track is {}",
                    priority.key(),
                    priority.track().key(),
                    self.track().key()
                ),
            ));
        }
        Ok(Self { priority, ..self })
    }
}

impl Default for FacetSelection {
    fn default() -> Self {
        Self::for_track(Track::Security)
    }
}

/// A single label and value shown in the recommendation panel.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Attribute {
    pub label: String,
    pub value: String,
}

impl Attribute {
    pub fn new(label: &str, value: &str) -> Self {
        Self {
            label: label.to_string(),
            value: value.to_string(),
        }
    }
}

impl std::fmt::Display for Attribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.label, self.value)
    }
}

/// The recommendation derived from a [`FacetSelection`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecommendationResult {
    /// The headline metric, e.g. "Cameras: 4-8"
    pub primary: Attribute,
    /// Supporting attributes, always in table order
    pub secondary: [Attribute; SECONDARY_ATTRIBUTES],
}

impl RecommendationResult {
    /// Primary and secondary attributes in display order.
    pub fn attributes(&self) -> impl Iterator<Item = &Attribute> {
        std::iter::once(&self.primary).chain(self.secondary.iter())
    }

    pub fn get(&self, label: &str) -> Option<&str> {
        self.attributes()
            .find(|attribute| attribute.label == label)
            .map(|attribute| attribute.value.as_str())
    }
}

/// Resolve a selection into its recommendation.
///
/// Total over the typed domain: every selection has exactly one authored
/// answer. The space type does not influence the result.
pub fn resolve(selection: &FacetSelection) -> RecommendationResult {
    resolve_facets(selection.size(), selection.priority())
}

/// Resolve directly from size and priority.
pub fn resolve_facets(size: Size, priority: Priority) -> RecommendationResult {
    let table = tables::for_track(priority.track());
    let column = size.index();
    let by_size = |row: &tables::SizeRow| Attribute::new(row.label, row.values[column]);

    RecommendationResult {
        primary: by_size(&table.primary),
        secondary: [
            Attribute::new(table.by_priority.label, table.by_priority.values[priority.index()]),
            by_size(&table.by_size[0]),
            by_size(&table.by_size[1]),
        ],
    }
}

/// Every `(size, priority)` cell of the resolver, track by track.
///
/// Space type is left at its default since it does not affect resolution.
pub fn domain() -> impl Iterator<Item = FacetSelection> {
    Track::ALL.into_iter().flat_map(|track| {
        iproduct!(Size::ALL, track.priorities())
            .map(|(size, priority)| FacetSelection::new(SpaceType::Home, size, priority))
    })
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn any_track() -> impl Strategy<Value = Track> {
        prop_oneof![
            Just(Track::Security),
            Just(Track::Networking),
            Just(Track::Solar),
            Just(Track::Digital),
        ]
    }

    fn any_selection() -> impl Strategy<Value = FacetSelection> {
        (any_track(), 0..4usize, 0..3usize, 0..6usize).prop_map(|(track, p, s, space)| {
            FacetSelection::new(SpaceType::ALL[space], Size::ALL[s], track.priorities()[p])
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn prop_resolve_is_total(selection in any_selection()) {
            let result = resolve(&selection);
            prop_assert!(!result.primary.label.is_empty());
            prop_assert!(!result.primary.value.is_empty());
            for attribute in &result.secondary {
                prop_assert!(!attribute.label.is_empty());
                prop_assert!(!attribute.value.is_empty());
            }
        }

        #[test]
        fn prop_resolve_is_deterministic(selection in any_selection()) {
            prop_assert_eq!(resolve(&selection), resolve(&selection));
        }

        #[test]
        fn prop_track_switch_never_carries_priority(
            selection in any_selection(),
            target in any_track(),
        ) {
            let switched = selection.with_track(target);
            prop_assert_eq!(switched.track(), target);
            prop_assert_eq!(switched.priority().track(), target);
            if target != selection.track() {
                prop_assert_eq!(switched.priority(), target.default_priority());
            }
        }
    }
}
